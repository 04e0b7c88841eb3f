// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）、英文、西班牙文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 3] = ["zh-CN", "en", "es"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" / "en" / "es"，也接受 "es-ES"、"en_US" 等写法）
///
/// # 返回
/// 实际生效的语言代码（不支持的语言回退为 zh-CN）
pub fn set_locale(locale: &str) -> &'static str {
    let resolved = normalize_locale(locale);
    rust_i18n::set_locale(resolved);
    resolved
}

/// 语言代码规范化
pub fn normalize_locale(locale: &str) -> &'static str {
    let lower = locale.trim().replace('_', "-").to_lowercase();
    if lower.starts_with("zh") {
        "zh-CN"
    } else if lower.starts_with("es") {
        "es"
    } else if lower.starts_with("en") {
        "en"
    } else {
        SUPPORTED_LOCALES[0]
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use status_dashboard::i18n::t;
/// let msg = t("page.title");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use status_dashboard::i18n::t_with_args;
/// let msg = t_with_args("error.load.file_not_found", &[("path", "/tmp/test.xlsx")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
// 切换语言的测试都需持有此锁。
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");

        assert_eq!(set_locale("es-ES"), "es");
        assert_eq!(current_locale(), "es");

        assert_eq!(set_locale("fr"), "zh-CN");

        // 恢复默认语言
        set_locale("zh-CN");
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("en_US"), "en");
        assert_eq!(normalize_locale(" ES "), "es");
        assert_eq!(normalize_locale("zh"), "zh-CN");
        assert_eq!(normalize_locale(""), "zh-CN");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(t("error.load.missing_header"), "文件缺少表头行");

        set_locale("en");
        assert_eq!(t("error.load.missing_header"), "The file has no header row");

        set_locale("es");
        assert_eq!(t("error.load.missing_header"), "El archivo no tiene fila de encabezados");

        set_locale("zh-CN");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("es");
        let msg = t_with_args("progress.label", &[("categories", "YA NO SE UTILIZA + COMPILADO")]);
        assert_eq!(msg, "Avance Total (YA NO SE UTILIZA + COMPILADO)");

        set_locale("en");
        let msg = t_with_args("error.load.file_not_found", &[("path", "/tmp/test.xlsx")]);
        assert!(msg.contains("/tmp/test.xlsx"));
        assert!(msg.contains("File not found"));

        set_locale("zh-CN");
    }
}
