// ==========================================
// 状态分布驾驶舱 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，localized() 给出面向用户的错误消息
// ==========================================

use crate::config::error::ConfigError;
use crate::i18n::t_with_args;
use crate::importer::error::LoadError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 下层错误
    // ==========================================
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    // ==========================================
    // 输出错误
    // ==========================================
    #[error("写入输出失败 ({path}): {message}")]
    OutputError { path: String, message: String },

    #[error("序列化失败: {0}")]
    SerializeError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 面向用户的错误消息（按当前语言）
    pub fn localized(&self) -> String {
        match self {
            ApiError::Load(e) => e.localized(),
            ApiError::Config(e) => e.localized(),
            ApiError::OutputError { path, message } => t_with_args(
                "error.output_failed",
                &[("path", path.as_str()), ("detail", message.as_str())],
            ),
            ApiError::SerializeError(detail) => {
                t_with_args("error.serialize_failed", &[("detail", detail.as_str())])
            }
            ApiError::InternalError(detail) => {
                t_with_args("error.internal", &[("detail", detail.as_str())])
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializeError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_message_is_preserved() {
        let err: ApiError = LoadError::FileNotFound("/tmp/x.xlsx".to_string()).into();
        assert!(matches!(err, ApiError::Load(_)));
        assert!(err.to_string().contains("/tmp/x.xlsx"));
    }

    #[test]
    fn test_localized_load_error_follows_locale() {
        let _guard = crate::i18n::LOCALE_TEST_LOCK.lock().unwrap();
        let err: ApiError = LoadError::MissingHeader.into();

        crate::i18n::set_locale("es");
        let es = err.localized();
        crate::i18n::set_locale("zh-CN");
        let zh = err.localized();

        assert_eq!(es, "El archivo no tiene fila de encabezados");
        assert_eq!(zh, "文件缺少表头行");
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ApiError = parse.into();
        assert!(matches!(err, ApiError::SerializeError(_)));
    }
}
