// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// 人类可读文本（默认）
    #[default]
    Text,
    /// 每行一条 JSON 记录
    Json,
}

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info；verbose 时为 debug）
///   例如: RUST_LOG=debug 或 RUST_LOG=status_dashboard=trace,perf=debug
///
/// # 说明
/// 日志写入 stderr，stdout 留给命令输出
///
/// # 示例
/// ```no_run
/// use status_dashboard::logging::{self, LogFormat};
/// logging::init(false, LogFormat::Text);
/// ```
pub fn init(verbose: bool, format: LogFormat) {
    let filter = build_filter(if verbose { "debug" } else { "info" });

    match format {
        LogFormat::Text => {
            let _ = fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = fmt()
                .json()
                .with_env_filter(filter)
                .with_current_span(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
