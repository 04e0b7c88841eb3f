// ==========================================
// 状态分布驾驶舱 - 核心库
// ==========================================
// 输入: 电子表格（xlsx / xls / csv）
// 输出: 状态分布图表（SVG）、HTML 页面、JSON 报告
// 定位: 单用户、无持久化的统计看板
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录表与分组结果
pub mod domain;

// 引擎层 - 分组统计与进度
pub mod engine;

// 导入层 - 文件解析
pub mod importer;

// 配置层 - 列名、配色、渲染参数
pub mod config;

// 渲染层 - 图表载荷 / SVG / HTML
pub mod render;

// API 层 - 渲染入口
pub mod api;

// 命令行参数
pub mod cli;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 性能埋点
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BreakdownKind, BreakdownOutcome, CellValue, GroupedBreakdown, MissingValuePolicy,
    ProgressSummary, RecordTable, SingleBreakdown,
};

// 引擎
pub use engine::{Aggregator, ProgressCalculator};

// API
pub use api::{DashboardApi, DashboardPage, DashboardReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "状态分布驾驶舱";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
