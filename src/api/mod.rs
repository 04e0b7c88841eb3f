// ==========================================
// 状态分布驾驶舱 - API 层
// ==========================================
// 职责: 提供渲染入口, 供命令行调用
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, HTML_FILE_NAME, JSON_FILE_NAME};
pub use dto::{DashboardPage, DashboardPanel, DashboardReport, PanelBody, TablePreview};
pub use error::{ApiError, ApiResult};
