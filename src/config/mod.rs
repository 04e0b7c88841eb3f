// ==========================================
// 状态分布驾驶舱 - 配置层
// ==========================================
// 职责: 列名映射、进度口径、配色表、渲染参数
// 存储: TOML 配置文件（可选）
// ==========================================

pub mod dashboard_config;
pub mod error;
pub mod palette;

// 重导出核心配置
pub use dashboard_config::{
    defaults, AggregationConfig, ColumnConfig, DashboardConfig, GeneralConfig, ProgressConfig,
    RenderConfig, CONFIG_ENV,
};
pub use error::{ConfigError, ConfigResult};
pub use palette::{ColorPalette, HexColor};
