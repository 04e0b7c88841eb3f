// ==========================================
// 状态分布驾驶舱 - 领域模型层
// ==========================================
// 职责: 定义记录表、分组结果、领域类型
// 红线: 不含文件读取逻辑,不含渲染逻辑
// ==========================================

pub mod breakdown;
pub mod table;
pub mod types;

// 重导出核心类型
pub use breakdown::{
    BreakdownOutcome, CategoryCount, GroupedBreakdown, PercentageShare, ProgressSummary,
    SingleBreakdown,
};
pub use table::{CellValue, RecordTable};
pub use types::{BreakdownKind, MissingValuePolicy};
