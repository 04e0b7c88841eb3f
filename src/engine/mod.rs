// ==========================================
// 状态分布驾驶舱 - 引擎层
// ==========================================
// 职责: 分组计数、排名、占比、进度汇总
// 红线: 引擎无状态，不读文件，不修改输入表
// ==========================================

pub mod aggregator;
pub mod progress;

// 重导出核心引擎
pub use aggregator::{percent_of, round_to_tenth, Aggregator};
pub use progress::ProgressCalculator;
