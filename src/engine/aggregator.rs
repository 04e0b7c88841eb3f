// ==========================================
// 状态分布驾驶舱 - 聚合引擎
// ==========================================
// 职责: 记录表 → 计数 / 排名 / 占比
// 输入: RecordTable + 1~2 个分组列名
// 输出: BreakdownOutcome（缺列时降级为警告，不报错）
// ==========================================
// 排序规则:
// - 单维度: 按计数升序
// - 双维度: 主键按总数降序，同数保持首次出现顺序
// ==========================================

mod core;


pub use self::core::{percent_of, round_to_tenth, Aggregator};
