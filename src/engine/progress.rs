// ==========================================
// 状态分布驾驶舱 - 进度汇总
// ==========================================
// 职责: 在单维度分布之上计算"进度"指标
// 口径: 指定类别（已舍入）占比之和，类别不存在按 0 计
// ==========================================

use crate::domain::breakdown::{PercentageShare, ProgressSummary, SingleBreakdown};
use crate::engine::aggregator::round_to_tenth;

pub struct ProgressCalculator {
    categories: Vec<String>,
}

impl ProgressCalculator {
    /// 构造函数
    ///
    /// # 参数
    /// - categories: 计入进度的类别（如 "COMPILADO"、"YA NO SE UTILIZA"）
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// 计算进度汇总
    pub fn summarize(&self, breakdown: &SingleBreakdown) -> ProgressSummary {
        let components: Vec<PercentageShare> = self
            .categories
            .iter()
            .map(|category| PercentageShare {
                category: category.clone(),
                percent: breakdown.percent_of(category),
            })
            .collect();

        // 舍入后的占比相加，再次舍入消除浮点尾差
        let sum: f64 = components.iter().map(|c| c.percent).sum();
        let percent = round_to_tenth(sum);

        tracing::debug!(percent, "进度汇总完成");

        ProgressSummary {
            components,
            percent,
        }
    }
}
