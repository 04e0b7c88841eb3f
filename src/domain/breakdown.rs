// ==========================================
// 状态分布驾驶舱 - 分组统计结果模型
// ==========================================
// 职责: 定义聚合引擎的输出结构（计数 / 占比 / 排名）
// 红线: 所有结构每次渲染重新计算，不做持久化
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CategoryCount - 类别计数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

// ==========================================
// PercentageShare - 类别占比
// ==========================================
// 百分比保留 1 位小数；总数为 0 时一律为 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageShare {
    pub category: String,
    pub percent: f64,
}

// ==========================================
// SingleBreakdown - 单维度分布
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleBreakdown {
    /// 分组列名
    pub column: String,

    /// 按计数升序排列的类别计数
    pub counts: Vec<CategoryCount>,

    /// 与 counts 顺序一致的占比
    pub shares: Vec<PercentageShare>,

    /// 参与统计的总行数（counts 之和）
    pub total: u64,

    /// 因缺失值被剔除的行数
    pub excluded_rows: u64,
}

impl SingleBreakdown {
    /// 查询某类别计数（不存在返回 0）
    pub fn count_of(&self, category: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// 查询某类别占比（不存在返回 0）
    pub fn percent_of(&self, category: &str) -> f64 {
        self.shares
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.percent)
            .unwrap_or(0.0)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|c| c.category.as_str())
    }
}

// ==========================================
// GroupedBreakdown - 双维度分布
// ==========================================
// counts[i][j] = primary_keys[i] × secondary_keys[j] 的行数（缺省为 0）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedBreakdown {
    pub primary_column: String,
    pub secondary_column: String,

    /// 按总数降序排列的主键（同数保持首次出现顺序）
    pub primary_keys: Vec<String>,

    /// 全表出现过的次键并集（首次出现顺序）
    pub secondary_keys: Vec<String>,

    /// 与 primary_keys 对齐的总数
    pub totals: Vec<u64>,

    /// 稠密计数矩阵
    pub counts: Vec<Vec<u64>>,

    /// 因任一分组列缺失值被剔除的行数
    pub excluded_rows: u64,
}

impl GroupedBreakdown {
    /// 查询 (主键, 次键) 计数；组合不存在返回 0
    pub fn count(&self, primary: &str, secondary: &str) -> u64 {
        let i = self.primary_keys.iter().position(|k| k == primary);
        let j = self.secondary_keys.iter().position(|k| k == secondary);
        match (i, j) {
            (Some(i), Some(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    /// 某个次键在各主键上的计数序列（与 primary_keys 对齐）
    pub fn series(&self, secondary: &str) -> Vec<u64> {
        match self.secondary_keys.iter().position(|k| k == secondary) {
            Some(j) => self.counts.iter().map(|row| row[j]).collect(),
            None => vec![0; self.primary_keys.len()],
        }
    }

    /// 全部计数之和
    pub fn grand_total(&self) -> u64 {
        self.totals.iter().sum()
    }

    /// 展开为完整笛卡尔积 (主键, 次键, 计数)
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, u64)> + '_ {
        self.primary_keys.iter().enumerate().flat_map(move |(i, p)| {
            self.secondary_keys
                .iter()
                .enumerate()
                .map(move |(j, s)| (p.as_str(), s.as_str(), self.counts[i][j]))
        })
    }
}

// ==========================================
// ProgressSummary - 进度汇总
// ==========================================
// 指定类别的（已舍入）占比之和
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub components: Vec<PercentageShare>,
    pub percent: f64,
}

// ==========================================
// BreakdownOutcome - 分组结果（带标签）
// ==========================================
// 缺列不是错误：该分组降级为警告，其余分组照常计算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BreakdownOutcome<T> {
    Ready { data: T },
    MissingColumns { missing: Vec<String> },
}

impl<T> BreakdownOutcome<T> {
    pub fn ready(data: T) -> Self {
        BreakdownOutcome::Ready { data }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BreakdownOutcome::Ready { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            BreakdownOutcome::Ready { data } => Some(data),
            BreakdownOutcome::MissingColumns { .. } => None,
        }
    }

    /// 取出结果（缺列时为 None）
    pub fn into_data(self) -> Option<T> {
        match self {
            BreakdownOutcome::Ready { data } => Some(data),
            BreakdownOutcome::MissingColumns { .. } => None,
        }
    }

    pub fn missing(&self) -> &[String] {
        match self {
            BreakdownOutcome::Ready { .. } => &[],
            BreakdownOutcome::MissingColumns { missing } => missing,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BreakdownOutcome<U> {
        match self {
            BreakdownOutcome::Ready { data } => BreakdownOutcome::Ready { data: f(data) },
            BreakdownOutcome::MissingColumns { missing } => {
                BreakdownOutcome::MissingColumns { missing }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grouped() -> GroupedBreakdown {
        GroupedBreakdown {
            primary_column: "MODULO".to_string(),
            secondary_column: "ESTADO GX16".to_string(),
            primary_keys: vec!["VENTAS".to_string(), "STOCK".to_string()],
            secondary_keys: vec!["COMPILADO".to_string(), "PENDIENTE".to_string()],
            totals: vec![3, 1],
            counts: vec![vec![2, 1], vec![0, 1]],
            excluded_rows: 0,
        }
    }

    #[test]
    fn test_grouped_lookup_defaults_to_zero() {
        let g = sample_grouped();
        assert_eq!(g.count("VENTAS", "COMPILADO"), 2);
        assert_eq!(g.count("STOCK", "COMPILADO"), 0);
        assert_eq!(g.count("NOPE", "COMPILADO"), 0);
        assert_eq!(g.series("PENDIENTE"), vec![1, 1]);
        assert_eq!(g.series("OTRO"), vec![0, 0]);
    }

    #[test]
    fn test_grouped_cells_cover_cross_product() {
        let g = sample_grouped();
        let cells: Vec<_> = g.cells().collect();
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&("STOCK", "COMPILADO", 0)));
        assert_eq!(g.grand_total(), 4);
    }

    #[test]
    fn test_outcome_map_keeps_missing() {
        let o: BreakdownOutcome<u32> = BreakdownOutcome::MissingColumns {
            missing: vec!["MODULO".to_string()],
        };
        let mapped = o.map(|v| v + 1);
        assert!(!mapped.is_ready());
        assert_eq!(mapped.missing(), &["MODULO".to_string()]);
    }
}
