use crate::domain::breakdown::{
    BreakdownOutcome, CategoryCount, GroupedBreakdown, PercentageShare, SingleBreakdown,
};
use crate::domain::table::{CellValue, RecordTable};
use crate::domain::types::MissingValuePolicy;
use crate::perf::PerfGuard;
use std::collections::HashMap;

// ==========================================
// 百分比计算
// ==========================================

/// 保留 1 位小数（恰好居中时取偶数位，与 "{:.1}" 显示一致）
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// 计算占比并保留 1 位小数
///
/// total = 0 时返回 0（不做除零）
pub fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to_tenth(count as f64 / total as f64 * 100.0)
}

// ==========================================
// KeyIndex - 按首次出现顺序编号的键表
// ==========================================
#[derive(Default)]
struct KeyIndex {
    positions: HashMap<String, usize>,
    keys: Vec<String>,
}

impl KeyIndex {
    fn intern(&mut self, key: String) -> usize {
        if let Some(&idx) = self.positions.get(&key) {
            return idx;
        }
        let idx = self.keys.len();
        self.positions.insert(key.clone(), idx);
        self.keys.push(key);
        idx
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

// ==========================================
// Aggregator - 聚合引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    policy: MissingValuePolicy,
}

impl Aggregator {
    /// 构造函数（缺失值默认剔除）
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定缺失值策略
    pub fn with_policy(policy: MissingValuePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MissingValuePolicy {
        &self.policy
    }

    /// 单元格 → 分组键；None 表示该行被剔除
    fn key_of(&self, cell: &CellValue) -> Option<String> {
        match (cell.category_key(), &self.policy) {
            (Some(key), _) => Some(key),
            (None, MissingValuePolicy::Drop) => None,
            (None, MissingValuePolicy::Bucket { label }) => Some(label.clone()),
        }
    }

    // ==========================================
    // 单维度分布
    // ==========================================

    /// 统计单列各类别的行数与占比
    ///
    /// # 参数
    /// - table: 记录表
    /// - column: 分组列名
    ///
    /// # 返回
    /// - Ready: 按计数升序（同数保持首次出现顺序），附带占比
    /// - MissingColumns: 列不存在
    pub fn single_dimension(
        &self,
        table: &RecordTable,
        column: &str,
    ) -> BreakdownOutcome<SingleBreakdown> {
        let _perf = PerfGuard::new("single_dimension").rows(table.row_count());

        let values = match table.column_values(column) {
            Some(values) => values,
            None => {
                tracing::warn!(column, "分组列不存在, 跳过单维度统计");
                return BreakdownOutcome::MissingColumns {
                    missing: vec![column.to_string()],
                };
            }
        };

        let mut index = KeyIndex::default();
        let mut tally: Vec<u64> = Vec::new();
        let mut excluded_rows = 0u64;

        for cell in values {
            match self.key_of(cell) {
                Some(key) => {
                    let idx = index.intern(key);
                    if idx == tally.len() {
                        tally.push(0);
                    }
                    tally[idx] += 1;
                }
                None => excluded_rows += 1,
            }
        }

        let mut counts: Vec<CategoryCount> = index
            .keys
            .into_iter()
            .zip(tally)
            .map(|(category, count)| CategoryCount { category, count })
            .collect();

        // 稳定排序：同数保持首次出现顺序
        counts.sort_by_key(|c| c.count);

        let total: u64 = counts.iter().map(|c| c.count).sum();
        let shares = counts
            .iter()
            .map(|c| PercentageShare {
                category: c.category.clone(),
                percent: percent_of(c.count, total),
            })
            .collect();

        tracing::debug!(
            column,
            categories = counts.len(),
            total,
            excluded_rows,
            "单维度统计完成"
        );

        BreakdownOutcome::ready(SingleBreakdown {
            column: column.to_string(),
            counts,
            shares,
            total,
            excluded_rows,
        })
    }

    // ==========================================
    // 双维度分布
    // ==========================================

    /// 按 (主列, 次列) 统计行数，并按主键总数降序排名
    ///
    /// # 返回
    /// - Ready: 完整 主键 × 次键 矩阵（缺省组合为 0）
    /// - MissingColumns: 列出所有缺失的列
    pub fn two_dimension(
        &self,
        table: &RecordTable,
        primary_column: &str,
        secondary_column: &str,
    ) -> BreakdownOutcome<GroupedBreakdown> {
        let _perf = PerfGuard::new("two_dimension").rows(table.row_count());

        let (Some(pi), Some(si)) = (
            table.column_index(primary_column),
            table.column_index(secondary_column),
        ) else {
            let missing = table.missing_columns(&[primary_column, secondary_column]);
            tracing::warn!(?missing, "分组列不存在, 跳过双维度统计");
            return BreakdownOutcome::MissingColumns { missing };
        };

        let mut primaries = KeyIndex::default();
        let mut secondaries = KeyIndex::default();
        let mut pairs: HashMap<(usize, usize), u64> = HashMap::new();
        let mut excluded_rows = 0u64;

        for row in table.rows() {
            let (Some(p), Some(s)) = (self.key_of(&row[pi]), self.key_of(&row[si])) else {
                excluded_rows += 1;
                continue;
            };
            let p = primaries.intern(p);
            let s = secondaries.intern(s);
            *pairs.entry((p, s)).or_insert(0) += 1;
        }

        // 稠密矩阵（首次出现顺序）
        let width = secondaries.len();
        let mut matrix = vec![vec![0u64; width]; primaries.len()];
        for ((p, s), count) in pairs {
            matrix[p][s] = count;
        }
        let raw_totals: Vec<u64> = matrix.iter().map(|row| row.iter().sum()).collect();

        // 主键排名：总数降序，稳定排序保留首次出现顺序
        let mut order: Vec<usize> = (0..primaries.len()).collect();
        order.sort_by(|a, b| raw_totals[*b].cmp(&raw_totals[*a]));

        let primary_keys = order.iter().map(|&i| primaries.keys[i].clone()).collect();
        let totals = order.iter().map(|&i| raw_totals[i]).collect();
        let counts = order.iter().map(|&i| matrix[i].clone()).collect();

        tracing::debug!(
            primary_column,
            secondary_column,
            primary_keys = primaries.len(),
            secondary_keys = width,
            excluded_rows,
            "双维度统计完成"
        );

        BreakdownOutcome::ready(GroupedBreakdown {
            primary_column: primary_column.to_string(),
            secondary_column: secondary_column.to_string(),
            primary_keys,
            secondary_keys: secondaries.keys,
            totals,
            counts,
            excluded_rows,
        })
    }
}
