// ==========================================
// 状态分布驾驶舱 - 图表数据载荷
// ==========================================
// 职责: 分组结果 → 渲染器可直接使用的结构化载荷
// 内容: 类别顺序、数值、标注文本、系列颜色
// ==========================================

use crate::config::palette::{ColorPalette, HexColor};
use crate::domain::breakdown::{GroupedBreakdown, SingleBreakdown};
use crate::domain::types::BreakdownKind;
use crate::i18n::{t, t_with_args};
use serde::{Deserialize, Serialize};

// ==========================================
// 图表布局
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarLayout {
    Horizontal, // 水平柱状图（单系列，逐柱着色）
    Grouped,    // 分组柱状图（每个次键一个系列）
    Stacked,    // 堆叠柱状图（柱内显示数量）
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub category: String,
    pub value: u64,
    /// 柱上/柱内标注
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub name: String,
    pub color: HexColor,
    pub points: Vec<BarPoint>,
}

// ==========================================
// CategoryChart - 类别柱状图载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryChart {
    pub kind: BreakdownKind,
    pub layout: BarLayout,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// 类别轴顺序
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

impl CategoryChart {
    /// 数值轴上限（堆叠图取每个类别的累计值）
    pub fn value_axis_max(&self) -> u64 {
        match self.layout {
            BarLayout::Stacked => self
                .categories
                .iter()
                .map(|category| {
                    self.series
                        .iter()
                        .flat_map(|s| s.points.iter())
                        .filter(|p| &p.category == category)
                        .map(|p| p.value)
                        .sum::<u64>()
                })
                .max()
                .unwrap_or(0),
            BarLayout::Horizontal | BarLayout::Grouped => self
                .series
                .iter()
                .flat_map(|s| s.points.iter())
                .map(|p| p.value)
                .max()
                .unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ==========================================
// ChartPayloadBuilder - 载荷构造器
// ==========================================
pub struct ChartPayloadBuilder<'a> {
    palette: &'a ColorPalette,
}

impl<'a> ChartPayloadBuilder<'a> {
    pub fn new(palette: &'a ColorPalette) -> Self {
        Self { palette }
    }

    /// 状态总体分布 → 水平柱状图
    ///
    /// 每个类别一个系列（颜色取自配色表），标注 "xx.x% (n)"
    pub fn status_chart(&self, breakdown: &SingleBreakdown) -> CategoryChart {
        let series = breakdown
            .counts
            .iter()
            .zip(breakdown.shares.iter())
            .map(|(count, share)| BarSeries {
                name: count.category.clone(),
                color: self.palette.color_for(&count.category),
                points: vec![BarPoint {
                    category: count.category.clone(),
                    value: count.count,
                    text: Some(format!("{:.1}% ({})", share.percent, count.count)),
                }],
            })
            .collect();

        CategoryChart {
            kind: BreakdownKind::Status,
            layout: BarLayout::Horizontal,
            title: t_with_args("chart.status.title", &[("column", breakdown.column.as_str())]),
            x_title: t("chart.axis.count"),
            y_title: breakdown.column.clone(),
            categories: breakdown.counts.iter().map(|c| c.category.clone()).collect(),
            series,
        }
    }

    /// 双维度排名 → 分组柱状图（模块 / 负责人）
    pub fn ranking_chart(&self, kind: BreakdownKind, breakdown: &GroupedBreakdown) -> CategoryChart {
        CategoryChart {
            kind,
            layout: BarLayout::Grouped,
            title: t_with_args(
                "chart.ranking.title",
                &[
                    ("primary", breakdown.primary_column.as_str()),
                    ("secondary", breakdown.secondary_column.as_str()),
                ],
            ),
            x_title: breakdown.primary_column.clone(),
            y_title: t("chart.axis.count"),
            categories: breakdown.primary_keys.clone(),
            series: self.grouped_series(breakdown, |_| None),
        }
    }

    /// 上级状态 → 堆叠柱状图，柱内显示数量（0 不显示）
    pub fn parent_status_chart(&self, breakdown: &GroupedBreakdown) -> CategoryChart {
        CategoryChart {
            kind: BreakdownKind::StatusByParentStatus,
            layout: BarLayout::Stacked,
            title: t_with_args(
                "chart.parent_status.title",
                &[
                    ("primary", breakdown.primary_column.as_str()),
                    ("secondary", breakdown.secondary_column.as_str()),
                ],
            ),
            x_title: breakdown.primary_column.clone(),
            y_title: t_with_args(
                "chart.axis.stacked_count",
                &[("column", breakdown.secondary_column.as_str())],
            ),
            categories: breakdown.primary_keys.clone(),
            series: self.grouped_series(breakdown, |v| (v > 0).then(|| v.to_string())),
        }
    }

    /// 每个次键一个系列；点位覆盖全部主键（缺省组合为 0）
    fn grouped_series(
        &self,
        breakdown: &GroupedBreakdown,
        label: impl Fn(u64) -> Option<String>,
    ) -> Vec<BarSeries> {
        breakdown
            .secondary_keys
            .iter()
            .enumerate()
            .map(|(j, secondary)| BarSeries {
                name: secondary.clone(),
                color: self.palette.color_for(secondary),
                points: breakdown
                    .primary_keys
                    .iter()
                    .zip(breakdown.counts.iter())
                    .map(|(primary, row)| BarPoint {
                        category: primary.clone(),
                        value: row[j],
                        text: label(row[j]),
                    })
                    .collect(),
            })
            .collect()
    }
}
