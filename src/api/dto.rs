// ==========================================
// 状态分布驾驶舱 - 报告数据传输对象
// ==========================================
// 职责: 一次渲染的完整结果（同时作为 dashboard.json 的结构）
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::breakdown::{GroupedBreakdown, ProgressSummary, SingleBreakdown};
use crate::domain::table::RecordTable;
use crate::domain::types::BreakdownKind;
use crate::render::chart_payload::CategoryChart;

// ==========================================
// TablePreview - 数据预览
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    /// 前 N 行（单元格已转为显示文本，缺失为空串）
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl TablePreview {
    /// 截取表格前 limit 行
    pub fn from_table(table: &RecordTable, limit: usize) -> Self {
        Self {
            columns: table.columns().to_vec(),
            rows: table
                .rows()
                .iter()
                .take(limit)
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
            total_rows: table.row_count(),
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_rows
    }
}

// ==========================================
// 面板
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelBody {
    /// 状态总体分布 + 进度行
    StatusDistribution {
        breakdown: SingleBreakdown,
        progress: ProgressSummary,
        progress_label: String,
        chart: CategoryChart,
    },
    /// 双维度排名（模块 / 负责人 / 上级状态）
    Ranking {
        breakdown: GroupedBreakdown,
        chart: CategoryChart,
    },
    /// 缺列告警（该图表不渲染）
    Warning { missing: Vec<String>, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardPanel {
    pub kind: BreakdownKind,
    pub title: String,
    /// 附注（如被剔除的空值行数）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub body: PanelBody,
}

impl DashboardPanel {
    pub fn chart(&self) -> Option<&CategoryChart> {
        match &self.body {
            PanelBody::StatusDistribution { chart, .. } | PanelBody::Ranking { chart, .. } => {
                Some(chart)
            }
            PanelBody::Warning { .. } => None,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.body, PanelBody::Warning { .. })
    }

    /// 进度行，例如 "Avance Total (YA NO SE UTILIZA + COMPILADO): 33.3%"
    pub fn progress_line(&self) -> Option<String> {
        match &self.body {
            PanelBody::StatusDistribution {
                progress,
                progress_label,
                ..
            } => Some(format!("{}: {:.1}%", progress_label, progress.percent)),
            _ => None,
        }
    }
}

// ==========================================
// DashboardReport - 一次成功渲染的报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// 数据来源（文件路径或调用方给出的名称）
    pub source: String,
    pub generated_at: NaiveDateTime,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub preview: TablePreview,
    /// 固定顺序: 状态分布、模块排名、负责人排名、上级状态
    pub panels: Vec<DashboardPanel>,
}

impl DashboardReport {
    pub fn panel(&self, kind: BreakdownKind) -> Option<&DashboardPanel> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DashboardPanel> {
        self.panels.iter().filter(|p| p.is_warning())
    }
}

// ==========================================
// DashboardPage - 一次渲染的页面状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardPage {
    /// 尚未提供文件
    AwaitingUpload { message: String },
    /// 渲染成功（个别面板可能为告警）
    Rendered(Box<DashboardReport>),
    /// 加载失败：只显示错误消息
    Failed {
        source: Option<String>,
        message: String,
    },
}

impl DashboardPage {
    pub fn report(&self) -> Option<&DashboardReport> {
        match self {
            DashboardPage::Rendered(report) => Some(report),
            _ => None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, DashboardPage::Rendered(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DashboardPage::Failed { .. })
    }

    /// 提示或错误消息（渲染成功时为 None）
    pub fn message(&self) -> Option<&str> {
        match self {
            DashboardPage::AwaitingUpload { message } | DashboardPage::Failed { message, .. } => {
                Some(message)
            }
            DashboardPage::Rendered(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;

    #[test]
    fn test_preview_truncation() {
        let table = RecordTable::new(
            vec!["A".to_string()],
            (0..5).map(|i| vec![CellValue::number(i as f64)]).collect(),
        );

        let preview = TablePreview::from_table(&table, 3);
        assert_eq!(preview.rows.len(), 3);
        assert_eq!(preview.total_rows, 5);
        assert!(preview.is_truncated());
        assert_eq!(preview.rows[2], vec!["2".to_string()]);

        assert!(!TablePreview::from_table(&table, 10).is_truncated());
    }

    #[test]
    fn test_page_serializes_with_state_tag() {
        let page = DashboardPage::Failed {
            source: None,
            message: "boom".to_string(),
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["message"], "boom");
        assert_eq!(page.message(), Some("boom"));
        assert!(page.report().is_none());
    }
}
