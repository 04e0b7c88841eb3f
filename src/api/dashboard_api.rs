// ==========================================
// 状态分布驾驶舱 - 驾驶舱 API
// ==========================================
// 职责: 一次渲染 = 加载文件 → 四个分组面板 → 页面
// 边界: render_pass 是唯一的错误边界，加载失败只产出错误页
// 架构: API 层 → Importer / Engine / Render
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;

use crate::api::dto::{DashboardPage, DashboardPanel, DashboardReport, PanelBody, TablePreview};
use crate::api::error::{ApiError, ApiResult};
use crate::config::dashboard_config::DashboardConfig;
use crate::domain::breakdown::{BreakdownOutcome, GroupedBreakdown};
use crate::domain::table::RecordTable;
use crate::domain::types::BreakdownKind;
use crate::engine::{Aggregator, ProgressCalculator};
use crate::i18n::{t, t_with_args};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::table_parser_trait::TableParser;
use crate::perf::PerfGuard;
use crate::render::chart_payload::{CategoryChart, ChartPayloadBuilder};
use crate::render::html_page::HtmlPageRenderer;
use crate::render::svg_chart::SvgChartRenderer;

pub const HTML_FILE_NAME: &str = "dashboard.html";
pub const JSON_FILE_NAME: &str = "dashboard.json";

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 无共享可变状态；克隆代价低，可在多个阻塞任务中独立使用
#[derive(Clone)]
pub struct DashboardApi {
    config: Arc<DashboardConfig>,
    aggregator: Aggregator,
    progress: Arc<ProgressCalculator>,
    parser: Arc<dyn TableParser>,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例（使用通用文件解析器）
    ///
    /// # 参数
    /// - config: 驾驶舱配置（列名、进度口径、配色、缺失值策略）
    ///
    /// # 返回
    /// - Err(ApiError::Config): 缺失值策略配置无效
    pub fn new(config: DashboardConfig) -> ApiResult<Self> {
        Self::with_parser(config, Arc::new(UniversalFileParser))
    }

    /// 使用自定义解析器创建（测试或其他数据源）
    pub fn with_parser(config: DashboardConfig, parser: Arc<dyn TableParser>) -> ApiResult<Self> {
        let policy = config.aggregation.policy()?;
        let progress = ProgressCalculator::new(config.progress.categories.clone());

        Ok(Self {
            config: Arc::new(config),
            aggregator: Aggregator::with_policy(policy),
            progress: Arc::new(progress),
            parser,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ==========================================
    // 报告构建
    // ==========================================

    /// 在已加载的表上构建报告
    ///
    /// # 参数
    /// - table: 记录表（只读）
    /// - source: 数据来源描述
    ///
    /// # 返回
    /// 四个面板，顺序固定: 状态分布、模块排名、负责人排名、上级状态
    /// 缺列的面板为告警，其余照常渲染
    pub fn build_report(&self, table: &RecordTable, source: &str) -> DashboardReport {
        let _perf = PerfGuard::new("build_report").rows(table.row_count());

        let panels = BreakdownKind::ALL
            .iter()
            .map(|kind| self.build_panel(*kind, table))
            .collect::<Vec<_>>();

        let warnings = panels.iter().filter(|p| p.is_warning()).count();
        tracing::info!(
            source,
            rows = table.row_count(),
            panels = panels.len(),
            warnings,
            "报告构建完成"
        );

        DashboardReport {
            source: source.to_string(),
            generated_at: chrono::Local::now().naive_local(),
            columns: table.columns().to_vec(),
            row_count: table.row_count(),
            preview: TablePreview::from_table(table, self.config.general.preview_rows),
            panels,
        }
    }

    fn build_panel(&self, kind: BreakdownKind, table: &RecordTable) -> DashboardPanel {
        let columns = &self.config.columns;
        match kind {
            BreakdownKind::Status => self.status_panel(table),
            BreakdownKind::StatusByModule => {
                self.ranking_panel(kind, table, &columns.module, &columns.status)
            }
            BreakdownKind::StatusByOwner => {
                self.ranking_panel(kind, table, &columns.owner, &columns.status)
            }
            BreakdownKind::StatusByParentStatus => {
                self.ranking_panel(kind, table, &columns.parent_status, &columns.status)
            }
        }
    }

    fn status_panel(&self, table: &RecordTable) -> DashboardPanel {
        let column = self.config.columns.status.as_str();
        let title = t_with_args("panel.status.title", &[("column", column)]);

        match self.aggregator.single_dimension(table, column) {
            BreakdownOutcome::Ready { data } => {
                let progress = self.progress.summarize(&data);
                let chart = ChartPayloadBuilder::new(&self.config.palette).status_chart(&data);
                DashboardPanel {
                    kind: BreakdownKind::Status,
                    title,
                    notes: excluded_notes(data.excluded_rows),
                    body: PanelBody::StatusDistribution {
                        breakdown: data,
                        progress,
                        progress_label: self.progress_label(),
                        chart,
                    },
                }
            }
            BreakdownOutcome::MissingColumns { missing } => {
                warning_panel(BreakdownKind::Status, title, missing)
            }
        }
    }

    fn ranking_panel(
        &self,
        kind: BreakdownKind,
        table: &RecordTable,
        primary: &str,
        secondary: &str,
    ) -> DashboardPanel {
        let args = [("primary", primary), ("secondary", secondary)];
        let title = match kind {
            BreakdownKind::StatusByParentStatus => t_with_args("panel.parent_status.title", &args),
            _ => t_with_args("panel.ranking.title", &args),
        };

        match self.aggregator.two_dimension(table, primary, secondary) {
            BreakdownOutcome::Ready { data } => {
                let chart = self.ranking_chart(kind, &data);
                DashboardPanel {
                    kind,
                    title,
                    notes: excluded_notes(data.excluded_rows),
                    body: PanelBody::Ranking {
                        breakdown: data,
                        chart,
                    },
                }
            }
            BreakdownOutcome::MissingColumns { missing } => warning_panel(kind, title, missing),
        }
    }

    fn ranking_chart(&self, kind: BreakdownKind, data: &GroupedBreakdown) -> CategoryChart {
        let builder = ChartPayloadBuilder::new(&self.config.palette);
        match kind {
            BreakdownKind::StatusByParentStatus => builder.parent_status_chart(data),
            _ => builder.ranking_chart(kind, data),
        }
    }

    /// 进度行前缀（配置优先，否则按类别拼接本地化文本）
    fn progress_label(&self) -> String {
        match &self.config.progress.label {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => {
                let categories = self.progress.categories().join(" + ");
                t_with_args("progress.label", &[("categories", categories.as_str())])
            }
        }
    }

    // ==========================================
    // 渲染
    // ==========================================

    /// 加载表格
    pub fn load_table(&self, path: &Path) -> ApiResult<RecordTable> {
        Ok(self.parser.parse_table(path)?)
    }

    /// 一次渲染
    ///
    /// # 参数
    /// - path: 输入文件；None 表示尚未提供文件
    ///
    /// # 返回
    /// 永不返回错误：加载失败转为 Failed 页面（只含错误消息）
    pub fn render_pass(&self, path: Option<&Path>) -> DashboardPage {
        let Some(path) = path else {
            return DashboardPage::AwaitingUpload {
                message: t("page.awaiting_upload"),
            };
        };

        let _perf = PerfGuard::new("render_pass");
        let source = path.display().to_string();

        match self.load_table(path) {
            Ok(table) => DashboardPage::Rendered(Box::new(self.build_report(&table, &source))),
            Err(e) => {
                tracing::error!(source = %source, error = %e, "文件处理失败");
                failed_page(Some(source), &e)
            }
        }
    }

    /// 批量渲染
    ///
    /// 每个文件在独立的阻塞任务中渲染，单个失败不影响其他文件
    ///
    /// # 返回
    /// 与输入顺序一致的 (路径, 页面) 列表
    pub async fn render_batch(&self, paths: Vec<PathBuf>) -> Vec<(PathBuf, DashboardPage)> {
        let tasks = paths.into_iter().map(|path| {
            let api = self.clone();
            async move {
                let task_path = path.clone();
                let joined =
                    tokio::task::spawn_blocking(move || api.render_pass(Some(task_path.as_path()))).await;
                let page = match joined {
                    Ok(page) => page,
                    Err(e) => {
                        let err = ApiError::from(e);
                        tracing::error!(path = %path.display(), error = %err, "渲染任务失败");
                        failed_page(Some(path.display().to_string()), &err)
                    }
                };
                (path, page)
            }
        });

        let results = join_all(tasks).await;
        let failed = results.iter().filter(|(_, page)| page.is_failed()).count();
        tracing::info!(total = results.len(), failed, "批量渲染完成");
        results
    }

    // ==========================================
    // 输出
    // ==========================================

    /// 渲染 HTML 页面
    pub fn render_html(&self, page: &DashboardPage) -> String {
        HtmlPageRenderer::new(SvgChartRenderer::from_config(&self.config.render)).render(page)
    }

    /// 写出 dashboard.html / dashboard.json / 每个图表的 SVG
    ///
    /// # 参数
    /// - page: 渲染结果
    /// - out_dir: 输出目录（不存在时创建）
    /// - json_only: 只写 JSON
    ///
    /// # 返回
    /// 已写出的文件列表
    pub fn write_outputs(
        &self,
        page: &DashboardPage,
        out_dir: &Path,
        json_only: bool,
    ) -> ApiResult<Vec<PathBuf>> {
        std::fs::create_dir_all(out_dir).map_err(|e| output_error(out_dir, e))?;
        let mut written = Vec::new();

        let json_path = out_dir.join(JSON_FILE_NAME);
        let json = serde_json::to_string_pretty(page)?;
        std::fs::write(&json_path, json).map_err(|e| output_error(&json_path, e))?;
        written.push(json_path);

        if json_only {
            return Ok(written);
        }

        let html_path = out_dir.join(HTML_FILE_NAME);
        std::fs::write(&html_path, self.render_html(page))
            .map_err(|e| output_error(&html_path, e))?;
        written.push(html_path);

        if self.config.render.write_svg {
            if let Some(report) = page.report() {
                let renderer = SvgChartRenderer::from_config(&self.config.render);
                for panel in &report.panels {
                    let Some(chart) = panel.chart() else {
                        continue;
                    };
                    match renderer.render(chart) {
                        Ok(svg) => {
                            let svg_path = out_dir.join(format!("{}.svg", panel.kind.slug()));
                            std::fs::write(&svg_path, svg)
                                .map_err(|e| output_error(&svg_path, e))?;
                            written.push(svg_path);
                        }
                        Err(e) => {
                            tracing::warn!(chart = %panel.kind, error = %e, "跳过 SVG 输出");
                        }
                    }
                }
            }
        }

        tracing::info!(out_dir = %out_dir.display(), files = written.len(), "输出已写入");
        Ok(written)
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn warning_panel(kind: BreakdownKind, title: String, missing: Vec<String>) -> DashboardPanel {
    let columns = missing.join(", ");
    let message = t_with_args("warning.missing_columns", &[("columns", columns.as_str())]);
    DashboardPanel {
        kind,
        title,
        notes: Vec::new(),
        body: PanelBody::Warning { missing, message },
    }
}

fn excluded_notes(excluded_rows: u64) -> Vec<String> {
    if excluded_rows == 0 {
        return Vec::new();
    }
    let count = excluded_rows.to_string();
    vec![t_with_args("warning.excluded_rows", &[("count", count.as_str())])]
}

fn failed_page(source: Option<String>, err: &ApiError) -> DashboardPage {
    let error = err.localized();
    DashboardPage::Failed {
        source,
        message: t_with_args("page.load_failed", &[("error", error.as_str())]),
    }
}

fn output_error(path: &Path, err: std::io::Error) -> ApiError {
    ApiError::OutputError {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
