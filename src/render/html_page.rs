// ==========================================
// 状态分布驾驶舱 - HTML 页面
// ==========================================
// 职责: DashboardPage → 单文件 HTML（图表以内嵌 SVG 呈现）
// 页面: 标题 → 数据预览 → 各面板（图表或告警）→ 进度行
// ==========================================

use std::fmt::Write as _;

use crate::api::dto::{DashboardPage, DashboardPanel, DashboardReport, PanelBody, TablePreview};
use crate::config::palette::GOLDENROD;
use crate::i18n::{current_locale, t, t_with_args};
use crate::render::svg_chart::SvgChartRenderer;

const STYLE: &str = "\
body{font-family:sans-serif;margin:24px;color:#222}\
h1{margin-bottom:4px}\
.meta{color:#666;font-size:13px}\
.preview{overflow-x:auto;max-height:420px}\
table{border-collapse:collapse;font-size:13px}\
th,td{border:1px solid #ddd;padding:4px 8px;text-align:left}\
th{background:#f4f4f4}\
.panel{margin-top:32px}\
.warning{background:#fff4e5;border-left:4px solid #ff9800;padding:8px 12px}\
.error{background:#fdecea;border-left:4px solid #d32f2f;padding:8px 12px}\
.info{background:#e8f4fd;border-left:4px solid #1976d2;padding:8px 12px}\
.note{color:#666;font-size:12px}\
.progress{text-align:center;font-size:20px;font-weight:bold}";

/// HTML 转义
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub struct HtmlPageRenderer {
    charts: SvgChartRenderer,
}

impl HtmlPageRenderer {
    pub fn new(charts: SvgChartRenderer) -> Self {
        Self { charts }
    }

    /// 渲染整页
    ///
    /// 单个图表绘制失败不会中断页面，该面板改为显示错误说明
    pub fn render(&self, page: &DashboardPage) -> String {
        let mut body = String::new();
        let _ = writeln!(body, "<h1>{}</h1>", escape_html(&t("page.title")));

        match page {
            DashboardPage::AwaitingUpload { message } => {
                let _ = writeln!(body, "<div class=\"info\">{}</div>", escape_html(message));
            }
            DashboardPage::Failed { message, .. } => {
                let _ = writeln!(body, "<div class=\"error\">{}</div>", escape_html(message));
            }
            DashboardPage::Rendered(report) => self.render_report(&mut body, report),
        }

        format!(
            "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape_html(&current_locale()),
            escape_html(&t("page.title")),
            STYLE,
            body
        )
    }

    fn render_report(&self, out: &mut String, report: &DashboardReport) {
        let generated = report.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
        let _ = writeln!(
            out,
            "<p class=\"meta\">{} · {}</p>",
            escape_html(&t_with_args("page.generated_at", &[("time", generated.as_str())])),
            escape_html(&report.source)
        );

        render_preview(out, &report.preview);

        for panel in &report.panels {
            self.render_panel(out, panel);
        }
    }

    fn render_panel(&self, out: &mut String, panel: &DashboardPanel) {
        let _ = writeln!(
            out,
            "<section class=\"panel\" id=\"{}\">\n<h2>{}</h2>",
            panel.kind.slug(),
            escape_html(&panel.title)
        );

        match panel.chart() {
            Some(chart) => match self.charts.render(chart) {
                Ok(svg) => {
                    let _ = writeln!(out, "<div class=\"chart\">{}</div>", svg);
                }
                Err(e) => {
                    tracing::warn!(chart = %panel.kind, error = %e, "图表绘制失败, 以说明文字代替");
                    let _ = writeln!(out, "<div class=\"warning\">{}</div>", escape_html(&e.localized()));
                }
            },
            None => {
                if let PanelBody::Warning { message, .. } = &panel.body {
                    let _ = writeln!(out, "<div class=\"warning\">{}</div>", escape_html(message));
                }
            }
        }

        if let Some(line) = panel.progress_line() {
            let _ = writeln!(
                out,
                "<p class=\"progress\" style=\"color:{}\">{}</p>",
                GOLDENROD,
                escape_html(&line)
            );
        }

        for note in &panel.notes {
            let _ = writeln!(out, "<p class=\"note\">{}</p>", escape_html(note));
        }

        out.push_str("</section>\n");
    }
}

fn render_preview(out: &mut String, preview: &TablePreview) {
    if preview.rows.is_empty() {
        return;
    }

    let _ = writeln!(
        out,
        "<section class=\"preview\">\n<h2>{}</h2>\n<table>\n<thead><tr>",
        escape_html(&t("page.data_preview"))
    );
    for column in &preview.columns {
        let _ = write!(out, "<th>{}</th>", escape_html(column));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &preview.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape_html(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");

    if preview.is_truncated() {
        let shown = preview.rows.len().to_string();
        let total = preview.total_rows.to_string();
        let _ = writeln!(
            out,
            "<p class=\"note\">{}</p>",
            escape_html(&t_with_args(
                "page.preview_truncated",
                &[("shown", shown.as_str()), ("total", total.as_str())]
            ))
        );
    }
    out.push_str("</section>\n");
}
