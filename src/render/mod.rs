// ==========================================
// 状态分布驾驶舱 - 渲染层
// ==========================================
// 职责: 分组结果 → 图表载荷 → SVG → HTML 页面
// 红线: 不读取文件，不做统计
// ==========================================

pub mod chart_payload;
pub mod error;
pub mod html_page;
pub mod svg_chart;

pub use chart_payload::{BarLayout, BarPoint, BarSeries, CategoryChart, ChartPayloadBuilder};
pub use error::{RenderError, RenderResult};
pub use html_page::{escape_html, HtmlPageRenderer};
pub use svg_chart::SvgChartRenderer;
