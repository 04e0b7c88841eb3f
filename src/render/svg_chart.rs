// ==========================================
// 状态分布驾驶舱 - SVG 图表渲染
// ==========================================
// 工具: plotters SVGBackend（输出为字符串，便于内嵌 HTML）
// 坐标: 类别轴使用 f64（第 i 个类别占 [i, i+1]），数值轴使用 u64
// ==========================================

use crate::config::dashboard_config::RenderConfig;
use crate::config::palette::HexColor;
use crate::render::chart_payload::{BarLayout, CategoryChart};
use crate::render::error::{RenderError, RenderResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const FONT: &str = "sans-serif";
const MAX_LABEL_CHARS: usize = 18;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult = Result<(), Box<dyn std::error::Error>>;

fn rgb(color: HexColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn category_index(chart: &CategoryChart, category: &str) -> Option<usize> {
    chart.categories.iter().position(|c| c == category)
}

/// 过长的类别名截断显示
fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let head: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    format!("{}…", head)
}

fn label_area_size(categories: &[String]) -> u32 {
    let longest = categories
        .iter()
        .map(|c| c.chars().count().min(MAX_LABEL_CHARS))
        .max()
        .unwrap_or(0);
    (longest as u32 * 7 + 40).clamp(60, 240)
}

fn axis_label_style(h: HPos, v: VPos) -> TextStyle<'static> {
    (FONT, 13).into_font().color(&BLACK).pos(Pos::new(h, v))
}

pub struct SvgChartRenderer {
    width: u32,
    height: u32,
}

impl SvgChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// 渲染为 SVG 文本
    ///
    /// # 返回
    /// - Err(EmptyChart): 没有任何类别（例如分组列全部为空）
    /// - Err(Draw): plotters 绘制失败
    pub fn render(&self, chart: &CategoryChart) -> RenderResult<String> {
        if chart.is_empty() {
            return Err(RenderError::EmptyChart(chart.title.clone()));
        }

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();

            let drawn = match chart.layout {
                BarLayout::Horizontal => draw_horizontal(&root, chart),
                BarLayout::Grouped => draw_vertical(&root, chart, false),
                BarLayout::Stacked => draw_vertical(&root, chart, true),
            };
            drawn
                .and_then(|_| root.present().map_err(|e| e.into()))
                .map_err(|e| RenderError::Draw {
                    chart: chart.kind.to_string(),
                    message: e.to_string(),
                })?;
        }

        tracing::debug!(chart = %chart.kind, bytes = svg.len(), "SVG 渲染完成");
        Ok(svg)
    }
}

// ==========================================
// 水平柱状图
// ==========================================
fn draw_horizontal(root: &Area<'_>, chart: &CategoryChart) -> DrawResult {
    root.fill(&WHITE)?;

    let n = chart.categories.len();
    let max = chart.value_axis_max();
    // 右侧留白给 "xx.x% (n)" 标注
    let x_max = max + max / 4 + 1;

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(label_area_size(&chart.categories))
        .build_cartesian_2d(0u64..x_max, 0f64..n as f64)?;

    ctx.configure_mesh()
        .disable_y_mesh()
        .y_label_formatter(&|_| String::new())
        .x_desc(chart.x_title.as_str())
        .y_desc(chart.y_title.as_str())
        .draw()?;

    for series in &chart.series {
        let color = rgb(series.color);

        ctx.draw_series(series.points.iter().filter_map(|p| {
            let i = category_index(chart, &p.category)? as f64;
            Some(Rectangle::new(
                [(0u64, i + 0.15), (p.value, i + 0.85)],
                color.filled(),
            ))
        }))?;

        ctx.draw_series(series.points.iter().filter_map(|p| {
            let i = category_index(chart, &p.category)? as f64;
            let text = p.text.clone()?;
            Some(
                EmptyElement::at((p.value, i + 0.5))
                    + Text::new(text, (6, 0), axis_label_style(HPos::Left, VPos::Center)),
            )
        }))?;
    }

    // 类别标签画在 y 轴左侧
    for (i, category) in chart.categories.iter().enumerate() {
        let (x, y) = ctx.backend_coord(&(0u64, i as f64 + 0.5));
        root.draw(&Text::new(
            truncate_label(category),
            (x - 8, y),
            axis_label_style(HPos::Right, VPos::Center),
        ))?;
    }

    Ok(())
}

// ==========================================
// 垂直柱状图（分组 / 堆叠）
// ==========================================
fn draw_vertical(root: &Area<'_>, chart: &CategoryChart, stacked: bool) -> DrawResult {
    root.fill(&WHITE)?;

    let n = chart.categories.len();
    let k = chart.series.len().max(1);
    let max = chart.value_axis_max();
    let y_max = max + max / 10 + 1;
    let slot = 0.8 / k as f64;

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (FONT, 22))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..n as f64, 0u64..y_max)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .x_desc(chart.x_title.as_str())
        .y_desc(chart.y_title.as_str())
        .draw()?;

    // 堆叠图每个类别的当前累计高度
    let mut base = vec![0u64; n];

    for (j, series) in chart.series.iter().enumerate() {
        let color = rgb(series.color);
        let mut bars = Vec::with_capacity(series.points.len());
        let mut labels = Vec::new();

        for p in &series.points {
            let Some(i) = category_index(chart, &p.category) else {
                continue;
            };
            let x = i as f64;
            let (x0, x1, y0, y1) = if stacked {
                let y0 = base[i];
                base[i] += p.value;
                (x + 0.15, x + 0.85, y0, y0 + p.value)
            } else {
                let left = x + 0.1 + j as f64 * slot;
                (left, left + slot, 0, p.value)
            };

            bars.push(Rectangle::new([(x0, y0), (x1, y1)], color.filled()));
            if let Some(text) = &p.text {
                labels.push(Text::new(
                    text.clone(),
                    ((x0 + x1) / 2.0, (y0 + y1) / 2),
                    axis_label_style(HPos::Center, VPos::Center),
                ));
            }
        }

        ctx.draw_series(bars)?
            .label(series.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        ctx.draw_series(labels)?;
    }

    if !chart.series.is_empty() {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .draw()?;
    }

    // 类别标签画在 x 轴下方
    for (i, category) in chart.categories.iter().enumerate() {
        let (x, y) = ctx.backend_coord(&(i as f64 + 0.5, 0u64));
        root.draw(&Text::new(
            truncate_label(category),
            (x, y + 6),
            axis_label_style(HPos::Center, VPos::Top),
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::palette::{ColorPalette, GOLDENROD};
    use crate::domain::types::BreakdownKind;
    use crate::render::chart_payload::{BarPoint, BarSeries};

    fn chart(layout: BarLayout) -> CategoryChart {
        CategoryChart {
            kind: BreakdownKind::StatusByModule,
            layout,
            title: "t".to_string(),
            x_title: "x".to_string(),
            y_title: "y".to_string(),
            categories: vec!["VENTAS".to_string(), "STOCK".to_string()],
            series: vec![BarSeries {
                name: "COMPILADO".to_string(),
                color: GOLDENROD,
                points: vec![
                    BarPoint {
                        category: "VENTAS".to_string(),
                        value: 3,
                        text: Some("3".to_string()),
                    },
                    BarPoint {
                        category: "STOCK".to_string(),
                        value: 0,
                        text: None,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_render_each_layout_to_svg() {
        let renderer = SvgChartRenderer::new(800, 500);
        for layout in [BarLayout::Horizontal, BarLayout::Grouped, BarLayout::Stacked] {
            let svg = renderer.render(&chart(layout)).unwrap();
            assert!(svg.contains("<svg"));
            assert!(svg.contains("VENTAS"));
        }
    }

    #[test]
    fn test_render_uses_palette_color() {
        let renderer = SvgChartRenderer::new(800, 500);
        let svg = renderer.render(&chart(BarLayout::Stacked)).unwrap();
        // plotters 以 #RRGGBB 输出填充色
        assert!(svg.to_uppercase().contains(&GOLDENROD.to_string()));
        assert_eq!(ColorPalette::default().color_for("COMPILADO"), GOLDENROD);
    }

    #[test]
    fn test_render_empty_chart_is_error() {
        let mut empty = chart(BarLayout::Grouped);
        empty.categories.clear();
        empty.series.clear();
        let result = SvgChartRenderer::new(800, 500).render(&empty);
        assert!(matches!(result, Err(RenderError::EmptyChart(_))));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("CORTO"), "CORTO");
        let long = "MODULO DE CONTABILIDAD GENERAL";
        let shown = truncate_label(long);
        assert_eq!(shown.chars().count(), MAX_LABEL_CHARS);
        assert!(shown.ends_with('…'));
    }
}
