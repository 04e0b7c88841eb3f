// ==========================================
// 状态分布驾驶舱 - 渲染错误类型
// ==========================================

use crate::i18n::t_with_args;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("图表绘制失败 ({chart}): {message}")]
    Draw { chart: String, message: String },

    #[error("图表无数据: {0}")]
    EmptyChart(String),
}

impl RenderError {
    /// 面向用户的错误消息（按当前语言）
    pub fn localized(&self) -> String {
        match self {
            RenderError::Draw { chart, message } => t_with_args(
                "error.render.draw_failed",
                &[("chart", chart.as_str()), ("detail", message.as_str())],
            ),
            RenderError::EmptyChart(chart) => {
                t_with_args("error.render.empty_chart", &[("chart", chart.as_str())])
            }
        }
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
