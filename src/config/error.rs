// ==========================================
// 状态分布驾驶舱 - 配置错误类型
// ==========================================

use crate::i18n::t_with_args;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("颜色格式错误: {0}（期望 #RRGGBB）")]
    InvalidColor(String),

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("配置序列化失败: {0}")]
    SerializeError(String),
}

impl ConfigError {
    /// 面向用户的错误消息（按当前语言）
    pub fn localized(&self) -> String {
        match self {
            ConfigError::ReadError { path, message } => t_with_args(
                "error.config.read_failed",
                &[("path", path.as_str()), ("detail", message.as_str())],
            ),
            ConfigError::ParseError { path, message } => t_with_args(
                "error.config.parse_failed",
                &[("path", path.as_str()), ("detail", message.as_str())],
            ),
            ConfigError::InvalidColor(value) => {
                t_with_args("error.config.invalid_color", &[("value", value.as_str())])
            }
            ConfigError::InvalidValue { key, message } => t_with_args(
                "error.config.invalid_value",
                &[("key", key.as_str()), ("detail", message.as_str())],
            ),
            ConfigError::SerializeError(detail) => {
                t_with_args("error.config.serialize_failed", &[("detail", detail.as_str())])
            }
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
