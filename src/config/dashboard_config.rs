// ==========================================
// 状态分布驾驶舱 - 配置加载
// ==========================================
// 职责: TOML 配置文件加载、默认值、校验
// 加载顺序: --config → STATUS_DASHBOARD_CONFIG → 用户配置目录 → 内置默认
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::palette::ColorPalette;
use crate::domain::types::MissingValuePolicy;
use crate::i18n::{t, t_with_args};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 配置文件环境变量
pub const CONFIG_ENV: &str = "STATUS_DASHBOARD_CONFIG";

/// 用户配置目录下的子目录名 / 文件名
pub const CONFIG_DIR_NAME: &str = "status-dashboard";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// ==========================================
// 默认值常量
// ==========================================
pub mod defaults {
    // 列名
    pub const STATUS_COLUMN: &str = "ESTADO GX16";
    pub const PARENT_STATUS_COLUMN: &str = "ESTADO";
    pub const MODULE_COLUMN: &str = "MODULO";
    pub const OWNER_COLUMN: &str = "Responsable";

    // 进度口径
    pub const COMPILED_CATEGORY: &str = "COMPILADO";
    pub const DECOMMISSIONED_CATEGORY: &str = "YA NO SE UTILIZA";

    // 缺失值分桶标签
    pub const BUCKET_LABEL: &str = "(sin valor)";

    // 渲染
    pub const LOCALE: &str = "zh-CN";
    pub const PREVIEW_ROWS: usize = 20;
    pub const CHART_WIDTH: u32 = 1000;
    pub const CHART_HEIGHT: u32 = 600;
}

// ==========================================
// DashboardConfig - 根配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub columns: ColumnConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    #[serde(default)]
    pub palette: ColorPalette,

    #[serde(default)]
    pub aggregation: AggregationConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// 通用设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// 界面语言（zh-CN / en / es）
    #[serde(default = "default_locale")]
    pub locale: String,

    /// 数据预览行数（0 表示不显示预览）
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn default_locale() -> String {
    defaults::LOCALE.to_string()
}

fn default_preview_rows() -> usize {
    defaults::PREVIEW_ROWS
}

/// 列名映射
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// 主状态列
    #[serde(default = "default_status_column")]
    pub status: String,

    /// 上级状态列
    #[serde(default = "default_parent_status_column")]
    pub parent_status: String,

    /// 模块列
    #[serde(default = "default_module_column")]
    pub module: String,

    /// 负责人列
    #[serde(default = "default_owner_column")]
    pub owner: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            status: default_status_column(),
            parent_status: default_parent_status_column(),
            module: default_module_column(),
            owner: default_owner_column(),
        }
    }
}

fn default_status_column() -> String {
    defaults::STATUS_COLUMN.to_string()
}

fn default_parent_status_column() -> String {
    defaults::PARENT_STATUS_COLUMN.to_string()
}

fn default_module_column() -> String {
    defaults::MODULE_COLUMN.to_string()
}

fn default_owner_column() -> String {
    defaults::OWNER_COLUMN.to_string()
}

/// 进度口径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// 计入进度的类别
    #[serde(default = "default_progress_categories")]
    pub categories: Vec<String>,

    /// 进度行前缀；未设置时使用本地化文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            categories: default_progress_categories(),
            label: None,
        }
    }
}

fn default_progress_categories() -> Vec<String> {
    vec![
        defaults::DECOMMISSIONED_CATEGORY.to_string(),
        defaults::COMPILED_CATEGORY.to_string(),
    ]
}

/// 缺失值处理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// "drop"（剔除）或 "bucket"（计入 bucket_label）
    #[serde(default = "default_missing_values")]
    pub missing_values: String,

    #[serde(default = "default_bucket_label")]
    pub bucket_label: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            missing_values: default_missing_values(),
            bucket_label: default_bucket_label(),
        }
    }
}

fn default_missing_values() -> String {
    "drop".to_string()
}

fn default_bucket_label() -> String {
    defaults::BUCKET_LABEL.to_string()
}

impl AggregationConfig {
    /// 转换为缺失值策略
    pub fn policy(&self) -> ConfigResult<MissingValuePolicy> {
        match self.missing_values.trim().to_lowercase().as_str() {
            "drop" => Ok(MissingValuePolicy::Drop),
            "bucket" => {
                let label = self.bucket_label.trim();
                if label.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: "aggregation.bucket_label".to_string(),
                        message: t("error.config.empty_bucket_label"),
                    });
                }
                Ok(MissingValuePolicy::Bucket {
                    label: label.to_string(),
                })
            }
            other => Err(ConfigError::InvalidValue {
                key: "aggregation.missing_values".to_string(),
                message: t_with_args("error.config.unknown_policy", &[("value", other)]),
            }),
        }
    }
}

/// 图表渲染
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_chart_width")]
    pub width: u32,

    #[serde(default = "default_chart_height")]
    pub height: u32,

    /// 是否输出独立 SVG 文件
    #[serde(default = "default_write_svg")]
    pub write_svg: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            write_svg: default_write_svg(),
        }
    }
}

fn default_chart_width() -> u32 {
    defaults::CHART_WIDTH
}

fn default_chart_height() -> u32 {
    defaults::CHART_HEIGHT
}

fn default_write_svg() -> bool {
    true
}

// ==========================================
// 加载 / 校验 / 导出
// ==========================================
impl DashboardConfig {
    /// 从指定路径加载
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;

        tracing::info!(path = %path.display(), "已加载配置文件");
        Ok(config)
    }

    /// 从 TOML 文本解析并校验
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: DashboardConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 用户配置目录下的默认路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 按加载顺序查找并加载配置
    ///
    /// # 参数
    /// - explicit: 命令行指定的配置文件（必须存在）
    ///
    /// # 返回
    /// - 找不到任何配置文件时返回内置默认配置
    pub fn resolve(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(value) = std::env::var(CONFIG_ENV) {
            if !value.trim().is_empty() {
                return Self::load(Path::new(value.trim()));
            }
        }

        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load(&path);
            }
        }

        tracing::debug!("未找到配置文件, 使用内置默认配置");
        Ok(Self::default())
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        let columns = [
            ("columns.status", &self.columns.status),
            ("columns.parent_status", &self.columns.parent_status),
            ("columns.module", &self.columns.module),
            ("columns.owner", &self.columns.owner),
        ];
        for (key, value) in columns {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: t("error.config.empty_column"),
                });
            }
        }

        if self.render.width < 200 || self.render.height < 150 {
            let size = format!("{}x{}", self.render.width, self.render.height);
            return Err(ConfigError::InvalidValue {
                key: "render".to_string(),
                message: t_with_args("error.config.chart_too_small", &[("size", size.as_str())]),
            });
        }

        self.aggregation.policy()?;
        Ok(())
    }

    /// 导出为 TOML（用于生成配置模板）
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}
