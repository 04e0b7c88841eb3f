// ==========================================
// 状态分布驾驶舱 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 任一 LoadError 都会终止本次渲染
// ==========================================

use crate::i18n::{t, t_with_args};
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum LoadError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 解析错误 =====
    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("Excel 文件无工作表")]
    EmptyWorkbook,

    #[error("文件缺少表头行")]
    MissingHeader,
}

impl LoadError {
    /// 面向用户的错误消息（按当前语言）
    pub fn localized(&self) -> String {
        match self {
            LoadError::FileNotFound(path) => {
                t_with_args("error.load.file_not_found", &[("path", path.as_str())])
            }
            LoadError::UnsupportedFormat(ext) => {
                t_with_args("error.load.unsupported_format", &[("ext", ext.as_str())])
            }
            LoadError::FileReadError(detail) => {
                t_with_args("error.load.read_failed", &[("detail", detail.as_str())])
            }
            LoadError::ExcelParseError(detail) => {
                t_with_args("error.load.excel_parse", &[("detail", detail.as_str())])
            }
            LoadError::CsvParseError(detail) => {
                t_with_args("error.load.csv_parse", &[("detail", detail.as_str())])
            }
            LoadError::EmptyWorkbook => t("error.load.empty_workbook"),
            LoadError::MissingHeader => t("error.load.missing_header"),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for LoadError {
    fn from(err: calamine::Error) -> Self {
        LoadError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type LoadResult<T> = Result<T, LoadError>;
