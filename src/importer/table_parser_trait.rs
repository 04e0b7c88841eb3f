// ==========================================
// 状态分布驾驶舱 - 表格解析 Trait
// ==========================================
// 职责: 定义 文件 → RecordTable 的解析接口（不包含实现）
// ==========================================

use crate::domain::table::RecordTable;
use crate::importer::error::LoadResult;
use std::path::Path;

// ==========================================
// TableParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: ExcelParser, CsvParser
pub trait TableParser: Send + Sync {
    /// 解析文件为记录表
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RecordTable): 首行为表头，完全空白的行已跳过
    /// - Err(LoadError): 文件读取错误、格式错误
    fn parse_table(&self, file_path: &Path) -> LoadResult<RecordTable>;
}
