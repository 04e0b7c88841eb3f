// ==========================================
// 状态分布驾驶舱 - 导入层
// ==========================================
// 职责: 外部表格文件 → 内存记录表
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod table_parser_trait;

// 重导出核心类型
pub use data_cleaner::CellCleaner;
pub use error::{LoadError, LoadResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use table_parser_trait::TableParser;
