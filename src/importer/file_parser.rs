// ==========================================
// 状态分布驾驶舱 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 约定: 首个工作表，首行为表头
// ==========================================

use crate::domain::table::{CellValue, RecordTable};
use crate::importer::data_cleaner::CellCleaner;
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::table_parser_trait::TableParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// 小写扩展名（无扩展名返回空串）
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> LoadResult<()> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl TableParser for CsvParser {
    fn parse_table(&self, file_path: &Path) -> LoadResult<RecordTable> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(LoadError::UnsupportedFormat(ext));
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let cleaner = CellCleaner;

        // 读取表头
        let raw_headers = reader.headers()?.clone();
        if raw_headers.is_empty() {
            return Err(LoadError::MissingHeader);
        }
        let headers = cleaner.normalize_headers(raw_headers.iter());

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|value| cleaner.clean_csv_field(value))
                .collect();

            // 跳过完全空白的行
            if cleaner.is_blank_row(&row) {
                continue;
            }

            rows.push(row);
        }

        tracing::info!(
            file = %path.display(),
            columns = headers.len(),
            rows = rows.len(),
            "CSV 解析完成"
        );

        Ok(RecordTable::new(headers, rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl TableParser for ExcelParser {
    fn parse_table(&self, file_path: &Path) -> LoadResult<RecordTable> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "xlsx" && ext != "xls" {
            return Err(LoadError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件（按扩展名自动识别 xlsx / xls）
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names.first().cloned().ok_or(LoadError::EmptyWorkbook)?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let cleaner = CellCleaner;

        // 提取表头（第一行）；空工作表得到无列的空表，由各面板给出缺列告警
        let mut rows_iter = range.rows();
        let Some(header_row) = rows_iter.next() else {
            tracing::warn!(file = %path.display(), sheet = %sheet_name, "工作表为空");
            return Ok(RecordTable::new(Vec::new(), Vec::new()));
        };
        let headers = cleaner.normalize_headers(header_row.iter().map(|cell| cell.to_string()));

        // 读取数据行
        let mut rows = Vec::new();
        for data_row in rows_iter {
            let row: Vec<CellValue> = data_row
                .iter()
                .map(|cell| cleaner.clean_excel_cell(cell))
                .collect();

            // 跳过完全空白的行
            if cleaner.is_blank_row(&row) {
                continue;
            }

            rows.push(row);
        }

        tracing::info!(
            file = %path.display(),
            sheet = %sheet_name,
            columns = headers.len(),
            rows = rows.len(),
            "Excel 解析完成"
        );

        Ok(RecordTable::new(headers, rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 判断扩展名是否受支持
    pub fn is_supported<P: AsRef<Path>>(file_path: P) -> bool {
        matches!(
            extension_of(file_path.as_ref()).as_str(),
            "csv" | "xlsx" | "xls"
        )
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> LoadResult<RecordTable> {
        let path = file_path.as_ref();
        let ext = extension_of(path);

        match ext.as_str() {
            "csv" => CsvParser.parse_table(path),
            "xlsx" | "xls" => ExcelParser.parse_table(path),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

impl TableParser for UniversalFileParser {
    fn parse_table(&self, file_path: &Path) -> LoadResult<RecordTable> {
        self.parse(file_path)
    }
}
