// ==========================================
// 状态分布驾驶舱 - 单元格清洗器
// ==========================================
// 职责: TRIM / NULL 标准化 / 表头规范化
// 输入: calamine 单元格 或 CSV 文本
// 输出: CellValue
// ==========================================

use crate::domain::table::CellValue;
use calamine::Data;
use std::collections::HashMap;

pub struct CellCleaner;

impl CellCleaner {
    /// 清洗 Excel 单元格
    ///
    /// - 整数/浮点 → Number
    /// - 空白文本、空单元格、错误单元格 → Missing
    /// - 其余（布尔、日期等）按显示文本处理
    pub fn clean_excel_cell(&self, cell: &Data) -> CellValue {
        match cell {
            Data::Int(i) => CellValue::number(*i as f64),
            Data::Float(f) => CellValue::number(*f),
            Data::String(s) => CellValue::text(s),
            Data::Empty | Data::Error(_) => CellValue::Missing,
            other => CellValue::text(other.to_string()),
        }
    }

    /// 清洗 CSV 字段（CSV 不做数值推断，原样保留文本）
    pub fn clean_csv_field(&self, value: &str) -> CellValue {
        CellValue::text(value)
    }

    /// 表头规范化
    ///
    /// - TRIM
    /// - 空表头 → "Unnamed: {列下标}"
    /// - 重复表头 → "X.1"、"X.2" ...
    pub fn normalize_headers<I, S>(&self, raw: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut headers = Vec::new();

        for (idx, value) in raw.into_iter().enumerate() {
            let trimmed = value.as_ref().trim();
            let base = if trimmed.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                trimmed.to_string()
            };

            let name = match seen.get_mut(&base) {
                Some(n) => {
                    *n += 1;
                    format!("{}.{}", base, n)
                }
                None => base.clone(),
            };
            seen.entry(base).or_insert(0);
            headers.push(name);
        }

        headers
    }

    /// 整行均为缺失值
    pub fn is_blank_row(&self, row: &[CellValue]) -> bool {
        row.iter().all(CellValue::is_missing)
    }
}
