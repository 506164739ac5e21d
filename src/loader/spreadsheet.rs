//! Excel / ODS 読み込み（calamine）
//!
//! 先頭シートの1行目をヘッダーとして扱う。

use super::header_name;
use crate::error::{DeParaError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;
use depara_common::{CellValue, Table};
use std::path::Path;

/// i64 に正確に収まる整数値の上限（2^53）
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// 日時セルの表示形式
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// セル値を変換
///
/// 整数値の浮動小数点数は整数として扱う（"140.0" ではなく "140" にする）。
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INT => CellValue::Int(*f as i64),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => CellValue::String(format_datetime(&d)),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}

pub fn load_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DeParaError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DeParaError::SpreadsheetRead(format!("{}: シートがありません", path.display())))?
        .map_err(|e| DeParaError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(i, cell)| header_name(&cell_value(cell).to_string(), i))
            .collect(),
        None => Vec::new(),
    };

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        // 空行は読み飛ばす
        .filter(|row| row.iter().any(|c| !c.is_missing()))
        .collect();

    Ok(Table::new(columns, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversion() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_value(&Data::Float(140.0)), CellValue::Int(140));
        assert_eq!(cell_value(&Data::Float(1.25)), CellValue::Float(1.25));
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(cell_value(&Data::String("Atraso".into())), CellValue::from("Atraso"));
        assert_eq!(cell_value(&Data::Bool(false)), CellValue::Bool(false));
    }

    #[test]
    fn test_format_datetime() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(14, 7, 9))
            .unwrap();
        assert_eq!(format_datetime(&dt), "2024-03-05 14:07:09");
    }
}
