//! データ読み込みモジュール
//!
//! 拡張子で形式を判定し、CSV / Excel / JSON を `Table` に変換する。

mod csv;
mod json;
mod spreadsheet;

pub use self::csv::{load_csv, load_csv_from_reader, NA_VALUES};
pub use self::json::{load_json, load_json_str};
pub use self::spreadsheet::load_spreadsheet;

use crate::error::{DeParaError, Result};
use depara_common::Table;
use std::path::Path;
use tracing::debug;

/// 入力ファイル形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Spreadsheet,
    Json,
}

impl InputFormat {
    /// 拡張子から形式を判定
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Spreadsheet),
            "json" => Ok(InputFormat::Json),
            _ => Err(DeParaError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// ファイルを読み込んで表データに変換
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(DeParaError::FileNotFound(path.display().to_string()));
    }

    let format = InputFormat::from_path(path)?;
    let table = match format {
        InputFormat::Csv => load_csv(path)?,
        InputFormat::Spreadsheet => load_spreadsheet(path)?,
        InputFormat::Json => load_json(path)?,
    };

    debug!(
        path = %path.display(),
        ?format,
        rows = table.len(),
        columns = table.columns().len(),
        "table loaded"
    );
    Ok(table)
}

/// 空のヘッダーには pandas と同じ `Unnamed: {列番号}` を付ける
fn header_name(raw: &str, index: usize) -> String {
    let name = raw.trim_start_matches('\u{feff}').trim();
    if name.is_empty() {
        format!("Unnamed: {}", index)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.csv")).unwrap(), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("a.XLSX")).unwrap(), InputFormat::Spreadsheet);
        assert_eq!(InputFormat::from_path(Path::new("a.xls")).unwrap(), InputFormat::Spreadsheet);
        assert_eq!(InputFormat::from_path(Path::new("a.json")).unwrap(), InputFormat::Json);
        assert!(matches!(
            InputFormat::from_path(Path::new("a.txt")),
            Err(DeParaError::UnsupportedFormat(_))
        ));
        assert!(InputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_header_name() {
        assert_eq!(header_name("\u{feff}Problema", 0), "Problema");
        assert_eq!(header_name("  Name ", 1), "Name");
        assert_eq!(header_name("", 2), "Unnamed: 2");
    }
}
