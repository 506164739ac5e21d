//! CSV読み込み
//!
//! 1行目をヘッダーとして扱う。空フィールドと pandas 既定のNA表記は欠損値になる。

use super::header_name;
use crate::error::Result;
use depara_common::{CellValue, Table};
use std::io::Read;
use std::path::Path;

/// 欠損値として扱う文字列（pandas read_csv の既定値）
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn cell_value(field: &str) -> CellValue {
    if NA_VALUES.contains(&field) {
        CellValue::Empty
    } else {
        CellValue::String(field.to_string())
    }
}

pub fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    load_csv_from_reader(file)
}

pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<Table> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(h, i))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(cell_value).collect());
    }

    Ok(Table::new(columns, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeParaError;

    #[test]
    fn test_load_csv_from_reader() {
        let data = "Motivo__c,Natureza__c,Name\nAtraso,Entrega,Pedido X\nCobrança,,Pedido Y\n";
        let table = load_csv_from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.columns(), &["Motivo__c", "Natureza__c", "Name"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][2], CellValue::from("Pedido X"));
        assert_eq!(table.rows()[1][1], CellValue::Empty);
    }

    #[test]
    fn test_na_markers_are_missing() {
        let data = "Problema\nNA\nnull\n140 - x\n";
        let table = load_csv_from_reader(data.as_bytes()).unwrap();

        assert!(table.rows()[0][0].is_missing());
        assert!(table.rows()[1][0].is_missing());
        assert_eq!(table.rows()[2][0], CellValue::from("140 - x"));
    }

    #[test]
    fn test_quoted_fields() {
        let data = "Problema\n\"Atraso, entrega\"\n";
        let table = load_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.rows()[0][0], CellValue::from("Atraso, entrega"));
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let data = "a,b\n1,2\n3\n";
        let err = load_csv_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DeParaError::Common(depara_common::Error::MalformedInput(_))
        ));
    }
}
