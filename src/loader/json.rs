//! JSON読み込み
//!
//! オブジェクトの配列を受け付ける。全レコードのキーの和集合が列になり、
//! キーがないレコードは欠損値として扱う。

use crate::error::Result;
use depara_common::{CellValue, Error, Table};
use serde_json::Value;
use std::path::Path;

pub fn load_json(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)?;
    load_json_str(&content)
}

pub fn load_json_str(content: &str) -> Result<Table> {
    let value: Value = serde_json::from_str(content)?;

    let Value::Array(items) = value else {
        return Err(Error::MalformedInput("JSON input must be an array of records".into()).into());
    };

    let mut records = Vec::with_capacity(items.len());
    let mut columns: Vec<String> = Vec::new();

    for (i, item) in items.into_iter().enumerate() {
        let Value::Object(map) = item else {
            return Err(Error::MalformedInput(format!("record {} is not an object", i)).into());
        };
        for key in map.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        records.push(map);
    }

    let mut rows = Vec::with_capacity(records.len());
    for (i, mut map) in records.into_iter().enumerate() {
        let mut row = Vec::with_capacity(columns.len());
        for column in &columns {
            let cell = match map.remove(column) {
                Some(v) => CellValue::try_from(v).map_err(|e| {
                    Error::MalformedInput(format!("record {}, field `{}`: {}", i, column, e))
                })?,
                None => CellValue::Empty,
            };
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(Table::new(columns, rows)?)
}
