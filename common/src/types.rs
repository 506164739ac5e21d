//! 型定義
//!
//! CLIとマッチングエンジンで共有される型:
//! - CellValue / Table: 読み込んだ表データ（ファイル形式に依存しない）
//! - ProblemRecord / CauseRecord: フィルタ済みのレコード
//! - MappedCause: 最終出力（Fato Gerador + 対応する Problema + 類似度）

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 出力列名: 対応付けられた Problema
pub const MAPPED_PROBLEM_COLUMN: &str = "problema_mapeado";
/// 出力列名: 類似度
pub const SIMILARITY_COLUMN: &str = "similaridade";

/// データセットの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dataset {
    /// Problemas（マッピング先）
    Problems,
    /// Fatos Geradores（マッピング元）
    Causes,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Problems => write!(f, "problems"),
            Dataset::Causes => write!(f, "causes"),
        }
    }
}

/// セル値
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// 欠損値（空セル・NA）
    #[default]
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// 文字列へ変換（欠損値は None）
    ///
    /// 空文字列は欠損ではなく `Some("")` になる。
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Float(f) if f.is_nan() => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.to_text().is_none()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// JSON値からの変換（配列・オブジェクトは文字列化できないためエラー）
impl TryFrom<serde_json::Value> for CellValue {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(CellValue::Empty),
            Value::Bool(b) => Ok(CellValue::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(CellValue::Int(i)),
                None => Ok(n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Empty)),
            },
            Value::String(s) => Ok(CellValue::String(s)),
            Value::Array(_) => Err(Error::MalformedInput(
                "array value cannot be coerced to string".into(),
            )),
            Value::Object(_) => Err(Error::MalformedInput(
                "object value cannot be coerced to string".into(),
            )),
        }
    }
}

/// 表データ（全行が同じ列数を持つ）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// 列名と行から表を作成（列数が揃っていなければエラー）
    pub fn new<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
            return Err(Error::MalformedInput(format!(
                "row {} has {} cells, expected {}",
                idx,
                row.len(),
                columns.len()
            )));
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名から列番号を取得
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 必須列の列番号を取得（存在しなければ MalformedInput）
    pub fn require_column(&self, name: &str, dataset: Dataset) -> Result<usize> {
        self.column_index(name).ok_or_else(|| {
            Error::MalformedInput(format!(
                "{} dataset has no `{}` column (columns: {})",
                dataset,
                name,
                self.columns.join(", ")
            ))
        })
    }
}

/// Problema レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// 元データの行番号（0始まり、ヘッダー除く）
    pub row: usize,
    /// ラベル（トリムしない元の文字列）
    pub label: String,
}

/// Fato Gerador レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseRecord {
    /// 元データの行番号（0始まり、ヘッダー除く）
    pub row: usize,
    /// Motivo__c
    pub reason: String,
    /// Natureza__c
    pub nature: String,
    /// Name
    pub name: String,
}

/// マッピング結果（Fato Gerador 1件につき1件）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedCause {
    #[serde(flatten)]
    pub cause: CauseRecord,
    /// フィルタ済み Problemas 内のインデックス
    pub problem_index: usize,
    #[serde(rename = "problema_mapeado")]
    pub mapped_problem: String,
    #[serde(rename = "similaridade")]
    pub similarity: f64,
}

/// マッチング設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchOptions {
    /// Problemas のラベル列
    pub problem_field: String,
    /// Fatos Geradores の Motivo 列
    pub reason_field: String,
    /// Fatos Geradores の Natureza 列
    pub nature_field: String,
    /// Fatos Geradores の Name 列
    pub name_field: String,
    /// 除外する Problema ラベルの接頭辞
    pub reserved_prefix: String,
    /// 集計で表示する上位件数
    pub top_n: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            problem_field: "Problema".into(),
            reason_field: "Motivo__c".into(),
            nature_field: "Natureza__c".into(),
            name_field: "Name".into(),
            reserved_prefix: "14".into(),
            top_n: 5,
        }
    }
}

/// マッピングの統計情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    /// 入力された Problemas の件数
    pub problems_total: usize,
    /// フィルタ後の Problemas の件数
    pub problems_kept: usize,
    /// 欠損・空ラベルで除外した件数
    pub problems_missing: usize,
    /// 予約接頭辞で除外した件数
    pub problems_reserved: usize,
    /// 入力された Fatos Geradores の件数
    pub causes_total: usize,
    /// マッピングした件数
    pub causes_mapped: usize,
    /// 欠損フィールドで除外した件数
    pub causes_missing: usize,
    /// 語彙数
    pub vocabulary_size: usize,
    /// 類似度0（語彙の重なりなし）でマッピングされた件数
    pub zero_similarity: usize,
    /// 平均類似度
    pub mean_similarity: f64,
    /// 最も多く対応付けられた Problema（件数降順）
    pub top_problems: Vec<(String, usize)>,
}
