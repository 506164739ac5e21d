//! エラー型定義

use crate::types::Dataset;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 必須フィールドが欠損（レコード単位。呼び出し側で除外される）
    #[error("Missing field `{field}` at row {row}")]
    MissingField { row: usize, field: String },

    #[error("Empty dataset after filtering: {0}")]
    EmptyDataset(Dataset),

    #[error("Empty vocabulary: no usable terms in the corpus")]
    EmptyVocabulary,

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
