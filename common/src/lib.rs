//! DE-PARA Common Library
//!
//! Fatos Geradores を Problemas にテキスト類似度で対応付けるマッチングエンジン。
//! ファイル入出力は行わない（CLI側の責務）。

pub mod types;
pub mod error;
pub mod filter;
pub mod compose;
pub mod tfidf;
pub mod similarity;
pub mod mapping;
pub mod export;

pub use types::{
    CauseRecord, CellValue, Dataset, MappedCause, MatchOptions, MatchSummary, ProblemRecord, Table,
    MAPPED_PROBLEM_COLUMN, SIMILARITY_COLUMN,
};
pub use error::{Error, Result};
pub use filter::{filter_datasets, is_reserved, FilterReport, Filtered};
pub use compose::compose_text;
pub use tfidf::{tokenize, SparseVector, Vocabulary};
pub use similarity::{cosine, BestMatch, SimilarityIndex};
pub use mapping::{assemble, match_datasets, top_mapped_problems};
