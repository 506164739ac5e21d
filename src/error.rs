use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeParaError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0}（csv / xlsx / xls / ods / json に対応）")]
    UnsupportedFormat(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] depara_common::Error),
}

impl DeParaError {
    /// マッチング処理そのものの失敗（空データ・空語彙・不正入力）か
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            DeParaError::Common(
                depara_common::Error::EmptyDataset(_)
                    | depara_common::Error::EmptyVocabulary
                    | depara_common::Error::MalformedInput(_)
            )
        )
    }
}

pub type Result<T> = std::result::Result<T, DeParaError>;
