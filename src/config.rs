use crate::error::{DeParaError, Result};
use depara_common::MatchOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 列名・予約接頭辞・集計件数
    pub matching: MatchOptions,
    /// プレビュー表示する行数
    pub preview_rows: usize,
    /// 出力Excelのシート名
    pub sheet_name: String,
    /// 出力ファイル名（拡張子なし）
    pub output_stem: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchOptions::default(),
            preview_rows: 10,
            sheet_name: "Mapeamento".into(),
            output_stem: "mapeamento_final".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| DeParaError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DeParaError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("depara").join("config.json"))
    }

    /// CLI引数で一時的に上書き
    pub fn with_overrides(
        mut self,
        reserved_prefix: Option<String>,
        top_n: Option<usize>,
        preview_rows: Option<usize>,
    ) -> Self {
        if let Some(prefix) = reserved_prefix {
            self.matching.reserved_prefix = prefix;
        }
        if let Some(n) = top_n {
            self.matching.top_n = n;
        }
        if let Some(n) = preview_rows {
            self.preview_rows = n;
        }
        self
    }
}
