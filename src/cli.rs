use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "depara")]
#[command(about = "Fatos Geradores → Problemas 自動マッピング（DE-PARA表生成）ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（省略時: ~/.config/depara/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fatos Geradores を Problemas にマッピングして出力
    Run {
        /// Fatos Geradores ファイル（CSV / XLSX / JSON）
        #[arg(required = true)]
        causes: PathBuf,

        /// Problemas ファイル（CSV / XLSX / JSON）
        #[arg(required = true)]
        problems: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (excel/csv/both)
        #[arg(short, long, default_value = "excel")]
        format: ExportFormat,

        /// 集計で表示する上位件数
        #[arg(long)]
        top: Option<usize>,

        /// プレビュー行数（0で非表示）
        #[arg(long)]
        preview: Option<usize>,

        /// 除外する Problema の接頭辞
        #[arg(long)]
        prefix: Option<String>,

        /// ファイルを出力せず結果表示のみ
        #[arg(long)]
        dry_run: bool,
    },

    /// データファイルの列と件数を表示
    Inspect {
        /// データファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定をファイルに書き出す
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Excel,
    Csv,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "csv" => Ok(ExportFormat::Csv),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use excel, csv, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
