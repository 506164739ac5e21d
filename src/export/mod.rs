pub mod csv;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use depara_common::MappedCause;
use std::path::{Path, PathBuf};

/// 出力時の列名・シート名
#[derive(Debug, Clone)]
pub struct ExportOptions<'a> {
    pub sheet_name: &'a str,
    /// 元データの列名 [Motivo, Natureza, Name]
    pub source_columns: [&'a str; 3],
}

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, stem: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let excel_path = output.join(format!("{}.xlsx", stem));
        let csv_path = output.join(format!("{}.csv", stem));
        (excel_path, csv_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(stem);
        let excel_path = parent.join(format!("{}.xlsx", stem));
        let csv_path = parent.join(format!("{}.csv", stem));
        (excel_path, csv_path)
    }
}

/// マッピング結果を出力し、書き出したファイルのパスを返す
pub fn export_results(
    results: &[MappedCause],
    format: &ExportFormat,
    output: &Path,
    stem: &str,
    options: &ExportOptions<'_>,
) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() && !output.exists() {
        std::fs::create_dir_all(output)?;
    }

    let written = match format {
        ExportFormat::Excel => {
            let output_path = output_path_for_format(output, stem, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(results, &output_path, options)?;
            println!("✔ Excel出力: {}", output_path.display());
            vec![output_path]
        }
        ExportFormat::Csv => {
            let output_path = output_path_for_format(output, stem, "csv");
            println!("- CSVを生成中...");
            csv::generate_csv(results, &output_path, options)?;
            println!("✔ CSV出力: {}", output_path.display());
            vec![output_path]
        }
        ExportFormat::Both => {
            let (excel_path, csv_path) = output_paths_for_both(output, stem);

            println!("- Excelを生成中...");
            excel::generate_excel(results, &excel_path, options)?;
            println!("✔ Excel出力: {}", excel_path.display());

            println!("- CSVを生成中...");
            csv::generate_csv(results, &csv_path, options)?;
            println!("✔ CSV出力: {}", csv_path.display());

            vec![excel_path, csv_path]
        }
    };

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_directory() {
        let path = output_path_for_format(Path::new("out"), "mapeamento_final", "xlsx");
        assert_eq!(path, PathBuf::from("out/mapeamento_final.xlsx"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for_format(Path::new("out/result.xlsx"), "mapeamento_final", "xlsx");
        assert_eq!(path, PathBuf::from("out/result.xlsx"));
    }

    #[test]
    fn test_output_paths_for_both_uses_file_stem() {
        let (excel, csv) = output_paths_for_both(Path::new("out/result.xlsx"), "mapeamento_final");
        assert_eq!(excel, PathBuf::from("out/result.xlsx"));
        assert_eq!(csv, PathBuf::from("out/result.csv"));
    }
}
