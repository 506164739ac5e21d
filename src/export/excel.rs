//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す。

use super::ExportOptions;
use crate::error::{DeParaError, Result};
use depara_common::export::excel_core::generate_excel_buffer;
use depara_common::MappedCause;
use std::path::Path;

pub fn generate_excel(
    results: &[MappedCause],
    output_path: &Path,
    options: &ExportOptions<'_>,
) -> Result<()> {
    let buffer = generate_excel_buffer(results, options.sheet_name, options.source_columns)
        .map_err(DeParaError::ExcelGeneration)?;

    std::fs::write(output_path, buffer)
        .map_err(|e| DeParaError::ExcelGeneration(format!("ファイル保存エラー: {}", e)))?;

    Ok(())
}
