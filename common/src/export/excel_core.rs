//! Excel生成（共通ライブラリ）
//!
//! マッピング結果を1シートの表としてバッファに書き出す。
//! 列: Motivo / Natureza / Name / problema_mapeado / similaridade

use crate::types::{MappedCause, MAPPED_PROBLEM_COLUMN, SIMILARITY_COLUMN};
use rust_xlsxwriter::*;

/// 列幅（文字数）
const TEXT_COL_WIDTH: f64 = 28.0;
const PROBLEM_COL_WIDTH: f64 = 40.0;
const SCORE_COL_WIDTH: f64 = 14.0;

/// Excelをバッファに生成
///
/// # Arguments
/// * `results` - マッピング結果
/// * `sheet_name` - シート名（例: "Mapeamento"）
/// * `source_columns` - 元データの列名 [Motivo, Natureza, Name]
pub fn generate_excel_buffer(
    results: &[MappedCause],
    sheet_name: &str,
    source_columns: [&str; 3],
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let text_format = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();

    let score_format = Format::new()
        .set_num_format("0.0000")
        .set_align(FormatAlign::VerticalCenter);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    // ヘッダー行
    let headers = [
        source_columns[0],
        source_columns[1],
        source_columns[2],
        MAPPED_PROBLEM_COLUMN,
        SIMILARITY_COLUMN,
    ];
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    let widths = [TEXT_COL_WIDTH, TEXT_COL_WIDTH, TEXT_COL_WIDTH, PROBLEM_COL_WIDTH, SCORE_COL_WIDTH];
    for (col, width) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    // データ行
    for (i, result) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        let texts = [
            result.cause.reason.as_str(),
            result.cause.nature.as_str(),
            result.cause.name.as_str(),
            result.mapped_problem.as_str(),
        ];
        for (col, text) in texts.iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, *text, &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
        worksheet
            .write_number_with_format(row, 4, result.similarity, &score_format)
            .map_err(|e| format!("類似度書き込みエラー: {}", e))?;
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    if !results.is_empty() {
        worksheet
            .autofilter(0, 0, results.len() as u32, 4)
            .map_err(|e| format!("フィルタ設定エラー: {}", e))?;
    }

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
