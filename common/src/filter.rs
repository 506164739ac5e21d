//! レコードフィルタ
//!
//! - 欠損・空文字列ラベルの Problema を除外（空白のみのラベルは残す）
//! - 予約接頭辞（デフォルト "14"）で始まる Problema を除外（業務ルール）
//! - Motivo / Natureza / Name のいずれかが欠損した Fato Gerador を除外
//!
//! いずれも入力順を保持する。

use crate::error::{Error, Result};
use crate::types::{CauseRecord, CellValue, Dataset, MatchOptions, ProblemRecord, Table};
use tracing::{debug, info};

/// フィルタで除外した件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub problems_missing: usize,
    pub problems_reserved: usize,
    pub causes_missing: usize,
}

/// フィルタ結果
#[derive(Debug, Clone, Default)]
pub struct Filtered {
    pub problems: Vec<ProblemRecord>,
    pub causes: Vec<CauseRecord>,
    pub report: FilterReport,
}

/// ラベルが予約接頭辞で始まるか（前後の空白は無視）
pub fn is_reserved(label: &str, prefix: &str) -> bool {
    label.trim().starts_with(prefix)
}

fn required_text(cell: &CellValue, row: usize, field: &str) -> Result<String> {
    cell.to_text().ok_or_else(|| Error::MissingField {
        row,
        field: field.to_string(),
    })
}

impl ProblemRecord {
    /// 表の1行から作成（ラベルが欠損・空文字列ならエラー）
    pub fn from_row(row: usize, cells: &[CellValue], label_col: usize, field: &str) -> Result<Self> {
        let label = required_text(&cells[label_col], row, field)?;
        if label.is_empty() {
            return Err(Error::MissingField {
                row,
                field: field.to_string(),
            });
        }
        Ok(Self { row, label })
    }
}

impl CauseRecord {
    /// 表の1行から作成（必須フィールドが欠損ならエラー。空文字列は許容）
    pub fn from_row(
        row: usize,
        cells: &[CellValue],
        cols: (usize, usize, usize),
        options: &MatchOptions,
    ) -> Result<Self> {
        let (reason_col, nature_col, name_col) = cols;
        Ok(Self {
            row,
            reason: required_text(&cells[reason_col], row, &options.reason_field)?,
            nature: required_text(&cells[nature_col], row, &options.nature_field)?,
            name: required_text(&cells[name_col], row, &options.name_field)?,
        })
    }
}

/// 必須列がそろっているか確認する（ベクトル化の前に呼ぶ）
pub fn validate_columns(problems: &Table, causes: &Table, options: &MatchOptions) -> Result<()> {
    problems.require_column(&options.problem_field, Dataset::Problems)?;
    causes.require_column(&options.reason_field, Dataset::Causes)?;
    causes.require_column(&options.nature_field, Dataset::Causes)?;
    causes.require_column(&options.name_field, Dataset::Causes)?;
    Ok(())
}

/// Problemas をフィルタ
///
/// 戻り値: (残ったレコード, 欠損で除外した件数, 接頭辞で除外した件数)
pub fn filter_problems(
    table: &Table,
    options: &MatchOptions,
) -> Result<(Vec<ProblemRecord>, usize, usize)> {
    let label_col = table.require_column(&options.problem_field, Dataset::Problems)?;
    let mut kept = Vec::with_capacity(table.len());
    let mut missing = 0;
    let mut reserved = 0;

    for (row, cells) in table.rows().iter().enumerate() {
        match ProblemRecord::from_row(row, cells, label_col, &options.problem_field) {
            Ok(record) if is_reserved(&record.label, &options.reserved_prefix) => {
                debug!(row, label = %record.label, "reserved problem excluded");
                reserved += 1;
            }
            Ok(record) => kept.push(record),
            Err(Error::MissingField { .. }) => missing += 1,
            Err(e) => return Err(e),
        }
    }

    Ok((kept, missing, reserved))
}

/// Fatos Geradores をフィルタ
///
/// 戻り値: (残ったレコード, 欠損で除外した件数)
pub fn filter_causes(table: &Table, options: &MatchOptions) -> Result<(Vec<CauseRecord>, usize)> {
    let cols = (
        table.require_column(&options.reason_field, Dataset::Causes)?,
        table.require_column(&options.nature_field, Dataset::Causes)?,
        table.require_column(&options.name_field, Dataset::Causes)?,
    );
    let mut kept = Vec::with_capacity(table.len());
    let mut missing = 0;

    for (row, cells) in table.rows().iter().enumerate() {
        match CauseRecord::from_row(row, cells, cols, options) {
            Ok(record) => kept.push(record),
            Err(Error::MissingField { row, field }) => {
                debug!(row, field = %field, "cause dropped");
                missing += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok((kept, missing))
}

/// 両データセットをフィルタし、空になったらエラーにする
pub fn filter_datasets(problems: &Table, causes: &Table, options: &MatchOptions) -> Result<Filtered> {
    validate_columns(problems, causes, options)?;

    let (problems, problems_missing, problems_reserved) = filter_problems(problems, options)?;
    let (causes, causes_missing) = filter_causes(causes, options)?;

    info!(
        problems_kept = problems.len(),
        problems_missing,
        problems_reserved,
        causes_kept = causes.len(),
        causes_missing,
        "records filtered"
    );

    if problems.is_empty() {
        return Err(Error::EmptyDataset(Dataset::Problems));
    }
    if causes.is_empty() {
        return Err(Error::EmptyDataset(Dataset::Causes));
    }

    Ok(Filtered {
        problems,
        causes,
        report: FilterReport {
            problems_missing,
            problems_reserved,
            causes_missing,
        },
    })
}
