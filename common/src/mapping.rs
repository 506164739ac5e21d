//! マッピング処理（DE-PARA）
//!
//! ## 処理フロー
//! 1. レコードフィルタ（欠損・予約接頭辞の除外）
//! 2. Fato Gerador のテキスト合成
//! 3. 語彙構築（Problemas → Fatos の順でコーパスを作る）
//! 4. ベクトル化
//! 5. 最良一致の選択
//! 6. 結果の組み立てと集計

use crate::error::{Error, Result};
use crate::filter::{filter_datasets, FilterReport};
use crate::similarity::{BestMatch, SimilarityIndex};
use crate::tfidf::Vocabulary;
use crate::types::{CauseRecord, MappedCause, MatchOptions, MatchSummary, ProblemRecord, Table};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Problemas と Fatos Geradores を対応付ける
///
/// # Arguments
/// * `problems` - Problemas の表（`options.problem_field` 列が必要）
/// * `causes` - Fatos Geradores の表（Motivo / Natureza / Name 列が必要）
/// * `options` - 列名・予約接頭辞・集計件数
///
/// # Returns
/// フィルタ後の Fato Gerador ごとのマッピング結果（入力順）と統計情報
pub fn match_datasets(
    problems: &Table,
    causes: &Table,
    options: &MatchOptions,
) -> Result<(Vec<MappedCause>, MatchSummary)> {
    let filtered = filter_datasets(problems, causes, options)?;

    let composed: Vec<String> = filtered.causes.iter().map(CauseRecord::composed_text).collect();
    let corpus: Vec<&str> = filtered
        .problems
        .iter()
        .map(|p| p.label.as_str())
        .chain(composed.iter().map(String::as_str))
        .collect();

    let vocabulary = Vocabulary::fit(&corpus)?;
    debug!(terms = vocabulary.len(), documents = vocabulary.documents(), "vocabulary fitted");

    let problem_vectors: Vec<_> = filtered
        .problems
        .iter()
        .map(|p| vocabulary.transform(&p.label))
        .collect();
    let cause_vectors = vocabulary.transform_all(&composed);

    let index = SimilarityIndex::new(&problem_vectors)?;
    let matches = index.best_matches(&cause_vectors);

    let mapped = assemble(&filtered.causes, &filtered.problems, &matches)?;
    let summary = summarize(
        &mapped,
        problems.len(),
        causes.len(),
        filtered.report,
        vocabulary.len(),
        options.top_n,
    );

    if summary.zero_similarity > 0 {
        warn!(count = summary.zero_similarity, "causes mapped with zero similarity");
    }
    info!(
        mapped = summary.causes_mapped,
        mean_similarity = summary.mean_similarity,
        "matching completed"
    );

    Ok((mapped, summary))
}

/// 最良一致を Fato Gerador に結合する
///
/// `matches` は `causes` と同じ長さで、各 index は `problems` の範囲内であること。
pub fn assemble(
    causes: &[CauseRecord],
    problems: &[ProblemRecord],
    matches: &[BestMatch],
) -> Result<Vec<MappedCause>> {
    if causes.len() != matches.len() {
        return Err(Error::MalformedInput(format!(
            "{} causes but {} matches",
            causes.len(),
            matches.len()
        )));
    }

    causes
        .iter()
        .zip(matches)
        .map(|(cause, best)| {
            let problem = problems.get(best.index).ok_or_else(|| {
                Error::MalformedInput(format!(
                    "problem index {} out of range ({} problems)",
                    best.index,
                    problems.len()
                ))
            })?;
            Ok(MappedCause {
                cause: cause.clone(),
                problem_index: best.index,
                mapped_problem: problem.label.clone(),
                similarity: best.score,
            })
        })
        .collect()
}

/// 対応付けの多い Problema 上位 `n` 件（件数降順、同数は先に現れた方）
pub fn top_mapped_problems(mapped: &[MappedCause], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, m) in mapped.iter().enumerate() {
        counts.entry(m.mapped_problem.as_str()).or_insert((0, order)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(label, (count, first))| (label, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(n)
        .map(|(label, count, _)| (label.to_string(), count))
        .collect()
}

fn summarize(
    mapped: &[MappedCause],
    problems_total: usize,
    causes_total: usize,
    report: FilterReport,
    vocabulary_size: usize,
    top_n: usize,
) -> MatchSummary {
    let mean_similarity = if mapped.is_empty() {
        0.0
    } else {
        mapped.iter().map(|m| m.similarity).sum::<f64>() / mapped.len() as f64
    };

    MatchSummary {
        problems_total,
        problems_kept: problems_total - report.problems_missing - report.problems_reserved,
        problems_missing: report.problems_missing,
        problems_reserved: report.problems_reserved,
        causes_total,
        causes_mapped: mapped.len(),
        causes_missing: report.causes_missing,
        vocabulary_size,
        zero_similarity: mapped.iter().filter(|m| m.similarity == 0.0).count(),
        mean_similarity,
        top_problems: top_mapped_problems(mapped, top_n),
    }
}
