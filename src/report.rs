//! 結果のプレビューと集計の表示

use depara_common::{MappedCause, MatchSummary, Table};

/// 表示用に文字数で切り詰める
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut s: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        s.push('…');
        s
    }
}

/// 先頭 `rows` 件のプレビュー行を作る
pub fn preview_lines(results: &[MappedCause], rows: usize, source_columns: [&str; 3]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.min(results.len()) + 1);
    lines.push(format!(
        "{:<20} | {:<20} | {:<20} | {:<36} | {}",
        source_columns[0], source_columns[1], source_columns[2], "problema_mapeado", "similaridade"
    ));

    for r in results.iter().take(rows) {
        lines.push(format!(
            "{:<20} | {:<20} | {:<20} | {:<36} | {:.4}",
            truncate(&r.cause.reason, 20),
            truncate(&r.cause.nature, 20),
            truncate(&r.cause.name, 20),
            truncate(&r.mapped_problem, 36),
            r.similarity
        ));
    }

    lines
}

/// 集計の表示行を作る
pub fn summary_lines(summary: &MatchSummary) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Fatos Geradores: {}件中 {}件をマッピング（欠損で除外: {}件）",
            summary.causes_total, summary.causes_mapped, summary.causes_missing
        ),
        format!(
            "Problemas: {}件中 {}件を使用（欠損: {}件, 予約接頭辞: {}件）",
            summary.problems_total,
            summary.problems_kept,
            summary.problems_missing,
            summary.problems_reserved
        ),
        format!(
            "語彙数: {} / 平均類似度: {:.4} / 類似度0: {}件",
            summary.vocabulary_size, summary.mean_similarity, summary.zero_similarity
        ),
    ];

    if !summary.top_problems.is_empty() {
        lines.push(format!(
            "最も多く対応付けられた Problema（上位{}件）:",
            summary.top_problems.len()
        ));
        for (i, (label, count)) in summary.top_problems.iter().enumerate() {
            lines.push(format!("  {}. {} ({}件)", i + 1, label, count));
        }
    }

    lines
}

/// データファイルの列ごとの件数（欠損以外）を表示行にする
pub fn table_lines(table: &Table) -> Vec<String> {
    let mut lines = vec![format!("{}行 × {}列", table.len(), table.columns().len())];
    for (col, name) in table.columns().iter().enumerate() {
        let filled = table.rows().iter().filter(|row| !row[col].is_missing()).count();
        lines.push(format!("  - {} ({}/{}件)", name, filled, table.len()));
    }
    lines
}

pub fn print_preview(results: &[MappedCause], rows: usize, source_columns: [&str; 3]) {
    if rows == 0 || results.is_empty() {
        return;
    }
    println!("結果プレビュー（先頭{}件）:", rows.min(results.len()));
    for line in preview_lines(results, rows, source_columns) {
        println!("  {}", line);
    }
    println!();
}

pub fn print_summary(summary: &MatchSummary) {
    println!("集計:");
    for line in summary_lines(summary) {
        println!("  {}", line);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use depara_common::CauseRecord;

    fn result(i: usize) -> MappedCause {
        MappedCause {
            cause: CauseRecord {
                row: i,
                reason: "Atraso".into(),
                nature: "Entrega".into(),
                name: format!("Pedido {}", i),
            },
            problem_index: 0,
            mapped_problem: "Atraso na entrega".into(),
            similarity: 0.123456,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("cobrança", 8), "cobrança");
    }

    #[test]
    fn test_preview_lines_limits_rows() {
        let results: Vec<MappedCause> = (0..15).map(result).collect();
        let lines = preview_lines(&results, 10, ["Motivo__c", "Natureza__c", "Name"]);

        assert_eq!(lines.len(), 11);
        assert!(lines[0].contains("problema_mapeado"));
        assert!(lines[1].contains("Pedido 0"));
        assert!(lines[1].contains("0.1235"));
    }

    #[test]
    fn test_table_lines_count_filled_cells() {
        let table = Table::new(
            ["Problema", "Obs"],
            vec![
                vec!["Atraso".into(), depara_common::CellValue::Empty],
                vec!["Erro".into(), "x".into()],
            ],
        )
        .unwrap();
        let lines = table_lines(&table);

        assert_eq!(lines[0], "2行 × 2列");
        assert_eq!(lines[1], "  - Problema (2/2件)");
        assert_eq!(lines[2], "  - Obs (1/2件)");
    }

    #[test]
    fn test_summary_lines_include_top_problems() {
        let summary = MatchSummary {
            causes_total: 3,
            causes_mapped: 2,
            causes_missing: 1,
            top_problems: vec![("Atraso na entrega".into(), 2)],
            ..Default::default()
        };
        let lines = summary_lines(&summary);

        assert!(lines[0].contains("3件中 2件"));
        assert!(lines.iter().any(|l| l.contains("1. Atraso na entrega (2件)")));
    }
}
