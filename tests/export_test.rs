//! Excel/CSV出力の統合テスト

use calamine::{open_workbook_auto, Data, Reader};
use depara::cli::ExportFormat;
use depara::export::{self, excel, ExportOptions};
use depara_common::{CauseRecord, MappedCause};
use tempfile::tempdir;

const OPTIONS: ExportOptions<'static> = ExportOptions {
    sheet_name: "Mapeamento",
    source_columns: ["Motivo__c", "Natureza__c", "Name"],
};

fn create_test_result(index: usize) -> MappedCause {
    MappedCause {
        cause: CauseRecord {
            row: index,
            reason: "Atraso".to_string(),
            nature: "Entrega".to_string(),
            name: format!("Pedido {}", index),
        },
        problem_index: 0,
        mapped_problem: "Atraso na entrega".to_string(),
        similarity: 0.25 * index as f64,
    }
}

#[test]
fn test_excel_generation_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("mapeamento_final.xlsx");

    let results: Vec<MappedCause> = (1..=3).map(create_test_result).collect();
    let result = excel::generate_excel(&results, &output_path, &OPTIONS);
    assert!(result.is_ok(), "Excel生成に失敗: {:?}", result.err());
    assert!(output_path.exists(), "Excelファイルが作成されていない");

    let mut workbook = open_workbook_auto(&output_path).expect("Excelを開けない");
    assert_eq!(workbook.sheet_names(), vec!["Mapeamento".to_string()]);

    let range = workbook.worksheet_range("Mapeamento").expect("シートがない");
    let rows: Vec<&[Data]> = range.rows().collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0][3], Data::String("problema_mapeado".into()));
    assert_eq!(rows[0][4], Data::String("similaridade".into()));
    assert_eq!(rows[1][2], Data::String("Pedido 1".into()));
    assert_eq!(rows[3][4], Data::Float(0.75));
}

#[test]
fn test_excel_generation_empty_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("empty.xlsx");

    let result = excel::generate_excel(&[], &output_path, &OPTIONS);
    assert!(result.is_ok(), "空のExcel生成に失敗: {:?}", result.err());
}

#[test]
fn test_export_both_into_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let results: Vec<MappedCause> = (1..=2).map(create_test_result).collect();

    let written = export::export_results(
        &results,
        &ExportFormat::Both,
        dir.path(),
        "mapeamento_final",
        &OPTIONS,
    )
    .unwrap();

    assert_eq!(written.len(), 2);
    assert!(dir.path().join("mapeamento_final.xlsx").exists());
    let csv = std::fs::read_to_string(dir.path().join("mapeamento_final.csv")).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("Motivo__c,Natureza__c,Name,problema_mapeado,similaridade"));
}

#[test]
fn test_export_creates_missing_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let target = dir.path().join("saida");
    let results = vec![create_test_result(1)];

    let written =
        export::export_results(&results, &ExportFormat::Csv, &target, "mapeamento_final", &OPTIONS)
            .unwrap();

    assert_eq!(written, vec![target.join("mapeamento_final.csv")]);
    assert!(written[0].exists());
}
