//! Integration tests for exporting tables.

use ocrtab::export::{export_all, ExportOptions};
use ocrtab::{export_table, project_value, sanitize_name, ExportFormat, ProjectionOptions};
use serde_json::json;
use std::fs;

fn tables() -> ocrtab::TableSet {
    project_value(
        &json!({
            "Votre Commande": "21854",
            "Pièces / Désignations": [
                {"Pièce / Désignation": "SOCO-COW002-01PP21A", "Qté": 2, "PUHT": "11.36 €", "Délai": "21/01/25"},
                {"Pièce / Désignation": "SOCO-COW002-01PP25A 30AL \"LAF", "Qté": 44, "PUHT": "1.59 €", "Délai": "21/01/25"}
            ]
        }),
        &ProjectionOptions::default(),
    )
}

#[test]
fn test_sanitized_name_alphabet() {
    let name = sanitize_name("Pièces / Désignations");
    assert!(name
        .chars()
        .all(|c| (c.is_alphanumeric() && !c.is_uppercase()) || c == '_' || c == '-'));
    assert_eq!(name, "pièces___désignations");
}

#[test]
fn test_export_each_format() {
    let tables = tables();
    let table = &tables["Pièces / Désignations"];

    for format in ExportFormat::ALL {
        let exported = export_table(table, &table.name, format).unwrap();
        assert_eq!(
            exported.file_name,
            format!("pièces___désignations.{}", format.extension())
        );
        assert_eq!(exported.mime_type, format.mime_type());
        assert!(!exported.bytes.is_empty());
    }
}

#[test]
fn test_csv_export_content() {
    let tables = tables();
    let exported = export_table(
        &tables["Pièces / Désignations"],
        "Pièces / Désignations",
        ExportFormat::Csv,
    )
    .unwrap();
    let text = String::from_utf8(exported.bytes).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Pièce / Désignation,Qté,PUHT,Délai"));
    assert_eq!(lines.next(), Some("SOCO-COW002-01PP21A,2,11.36 €,21/01/25"));
    assert_eq!(
        lines.next(),
        Some("\"SOCO-COW002-01PP25A 30AL \"\"LAF\",44,1.59 €,21/01/25")
    );
}

#[test]
fn test_json_export_round_trips_rows() {
    let tables = tables();
    let exported = export_table(
        &tables["General information"],
        "General information",
        ExportFormat::Json,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&exported.bytes).unwrap();
    assert_eq!(value, json!([{"Votre Commande": "21854"}]));
}

#[test]
fn test_export_all_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions::new().with_output_dir(dir.path().join("exports"));

    let outcomes = export_all(&tables(), ExportFormat::Csv, &options);
    assert_eq!(outcomes.len(), 2);
    for outcome in outcomes {
        let path = outcome.result.unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
    assert!(dir.path().join("exports/general_information.csv").exists());
    assert!(dir.path().join("exports/pièces___désignations.csv").exists());
}

#[test]
fn test_export_all_long_and_non_latin_labels() {
    let long_label = format!("Observations {}", "relevées sur le chantier ".repeat(12));
    assert!(long_label.chars().count() > 300);
    let tables = project_value(
        &json!({
            "客户": [{"名称": "上海工厂", "数量": 3}],
            long_label.as_str(): [{"Ligne": 1, "Note": "RAS"}]
        }),
        &ProjectionOptions::default(),
    );

    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions::new().with_output_dir(dir.path());
    for format in ExportFormat::ALL {
        let outcomes = export_all(&tables, format, &options);
        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            let path = outcome.result.as_ref().unwrap();
            let stem = path.file_stem().unwrap().to_str().unwrap();
            assert!(stem.len() <= 200);
        }
    }
    assert!(dir.path().join("客户.csv").exists());
}

#[test]
fn test_failure_is_per_table() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on one target file name makes that write fail.
    fs::create_dir_all(dir.path().join("general_information.json")).unwrap();

    let options = ExportOptions::new().with_output_dir(dir.path());
    let outcomes = export_all(&tables(), ExportFormat::Json, &options);

    let general = outcomes
        .iter()
        .find(|o| o.table == "General information")
        .unwrap();
    let err = general.result.as_ref().unwrap_err();
    assert!(err.to_string().contains("General information"));

    let pieces = outcomes
        .iter()
        .find(|o| o.table == "Pièces / Désignations")
        .unwrap();
    assert!(pieces.result.as_ref().unwrap().exists());
}
