//! Integration tests for rule export files.

use ctdoc_model::{FieldDataType, FieldDefinition, RuleRecord};
use ctdoc_validate::{RuleGenerator, write_rules_csv, write_rules_csv_to, write_rules_json};
use tempfile::tempdir;

fn generator() -> RuleGenerator {
    let mut generator = RuleGenerator::new();
    generator.add_fields([FieldDefinition::new(
        "systolic_bp",
        "Systolic Blood Pressure",
        "Vital Signs",
        FieldDataType::Numeric,
    )
    .required(true)
    .bounds(Some(70.0), Some(200.0))
    .units("mmHg")]);
    generator.generate_all_rules().unwrap();
    generator
}

#[test]
fn test_json_export_round_trips_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");
    let records = generator().export_rules();

    write_rules_json(&path, &records).unwrap();

    let read: Vec<RuleRecord> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(read, records);
    assert_eq!(read[1].details["min_value"], 70.0);
}

#[test]
fn test_csv_export_has_header_and_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.csv");
    let records = generator().export_rules();

    write_rules_csv(&path, &records).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(0), Some("rule_id"));
    assert_eq!(headers.get(7), Some("details"));
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), records.len());
    assert_eq!(rows[1].get(0), Some("RNG-0002"));
    assert_eq!(rows[1].get(3), Some("Vital Signs"));
    assert!(rows[1].get(7).unwrap().contains("\"units\":\"mmHg\""));
}

#[test]
fn test_export_reports_missing_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("rules.json");
    let err = write_rules_json(&path, &generator().export_rules()).unwrap_err();
    assert!(err.to_string().contains("rules.json"));
}

#[test]
fn test_csv_export_into_a_buffer() {
    let records = generator().export_rules();
    let mut buffer = Vec::new();
    write_rules_csv_to(&mut buffer, &records).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("rule_id,validation_type,severity,form_name,field_name,description,query_text,details")
    );
    assert_eq!(lines.count(), records.len());
}
