//! Integration tests for protocol parsing and catalogue loading.

use std::fs;

use ctdoc_ingest::{
    AutoProtocolParser, IngestError, JsonProtocolParser, ProtocolParser, TextProtocolParser,
    extract_protocol_info, load_field_catalogue, save_protocol_json,
};
use ctdoc_model::{FieldDataType, ProtocolInfo, Severity, ValidationCategory};
use tempfile::tempdir;

const SYNOPSIS: &str = "\
CLINICAL STUDY PROTOCOL

Protocol Title: A Randomized, Double-Blind Study of ABC-123 in Type 2 Diabetes
Protocol Number: ABC-123/2024-01
Sponsor: Example Pharma Ltd
Indication: Type 2 Diabetes Mellitus
Study Design: Randomized, double-blind, placebo-controlled
Target Population: Adults with inadequately controlled T2DM

This is a Phase II trial enrolling approximately 240 patients.

Inclusion Criteria:
Subjects must meet all of the following:
1. Age 18 to 75 years
2. HbA1c between 7.0% and 10.5%
3. Written informed consent

Exclusion Criteria
- Type 1 diabetes
- Pregnancy or lactation

Primary Endpoint: Change in HbA1c from baseline to week 24

Secondary Endpoints:
a) Change in fasting plasma glucose
b) Proportion of subjects reaching HbA1c < 7%

Safety assessments include vital signs, laboratory tests and adverse events.
Demographic data and concomitant medications are recorded at screening.
";

#[test]
fn test_extracts_labelled_attributes() {
    let info = extract_protocol_info(SYNOPSIS);

    assert_eq!(
        info.study_title.as_deref(),
        Some("A Randomized, Double-Blind Study of ABC-123 in Type 2 Diabetes")
    );
    assert_eq!(info.protocol_number.as_deref(), Some("ABC-123/2024-01"));
    assert_eq!(info.sponsor.as_deref(), Some("Example Pharma Ltd"));
    assert_eq!(info.indication.as_deref(), Some("Type 2 Diabetes Mellitus"));
    assert_eq!(
        info.study_design.as_deref(),
        Some("Randomized, double-blind, placebo-controlled")
    );
    assert_eq!(info.phase.as_deref(), Some("Phase II"));
    assert_eq!(info.sample_size.as_deref(), Some("240"));
}

#[test]
fn test_extracts_list_sections() {
    let info = extract_protocol_info(SYNOPSIS);

    assert_eq!(
        info.inclusion_criteria,
        vec![
            "Age 18 to 75 years",
            "HbA1c between 7.0% and 10.5%",
            "Written informed consent",
        ]
    );
    assert_eq!(
        info.exclusion_criteria,
        vec!["Type 1 diabetes", "Pregnancy or lactation"]
    );
    assert_eq!(
        info.primary_endpoints,
        vec!["Change in HbA1c from baseline to week 24"]
    );
    assert_eq!(info.secondary_endpoints.len(), 2);
    assert!(info.visit_schedule.is_empty());
}

#[test]
fn test_detects_crf_domains_in_catalogue_order() {
    let info = extract_protocol_info(SYNOPSIS);

    assert_eq!(
        info.crf_domains,
        vec![
            "Demographics",
            "Vital Signs",
            "Laboratory Tests",
            "Adverse Events",
            "Concomitant Medications",
        ]
    );
}

#[test]
fn test_text_parser_rejects_empty_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blank.txt");
    fs::write(&path, "nothing useful here\n").unwrap();

    let err = TextProtocolParser.parse(&path, None).unwrap_err();
    assert!(matches!(err, IngestError::NothingExtracted { .. }));
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.pdf");

    let err = AutoProtocolParser.parse(&path, Some(5)).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn test_auto_parser_dispatches_on_extension() {
    let dir = tempdir().unwrap();
    let text_path = dir.path().join("protocol.txt");
    fs::write(&text_path, SYNOPSIS).unwrap();

    let from_text = AutoProtocolParser.parse(&text_path, None).unwrap();
    assert_eq!(from_text.sponsor.as_deref(), Some("Example Pharma Ltd"));

    let json_path = dir.path().join("protocol_info.json");
    save_protocol_json(&from_text, &json_path).unwrap();
    let from_json = AutoProtocolParser.parse(&json_path, None).unwrap();
    assert_eq!(from_json, from_text);
}

#[test]
fn test_json_parser_accepts_partial_documents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{"protocol_number": "XYZ-9", "crf_domains": ["Vital Signs"]}"#,
    )
    .unwrap();

    let info = JsonProtocolParser.parse(&path, None).unwrap();
    assert_eq!(info.protocol_number.as_deref(), Some("XYZ-9"));
    assert_eq!(info.crf_domains, vec!["Vital Signs"]);
    assert_eq!(info.study_title, None);
    assert_ne!(info, ProtocolInfo::default());
}

#[test]
fn test_json_parser_reports_malformed_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{not json").unwrap();

    let err = JsonProtocolParser.parse(&path, None).unwrap_err();
    assert!(matches!(err, IngestError::Json { .. }));
}

#[test]
fn test_loads_json_catalogue() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fields.json");
    fs::write(
        &path,
        r#"{
            "fields": [
                {"name": "age", "label": "Age", "form_name": "Demographics",
                 "data_type": "number", "required": true,
                 "min_value": 18, "max_value": 65}
            ],
            "custom_rules": [
                {"description": "Dose must match the randomised arm",
                 "query_text": "Please confirm the dose against the randomisation list."}
            ],
            "custom_domains": [
                {"name": "Pharmacokinetics",
                 "fields": [{"name": "pk_time", "label": "Sample Time", "type": "text"}]}
            ]
        }"#,
    )
    .unwrap();

    let catalogue = load_field_catalogue(&path).unwrap();
    assert_eq!(catalogue.fields.len(), 1);
    assert_eq!(catalogue.fields[0].data_type, FieldDataType::Numeric);
    assert_eq!(catalogue.custom_rules[0].severity, Severity::Major);
    assert_eq!(
        catalogue.custom_rules[0].category,
        ValidationCategory::Custom
    );
    assert_eq!(catalogue.custom_domains[0].key, "pharmacokinetics");
}

#[test]
fn test_loads_toml_catalogue() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fields.toml");
    fs::write(
        &path,
        r#"
[[fields]]
name = "heart_rate"
label = "Heart Rate"
form_name = "Vital Signs"
data_type = "numeric"
required = true
min_value = 40.0
max_value = 200.0
units = "bpm"
"#,
    )
    .unwrap();

    let catalogue = load_field_catalogue(&path).unwrap();
    assert_eq!(catalogue.fields[0].units.as_deref(), Some("bpm"));
    assert!(catalogue.custom_rules.is_empty());
}

#[test]
fn test_catalogue_rejects_inverted_bounds() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fields.json");
    fs::write(
        &path,
        r#"{"fields": [{"name": "age", "label": "Age", "form_name": "Demographics",
                       "data_type": "numeric", "min_value": 90, "max_value": 18}]}"#,
    )
    .unwrap();

    let err = load_field_catalogue(&path).unwrap_err();
    assert!(matches!(err, IngestError::InvalidCatalogue { .. }));
}

#[test]
fn test_catalogue_rejects_empty_custom_domain() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fields.json");
    fs::write(&path, r#"{"custom_domains": [{"name": "Empty", "fields": []}]}"#).unwrap();

    let err = load_field_catalogue(&path).unwrap_err();
    assert!(matches!(err, IngestError::InvalidCatalogue { .. }));
}
