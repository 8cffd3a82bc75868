//! Integration tests for the embedded catalogues.

use ctdoc_model::FieldDataType;
use ctdoc_standards::{
    CrfDomain, CrfField, domain_key, load_default_dvp_fields, load_standard_crf_domains,
    resolve_domains,
};

fn custom_domain(name: &str) -> CrfDomain {
    CrfDomain::custom(
        name,
        "Sponsor specific form",
        vec![CrfField {
            name: "score".to_string(),
            label: "Score".to_string(),
            data_type: FieldDataType::Numeric,
            required: true,
            options: Vec::new(),
            unit: None,
            coding_instruction: None,
        }],
    )
}

#[test]
fn test_standard_domains_load_in_order() {
    let domains = load_standard_crf_domains().unwrap();
    let keys: Vec<&str> = domains.iter().map(|domain| domain.key.as_str()).collect();
    assert_eq!(
        keys,
        [
            "demographics",
            "medical_history",
            "vital_signs",
            "laboratory_tests",
            "adverse_events",
            "concomitant_medications",
            "study_drug_administration",
        ]
    );
    assert!(domains.iter().all(CrfDomain::is_valid));
    for domain in &domains {
        assert_eq!(domain_key(&domain.name), domain.key);
    }
}

#[test]
fn test_option_fields_carry_options() {
    let domains = load_standard_crf_domains().unwrap();
    for field in domains.iter().flat_map(|domain| &domain.fields) {
        if field.data_type.has_options() {
            assert!(!field.options.is_empty(), "{} has no options", field.name);
        }
    }
}

#[test]
fn test_domain_key_normalises_names() {
    assert_eq!(domain_key("Adverse Events"), "adverse_events");
    assert_eq!(domain_key("  Vital  Signs "), "vital_signs");
    assert_eq!(domain_key("Quality-of-Life"), "quality_of_life");
}

#[test]
fn test_resolve_empty_request_selects_all_standard() {
    let standard = load_standard_crf_domains().unwrap();
    let selection = resolve_domains(&[], &standard, &[]);
    assert_eq!(selection.domains.len(), 7);
    assert!(selection.unknown.is_empty());
}

#[test]
fn test_resolve_reports_unknown_and_keeps_custom() {
    let standard = load_standard_crf_domains().unwrap();
    let custom = vec![custom_domain("Quality of Life")];
    let requested = vec![
        "Adverse Events".to_string(),
        "Pharmacokinetics".to_string(),
        "Demographics".to_string(),
        "adverse_events".to_string(),
    ];

    let selection = resolve_domains(&requested, &standard, &custom);

    let keys: Vec<&str> = selection
        .domains
        .iter()
        .map(|domain| domain.key.as_str())
        .collect();
    assert_eq!(keys, ["adverse_events", "demographics", "quality_of_life"]);
    assert_eq!(selection.unknown, ["Pharmacokinetics"]);
}

#[test]
fn test_field_definitions_take_domain_name() {
    let standard = load_standard_crf_domains().unwrap();
    let vitals = standard
        .iter()
        .find(|domain| domain.key == "vital_signs")
        .unwrap();
    let definitions = vitals.field_definitions();
    let systolic = definitions
        .iter()
        .find(|field| field.name == "systolic_bp")
        .unwrap();
    assert_eq!(systolic.form_name, "Vital Signs");
    assert_eq!(systolic.units.as_deref(), Some("mmHg"));
    assert!(systolic.required);
}

#[test]
fn test_default_dvp_fields() {
    let fields = load_default_dvp_fields().unwrap();
    assert_eq!(fields.len(), 9);
    let age = fields.iter().find(|field| field.name == "age").unwrap();
    assert_eq!(age.min_value, Some(18.0));
    assert_eq!(age.max_value, Some(120.0));
    assert_eq!(fields.iter().filter(|field| field.required).count(), 8);
}
