//! Integration tests for the CRF, DVP, user guide and DMP assemblers.

use ctdoc_model::{ProtocolInfo, Severity, ValidationCategory, ValidationRule};
use ctdoc_output::{
    Block, CrfAssembler, DmpAssembler, DmpDomain, DocumentStyles, DvpAssembler, GuideForm,
    Milestone, SystemInfo, UserGuideAssembler, write_screenshot_list,
};
use ctdoc_standards::{CrfDomain, load_standard_crf_domains};
use tempfile::tempdir;

fn protocol() -> ProtocolInfo {
    ProtocolInfo {
        study_title: Some("A Study of ABC-123".to_string()),
        protocol_number: Some("ABC-123".to_string()),
        sponsor: Some("Example Pharma".to_string()),
        phase: Some("Phase II".to_string()),
        ..ProtocolInfo::default()
    }
}

fn domains(keys: &[&str]) -> Vec<CrfDomain> {
    load_standard_crf_domains()
        .unwrap()
        .into_iter()
        .filter(|domain| keys.contains(&domain.key.as_str()))
        .collect()
}

#[test]
fn test_crf_has_one_section_per_domain() {
    let protocol = protocol();
    let doc = CrfAssembler::new(&protocol, DocumentStyles::default())
        .build(&domains(&["demographics", "vital_signs"]));

    let level1: Vec<&str> = doc
        .headings()
        .into_iter()
        .filter(|(level, _)| *level == 1)
        .map(|(_, text)| text)
        .collect();
    assert_eq!(level1, vec!["Demographics", "Vital Signs"]);
    assert!(
        doc.headings()
            .contains(&(2, "Vital Signs - Coding Instructions"))
    );

    let page_breaks = doc
        .blocks()
        .iter()
        .filter(|block| matches!(block, Block::PageBreak))
        .count();
    assert_eq!(page_breaks, 2);

    let first_table = doc.tables().next().unwrap();
    assert_eq!(
        first_table.header,
        vec!["Field Name", "Type", "Required", "Value/Response"]
    );
}

#[test]
fn test_crf_title_block_carries_protocol_details() {
    let protocol = protocol();
    let doc = CrfAssembler::new(&protocol, DocumentStyles::default())
        .version("2.0")
        .build(&[]);

    let details = doc
        .blocks()
        .iter()
        .find_map(|block| match block {
            Block::Details(pairs) => Some(pairs.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(details[1], ("Protocol Number".to_string(), "ABC-123".to_string()));
    assert_eq!(details[3], ("CRF Version".to_string(), "2.0".to_string()));
}

fn rule(id: &str, category: ValidationCategory, severity: Severity) -> ValidationRule {
    ValidationRule::new(id, "description", severity, "query", category).unwrap()
}

#[test]
fn test_dvp_groups_rules_by_category() {
    let protocol = protocol();
    let rules = vec![
        rule("REQ-0001", ValidationCategory::RequiredField, Severity::Critical),
        rule("RNG-0002", ValidationCategory::RangeCheck, Severity::Major),
        rule("REQ-0003", ValidationCategory::RequiredField, Severity::Critical),
    ];
    let doc = DvpAssembler::new(&protocol, DocumentStyles::default())
        .date("2025-01-31")
        .build(&rules);

    let headings = doc.headings();
    assert!(headings.contains(&(2, "2.1 Summary")));
    assert!(headings.contains(&(3, "2.2.1 Range Check")));
    assert!(headings.contains(&(3, "2.2.2 Required Field")));

    let summary = doc.tables().next().unwrap();
    assert_eq!(
        summary.rows,
        vec![vec!["Range Check", "1"], vec!["Required Field", "2"]]
    );

    let severity = doc.tables().last().unwrap();
    assert_eq!(severity.header, vec!["Severity", "Definition"]);
    assert_eq!(severity.rows.len(), 3);
}

#[test]
fn test_dvp_without_rules_says_so() {
    let protocol = protocol();
    let doc = DvpAssembler::new(&protocol, DocumentStyles::default()).build(&[]);
    assert!(doc.blocks().iter().any(|block| matches!(
        block,
        Block::Paragraph { text, .. } if text == "No validation rules defined."
    )));
    assert!(!doc.headings().contains(&(2, "2.1 Summary")));
}

#[test]
fn test_user_guide_lists_forms_and_screenshots() {
    let protocol = protocol();
    let forms: Vec<GuideForm> = domains(&["demographics", "adverse_events"])
        .iter()
        .map(GuideForm::from_domain)
        .collect();
    assert_eq!(forms[0].visit, "Screening");
    assert_eq!(forms[1].visit, "All Visits");

    let guide = UserGuideAssembler::new(&protocol, DocumentStyles::default(), SystemInfo::default())
        .build(&forms);

    let headings = guide.document.headings();
    assert!(headings.contains(&(2, "4.3 Demographics")));
    assert!(headings.contains(&(2, "4.4 Adverse Events")));
    assert!(headings.contains(&(1, "7. Appendix")));

    // 4 login steps, 2 navigation, 2 per form, 2 query, 2 report
    assert_eq!(guide.screenshots.len(), 4 + 2 + 2 * 2 + 2 + 2);
    assert_eq!(guide.screenshots[0].section, "System Access");
    assert_eq!(guide.screenshots[0].step, "Step 1");
}

#[test]
fn test_field_instruction_appends_validation() {
    let domain = &domains(&["vital_signs"])[0];
    let form = GuideForm::from_domain(domain);
    let systolic = form
        .fields
        .iter()
        .find(|field| field.name == "systolic_bp")
        .unwrap();
    assert_eq!(
        systolic.instruction(),
        "Enter numeric value. Validation: Unit: mmHg."
    );
}

#[test]
fn test_screenshot_list_file() {
    let protocol = protocol();
    let guide = UserGuideAssembler::new(&protocol, DocumentStyles::default(), SystemInfo::default())
        .build(&[]);
    let dir = tempdir().unwrap();
    let path = dir.path().join("UserGuide_ABC-123_screenshots.txt");

    write_screenshot_list(&guide.screenshots, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("SCREENSHOT REQUIREMENTS LIST"));
    assert!(content.contains(&format!(
        "Total Screenshots Needed: {}",
        guide.screenshots.len()
    )));
    assert!(content.contains("   Dimensions: 6\" x 4\""));
}

#[test]
fn test_dmp_defaults() {
    let protocol = protocol();
    let assembler = DmpAssembler::new(&protocol, DocumentStyles::default());
    assert_eq!(assembler.roles().len(), 3);
    assert_eq!(assembler.roles()[0].organization, "Example Pharma");
    assert_eq!(assembler.validation_checks().len(), 4);
    assert_eq!(assembler.lock_criteria().len(), 9);

    let doc = assembler.build();
    let level1: Vec<&str> = doc
        .headings()
        .into_iter()
        .filter(|(level, _)| *level == 1)
        .map(|(_, text)| text)
        .collect();
    assert_eq!(
        level1,
        vec![
            "1. Introduction",
            "2. Study Overview",
            "3. Data Management Responsibilities",
            "4. Data Flow",
            "5. CRF Design",
            "6. Data Validation",
            "7. Data Quality Control",
            "8. Database Lock",
            "9. Data Security",
            "10. Archive",
            "Appendix A: Abbreviations and Definitions",
        ]
    );
}

#[test]
fn test_dmp_timeline_and_domains_when_provided() {
    let protocol = protocol();
    let mut assembler = DmpAssembler::new(&protocol, DocumentStyles::default());
    assembler.add_domain(DmpDomain {
        name: "Adverse Events".to_string(),
        description: "Adverse event reporting".to_string(),
        critical: true,
        validation_rules: 5,
    });
    assembler.add_milestone(Milestone {
        name: "Database Lock".to_string(),
        description: "Final lock".to_string(),
        planned_date: "2026-06-30".to_string(),
        responsible: "Data Management Lead".to_string(),
    });

    let doc = assembler.build();
    assert!(doc.headings().contains(&(1, "Appendix B: Project Timeline")));
    assert!(doc.tables().any(|table| table.rows
        == vec![vec!["Adverse Events", "Adverse event reporting", "Yes", "5"]]));
}

#[test]
fn test_dvp_outline_without_rules() {
    let protocol = protocol();
    let doc = DvpAssembler::new(&protocol, DocumentStyles::default()).build(&[]);
    let outline = doc
        .headings()
        .into_iter()
        .map(|(level, text)| format!("{level} {text}"))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(outline, @r"
    1 1. Introduction
    1 2. Validation Rules
    1 3. Appendix
    2 3.1 Severity Definitions
    ");
}
