//! Integration tests for the single-protocol orchestrator.

mod common;

use std::fs;

use tempfile::tempdir;

use ctdoc_core::{Automation, WorkflowError, WorkflowOptions};
use ctdoc_model::{DocumentKind, RunReport, TaskKind, TaskStatus};

use common::{StubBackend, StubParser, input_file, protocol};

#[test]
fn test_crf_and_dvp_request_records_three_tasks() {
    let dir = tempdir().unwrap();
    let input = input_file(dir.path(), "TEST-001.json");
    let out = dir.path().join("out");
    let parser = StubParser::ok(protocol("TEST-001"));
    let backend = StubBackend::ok();
    let options = WorkflowOptions::default()
        .with_kinds([DocumentKind::Crf, DocumentKind::Dvp])
        .with_output_dir(&out);

    let report = Automation::new(&input, &parser, &backend, options)
        .unwrap()
        .run();

    assert_eq!(report.total_tasks(), 3);
    assert_eq!(report.completed_tasks(), 3);
    assert!(report.task(TaskKind::UserGuide).is_none());
    assert!(report.task(TaskKind::Dmp).is_none());
    assert!(report.is_finished());

    for name in [
        "protocol_info.json",
        "CRF_TEST-001.docx",
        "DVP_TEST-001.docx",
        "DVP_TEST-001_rules.json",
        "DVP_TEST-001_rules.csv",
        "automation_report.json",
        "automation_report.txt",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    assert_eq!(report.generated_files().len(), 5);
    assert_eq!(report.generated_files()[1], out.join("CRF_TEST-001.docx"));
}

#[test]
fn test_parse_failure_halts_before_generation() {
    let dir = tempdir().unwrap();
    let input = input_file(dir.path(), "broken.pdf");
    let out = dir.path().join("out");
    let parser = StubParser::failing();
    let backend = StubBackend::ok();

    let report = Automation::new(
        &input,
        &parser,
        &backend,
        WorkflowOptions::default().with_output_dir(&out),
    )
    .unwrap()
    .run();

    assert_eq!(report.total_tasks(), 1);
    assert_eq!(report.failed_tasks(), 1);
    assert_eq!(report.tasks()[0].status(), TaskStatus::Failed);
    assert!(report.errors()[0].starts_with("[protocol_parsing] Protocol parsing failed"));
    assert!(report.protocol_info().is_none());
    assert!(out.join("automation_report.json").is_file());
    assert!(!out.join("CRF_UNKNOWN.docx").exists());
}

#[test]
fn test_step_failure_does_not_stop_later_steps() {
    let dir = tempdir().unwrap();
    let input = input_file(dir.path(), "p.json");
    let out = dir.path().join("out");
    let parser = StubParser::ok(protocol("TEST-001"));
    let backend = StubBackend::failing_on("DVP_");

    let report = Automation::new(
        &input,
        &parser,
        &backend,
        WorkflowOptions::default().with_output_dir(&out),
    )
    .unwrap()
    .run();

    assert_eq!(report.total_tasks(), 5);
    let dvp = report.task(TaskKind::Dvp).unwrap();
    assert_eq!(dvp.status(), TaskStatus::Failed);
    assert!(dvp.error_message().unwrap().contains("disk full"));
    assert_eq!(
        report.task(TaskKind::UserGuide).unwrap().status(),
        TaskStatus::Completed
    );
    assert!(out.join("UserGuide_TEST-001_screenshots.txt").is_file());

    let dmp = report.task(TaskKind::Dmp).unwrap();
    assert_eq!(dmp.status(), TaskStatus::Skipped);
    assert_eq!(dmp.error_message(), Some("DMP generator not implemented"));

    assert_eq!(report.failed_tasks(), 1);
    assert_eq!(report.skipped_tasks(), 1);
    assert!(report.has_failures());
    assert_eq!(report.errors().len(), 1);
    assert!(report.errors()[0].starts_with("[dvp] DVP generation failed"));
}

#[test]
fn test_enabled_dmp_writes_document() {
    let dir = tempdir().unwrap();
    let input = input_file(dir.path(), "p.json");
    let out = dir.path().join("out");
    let parser = StubParser::ok(protocol("TEST-001"));
    let backend = StubBackend::ok();
    let mut options = WorkflowOptions::default()
        .with_kinds([DocumentKind::Dmp])
        .with_output_dir(&out);
    options.dmp_enabled = true;

    let report = Automation::new(&input, &parser, &backend, options)
        .unwrap()
        .run();

    let dmp = report.task(TaskKind::Dmp).unwrap();
    assert_eq!(dmp.status(), TaskStatus::Completed);
    assert_eq!(dmp.output_path(), Some(out.join("DMP_TEST-001.docx").as_path()));
    assert_eq!(
        fs::read_to_string(out.join("DMP_TEST-001.docx")).unwrap(),
        "Data Management Plan"
    );
}

#[test]
fn test_missing_input_fails_construction() {
    let dir = tempdir().unwrap();
    let parser = StubParser::ok(protocol("TEST-001"));
    let backend = StubBackend::ok();

    let result = Automation::new(
        dir.path().join("absent.pdf"),
        &parser,
        &backend,
        WorkflowOptions::default().with_output_dir(dir.path().join("out")),
    );

    assert!(matches!(result, Err(WorkflowError::MissingInput { .. })));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_credential_required_only_when_parser_needs_it() {
    let dir = tempdir().unwrap();
    let input = input_file(dir.path(), "p.pdf");
    let backend = StubBackend::ok();
    let mut parser = StubParser::ok(protocol("TEST-001"));
    parser.needs_key = true;

    let options = WorkflowOptions::default().with_output_dir(dir.path().join("out"));
    let result = Automation::new(&input, &parser, &backend, options.clone());
    assert!(matches!(
        result,
        Err(WorkflowError::MissingCredential { parser: "stub" })
    ));

    let mut keyed = options;
    keyed.credential = Some("secret".to_string());
    assert!(Automation::new(&input, &parser, &backend, keyed).is_ok());
}

#[test]
fn test_existing_artifact_is_backed_up() {
    let dir = tempdir().unwrap();
    let input = input_file(dir.path(), "p.json");
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("CRF_ABC_123.docx"), "previous run").unwrap();
    let parser = StubParser::ok(protocol("ABC/123"));
    let backend = StubBackend::ok();

    let report = Automation::new(
        &input,
        &parser,
        &backend,
        WorkflowOptions::default()
            .with_kinds([DocumentKind::Crf])
            .with_output_dir(&out),
    )
    .unwrap()
    .run();

    assert_eq!(report.completed_tasks(), 2);
    assert_eq!(
        fs::read_to_string(out.join("_backup").join("CRF_ABC_123.docx")).unwrap(),
        "previous run"
    );
    assert_eq!(
        fs::read_to_string(out.join("CRF_ABC_123.docx")).unwrap(),
        "Case Report Form (CRF)"
    );
}

#[test]
fn test_no_backup_when_disabled() {
    let dir = tempdir().unwrap();
    let input = input_file(dir.path(), "p.json");
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("CRF_TEST-001.docx"), "previous run").unwrap();
    let parser = StubParser::ok(protocol("TEST-001"));
    let backend = StubBackend::ok();
    let mut options = WorkflowOptions::default()
        .with_kinds([DocumentKind::Crf])
        .with_output_dir(&out);
    options.backup = false;

    Automation::new(&input, &parser, &backend, options)
        .unwrap()
        .run();

    assert!(!out.join("_backup").exists());
}

#[test]
fn test_report_files_describe_the_run() {
    let dir = tempdir().unwrap();
    let input = input_file(dir.path(), "p.json");
    let out = dir.path().join("out");
    let parser = StubParser::ok(protocol("TEST-001"));
    let backend = StubBackend::ok();

    let report = Automation::new(
        &input,
        &parser,
        &backend,
        WorkflowOptions::default()
            .with_kinds([DocumentKind::Crf])
            .with_output_dir(&out),
    )
    .unwrap()
    .run();

    let json = fs::read_to_string(out.join("automation_report.json")).unwrap();
    let restored: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, report);

    let text = fs::read_to_string(out.join("automation_report.txt")).unwrap();
    assert!(text.contains("Protocol Number: TEST-001"));
    assert!(text.contains("Total Tasks: 2"));
    assert!(text.contains("Success Rate: 100.0%"));
    assert!(text.contains("2. ✓ CRF - COMPLETED"));
    assert!(!text.contains("[Errors]"));
}

#[test]
fn test_generation_before_parse_is_skipped() {
    let dir = tempdir().unwrap();
    let input = input_file(dir.path(), "p.json");
    let out = dir.path().join("out");
    let parser = StubParser::ok(protocol("TEST-001"));
    let backend = StubBackend::ok();
    let mut automation = Automation::new(
        &input,
        &parser,
        &backend,
        WorkflowOptions::default().with_output_dir(&out),
    )
    .unwrap();

    assert!(!automation.generate(DocumentKind::Crf).unwrap());
    assert!(automation.generate(DocumentKind::Dmp).unwrap());

    let report = automation.report();
    assert_eq!(report.total_tasks(), 2);
    assert_eq!(report.skipped_tasks(), 2);
    let crf = report.task(TaskKind::Crf).unwrap();
    assert_eq!(crf.status(), TaskStatus::Skipped);
    assert_eq!(
        crf.error_message(),
        Some("Cannot generate CRF: protocol information not parsed")
    );
    assert_eq!(
        report.task(TaskKind::Dmp).unwrap().status(),
        TaskStatus::Skipped
    );
    assert!(report.errors().is_empty());
    assert!(!out.join("CRF_TEST-001.docx").exists());
}
