//! Integration tests for the DOCX backend.

use std::fs;

use ctdoc_model::ProtocolInfo;
use ctdoc_output::{
    CrfAssembler, DocumentBackend, DocxBackend, StyleProfile, render_docx,
};
use ctdoc_standards::load_standard_crf_domains;
use tempfile::tempdir;

#[test]
fn test_rendered_bytes_are_a_zip_package() {
    let protocol = ProtocolInfo::default();
    let domains = load_standard_crf_domains().unwrap();
    let doc = CrfAssembler::new(&protocol, StyleProfile::Fda.styles()).build(&domains);

    let bytes = render_docx(&doc).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_backend_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("CRF_UNKNOWN.docx");
    let protocol = ProtocolInfo::default();
    let doc = CrfAssembler::new(&protocol, StyleProfile::Standard.styles()).build(&[]);

    let written = DocxBackend.write(&doc, &path).unwrap();

    assert_eq!(written, path);
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
