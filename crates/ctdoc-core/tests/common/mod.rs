//! Stub collaborators shared by the orchestrator tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use ctdoc_ingest::{IngestError, ProtocolParser};
use ctdoc_model::ProtocolInfo;
use ctdoc_output::{Document, DocumentBackend, OutputError};

pub fn protocol(number: &str) -> ProtocolInfo {
    ProtocolInfo {
        study_title: Some("A Phase II Study of ABC-123".to_string()),
        protocol_number: Some(number.to_string()),
        sponsor: Some("Example Pharma".to_string()),
        phase: Some("Phase II".to_string()),
        crf_domains: vec!["Demographics".to_string(), "Adverse Events".to_string()],
        ..ProtocolInfo::default()
    }
}

/// Returns a fixed protocol, or fails when none is configured.
pub struct StubParser {
    pub info: Option<ProtocolInfo>,
    pub needs_key: bool,
}

impl StubParser {
    pub fn ok(info: ProtocolInfo) -> Self {
        Self {
            info: Some(info),
            needs_key: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            info: None,
            needs_key: false,
        }
    }
}

impl ProtocolParser for StubParser {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn requires_credential(&self) -> bool {
        self.needs_key
    }

    fn parse(&self, path: &Path, _max_pages: Option<usize>) -> ctdoc_ingest::Result<ProtocolInfo> {
        self.info.clone().ok_or_else(|| IngestError::NothingExtracted {
            path: path.to_path_buf(),
        })
    }
}

/// Writes the document title as plain bytes; fails for file names that
/// start with `fail_prefix`.
pub struct StubBackend {
    pub fail_prefix: Option<&'static str>,
}

impl StubBackend {
    pub fn ok() -> Self {
        Self { fail_prefix: None }
    }

    pub fn failing_on(prefix: &'static str) -> Self {
        Self {
            fail_prefix: Some(prefix),
        }
    }
}

impl DocumentBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn write(&self, doc: &Document, path: &Path) -> ctdoc_output::Result<PathBuf> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(prefix) = self.fail_prefix
            && name.starts_with(prefix)
        {
            return Err(OutputError::Docx("disk full".to_string()));
        }
        fs::write(path, doc.title()).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(path.to_path_buf())
    }
}

/// Create an input file so the constructor precondition holds.
pub fn input_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "{}").unwrap();
    path
}
