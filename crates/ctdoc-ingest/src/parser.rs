use std::fs;
use std::path::Path;

use ctdoc_model::ProtocolInfo;

use crate::error::{IngestError, Result};
use crate::json::JsonProtocolParser;
use crate::text::TextProtocolParser;

/// Extracts [`ProtocolInfo`] from a protocol document.
///
/// Parsing is blocking and has no timeout.
pub trait ProtocolParser {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Whether the parser calls an external service that needs an API
    /// credential.
    fn requires_credential(&self) -> bool {
        false
    }

    /// Parse the document, reading at most `max_pages` pages where the
    /// format has pages.
    fn parse(&self, path: &Path, max_pages: Option<usize>) -> Result<ProtocolInfo>;
}

/// Picks a parser from the file extension: `.json` is read as structured
/// protocol data, everything else goes through text extraction.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoProtocolParser;

impl ProtocolParser for AutoProtocolParser {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn parse(&self, path: &Path, max_pages: Option<usize>) -> Result<ProtocolInfo> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            JsonProtocolParser.parse(path, max_pages)
        } else {
            TextProtocolParser.parse(path, max_pages)
        }
    }
}

/// Write `info` as pretty-printed JSON.
pub fn save_protocol_json(info: &ProtocolInfo, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(info)?;
    fs::write(path, json).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
