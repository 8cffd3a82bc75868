use std::fs;
use std::path::Path;

use tracing::debug;

use ctdoc_model::ProtocolInfo;

use crate::error::{IngestError, Result};
use crate::parser::{ProtocolParser, ensure_exists};

/// Reads a protocol previously saved as JSON (for example the
/// `protocol_info.json` written by an earlier run).
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonProtocolParser;

impl ProtocolParser for JsonProtocolParser {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, path: &Path, _max_pages: Option<usize>) -> Result<ProtocolInfo> {
        ensure_exists(path)?;
        let content = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let info: ProtocolInfo =
            serde_json::from_str(&content).map_err(|source| IngestError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "loaded protocol JSON");
        Ok(info)
    }
}
