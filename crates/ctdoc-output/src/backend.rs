use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::docx::render_docx;
use crate::document::Document;
use crate::error::{OutputError, Result};

/// Writes an assembled [`Document`] to disk.
pub trait DocumentBackend {
    fn name(&self) -> &'static str;

    /// Write `doc` to `path`, creating parent directories, and return the
    /// path written.
    fn write(&self, doc: &Document, path: &Path) -> Result<PathBuf>;
}

/// Office Open XML (`.docx`) backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxBackend;

impl DocumentBackend for DocxBackend {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn write(&self, doc: &Document, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let bytes = render_docx(doc)?;
        fs::write(path, &bytes).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), title = doc.title(), "wrote DOCX");
        Ok(path.to_path_buf())
    }
}
