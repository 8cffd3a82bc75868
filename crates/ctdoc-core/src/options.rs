use std::path::PathBuf;

use ctdoc_model::{CustomRule, DocumentKind, FieldDefinition};
use ctdoc_output::{StyleProfile, SystemInfo};
use ctdoc_standards::CrfDomain;

/// Resolved options for one orchestration run.
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    /// Output directory; `output_<stem>_<timestamp>` when unset.
    pub output_dir: Option<PathBuf>,
    /// Documents to generate. Execution order is fixed regardless of the
    /// order given here.
    pub kinds: Vec<DocumentKind>,
    /// Copy existing artifacts into `_backup/` before overwriting them.
    pub backup: bool,
    pub max_pages: Option<usize>,
    pub style: StyleProfile,
    /// DVP field catalogue; the standard catalogue is used when empty.
    pub fields: Vec<FieldDefinition>,
    pub custom_rules: Vec<CustomRule>,
    pub custom_domains: Vec<CrfDomain>,
    /// Run the DMP assembler instead of the not-implemented stub.
    pub dmp_enabled: bool,
    pub credential: Option<String>,
    pub system: SystemInfo,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            kinds: DocumentKind::ALL.to_vec(),
            backup: true,
            max_pages: None,
            style: StyleProfile::default(),
            fields: Vec::new(),
            custom_rules: Vec::new(),
            custom_domains: Vec::new(),
            dmp_enabled: false,
            credential: None,
            system: SystemInfo::default(),
        }
    }
}

impl WorkflowOptions {
    pub fn wants(&self, kind: DocumentKind) -> bool {
        self.kinds.contains(&kind)
    }

    #[must_use]
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = DocumentKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_every_document() {
        let options = WorkflowOptions::default();
        for kind in DocumentKind::ALL {
            assert!(options.wants(kind));
        }
        assert!(options.backup);
        assert!(!options.dmp_enabled);
    }

    #[test]
    fn with_kinds_narrows_the_request() {
        let options = WorkflowOptions::default().with_kinds([DocumentKind::Dvp]);
        assert!(options.wants(DocumentKind::Dvp));
        assert!(!options.wants(DocumentKind::Crf));
    }
}
