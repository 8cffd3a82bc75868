use serde::{Deserialize, Serialize};

/// Attributes extracted from a clinical trial protocol.
///
/// Every attribute is optional: extraction is best-effort and documents
/// render missing values as `N/A`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolInfo {
    pub study_title: Option<String>,
    pub protocol_number: Option<String>,
    pub sponsor: Option<String>,
    pub phase: Option<String>,
    pub indication: Option<String>,
    pub study_design: Option<String>,
    pub target_population: Option<String>,
    pub sample_size: Option<String>,
    pub visit_schedule: Vec<String>,
    pub primary_endpoints: Vec<String>,
    pub secondary_endpoints: Vec<String>,
    pub inclusion_criteria: Vec<String>,
    pub exclusion_criteria: Vec<String>,
    /// CRF domain display names required by the protocol.
    pub crf_domains: Vec<String>,
}

impl ProtocolInfo {
    /// Protocol number made safe for use in a file name.
    ///
    /// `/` becomes `_`; a missing or blank number yields `UNKNOWN`.
    pub fn file_token(&self) -> String {
        match self.protocol_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => number.replace(['/', '\\'], "_"),
            _ => "UNKNOWN".to_string(),
        }
    }

    pub fn display_title(&self) -> &str {
        display(&self.study_title)
    }

    pub fn display_number(&self) -> &str {
        display(&self.protocol_number)
    }

    pub fn display_sponsor(&self) -> &str {
        display(&self.sponsor)
    }

    pub fn display_phase(&self) -> &str {
        display(&self.phase)
    }

    pub fn display_indication(&self) -> &str {
        display(&self.indication)
    }

    /// `(label, value)` pairs for the descriptive attributes, in display order.
    pub fn summary_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Study Title", self.display_title()),
            ("Protocol Number", self.display_number()),
            ("Sponsor", self.display_sponsor()),
            ("Phase", self.display_phase()),
            ("Study Design", display(&self.study_design)),
            ("Target Population", display(&self.target_population)),
            ("Sample Size", display(&self.sample_size)),
        ]
    }
}

fn display(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => "N/A",
    }
}
