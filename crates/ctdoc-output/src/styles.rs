//! Style profiles and compliance checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::Document;

const A4: (f64, f64) = (8.27, 11.69);
const LETTER: (f64, f64) = (8.5, 11.0);

const PAGE_TOLERANCE_INCHES: f64 = 0.1;
const MARGIN_TOLERANCE_INCHES: f64 = 0.2;

/// Page size and margins, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl PageSetup {
    fn sized((width, height): (f64, f64), margin: f64) -> Self {
        Self {
            width,
            height,
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
        }
    }
}

/// Styling applied when a document is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStyles {
    pub page: PageSetup,

    pub body_font: String,
    pub heading_font: String,

    /// Sizes in points.
    pub title_size: usize,
    pub heading1_size: usize,
    pub heading2_size: usize,
    pub heading3_size: usize,
    pub body_size: usize,
    pub table_size: usize,

    /// Hex RGB without `#`.
    pub heading_color: String,
    pub table_header_fill: String,
    pub label_fill: String,

    /// Running header text, if any.
    pub header_text: Option<String>,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        StyleProfile::Standard.styles()
    }
}

/// Named house style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleProfile {
    #[default]
    Standard,
    Fda,
    Bestat,
}

impl StyleProfile {
    pub const ALL: [StyleProfile; 3] = [
        StyleProfile::Standard,
        StyleProfile::Fda,
        StyleProfile::Bestat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleProfile::Standard => "standard",
            StyleProfile::Fda => "fda",
            StyleProfile::Bestat => "bestat",
        }
    }

    pub fn styles(&self) -> DocumentStyles {
        match self {
            StyleProfile::Standard => DocumentStyles {
                page: PageSetup::sized(A4, 1.0),
                body_font: "Calibri".to_string(),
                heading_font: "Calibri".to_string(),
                title_size: 16,
                heading1_size: 14,
                heading2_size: 12,
                heading3_size: 11,
                body_size: 11,
                table_size: 10,
                heading_color: "003366".to_string(),
                table_header_fill: "4472C4".to_string(),
                label_fill: "D9E2F3".to_string(),
                header_text: Some("CONFIDENTIAL".to_string()),
            },
            StyleProfile::Fda => DocumentStyles {
                page: PageSetup {
                    margin_top: 1.25,
                    margin_bottom: 1.25,
                    margin_left: 1.5,
                    margin_right: 1.0,
                    ..PageSetup::sized(LETTER, 1.0)
                },
                body_font: "Times New Roman".to_string(),
                heading_font: "Times New Roman".to_string(),
                title_size: 16,
                heading1_size: 14,
                heading2_size: 12,
                heading3_size: 12,
                body_size: 12,
                table_size: 10,
                heading_color: "000000".to_string(),
                table_header_fill: "D9D9D9".to_string(),
                label_fill: "F2F2F2".to_string(),
                header_text: None,
            },
            StyleProfile::Bestat => DocumentStyles {
                page: PageSetup::sized(A4, 1.0),
                body_font: "Arial".to_string(),
                heading_font: "Arial".to_string(),
                title_size: 18,
                heading1_size: 14,
                heading2_size: 12,
                heading3_size: 11,
                body_size: 10,
                table_size: 9,
                heading_color: "1F3864".to_string(),
                table_header_fill: "1F3864".to_string(),
                label_fill: "DEEAF6".to_string(),
                header_text: Some("CONFIDENTIAL".to_string()),
            },
        }
    }

    /// Header text every document in this profile must carry.
    pub fn required_header(&self) -> Option<&'static str> {
        match self {
            StyleProfile::Standard | StyleProfile::Bestat => Some("CONFIDENTIAL"),
            StyleProfile::Fda => None,
        }
    }

    pub fn requires_footer(&self) -> bool {
        matches!(self, StyleProfile::Bestat)
    }
}

impl fmt::Display for StyleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StyleProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleProfile::ALL
            .into_iter()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown style profile: {s}"))
    }
}

/// Outcome of [`validate_style`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleReport {
    pub compliant: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check a document against a profile.
///
/// Issues make the document non-compliant: page size off by more than
/// 0.1", top margin off by more than 0.2", a missing required header or
/// footer. A different body font and tables with an empty header row are
/// only warnings.
pub fn validate_style(doc: &Document, profile: StyleProfile) -> StyleReport {
    let expected = profile.styles();
    let actual = doc.styles();
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if (actual.page.width - expected.page.width).abs() > PAGE_TOLERANCE_INCHES {
        issues.push(format!(
            "Page width mismatch: expected {}\", found {:.2}\"",
            expected.page.width, actual.page.width
        ));
    }
    if (actual.page.height - expected.page.height).abs() > PAGE_TOLERANCE_INCHES {
        issues.push(format!(
            "Page height mismatch: expected {}\", found {:.2}\"",
            expected.page.height, actual.page.height
        ));
    }
    if (actual.page.margin_top - expected.page.margin_top).abs() > MARGIN_TOLERANCE_INCHES {
        issues.push(format!(
            "Top margin mismatch: expected {}\", found {:.2}\"",
            expected.page.margin_top, actual.page.margin_top
        ));
    }

    if let Some(required) = profile.required_header() {
        let present = doc
            .header_text()
            .is_some_and(|header| header.contains(required));
        if !present {
            issues.push(format!("Missing header text '{required}'"));
        }
    }
    if profile.requires_footer() && doc.footer_text().is_none_or(|f| f.trim().is_empty()) {
        issues.push("Missing footer".to_string());
    }

    if actual.body_font != expected.body_font {
        warnings.push(format!(
            "Non-standard body font: expected '{}', found '{}'",
            expected.body_font, actual.body_font
        ));
    }
    for (index, table) in doc.tables().enumerate() {
        if table.has_empty_header() {
            warnings.push(format!("Table {} has an empty header row", index + 1));
        }
    }

    StyleReport {
        compliant: issues.is_empty(),
        issues,
        warnings,
    }
}
