//! Protocol extraction from PDF and plain-text documents.
//!
//! Extraction is heuristic. Scalar attributes come from `Label: value`
//! lines, list attributes from numbered or bulleted items that follow a
//! section heading, and CRF domains from keyword mentions anywhere in the
//! text.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use ctdoc_model::ProtocolInfo;

use crate::error::{IngestError, Result};
use crate::parser::{ProtocolParser, ensure_exists};

/// Text-based protocol parser for `.pdf` and plain-text inputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextProtocolParser;

impl ProtocolParser for TextProtocolParser {
    fn name(&self) -> &'static str {
        "text"
    }

    fn parse(&self, path: &Path, max_pages: Option<usize>) -> Result<ProtocolInfo> {
        ensure_exists(path)?;
        let text = read_text(path, max_pages)?;
        let info = extract_protocol_info(&text);
        if info == ProtocolInfo::default() {
            return Err(IngestError::NothingExtracted {
                path: path.to_path_buf(),
            });
        }
        info!(
            path = %path.display(),
            protocol_number = info.display_number(),
            domains = info.crf_domains.len(),
            "extracted protocol attributes"
        );
        Ok(info)
    }
}

fn read_text(path: &Path, max_pages: Option<usize>) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return fs::read_to_string(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        });
    }
    let pages = pdf_extract::extract_text_by_pages(path).map_err(|err| IngestError::Pdf {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let limit = max_pages.unwrap_or(pages.len()).min(pages.len());
    debug!(pages = pages.len(), limit, "extracted PDF text");
    Ok(pages[..limit].join("\n"))
}

struct ScalarLabel {
    pattern: Regex,
    apply: fn(&mut ProtocolInfo, String),
}

fn labelled(labels: &str) -> Regex {
    Regex::new(&format!(
        r"(?im)^[ \t]*(?:{labels})[ \t]*[:：][ \t]*(\S.*?)[ \t]*$"
    ))
    .expect("invalid label pattern")
}

static SCALAR_LABELS: LazyLock<Vec<ScalarLabel>> = LazyLock::new(|| {
    vec![
        ScalarLabel {
            pattern: labelled(r"protocol\s+title|study\s+title|full\s+title|title"),
            apply: |info, value| info.study_title = Some(value),
        },
        ScalarLabel {
            pattern: labelled(
                r"protocol\s+(?:number|no\.?|id|code)|study\s+(?:number|no\.?|id|code)",
            ),
            apply: |info, value| info.protocol_number = Some(value),
        },
        ScalarLabel {
            pattern: labelled(r"sponsor(?:\s+name)?"),
            apply: |info, value| info.sponsor = Some(value),
        },
        ScalarLabel {
            pattern: labelled(r"(?:study\s+|clinical\s+)?phase"),
            apply: |info, value| info.phase = Some(value),
        },
        ScalarLabel {
            pattern: labelled(r"indication|disease(?:\s+under\s+study)?"),
            apply: |info, value| info.indication = Some(value),
        },
        ScalarLabel {
            pattern: labelled(r"study\s+design|design"),
            apply: |info, value| info.study_design = Some(value),
        },
        ScalarLabel {
            pattern: labelled(r"target\s+population|study\s+population|population"),
            apply: |info, value| info.target_population = Some(value),
        },
        ScalarLabel {
            pattern: labelled(
                r"sample\s+size|planned\s+enrol(?:l)?ment|number\s+of\s+(?:subjects|patients|participants)",
            ),
            apply: |info, value| info.sample_size = Some(value),
        },
    ]
});

static PHASE_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bphase\s+(IV|I{1,3}[ab]?(?:/I{1,3})?|[1-4][ab]?(?:/[1-4])?)\b")
        .expect("invalid phase pattern")
});

static SAMPLE_SIZE_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:approximately|up\s+to|a\s+total\s+of)\s+(\d[\d,]*)\s+(?:subjects|patients|participants)\b")
        .expect("invalid sample size pattern")
});

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?:\d{1,3}[.)]|[a-z][.)]|[-•*·▪])[ \t]+(\S.*?)[ \t]*$")
        .expect("invalid list item pattern")
});

#[derive(Clone, Copy)]
enum ListSection {
    Inclusion,
    Exclusion,
    PrimaryEndpoints,
    SecondaryEndpoints,
    VisitSchedule,
}

static SECTION_HEADINGS: LazyLock<Vec<(Regex, ListSection)>> = LazyLock::new(|| {
    [
        (r"inclusion\s+criteria", ListSection::Inclusion),
        (r"exclusion\s+criteria", ListSection::Exclusion),
        (
            r"primary\s+(?:efficacy\s+)?endpoints?",
            ListSection::PrimaryEndpoints,
        ),
        (
            r"secondary\s+(?:efficacy\s+)?endpoints?",
            ListSection::SecondaryEndpoints,
        ),
        (
            r"visit\s+schedule|schedule\s+of\s+(?:assessments|activities|visits)",
            ListSection::VisitSchedule,
        ),
    ]
    .into_iter()
    .map(|(heading, section)| {
        let pattern = Regex::new(&format!(
            r"(?i)^[ \t]*(?:\d+(?:\.\d+)*\.?[ \t]+)?(?:{heading})[ \t]*[:：]?[ \t]*(.*?)[ \t]*$"
        ))
        .expect("invalid section heading pattern");
        (pattern, section)
    })
    .collect()
});

/// CRF domains, in catalogue order, with the phrases that indicate them.
const DOMAIN_KEYWORDS: [(&str, &[&str]); 7] = [
    ("Demographics", &["demographic"]),
    ("Medical History", &["medical history"]),
    ("Vital Signs", &["vital sign"]),
    ("Laboratory Tests", &["laboratory", "lab test", "clinical chemistry", "hematology"]),
    ("Adverse Events", &["adverse event"]),
    ("Concomitant Medications", &["concomitant medication", "prior medication"]),
    (
        "Study Drug Administration",
        &["study drug", "investigational product", "drug administration", "dosing"],
    ),
];

/// Extract protocol attributes from plain text.
pub fn extract_protocol_info(text: &str) -> ProtocolInfo {
    let mut info = ProtocolInfo::default();

    for label in SCALAR_LABELS.iter() {
        if let Some(value) = label
            .pattern
            .captures(text)
            .and_then(|captures| captures.get(1))
        {
            (label.apply)(&mut info, value.as_str().to_string());
        }
    }
    if info.phase.is_none()
        && let Some(captures) = PHASE_FALLBACK.captures(text)
    {
        info.phase = Some(format!("Phase {}", &captures[1]));
    }
    if info.sample_size.is_none()
        && let Some(captures) = SAMPLE_SIZE_FALLBACK.captures(text)
    {
        info.sample_size = Some(captures[1].replace(',', ""));
    }

    extract_lists(text, &mut info);

    let lowered = text.to_lowercase();
    info.crf_domains = DOMAIN_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(domain, _)| (*domain).to_string())
        .collect();

    info
}

fn extract_lists(text: &str, info: &mut ProtocolInfo) {
    let lines: Vec<&str> = text.lines().collect();
    let mut index = 0;
    while index < lines.len() {
        let Some((section, inline)) = match_heading(lines[index]) else {
            index += 1;
            continue;
        };
        let mut items = Vec::new();
        if !inline.is_empty() {
            items.push(inline);
        }
        index += 1;
        let mut preamble_allowed = items.is_empty();
        while index < lines.len() {
            let line = lines[index];
            if line.trim().is_empty() {
                index += 1;
                continue;
            }
            if match_heading(line).is_some() {
                break;
            }
            if let Some(captures) = LIST_ITEM.captures(line) {
                items.push(captures[1].to_string());
                preamble_allowed = false;
            } else if preamble_allowed {
                // one lead-in sentence before the first item
                preamble_allowed = false;
            } else {
                break;
            }
            index += 1;
        }
        let target = match section {
            ListSection::Inclusion => &mut info.inclusion_criteria,
            ListSection::Exclusion => &mut info.exclusion_criteria,
            ListSection::PrimaryEndpoints => &mut info.primary_endpoints,
            ListSection::SecondaryEndpoints => &mut info.secondary_endpoints,
            ListSection::VisitSchedule => &mut info.visit_schedule,
        };
        if target.is_empty() {
            *target = items;
        }
    }
}

fn match_heading(line: &str) -> Option<(ListSection, String)> {
    SECTION_HEADINGS.iter().find_map(|(pattern, section)| {
        pattern
            .captures(line)
            .map(|captures| (*section, captures[1].to_string()))
    })
}
