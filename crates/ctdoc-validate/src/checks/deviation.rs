use ctdoc_model::{Severity, ValidationCategory};

use super::RuleDraft;

const DEVIATION_CHECKS: [(&str, Severity, &str, &str); 4] = [
    (
        "inclusion_criteria",
        Severity::Critical,
        "Check that inclusion criteria are met at screening",
        "Please verify that all inclusion criteria were met. A protocol deviation may have occurred.",
    ),
    (
        "exclusion_criteria",
        Severity::Critical,
        "Check that exclusion criteria are not violated",
        "Please verify that no exclusion criteria were violated. A protocol deviation may have occurred.",
    ),
    (
        "visit_window",
        Severity::Major,
        "Check that visit windows are within protocol-specified ranges",
        "Please verify the visit date. It appears to be outside the protocol-specified window.",
    ),
    (
        "prohibited_medication",
        Severity::Major,
        "Check that prohibited medications were not taken",
        "Please verify the concomitant medication. It may be prohibited per protocol.",
    ),
];

/// The fixed protocol deviation checks; independent of the field catalogue.
pub(crate) fn check() -> Vec<RuleDraft> {
    DEVIATION_CHECKS
        .iter()
        .map(|(deviation, severity, description, query)| {
            RuleDraft::new(
                ValidationCategory::ProtocolDeviation,
                *severity,
                (*description).to_string(),
                (*query).to_string(),
            )
            .detail("deviation_type", *deviation)
        })
        .collect()
}
