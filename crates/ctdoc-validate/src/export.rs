//! Rule export to JSON and CSV.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use serde::Serialize;

use ctdoc_model::RuleRecord;

use crate::error::{Result, ValidateError};

/// Write records as a pretty-printed JSON array.
pub fn write_rules_json(path: &Path, records: &[RuleRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).map_err(|source| ValidateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Serialize)]
struct CsvRow<'a> {
    rule_id: &'a str,
    validation_type: &'a str,
    severity: &'a str,
    form_name: &'a str,
    field_name: &'a str,
    description: &'a str,
    query_text: &'a str,
    details: String,
}

/// Write records as CSV with the details map serialized to a JSON column.
pub fn write_rules_csv(path: &Path, records: &[RuleRecord]) -> Result<()> {
    let file = File::create(path).map_err(|source| ValidateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_rules_csv_to(file, records).map_err(|source| ValidateError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// CSV export into any writer, e.g. stdout.
pub fn write_rules_csv_to<W: io::Write>(
    writer: W,
    records: &[RuleRecord],
) -> std::result::Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        let row = CsvRow {
            rule_id: &record.rule_id,
            validation_type: &record.validation_type,
            severity: &record.severity,
            form_name: record.form_name.as_deref().unwrap_or(""),
            field_name: record.field_name.as_deref().unwrap_or(""),
            description: &record.description,
            query_text: &record.query_text,
            details: serde_json::to_string(&record.details).map_err(io::Error::other)?,
        };
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
