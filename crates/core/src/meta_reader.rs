use crate::resolver::ExtractionError;
use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use std::path::Path;
use std::process::Command;

/// Container-level creation date via an external ffprobe report.
/// Every failure mode (probe missing, unreadable container, absent
/// field, unparsable value) collapses into an `ExtractionError` so the
/// resolver can demote to the next strategy.
pub fn read_container_date(path: &Path) -> Result<NaiveDateTime, ExtractionError> {
    let output = Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_format"])
        .arg(path)
        .output()?;
    if !output.status.success() {
        return Err(ExtractionError::NoReport);
    }

    let report: Value =
        serde_json::from_slice(&output.stdout).map_err(|_| ExtractionError::NoReport)?;
    let raw = report
        .get("format")
        .and_then(|format| format.get("tags"))
        .and_then(|tags| tags.get("creation_time"))
        .and_then(Value::as_str)
        .ok_or(ExtractionError::MissingField)?;

    parse_creation_time(raw).ok_or_else(|| ExtractionError::Malformed(raw.to_string()))
}

fn parse_creation_time(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
}
