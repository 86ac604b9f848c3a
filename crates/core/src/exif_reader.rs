use crate::resolver::ExtractionError;
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn read_exif_date(path: &Path) -> Result<NaiveDateTime, ExtractionError> {
    let file = File::open(path)?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut buf)?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or(ExtractionError::MissingField)?;
    let raw = match &field.value {
        Value::Ascii(values) if !values.is_empty() => {
            String::from_utf8_lossy(&values[0]).trim().to_string()
        }
        _ => return Err(ExtractionError::MissingField),
    };

    parse_exif_datetime(&raw)
}

pub(crate) fn parse_exif_datetime(raw: &str) -> Result<NaiveDateTime, ExtractionError> {
    NaiveDateTime::parse_from_str(raw, "%Y:%m:%d %H:%M:%S")
        .map_err(|_| ExtractionError::Malformed(raw.to_string()))
}
