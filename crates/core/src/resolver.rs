use crate::exif_reader::read_exif_date;
use crate::meta_reader::read_container_date;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    Exif,
    Meta,
    File,
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateSource::Exif => "exif",
            DateSource::Meta => "meta",
            DateSource::File => "file",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDateTime,
    pub source: DateSource,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("ファイルを読めませんでした: {0}")]
    Io(#[from] std::io::Error),
    #[error("EXIFを解析できませんでした: {0}")]
    Exif(#[from] exif::Error),
    #[error("メタデータレポートを取得できませんでした")]
    NoReport,
    #[error("作成日時フィールドがありません")]
    MissingField,
    #[error("日時を解釈できませんでした: {0}")]
    Malformed(String),
}

pub trait DateResolver {
    fn resolve(&self, path: &Path) -> ResolvedDate;
}

/// Embedded dates outrank filesystem timestamps, which are reset by
/// copies and backups: exif, then container metadata, then ctime.
pub struct StrategyResolver;

impl DateResolver for StrategyResolver {
    fn resolve(&self, path: &Path) -> ResolvedDate {
        match read_exif_date(path) {
            Ok(date) => {
                return ResolvedDate {
                    date,
                    source: DateSource::Exif,
                }
            }
            Err(err) => debug!(path = %path.display(), %err, "exif date unavailable"),
        }

        match read_container_date(path) {
            Ok(date) => {
                return ResolvedDate {
                    date,
                    source: DateSource::Meta,
                }
            }
            Err(err) => debug!(path = %path.display(), %err, "container date unavailable"),
        }

        ResolvedDate {
            date: filesystem_date(path),
            source: DateSource::File,
        }
    }
}

pub fn filesystem_date(path: &Path) -> NaiveDateTime {
    fs::metadata(path)
        .and_then(|meta| meta.created().or_else(|_| meta.modified()))
        .map(|time| DateTime::<Local>::from(time).naive_local())
        .unwrap_or_else(|_| Local::now().naive_local())
}
