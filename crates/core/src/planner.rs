use crate::allocator::allocate_target;
use crate::fingerprint::fingerprint_file;
use crate::resolver::{DateResolver, DateSource};
use crate::scan::list_files;
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub date: NaiveDateTime,
    pub source: DateSource,
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEntry {
    pub record: FileRecord,
    pub target: PathBuf,
    pub duplicate: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanStats {
    pub total_files: usize,
    pub planned: usize,
    pub unchanged: usize,
    pub duplicates: usize,
    pub date_not_found: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub root: PathBuf,
    pub entries: Vec<PlanEntry>,
    pub stats: PlanStats,
}

#[derive(Debug, Clone, Copy)]
pub enum ScanOutcome<'a> {
    Resolved(&'a NaiveDateTime),
    DateNotFound,
    NoOperation,
}

/// Progress sink for the planning pass. `index` is 1-based.
pub trait PlanObserver {
    fn file_scanned(&mut self, index: usize, total: usize, path: &Path, outcome: ScanOutcome<'_>) {
        let _ = (index, total, path, outcome);
    }

    fn rename_planned(&mut self, from: &Path, to: &Path) {
        let _ = (from, to);
    }
}

pub struct NullObserver;

impl PlanObserver for NullObserver {}

/// Builds the full rename plan without touching the filesystem beyond
/// reads. One sequential pass in lexicographic path order; the
/// occupied-name set starts out holding every current path, and each
/// chosen target is claimed before the next file is considered.
pub fn generate_plan(
    root: &Path,
    resolver: &dyn DateResolver,
    observer: &mut dyn PlanObserver,
) -> Result<RenamePlan> {
    let paths = list_files(root)?;
    let total = paths.len();

    let mut occupied: HashSet<PathBuf> = paths.iter().cloned().collect();
    let mut seen_signatures: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();
    let mut stats = PlanStats {
        total_files: total,
        ..PlanStats::default()
    };

    for (position, path) in paths.iter().enumerate() {
        let index = position + 1;
        let resolved = resolver.resolve(path);
        let signature = fingerprint_file(path)?;
        let duplicate = !seen_signatures.insert(signature.clone());
        if duplicate {
            stats.duplicates += 1;
        }

        // An unverified filesystem timestamp never justifies a rename.
        // The file still holds its current name in the occupied set and
        // its signature already counted above.
        if resolved.source == DateSource::File {
            stats.date_not_found += 1;
            observer.file_scanned(index, total, path, ScanOutcome::DateNotFound);
            continue;
        }

        let target = allocate_target(path, &resolved.date, duplicate, &occupied);

        if target == *path {
            stats.unchanged += 1;
            observer.file_scanned(index, total, path, ScanOutcome::NoOperation);
            continue;
        }

        observer.file_scanned(index, total, path, ScanOutcome::Resolved(&resolved.date));
        observer.rename_planned(path, &target);
        occupied.insert(target.clone());
        stats.planned += 1;
        entries.push(PlanEntry {
            record: FileRecord {
                path: path.clone(),
                date: resolved.date,
                source: resolved.source,
                signature,
            },
            target,
            duplicate,
        });
    }

    Ok(RenamePlan {
        root: root.to_path_buf(),
        entries,
        stats,
    })
}
