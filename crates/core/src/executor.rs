use crate::planner::RenamePlan;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExecOutcome {
    Renamed,
    Failed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutedEntry {
    pub from: PathBuf,
    pub to: PathBuf,
    pub outcome: ExecOutcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub renamed: usize,
    pub failed: usize,
    pub entries: Vec<ExecutedEntry>,
}

pub trait ExecObserver {
    fn rename_attempted(&mut self, from: &Path, to: &Path, outcome: &ExecOutcome) {
        let _ = (from, to, outcome);
    }
}

pub struct NullExecObserver;

impl ExecObserver for NullExecObserver {}

/// Applies a confirmed plan. Each rename is independent and
/// best-effort: a failure is logged and reported against exactly the
/// entry that was attempted, and the batch continues. Renames already
/// completed stay in effect.
pub fn execute_plan(plan: &RenamePlan, observer: &mut dyn ExecObserver) -> ExecutionReport {
    let mut report = ExecutionReport::default();

    for entry in &plan.entries {
        let from = &entry.record.path;
        let to = &entry.target;
        let outcome = match fs::rename(from, to) {
            Ok(()) => {
                report.renamed += 1;
                ExecOutcome::Renamed
            }
            Err(err) => {
                error!(from = %from.display(), to = %to.display(), %err, "rename failed");
                report.failed += 1;
                ExecOutcome::Failed(err.to_string())
            }
        };
        observer.rename_attempted(from, to, &outcome);
        report.entries.push(ExecutedEntry {
            from: from.clone(),
            to: to.clone(),
            outcome,
        });
    }

    report
}
