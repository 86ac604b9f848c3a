use anyhow::{Context, Result};
use clap::Parser;
use fdate_renamer_core::{
    execute_plan, generate_plan, ExecObserver, ExecOutcome, PlanObserver, ScanOutcome,
    StrategyResolver,
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fdate-renamer")]
#[command(about = "ファイル名を撮影日時へ一括リネームし、重複コンテンツに印を付けます")]
struct Cli {
    /// リネーム対象のフォルダ (再帰的に処理します)
    folder: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    // No folder means no action; the process exits cleanly.
    let Some(folder) = cli.folder else {
        return Ok(());
    };
    run(&folder)
}

fn init_tracing() {
    // Diagnostics go to stderr so stdout stays a clean protocol stream.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(folder: &Path) -> Result<()> {
    let folder = fs::canonicalize(folder)
        .with_context(|| format!("フォルダを解決できませんでした: {}", folder.display()))?;

    print_banner(&folder);

    let plan = generate_plan(&folder, &StrategyResolver, &mut ConsolePlanObserver)?;

    println!(
        "Found {} files, {} to rename, execute ? (y/n)",
        plan.stats.total_files,
        plan.entries.len()
    );
    if !confirmed()? {
        return Ok(());
    }

    execute_plan(&plan, &mut ConsoleExecObserver);
    Ok(())
}

fn print_banner(folder: &Path) {
    let title = format!("Rename in {}", folder.display());
    let rule = "-".repeat(title.chars().count());
    println!("{rule}");
    println!("{title}");
    println!("{rule}");
}

fn confirmed() -> Result<bool> {
    io::stdout().flush().ok();
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("確認入力を読めませんでした")?;
    Ok(is_affirmative(&answer))
}

// Only the literal `y` proceeds; anything else aborts with no changes.
fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']) == "y"
}

struct ConsolePlanObserver;

impl PlanObserver for ConsolePlanObserver {
    fn file_scanned(&mut self, index: usize, total: usize, path: &Path, outcome: ScanOutcome<'_>) {
        match outcome {
            ScanOutcome::Resolved(date) => {
                println!("[{index}/{total}] {} -> {date}", path.display());
            }
            ScanOutcome::DateNotFound => {
                println!("[{index}/{total}] {} -> date not found", path.display());
            }
            ScanOutcome::NoOperation => {
                println!("[{index}/{total}] {} -> no operation", path.display());
            }
        }
    }

    fn rename_planned(&mut self, from: &Path, to: &Path) {
        println!("[rename] {} -> {}", from.display(), to.display());
    }
}

struct ConsoleExecObserver;

impl ExecObserver for ConsoleExecObserver {
    fn rename_attempted(&mut self, from: &Path, to: &Path, outcome: &ExecOutcome) {
        match outcome {
            ExecOutcome::Renamed => println!("[renamed] {} -> {}", from.display(), to.display()),
            ExecOutcome::Failed(_) => println!("[failed] {} -> {}", from.display(), to.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::is_affirmative;

    #[test]
    fn only_the_literal_y_confirms() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("y\r\n"));

        assert!(!is_affirmative(""));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("Y\n"));
        assert!(!is_affirmative("yes\n"));
        assert!(!is_affirmative(" y\n"));
    }
}
