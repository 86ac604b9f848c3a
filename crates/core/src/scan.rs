use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursive file listing in lexicographic path order. Allocation and
/// duplicate marking are order-dependent, so the sort is what makes a
/// run deterministic across OS directory-iteration orders.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root) {
        let entry =
            entry.with_context(|| format!("フォルダ走査に失敗しました: {}", root.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        paths.push(entry.into_path());
    }
    paths.sort();
    Ok(paths)
}
