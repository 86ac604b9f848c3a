use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// First free `YYYYMMDD_HHMMSS[_n]<ext>` name in the file's own
/// directory. For duplicate content the probe tests the final, marked
/// form of each candidate, so the name that gets claimed is the name
/// that was checked. The candidate equal to the current path
/// short-circuits the probe, which is the planner's no-op signal.
/// Termination holds because the occupied set is finite and the index
/// only grows.
pub fn allocate_target(
    path: &Path,
    date: &NaiveDateTime,
    duplicate: bool,
    occupied: &HashSet<PathBuf>,
) -> PathBuf {
    let stamp = date.format("%Y%m%d_%H%M%S").to_string();
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    let mut index = 0usize;
    loop {
        let name = if index == 0 {
            format!("{stamp}{extension}")
        } else {
            format!("{stamp}_{index}{extension}")
        };
        let candidate = parent.join(name);
        let target = if duplicate {
            mark_duplicate(&candidate)
        } else {
            candidate.clone()
        };
        if target == path || (!occupied.contains(&candidate) && !occupied.contains(&target)) {
            return target;
        }
        index += 1;
    }
}

/// Tags a redundant copy by inserting `.rm` before the extension.
pub fn mark_duplicate(target: &Path) -> PathBuf {
    let parent = target.parent().unwrap_or_else(|| Path::new(""));
    let stem = target
        .file_stem()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_else(|| "file".to_string());
    match target.extension() {
        Some(ext) => parent.join(format!("{stem}.rm.{}", ext.to_string_lossy())),
        None => parent.join(format!("{stem}.rm")),
    }
}

#[cfg(test)]
mod tests {
    use super::{allocate_target, mark_duplicate};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};

    fn sample_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 5, 1)
            .expect("valid date")
            .and_hms_opt(10, 0, 0)
            .expect("valid time")
    }

    #[test]
    fn first_candidate_has_no_suffix() {
        let occupied = HashSet::new();
        let target = allocate_target(
            Path::new("/photos/IMG_1.jpg"),
            &sample_date(),
            false,
            &occupied,
        );
        assert_eq!(target, PathBuf::from("/photos/20210501_100000.jpg"));
    }

    #[test]
    fn probes_past_occupied_candidates() {
        let occupied: HashSet<PathBuf> = [
            PathBuf::from("/photos/20210501_100000.jpg"),
            PathBuf::from("/photos/20210501_100000_1.jpg"),
        ]
        .into_iter()
        .collect();

        let target = allocate_target(
            Path::new("/photos/IMG_1.jpg"),
            &sample_date(),
            false,
            &occupied,
        );
        assert_eq!(target, PathBuf::from("/photos/20210501_100000_2.jpg"));
    }

    #[test]
    fn current_path_short_circuits_even_when_occupied() {
        let path = Path::new("/photos/20210501_100000.jpg");
        let occupied: HashSet<PathBuf> = [path.to_path_buf()].into_iter().collect();

        assert_eq!(allocate_target(path, &sample_date(), false, &occupied), path);
    }

    #[test]
    fn suffixed_current_path_short_circuits_too() {
        let path = Path::new("/photos/20210501_100000_1.jpg");
        let occupied: HashSet<PathBuf> = [
            PathBuf::from("/photos/20210501_100000.jpg"),
            path.to_path_buf(),
        ]
        .into_iter()
        .collect();

        assert_eq!(allocate_target(path, &sample_date(), false, &occupied), path);
    }

    #[test]
    fn extension_is_part_of_the_allocation_key() {
        let occupied: HashSet<PathBuf> = [PathBuf::from("/photos/20210501_100000.jpg")]
            .into_iter()
            .collect();

        let target = allocate_target(
            Path::new("/photos/IMG_1.png"),
            &sample_date(),
            false,
            &occupied,
        );
        assert_eq!(target, PathBuf::from("/photos/20210501_100000.png"));
    }

    #[test]
    fn extensionless_file_gets_bare_stamp() {
        let occupied = HashSet::new();
        let target = allocate_target(Path::new("/docs/scan"), &sample_date(), false, &occupied);
        assert_eq!(target, PathBuf::from("/docs/20210501_100000"));
    }

    #[test]
    fn duplicate_gets_suffix_when_unmarked_name_is_taken() {
        let occupied: HashSet<PathBuf> = [PathBuf::from("/photos/20210501_100000.jpg")]
            .into_iter()
            .collect();

        let target = allocate_target(Path::new("/photos/b.jpg"), &sample_date(), true, &occupied);
        assert_eq!(target, PathBuf::from("/photos/20210501_100000_1.rm.jpg"));
    }

    #[test]
    fn duplicate_probe_checks_the_marked_form() {
        // A claimed marked name must push the probe onward even though
        // the unmarked candidate at that index is free.
        let occupied: HashSet<PathBuf> = [
            PathBuf::from("/photos/20210501_100000.jpg"),
            PathBuf::from("/photos/20210501_100000_1.rm.jpg"),
        ]
        .into_iter()
        .collect();

        let target = allocate_target(Path::new("/photos/c.jpg"), &sample_date(), true, &occupied);
        assert_eq!(target, PathBuf::from("/photos/20210501_100000_2.rm.jpg"));
    }

    #[test]
    fn duplicate_marker_sits_before_the_extension() {
        let marked = mark_duplicate(Path::new("/photos/20210501_100000_1.jpg"));
        assert_eq!(marked, PathBuf::from("/photos/20210501_100000_1.rm.jpg"));
    }

    #[test]
    fn duplicate_marker_without_extension_is_a_plain_suffix() {
        let marked = mark_duplicate(Path::new("/docs/20210501_100000"));
        assert_eq!(marked, PathBuf::from("/docs/20210501_100000.rm"));
    }
}
