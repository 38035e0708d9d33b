//! Selection and move planning
//!
//! Moving is split into two steps so nothing touches the disk until the whole
//! batch has been validated:
//!
//! 1. `build_plan` checks the selection against the destination and assigns
//!    every source a collision-free target name.
//! 2. `execute` performs the moves in order. Per-file failures are collected
//!    and the remaining files are still moved; earlier moves are never rolled
//!    back.

use crate::error::{Result, ShelveError};
use crate::utils;
use serde::Serialize;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Files picked by the user, kept in the order they were picked
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    paths: Vec<PathBuf>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `path` if absent, remove it if present.
    /// Relative paths are stored made absolute against the working directory.
    /// Returns whether the path is selected afterwards.
    pub fn toggle(&mut self, path: &Path) -> Result<bool> {
        let path = std::path::absolute(path).map_err(|e| ShelveError::from_io(path, e))?;
        if let Some(pos) = self.paths.iter().position(|p| *p == path) {
            self.paths.remove(pos);
            return Ok(false);
        }
        if !path.is_file() {
            return Err(ShelveError::NotAFile(path));
        }
        self.paths.push(path);
        Ok(true)
    }

    pub fn contains(&self, path: &Path) -> bool {
        std::path::absolute(path).is_ok_and(|path| self.paths.contains(&path))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    /// Combined size of the selected files that still exist
    pub fn total_size(&self) -> u64 {
        self.paths
            .iter()
            .filter_map(|p| fs::metadata(p).ok())
            .map(|m| m.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveStep {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl MoveStep {
    /// True when the file keeps its original name
    pub fn keeps_name(&self) -> bool {
        self.source.file_name() == self.destination.file_name()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MovePlan {
    pub destination_dir: PathBuf,
    pub steps: Vec<MoveStep>,
}

impl MovePlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of files that will be renamed to avoid a collision
    pub fn renamed_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.keeps_name()).count()
    }
}

#[derive(Debug)]
pub struct MoveFailure {
    pub source: PathBuf,
    pub error: ShelveError,
}

#[derive(Debug, Default)]
pub struct MoveReport {
    pub moved: Vec<MoveStep>,
    pub failures: Vec<MoveFailure>,
    pub moved_bytes: u64,
}

impl MoveReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Moved {} files ({}), {} failed",
            self.moved.len(),
            bytesize::to_string(self.moved_bytes, false),
            self.failures.len()
        )
    }
}

/// Build `name (n).ext` (or `name (n)` without an extension)
fn numbered_name(file_name: &Path, n: u64) -> OsString {
    let stem = file_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = OsString::from(format!("{} ({})", stem, n));
    if let Some(ext) = file_name.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Pick a target path for `file_name` inside `dir` that neither exists on
/// disk nor appears in `claimed`.
pub fn resolve_conflict(dir: &Path, file_name: &Path, claimed: &HashSet<PathBuf>) -> Result<PathBuf> {
    let direct = dir.join(file_name);
    let is_free = |candidate: &Path| !candidate.exists() && !claimed.contains(candidate);

    if is_free(&direct) {
        return Ok(direct);
    }

    for n in 1..u64::MAX {
        let candidate = dir.join(numbered_name(file_name, n));
        if is_free(&candidate) {
            return Ok(candidate);
        }
    }
    Err(ShelveError::ConflictResolutionExhausted(direct))
}

/// Validate a selection against `destination` and assign target names.
pub fn build_plan(selection: &SelectionSet, destination: &Path) -> Result<MovePlan> {
    if selection.is_empty() {
        return Err(ShelveError::EmptySelection);
    }
    if !destination.is_dir() {
        return Err(ShelveError::InvalidDestination(destination.to_path_buf()));
    }

    // Reject the whole batch before resolving any names
    for source in selection.iter() {
        let parent = source.parent().unwrap_or_else(|| Path::new("."));
        if utils::same_directory(parent, destination) {
            return Err(ShelveError::NoOpMove {
                file: source.clone(),
                destination: destination.to_path_buf(),
            });
        }
    }

    let mut claimed = HashSet::new();
    let mut steps = Vec::with_capacity(selection.len());
    for source in selection.iter() {
        let file_name = source
            .file_name()
            .ok_or_else(|| ShelveError::NotAFile(source.clone()))?;
        let target = resolve_conflict(destination, Path::new(file_name), &claimed)?;
        claimed.insert(target.clone());
        steps.push(MoveStep {
            source: source.clone(),
            destination: target,
        });
    }

    Ok(MovePlan {
        destination_dir: destination.to_path_buf(),
        steps,
    })
}

/// Move a single file to `target`, picking a fresh name if `target` has
/// appeared since planning. Returns the path the file ended up at.
pub fn move_one(source: &Path, target: &Path, claimed: &HashSet<PathBuf>) -> Result<PathBuf> {
    if !source.exists() {
        return Err(ShelveError::VanishedSource(source.to_path_buf()));
    }

    let target = if target.exists() {
        let dir = target.parent().unwrap_or_else(|| Path::new(""));
        let name = source
            .file_name()
            .ok_or_else(|| ShelveError::NotAFile(source.to_path_buf()))?;
        resolve_conflict(dir, Path::new(name), claimed)?
    } else {
        target.to_path_buf()
    };

    utils::move_file(source, &target).map_err(|e| ShelveError::from_io(source, e))?;
    Ok(target)
}

/// Execute a plan in order, collecting per-file failures
pub fn execute(plan: &MovePlan) -> MoveReport {
    execute_with_progress(plan, |_, _| {})
}

/// Execute a plan, calling `on_step(index, step)` before each move
pub fn execute_with_progress<F>(plan: &MovePlan, mut on_step: F) -> MoveReport
where
    F: FnMut(usize, &MoveStep),
{
    let mut report = MoveReport::default();
    let claimed: HashSet<PathBuf> = plan.steps.iter().map(|s| s.destination.clone()).collect();

    for (idx, step) in plan.steps.iter().enumerate() {
        on_step(idx, step);
        let size = fs::metadata(&step.source).map(|m| m.len()).unwrap_or(0);

        match move_one(&step.source, &step.destination, &claimed) {
            Ok(final_path) => {
                tracing::debug!(
                    source = %step.source.display(),
                    destination = %final_path.display(),
                    "moved file"
                );
                report.moved_bytes += size;
                report.moved.push(MoveStep {
                    source: step.source.clone(),
                    destination: final_path,
                });
            }
            Err(error) => {
                tracing::warn!(source = %step.source.display(), %error, "move failed");
                report.failures.push(MoveFailure {
                    source: step.source.clone(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        moved = report.moved.len(),
        failed = report.failures.len(),
        "move batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp_dir = create_test_dir();
        let src = temp_dir.path().join("src");
        let dst = temp_dir.path().join("dst");
        fs::create_dir(&src).unwrap();
        fs::create_dir(&dst).unwrap();
        (temp_dir, src, dst)
    }

    fn select<P: AsRef<Path>>(paths: &[P]) -> SelectionSet {
        let mut selection = SelectionSet::new();
        for p in paths {
            selection.toggle(p.as_ref()).unwrap();
        }
        selection
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let (_tmp, src, _dst) = setup();
        let file = src.join("a.txt");
        fs::write(&file, "a").unwrap();

        let mut selection = SelectionSet::new();
        assert!(selection.toggle(&file).unwrap());
        assert!(selection.contains(&file));
        assert!(!selection.toggle(&file).unwrap());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_rejects_directories() {
        let (_tmp, src, _dst) = setup();
        let mut selection = SelectionSet::new();
        assert!(matches!(selection.toggle(&src), Err(ShelveError::NotAFile(_))));
        assert!(matches!(
            selection.toggle(&src.join("ghost.txt")),
            Err(ShelveError::NotAFile(_))
        ));
    }

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name(Path::new("photo.png"), 1), OsString::from("photo (1).png"));
        assert_eq!(numbered_name(Path::new("Makefile"), 3), OsString::from("Makefile (3)"));
        assert_eq!(
            numbered_name(Path::new("backup.tar.gz"), 2),
            OsString::from("backup.tar (2).gz")
        );
    }

    #[test]
    fn test_plan_empty_selection() {
        let (_tmp, _src, dst) = setup();
        assert!(matches!(
            build_plan(&SelectionSet::new(), &dst),
            Err(ShelveError::EmptySelection)
        ));
    }

    #[test]
    fn test_plan_invalid_destination() {
        let (_tmp, src, dst) = setup();
        let file = src.join("a.txt");
        fs::write(&file, "a").unwrap();
        let selection = select(&[&file]);

        assert!(matches!(
            build_plan(&selection, &dst.join("missing")),
            Err(ShelveError::InvalidDestination(_))
        ));
        assert!(matches!(
            build_plan(&selection, &file),
            Err(ShelveError::InvalidDestination(_))
        ));
    }

    #[test]
    fn test_plan_same_directory_is_noop_and_touches_nothing() {
        let (_tmp, src, _dst) = setup();
        let a = src.join("a.txt");
        let b = src.join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let err = build_plan(&select(&[&a, &b]), &src).unwrap_err();
        assert!(matches!(err, ShelveError::NoOpMove { .. }));
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn test_plan_bare_relative_name_into_working_dir_is_noop() {
        // cargo runs tests from the package root
        let manifest = Path::new("Cargo.toml");
        let before = fs::read(manifest).unwrap();

        let selection = select(&[manifest]);
        assert!(selection.contains(manifest));
        assert!(selection.iter().all(|p| p.is_absolute()));

        let err = build_plan(&selection, Path::new(".")).unwrap_err();
        assert!(matches!(err, ShelveError::NoOpMove { .. }));
        assert_eq!(fs::read(manifest).unwrap(), before);
        assert!(!Path::new("Cargo (1).toml").exists());
    }

    #[test]
    fn test_plan_dot_destination_matches_absolute_source() {
        let selection = select(&[fs::canonicalize("Cargo.toml").unwrap()]);
        let err = build_plan(&selection, Path::new("")).unwrap_err();
        assert!(matches!(err, ShelveError::InvalidDestination(_)));
        let err = build_plan(&selection, Path::new(".")).unwrap_err();
        assert!(matches!(err, ShelveError::NoOpMove { .. }));
    }

    #[test]
    fn test_plan_resolves_conflicts_with_suffix() {
        let (_tmp, src, dst) = setup();
        let file = src.join("notes.txt");
        fs::write(&file, "new").unwrap();
        fs::write(dst.join("notes.txt"), "old").unwrap();
        fs::write(dst.join("notes (1).txt"), "older").unwrap();

        let plan = build_plan(&select(&[&file]), &dst).unwrap();
        assert_eq!(plan.steps[0].destination, dst.join("notes (2).txt"));
        assert_eq!(plan.renamed_count(), 1);
    }

    #[test]
    fn test_plan_destinations_unique_within_batch() {
        let (tmp, src, dst) = setup();
        let other = tmp.path().join("other");
        fs::create_dir(&other).unwrap();
        let a = src.join("same.txt");
        let b = other.join("same.txt");
        fs::write(&a, "1").unwrap();
        fs::write(&b, "2").unwrap();

        let plan = build_plan(&select(&[&a, &b]), &dst).unwrap();
        let targets: HashSet<&PathBuf> = plan.steps.iter().map(|s| &s.destination).collect();
        assert_eq!(targets.len(), 2);
        assert_eq!(plan.steps[0].destination, dst.join("same.txt"));
        assert_eq!(plan.steps[1].destination, dst.join("same (1).txt"));
        assert!(plan.steps.iter().all(|s| s.source != s.destination));
    }

    #[test]
    fn test_execute_moves_files() {
        let (_tmp, src, dst) = setup();
        let a = src.join("a.txt");
        fs::write(&a, "hello").unwrap();

        let plan = build_plan(&select(&[&a]), &dst).unwrap();
        let report = execute(&plan);

        assert!(report.is_clean());
        assert_eq!(report.moved.len(), 1);
        assert_eq!(report.moved_bytes, 5);
        assert!(!a.exists());
        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "hello");
    }

    #[test]
    fn test_execute_continues_after_vanished_source() {
        let (_tmp, src, dst) = setup();
        let a = src.join("a.txt");
        let b = src.join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let plan = build_plan(&select(&[&a, &b]), &dst).unwrap();
        fs::remove_file(&a).unwrap();

        let report = execute(&plan);
        assert_eq!(report.moved.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0].error, ShelveError::VanishedSource(_)));
        assert!(dst.join("b.txt").exists());
        assert!(report.summary().starts_with("Moved 1 files"));
    }

    #[test]
    fn test_execute_never_overwrites_late_arrivals() {
        let (_tmp, src, dst) = setup();
        let a = src.join("a.txt");
        fs::write(&a, "mine").unwrap();

        let plan = build_plan(&select(&[&a]), &dst).unwrap();
        // Someone else writes the planned target before we execute
        fs::write(dst.join("a.txt"), "theirs").unwrap();

        let report = execute(&plan);
        assert!(report.is_clean());
        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "theirs");
        assert_eq!(fs::read_to_string(dst.join("a (1).txt")).unwrap(), "mine");
        assert_eq!(report.moved[0].destination, dst.join("a (1).txt"));
    }

    #[test]
    fn test_repeated_moves_get_distinct_names() {
        let (tmp, _src, dst) = setup();
        for round in 0..3 {
            let dir = tmp.path().join(format!("round{round}"));
            fs::create_dir(&dir).unwrap();
            let f = dir.join("shot.png");
            fs::write(&f, format!("{round}")).unwrap();
            let report = execute(&build_plan(&select(&[&f]), &dst).unwrap());
            assert!(report.is_clean());
        }
        assert_eq!(fs::read_to_string(dst.join("shot.png")).unwrap(), "0");
        assert_eq!(fs::read_to_string(dst.join("shot (1).png")).unwrap(), "1");
        assert_eq!(fs::read_to_string(dst.join("shot (2).png")).unwrap(), "2");
    }

    #[test]
    fn test_execute_with_progress_reports_each_step() {
        let (_tmp, src, dst) = setup();
        let a = src.join("a.txt");
        let b = src.join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let plan = build_plan(&select(&[&a, &b]), &dst).unwrap();
        let mut seen = Vec::new();
        let report = execute_with_progress(&plan, |idx, _| seen.push(idx));
        assert_eq!(seen, vec![0, 1]);
        assert_eq!(report.moved.len(), 2);
    }
}
