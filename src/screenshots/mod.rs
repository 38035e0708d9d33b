//! Screenshot organizer
//!
//! Sweeps screenshots out of a flat source folder (the desktop by default)
//! into `<destination>/<Month>_<Year>/` buckets. Each cycle recomputes
//! everything from the filesystem, so an interrupted run simply picks up the
//! remaining files on the next start.

pub mod classify;
pub mod scheduler;

pub use classify::{bucket_for, bucket_name, file_timestamp, ScreenshotMatcher};
pub use scheduler::{CountedTrigger, IntervalTrigger, ShutdownHandle, Trigger};

use crate::config::ScreenshotConfig;
use crate::error::{Result, ShelveError};
use crate::planner;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved organizer settings
#[derive(Debug, Clone)]
pub struct ScreenshotSettings {
    pub source_dir: PathBuf,
    pub destination_root: PathBuf,
    pub poll_interval: Duration,
    pub patterns: Vec<String>,
    pub prefer_creation_time: bool,
}

impl ScreenshotSettings {
    pub fn from_config(config: &ScreenshotConfig) -> anyhow::Result<Self> {
        Ok(Self {
            source_dir: config.source_path()?,
            destination_root: config.destination_path()?,
            poll_interval: Duration::from_secs(config.poll_interval_secs.max(1)),
            patterns: config.patterns.clone(),
            prefer_creation_time: config.prefer_creation_time,
        })
    }
}

/// Phases of one cycle, logged as the cycle progresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Scanning,
    Classifying,
    Moving,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CyclePhase::Idle => "idle",
            CyclePhase::Scanning => "scanning",
            CyclePhase::Classifying => "classifying",
            CyclePhase::Moving => "moving",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bucket: String,
}

#[derive(Debug, Default, Serialize)]
pub struct CycleReport {
    pub moved: Vec<OrganizedFile>,
    /// Files that disappeared between listing and moving
    pub skipped: usize,
    pub failed: usize,
}

impl CycleReport {
    pub fn is_idle(&self) -> bool {
        self.moved.is_empty() && self.skipped == 0 && self.failed == 0
    }
}

/// Totals across all cycles of a `run`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunTotals {
    pub cycles: usize,
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct ScreenshotOrganizer {
    settings: ScreenshotSettings,
    matcher: ScreenshotMatcher,
}

impl ScreenshotOrganizer {
    pub fn new(settings: ScreenshotSettings) -> Result<Self> {
        let matcher = ScreenshotMatcher::new(settings.patterns.as_slice())?;
        Ok(Self { settings, matcher })
    }

    pub fn settings(&self) -> &ScreenshotSettings {
        &self.settings
    }

    /// Create the destination root if needed. Failure here is fatal.
    pub fn ensure_destination_root(&self) -> Result<()> {
        let root = &self.settings.destination_root;
        fs::create_dir_all(root).map_err(|source| ShelveError::DestinationRootUncreatable {
            path: root.clone(),
            source,
        })
    }

    /// Screenshots currently sitting in the source folder, sorted by name
    fn scan(&self) -> Result<Vec<PathBuf>> {
        let source = &self.settings.source_dir;
        let read = fs::read_dir(source).map_err(|e| ShelveError::from_io(source, e))?;

        let mut found: Vec<PathBuf> = read
            .flatten()
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| *path != self.settings.destination_root)
            .filter(|path| {
                path.file_name()
                    .map(|n| self.matcher.is_screenshot(&n.to_string_lossy()))
                    .unwrap_or(false)
            })
            .collect();
        found.sort();
        Ok(found)
    }

    /// Pair each file with its bucket. Files whose metadata is gone are
    /// counted as skipped.
    fn classify(&self, files: Vec<PathBuf>, report: &mut CycleReport) -> Vec<(PathBuf, String)> {
        let mut classified = Vec::with_capacity(files.len());
        for path in files {
            let meta = match fs::metadata(&path) {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::info!(file = %path.display(), error = %e, "screenshot vanished before classification");
                    report.skipped += 1;
                    continue;
                }
            };
            match file_timestamp(&meta, self.settings.prefer_creation_time) {
                Some(ts) => classified.push((path, bucket_for(&ts))),
                None => {
                    tracing::warn!(file = %path.display(), "no usable timestamp, leaving in place");
                    report.failed += 1;
                }
            }
        }
        classified
    }

    fn ensure_bucket(&self, bucket: &str, ensured: &mut HashMap<String, PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = ensured.get(bucket) {
            return Ok(dir.clone());
        }
        let dir = self.settings.destination_root.join(bucket);
        fs::create_dir_all(&dir).map_err(|e| ShelveError::from_io(&dir, e))?;
        tracing::debug!(bucket = %dir.display(), "bucket ready");
        ensured.insert(bucket.to_string(), dir.clone());
        Ok(dir)
    }

    /// One scan → classify → move pass over the source folder
    pub fn run_cycle(&self) -> Result<CycleReport> {
        let mut report = CycleReport::default();
        self.ensure_destination_root()?;

        let mut phase = CyclePhase::Scanning;
        tracing::debug!(%phase, source = %self.settings.source_dir.display());
        let files = self.scan()?;
        if files.is_empty() {
            return Ok(report);
        }

        phase = CyclePhase::Classifying;
        tracing::debug!(%phase, count = files.len());
        let classified = self.classify(files, &mut report);

        phase = CyclePhase::Moving;
        tracing::debug!(%phase, count = classified.len());
        let mut ensured = HashMap::new();
        for (source, bucket) in classified {
            let bucket_dir = match self.ensure_bucket(&bucket, &mut ensured) {
                Ok(dir) => dir,
                Err(error) => {
                    tracing::error!(%bucket, %error, "cannot create bucket");
                    report.failed += 1;
                    continue;
                }
            };

            match self.move_into(&source, &bucket_dir) {
                Ok(destination) => {
                    tracing::info!(
                        file = %source.display(),
                        destination = %destination.display(),
                        "moved screenshot"
                    );
                    report.moved.push(OrganizedFile {
                        source,
                        destination,
                        bucket,
                    });
                }
                Err(ShelveError::VanishedSource(path)) => {
                    tracing::info!(file = %path.display(), "screenshot vanished before move, skipping");
                    report.skipped += 1;
                }
                Err(error) => {
                    tracing::warn!(file = %source.display(), %error, "failed to move screenshot");
                    report.failed += 1;
                }
            }
        }

        phase = CyclePhase::Idle;
        tracing::debug!(%phase, moved = report.moved.len(), skipped = report.skipped, failed = report.failed);
        Ok(report)
    }

    fn move_into(&self, source: &Path, bucket_dir: &Path) -> Result<PathBuf> {
        let name = source
            .file_name()
            .ok_or_else(|| ShelveError::NotAFile(source.to_path_buf()))?;
        let claimed = HashSet::new();
        let target = planner::resolve_conflict(bucket_dir, Path::new(name), &claimed)?;
        planner::move_one(source, &target, &claimed)
    }

    /// Run cycles until the trigger says stop.
    ///
    /// Per-file problems never end the loop; an error from `run_cycle`
    /// (destination root uncreatable) does, except that an unreadable source
    /// folder is logged and retried on the next tick.
    pub fn run<T: Trigger>(&self, trigger: &mut T) -> Result<RunTotals> {
        let mut totals = RunTotals::default();
        loop {
            match self.run_cycle() {
                Ok(report) => {
                    totals.cycles += 1;
                    totals.moved += report.moved.len();
                    totals.skipped += report.skipped;
                    totals.failed += report.failed;
                }
                Err(error @ ShelveError::DestinationRootUncreatable { .. }) => return Err(error),
                Err(error) => {
                    totals.cycles += 1;
                    tracing::warn!(%error, "cycle aborted, retrying on next tick");
                }
            }
            if !trigger.wait_next() {
                return Ok(totals);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    fn organizer(desktop: &Path) -> ScreenshotOrganizer {
        organizer_with(desktop, true)
    }

    fn organizer_with(desktop: &Path, prefer_creation_time: bool) -> ScreenshotOrganizer {
        ScreenshotOrganizer::new(ScreenshotSettings {
            source_dir: desktop.to_path_buf(),
            destination_root: desktop.join("Screenshots"),
            poll_interval: Duration::from_secs(5),
            patterns: vec!["Screenshot*".to_string(), "Screen Shot*".to_string()],
            prefer_creation_time,
        })
        .unwrap()
    }

    fn this_month() -> String {
        bucket_for(&Local::now())
    }

    fn write_dated(path: &Path, contents: &str, year: i32, month: u32, day: u32) {
        fs::write(path, contents).unwrap();
        let stamp = Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(stamp.into())
            .unwrap();
    }

    #[test]
    fn test_cycle_buckets_by_file_time() {
        let temp_dir = create_test_dir();
        let desk = temp_dir.path();
        write_dated(&desk.join("Screenshot 2024-03-15.png"), "march", 2024, 3, 15);
        write_dated(&desk.join("Screen Shot 2023-12-31.png"), "december", 2023, 12, 31);

        let report = organizer_with(desk, false).run_cycle().unwrap();

        let root = desk.join("Screenshots");
        assert_eq!(report.moved.len(), 2);
        assert_eq!(
            fs::read_to_string(root.join("March_2024/Screenshot 2024-03-15.png")).unwrap(),
            "march"
        );
        assert_eq!(
            fs::read_to_string(root.join("December_2023/Screen Shot 2023-12-31.png")).unwrap(),
            "december"
        );
    }

    #[test]
    fn test_dated_collision_gets_suffix_in_its_own_month() {
        let temp_dir = create_test_dir();
        let desk = temp_dir.path();
        let march = desk.join("Screenshots/March_2024");
        fs::create_dir_all(&march).unwrap();
        fs::write(march.join("Screenshot 2024-03-15.png"), "filed earlier").unwrap();
        write_dated(&desk.join("Screenshot 2024-03-15.png"), "new copy", 2024, 3, 15);

        organizer_with(desk, false).run_cycle().unwrap();

        assert_eq!(
            fs::read_to_string(march.join("Screenshot 2024-03-15.png")).unwrap(),
            "filed earlier"
        );
        assert_eq!(
            fs::read_to_string(march.join("Screenshot 2024-03-15 (1).png")).unwrap(),
            "new copy"
        );
    }

    #[test]
    fn test_cycle_moves_screenshots_into_bucket() {
        let temp_dir = create_test_dir();
        let desk = temp_dir.path();
        fs::write(desk.join("Screenshot 2024-03-15.png"), "png").unwrap();
        fs::write(desk.join("notes.txt"), "keep me").unwrap();

        let report = organizer(desk).run_cycle().unwrap();

        let bucket = desk.join("Screenshots").join(this_month());
        assert_eq!(report.moved.len(), 1);
        assert!(bucket.join("Screenshot 2024-03-15.png").exists());
        assert!(!desk.join("Screenshot 2024-03-15.png").exists());
        assert!(desk.join("notes.txt").exists());
    }

    #[test]
    fn test_cycle_never_overwrites_existing_bucket_file() {
        let temp_dir = create_test_dir();
        let desk = temp_dir.path();
        let bucket = desk.join("Screenshots").join(this_month());
        fs::create_dir_all(&bucket).unwrap();
        fs::write(bucket.join("Screenshot 2024-03-15.png"), "first").unwrap();
        fs::write(desk.join("Screenshot 2024-03-15.png"), "second").unwrap();

        organizer(desk).run_cycle().unwrap();

        assert_eq!(
            fs::read_to_string(bucket.join("Screenshot 2024-03-15.png")).unwrap(),
            "first"
        );
        assert_eq!(
            fs::read_to_string(bucket.join("Screenshot 2024-03-15 (1).png")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_rerun_is_quiet() {
        let temp_dir = create_test_dir();
        let desk = temp_dir.path();
        fs::write(desk.join("Screenshot a.png"), "a").unwrap();
        fs::write(desk.join("Screenshot b.png"), "b").unwrap();

        let org = organizer(desk);
        let first = org.run_cycle().unwrap();
        let second = org.run_cycle().unwrap();

        assert_eq!(first.moved.len(), 2);
        assert!(second.is_idle());
    }

    #[test]
    fn test_directories_are_ignored() {
        let temp_dir = create_test_dir();
        let desk = temp_dir.path();
        // Matches the pattern but is a directory, like the bucket root itself
        fs::create_dir(desk.join("Screenshot folder")).unwrap();

        let report = organizer(desk).run_cycle().unwrap();
        assert!(report.is_idle());
        assert!(desk.join("Screenshot folder").is_dir());
    }

    #[test]
    fn test_destination_root_created() {
        let temp_dir = create_test_dir();
        let org = organizer(temp_dir.path());
        org.run_cycle().unwrap();
        assert!(temp_dir.path().join("Screenshots").is_dir());
    }

    #[test]
    fn test_uncreatable_destination_root_is_fatal() {
        let temp_dir = create_test_dir();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file, not dir").unwrap();

        let org = ScreenshotOrganizer::new(ScreenshotSettings {
            source_dir: temp_dir.path().to_path_buf(),
            destination_root: blocker.join("Screenshots"),
            poll_interval: Duration::from_secs(1),
            patterns: vec!["Screenshot*".to_string()],
            prefer_creation_time: false,
        })
        .unwrap();

        let err = org.run(&mut CountedTrigger::new(3)).unwrap_err();
        assert!(matches!(err, ShelveError::DestinationRootUncreatable { .. }));
    }

    #[test]
    fn test_run_counts_cycles() {
        let temp_dir = create_test_dir();
        let desk = temp_dir.path();
        fs::write(desk.join("Screenshot 1.png"), "1").unwrap();

        let totals = organizer(desk).run(&mut CountedTrigger::new(2)).unwrap();
        assert_eq!(totals.cycles, 3);
        assert_eq!(totals.moved, 1);
        assert_eq!(totals.failed, 0);
    }

    #[test]
    fn test_cycle_phase_display() {
        assert_eq!(CyclePhase::Classifying.to_string(), "classifying");
    }
}
