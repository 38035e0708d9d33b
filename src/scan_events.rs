//! Progress reporting and cancellation for directory searches (used by TUI and CLI)

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Snapshot of a running search.
#[derive(Debug, Clone, Default)]
pub struct SearchProgress {
    /// Entries examined so far
    pub scanned: usize,
    /// Matches found so far
    pub found: usize,
    pub current_path: Option<PathBuf>,
}

/// Cooperative cancellation flag. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Throttled emitter for progress updates during scanning.
///
/// The first update always goes out; after that at most one update per
/// `min_interval`.
pub struct ScanPathReporter<'a> {
    callback: &'a mut dyn FnMut(&SearchProgress),
    min_interval: Duration,
    last_emit: Option<Instant>,
}

impl<'a> ScanPathReporter<'a> {
    pub fn new(callback: &'a mut dyn FnMut(&SearchProgress), min_interval_ms: u64) -> Self {
        Self {
            callback,
            min_interval: Duration::from_millis(min_interval_ms),
            last_emit: None,
        }
    }

    pub fn emit_path(&mut self, scanned: usize, found: usize, path: &Path) {
        let now = Instant::now();
        if let Some(last) = self.last_emit {
            if now.duration_since(last) < self.min_interval {
                return;
            }
        }
        self.last_emit = Some(now);

        let progress = SearchProgress {
            scanned,
            found,
            current_path: Some(path.to_path_buf()),
        };
        (self.callback)(&progress);
    }

    /// Emit unconditionally (used for the final tally)
    pub fn finish(&mut self, scanned: usize, found: usize) {
        let progress = SearchProgress {
            scanned,
            found,
            current_path: None,
        };
        (self.callback)(&progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_reporter_throttles() {
        let mut seen = Vec::new();
        let mut cb = |p: &SearchProgress| seen.push(p.scanned);
        {
            let mut reporter = ScanPathReporter::new(&mut cb, 60_000);
            reporter.emit_path(1, 0, Path::new("/a"));
            reporter.emit_path(2, 0, Path::new("/b"));
            reporter.emit_path(3, 1, Path::new("/c"));
            reporter.finish(3, 1);
        }
        // First emit plus the final tally
        assert_eq!(seen, vec![1, 3]);
    }

    #[test]
    fn test_reporter_without_throttle_emits_everything() {
        let mut count = 0;
        let mut cb = |_: &SearchProgress| count += 1;
        {
            let mut reporter = ScanPathReporter::new(&mut cb, 0);
            for i in 0..5 {
                reporter.emit_path(i, 0, Path::new("/x"));
            }
        }
        assert_eq!(count, 5);
    }
}
