//! Name search over a directory tree
//!
//! Matching is deliberately simple and predictable: a candidate name is
//! compared case-insensitively against the query and lands in one of three
//! tiers (exact, prefix, substring). No fuzzy matching, so the same inputs
//! always produce the same ordered output.
//!
//! - Directory search walks the tree below `root` (depth and entry limited,
//!   skipping hidden and well-known noise directories).
//! - File search only looks at the files directly inside `root`.

use crate::config::SearchSettings;
use crate::error::ShelveError;
use crate::navigator::{DirectoryEntry, EntryKind};
use crate::scan_events::{CancelToken, ScanPathReporter, SearchProgress};
use crate::utils;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Minimum delay between progress callbacks
const PROGRESS_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Directories,
    Files,
}

impl SearchMode {
    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Directories => "directories",
            SearchMode::Files => "files",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SearchMode::Directories => SearchMode::Files,
            SearchMode::Files => SearchMode::Directories,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Substring,
    Prefix,
    Exact,
}

impl MatchTier {
    pub fn score(&self) -> u32 {
        match self {
            MatchTier::Exact => 100,
            MatchTier::Prefix => 90,
            MatchTier::Substring => 80,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    pub entry: DirectoryEntry,
    pub score: u32,
    pub tier: MatchTier,
}

#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub matches: Vec<SearchMatch>,
    pub scanned: usize,
    /// The search was aborted; `matches` is empty
    pub cancelled: bool,
}

/// Knobs for one search invocation
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_depth: usize,
    pub max_entries: usize,
    pub skip_dirs: HashSet<String>,
    pub show_hidden: bool,
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from_settings(&SearchSettings::default(), false)
    }
}

impl SearchOptions {
    pub fn from_settings(settings: &SearchSettings, show_hidden: bool) -> Self {
        Self {
            max_depth: settings.max_depth,
            max_entries: settings.max_entries,
            skip_dirs: settings
                .skip_dirs
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
            show_hidden,
            limit: Some(settings.result_limit),
        }
    }

    fn is_skipped(&self, name: &str) -> bool {
        (!self.show_hidden && utils::is_hidden_name(name))
            || self.skip_dirs.contains(&name.to_lowercase())
    }
}

/// Classify `name` against an already lower-cased query
pub fn match_tier(name: &str, query_lower: &str) -> Option<MatchTier> {
    if query_lower.is_empty() {
        return None;
    }
    let name_lower = name.to_lowercase();
    if name_lower == query_lower {
        Some(MatchTier::Exact)
    } else if name_lower.starts_with(query_lower) {
        Some(MatchTier::Prefix)
    } else if name_lower.contains(query_lower) {
        Some(MatchTier::Substring)
    } else {
        None
    }
}

/// Tier descending, then name (case-insensitive), then full path
fn compare_matches(a: &SearchMatch, b: &SearchMatch) -> Ordering {
    b.tier
        .cmp(&a.tier)
        .then_with(|| {
            a.entry
                .name
                .to_lowercase()
                .cmp(&b.entry.name.to_lowercase())
        })
        .then_with(|| a.entry.path.cmp(&b.entry.path))
}

/// Search below `root` for names matching `query`.
///
/// `cancel` is polled for every entry examined; once set the search returns
/// immediately with `cancelled = true` and no matches. `progress` receives
/// throttled updates while the scan runs.
pub fn search(
    root: &Path,
    query: &str,
    mode: SearchMode,
    options: &SearchOptions,
    cancel: &CancelToken,
    progress: &mut dyn FnMut(&SearchProgress),
) -> Result<SearchOutcome, ShelveError> {
    if !root.is_dir() {
        return Err(ShelveError::NotADirectory(root.to_path_buf()));
    }

    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return Ok(SearchOutcome::default());
    }

    let mut reporter = ScanPathReporter::new(progress, PROGRESS_INTERVAL_MS);
    let collected = match mode {
        SearchMode::Directories => {
            search_directories(root, &query_lower, options, cancel, &mut reporter)
        }
        SearchMode::Files => search_files(root, &query_lower, options, cancel, &mut reporter)?,
    };

    let (mut matches, scanned) = match collected {
        Some(found) => found,
        None => {
            return Ok(SearchOutcome {
                matches: Vec::new(),
                scanned: 0,
                cancelled: true,
            })
        }
    };

    reporter.finish(scanned, matches.len());

    matches.sort_by(compare_matches);
    if let Some(limit) = options.limit {
        matches.truncate(limit);
    }

    Ok(SearchOutcome {
        matches,
        scanned,
        cancelled: false,
    })
}

/// Returns `None` when cancelled
fn search_directories(
    root: &Path,
    query_lower: &str,
    options: &SearchOptions,
    cancel: &CancelToken,
    reporter: &mut ScanPathReporter<'_>,
) -> Option<(Vec<SearchMatch>, usize)> {
    let mut matches = Vec::new();
    let mut scanned = 0usize;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(options.max_depth.max(1))
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.file_type().is_dir() && !options.is_skipped(&e.file_name().to_string_lossy())
        });

    for entry in walker {
        if cancel.is_cancelled() {
            return None;
        }
        // Unreadable subtrees are skipped
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        if scanned >= options.max_entries {
            break;
        }
        scanned += 1;

        let name = entry.file_name().to_string_lossy().into_owned();
        reporter.emit_path(scanned, matches.len(), entry.path());

        if let Some(tier) = match_tier(&name, query_lower) {
            matches.push(SearchMatch {
                entry: DirectoryEntry {
                    path: entry.path().to_path_buf(),
                    name,
                    kind: EntryKind::Directory,
                    size: None,
                },
                score: tier.score(),
                tier,
            });
        }
    }

    Some((matches, scanned))
}

fn search_files(
    root: &Path,
    query_lower: &str,
    options: &SearchOptions,
    cancel: &CancelToken,
    reporter: &mut ScanPathReporter<'_>,
) -> Result<Option<(Vec<SearchMatch>, usize)>, ShelveError> {
    let read = fs::read_dir(root).map_err(|e| ShelveError::from_io(root, e))?;
    let mut matches = Vec::new();
    let mut scanned = 0usize;

    for entry in read.flatten() {
        if cancel.is_cancelled() {
            return Ok(None);
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !options.show_hidden && utils::is_hidden_name(&name) {
            continue;
        }
        let path = entry.path();
        let meta = match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => meta,
            _ => continue,
        };
        scanned += 1;
        reporter.emit_path(scanned, matches.len(), &path);

        if let Some(tier) = match_tier(&name, query_lower) {
            matches.push(SearchMatch {
                entry: DirectoryEntry {
                    path,
                    name,
                    kind: EntryKind::File,
                    size: Some(meta.len()),
                },
                score: tier.score(),
                tier,
            });
        }
    }

    Ok(Some((matches, scanned)))
}
