//! Screenshot recognition and month/year bucketing

use crate::error::ShelveError;
use chrono::{DateTime, Datelike, Local, Month};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::fs::Metadata;
use std::time::SystemTime;

/// Decides whether a file name looks like a screenshot.
///
/// Naming conventions differ per OS and capture tool, so the predicate is a
/// set of glob patterns from the config rather than a fixed prefix.
#[derive(Debug, Clone)]
pub struct ScreenshotMatcher {
    set: GlobSet,
}

impl ScreenshotMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ShelveError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| ShelveError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| ShelveError::InvalidPattern {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            reason: e.to_string(),
        })?;
        Ok(Self { set })
    }

    pub fn is_screenshot(&self, file_name: &str) -> bool {
        self.set.is_match(file_name)
    }
}

/// `<MonthName>_<Year>`, e.g. `March_2024`
pub fn bucket_name(year: i32, month: u32) -> String {
    let month_name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown");
    format!("{}_{}", month_name, year)
}

/// Bucket for a local timestamp
pub fn bucket_for(timestamp: &DateTime<Local>) -> String {
    bucket_name(timestamp.year(), timestamp.month())
}

/// Creation time when the platform records it and `prefer_created` is set,
/// otherwise modification time
pub fn file_timestamp(metadata: &Metadata, prefer_created: bool) -> Option<DateTime<Local>> {
    let created = if prefer_created {
        metadata.created().ok()
    } else {
        None
    };
    let time: SystemTime = created.or_else(|| metadata.modified().ok())?;
    Some(time.into())
}
