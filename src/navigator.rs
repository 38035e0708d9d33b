//! Directory navigation state
//!
//! A `Navigator` is a small value describing "where the user is". Every
//! navigation operation returns a new `Navigator` instead of mutating shared
//! state, so a failed `enter`/`up` leaves the caller's state untouched.

use crate::error::{Result, ShelveError};
use crate::utils;
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    /// File size in bytes; `None` for directories
    pub size: Option<u64>,
}

impl DirectoryEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn size_human(&self) -> String {
        self.size
            .map(|s| bytesize::to_string(s, false))
            .unwrap_or_default()
    }
}

/// Directories first, then files; case-insensitive by name within each group
pub fn compare_entries(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    let group = |e: &DirectoryEntry| if e.is_dir() { 0 } else { 1 };
    group(a)
        .cmp(&group(b))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: PathBuf,
    show_hidden: bool,
}

impl Navigator {
    /// Start at the user's home directory
    pub fn at_home(show_hidden: bool) -> anyhow::Result<Self> {
        let home = utils::home_dir()?;
        Ok(Self::open(&home, show_hidden)?)
    }

    /// Start at an arbitrary directory. Fails if it cannot be read.
    pub fn open(path: &Path, show_hidden: bool) -> Result<Self> {
        if !path.is_dir() {
            return Err(ShelveError::NotADirectory(path.to_path_buf()));
        }
        fs::read_dir(path).map_err(|e| ShelveError::from_io(path, e))?;
        Ok(Self {
            current: path.to_path_buf(),
            show_hidden,
        })
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn with_hidden(&self, show_hidden: bool) -> Self {
        Self {
            current: self.current.clone(),
            show_hidden,
        }
    }

    /// Move into a child directory of the current one.
    /// `name` must be a single plain component: no separators, `.` or `..`.
    pub fn enter(&self, name: &str) -> Result<Self> {
        let target = self.current.join(name);
        let mut components = Path::new(name).components();
        let is_child = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !is_child || !target.is_dir() {
            return Err(ShelveError::NotADirectory(target));
        }
        Ok(Self {
            current: target,
            show_hidden: self.show_hidden,
        })
    }

    /// Move to the parent directory
    pub fn up(&self) -> Result<Self> {
        match self.current.parent() {
            Some(parent) => Ok(Self {
                current: parent.to_path_buf(),
                show_hidden: self.show_hidden,
            }),
            None => Err(ShelveError::NoParent(self.current.clone())),
        }
    }

    /// List the current directory, directories before files.
    /// Entries whose metadata cannot be read are left out.
    pub fn list(&self) -> Result<Vec<DirectoryEntry>> {
        let read = fs::read_dir(&self.current).map_err(|e| ShelveError::from_io(&self.current, e))?;

        let mut entries: Vec<DirectoryEntry> = read
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if !self.show_hidden && utils::is_hidden_name(&name) {
                    return None;
                }
                let path = entry.path();
                // Follow symlinks so a link to a directory can be entered
                let meta = fs::metadata(&path).ok()?;
                let (kind, size) = if meta.is_dir() {
                    (EntryKind::Directory, None)
                } else {
                    (EntryKind::File, Some(meta.len()))
                };
                Some(DirectoryEntry {
                    path,
                    name,
                    kind,
                    size,
                })
            })
            .collect();

        entries.sort_by(compare_entries);
        Ok(entries)
    }
}
