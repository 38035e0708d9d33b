//! Shared filesystem helpers
//!
//! Home/desktop resolution, hidden-name checks and the single-file move
//! primitive used by both the planner and the screenshot organizer.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// The current user's home directory
pub fn home_dir() -> Result<PathBuf> {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .context("Could not determine the home directory")
}

/// The desktop folder, falling back to `~/Desktop` when the platform has no
/// registered desktop directory (headless Linux, for example)
pub fn desktop_dir() -> Result<PathBuf> {
    let dirs = directories::UserDirs::new().context("Could not determine the home directory")?;
    Ok(dirs
        .desktop_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dirs.home_dir().join("Desktop")))
}

/// Expand a leading `~` in a configured path
pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        return home_dir().unwrap_or_else(|_| PathBuf::from(raw));
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        if let Ok(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Dot-files and dot-directories
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Compare two directories after resolving symlinks and `..` components.
/// An empty path means the working directory. Falls back to a plain
/// comparison when either side cannot be canonicalized.
pub fn same_directory(a: &Path, b: &Path) -> bool {
    let (a, b) = (dir_or_current(a), dir_or_current(b));
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// `Path::new("a.txt").parent()` is the empty path
fn dir_or_current(path: &Path) -> &Path {
    if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    }
}

/// Render `path` relative to `base` when possible
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|rel| rel.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

/// Move a single file.
///
/// Tries a rename first. When that fails for any reason other than a missing
/// source or a permission problem (typically a cross-device move), falls back
/// to copy + remove. The caller guarantees `target` does not exist.
pub fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            ) =>
        {
            Err(e)
        }
        Err(_) => {
            copy_new(source, target)?;
            if let Err(e) = fs::remove_file(source) {
                // Keep exactly one copy around
                let _ = fs::remove_file(target);
                return Err(e);
            }
            Ok(())
        }
    }
}

/// Copy `source` into a freshly created `target`, failing with
/// `AlreadyExists` rather than truncating a file that appeared there.
fn copy_new(source: &Path, target: &Path) -> io::Result<()> {
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new().write(true).create_new(true).open(target)?;
    let copied = io::copy(&mut reader, &mut writer).and_then(|_| {
        let permissions = reader.metadata()?.permissions();
        writer.set_permissions(permissions)
    });
    if let Err(e) = copied {
        drop(writer);
        let _ = fs::remove_file(target);
        return Err(e);
    }
    Ok(())
}
