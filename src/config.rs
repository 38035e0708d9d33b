use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::utils;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub navigator: NavigatorSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub screenshots: ScreenshotConfig,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigatorSettings {
    /// Show dot-files and dot-directories in listings
    #[serde(default)]
    pub show_hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Upper bound on directories examined by one directory search
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Directory names never descended into (compared case-insensitively)
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Where screenshots land (default: the desktop)
    #[serde(default)]
    pub source_dir: Option<String>,

    /// Root of the bucket tree (default: <desktop>/Screenshots)
    #[serde(default)]
    pub destination_dir: Option<String>,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Glob patterns a file name must match to count as a screenshot
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    #[serde(default = "default_true")]
    pub prefer_creation_time: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Optional log file; the TUI only logs when this is set
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_entries: default_max_entries(),
            result_limit: default_result_limit(),
            skip_dirs: default_skip_dirs(),
        }
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            destination_dir: None,
            poll_interval_secs: default_poll_interval(),
            patterns: default_patterns(),
            prefer_creation_time: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_max_depth() -> usize { 4 }
fn default_max_entries() -> usize { 500 }
fn default_result_limit() -> usize { 15 }
fn default_poll_interval() -> u64 { 5 }
fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

fn default_patterns() -> Vec<String> {
    vec!["Screenshot*".to_string(), "Screen Shot*".to_string()]
}

fn default_skip_dirs() -> Vec<String> {
    [
        ".git", ".svn", ".hg", "node_modules", "__pycache__", ".cache", ".tmp", "temp",
        ".vscode", ".idea", "library", "system", "applications", ".trash", "trash",
        "appdata", "windows", "program files", "program files (x86)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Config {
    /// Get the config file path: <platform config dir>/shelve/config.toml
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "shelve")
            .context("Could not determine a configuration directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load config from file or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) if path.exists() => match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config file: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Load config, writing the defaults to disk first if no file exists yet
    pub fn load_or_create() -> Self {
        if let Ok(path) = Self::config_path() {
            if !path.exists() {
                let config = Self::default();
                if let Err(e) = config.save() {
                    eprintln!("Warning: Failed to create config file: {}", e);
                }
                return config;
            }
        }
        Self::load()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, toml).context("Failed to write config file")?;

        Ok(())
    }

    /// Apply CLI option overrides for the screenshot organizer
    pub fn apply_cli_overrides(
        &mut self,
        source: Option<PathBuf>,
        destination: Option<PathBuf>,
        interval_secs: Option<u64>,
    ) {
        if let Some(source) = source {
            self.screenshots.source_dir = Some(source.display().to_string());
        }
        if let Some(destination) = destination {
            self.screenshots.destination_dir = Some(destination.display().to_string());
        }
        if let Some(secs) = interval_secs {
            self.screenshots.poll_interval_secs = secs.max(1);
        }
    }
}

impl ScreenshotConfig {
    /// Resolved source directory
    pub fn source_path(&self) -> Result<PathBuf> {
        match &self.source_dir {
            Some(dir) => Ok(utils::expand_home(dir)),
            None => utils::desktop_dir(),
        }
    }

    /// Resolved bucket root; defaults to a `Screenshots` folder inside the source
    pub fn destination_path(&self) -> Result<PathBuf> {
        match &self.destination_dir {
            Some(dir) => Ok(utils::expand_home(dir)),
            None => Ok(self.source_path()?.join("Screenshots")),
        }
    }
}
