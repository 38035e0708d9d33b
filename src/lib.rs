//! Shelve library crate
//!
//! This crate provides both a CLI binary and a library API for programmatic use:
//! directory navigation, name search, conflict-safe move planning and the
//! screenshot organizer.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigator;
pub mod output;
pub mod planner;
pub mod progress;
pub mod scan_events;
pub mod screenshots;
pub mod search;
pub mod theme;
pub mod tui;
pub mod utils;
