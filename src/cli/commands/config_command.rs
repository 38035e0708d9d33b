//! Config command feature.
//!
//! This module owns and handles the "shelve config" command behavior.

use crate::config::Config;
use crate::theme::Theme;

fn print_config(config: &Config) {
    println!("{}", Theme::header("Current Configuration"));
    println!("{}", Theme::divider(60));
    println!();
    println!("Navigator:");
    println!("  Show hidden: {}", config.navigator.show_hidden);
    println!();
    println!("Search:");
    println!("  Max depth: {}", config.search.max_depth);
    println!("  Max entries: {}", config.search.max_entries);
    println!("  Result limit: {}", config.search.result_limit);
    println!("  Skipped directories: {}", config.search.skip_dirs.join(", "));
    println!();
    println!("Screenshots:");
    match config.screenshots.source_path() {
        Ok(path) => println!("  Source: {}", path.display()),
        Err(_) => println!("  Source: (desktop not found)"),
    }
    match config.screenshots.destination_path() {
        Ok(path) => println!("  Destination: {}", path.display()),
        Err(_) => println!("  Destination: (unresolved)"),
    }
    println!("  Poll interval: {} s", config.screenshots.poll_interval_secs);
    println!("  Patterns: {}", config.screenshots.patterns.join(", "));
    println!(
        "  Prefer creation time: {}",
        config.screenshots.prefer_creation_time
    );
    println!();
    println!("Logging:");
    println!("  Level: {}", config.logging.level);
    match &config.logging.file {
        Some(file) => println!("  File: {}", file),
        None => println!("  File: (none)"),
    }
    println!();
    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

pub(crate) fn handle_config(show: bool, reset: bool, path: bool) -> anyhow::Result<()> {
    if reset {
        Config::default().save()?;
        println!("{} Configuration reset to defaults.", Theme::success("OK"));
        return Ok(());
    }
    if path && !show {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }
    // Default: show config
    print_config(&Config::load_or_create());
    Ok(())
}
