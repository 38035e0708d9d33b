//! Search command feature.
//!
//! This module owns and handles the "shelve search" command behavior.

use crate::config::Config;
use crate::output::{self, OutputMode};
use crate::progress;
use crate::scan_events::{CancelToken, SearchProgress};
use crate::search::{self, SearchMode, SearchOptions};
use std::path::PathBuf;

pub(crate) fn handle_search(
    config: &Config,
    query: String,
    path: Option<PathBuf>,
    files: bool,
    limit: Option<usize>,
    json: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let root = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let mode = if files {
        SearchMode::Files
    } else {
        SearchMode::Directories
    };

    let mut options = SearchOptions::from_settings(&config.search, config.navigator.show_hidden);
    options.limit = Some(limit.unwrap_or(config.search.result_limit));

    let spinner = (!json && output_mode != OutputMode::Quiet)
        .then(|| progress::create_spinner(&format!("Searching {} for '{}'...", mode.label(), query)));

    let cancel = CancelToken::new();
    let outcome = search::search(&root, &query, mode, &options, &cancel, &mut |p: &SearchProgress| {
        if let Some(pb) = &spinner {
            let current = p
                .current_path
                .as_ref()
                .map(|c| crate::utils::display_relative(c, &root))
                .unwrap_or_default();
            pb.set_message(format!("Scanned {} ({} found) {}", p.scanned, p.found, current));
        }
    });
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let outcome = outcome?;

    if json {
        println!("{}", output::search_results_json(&outcome, &query, mode)?);
    } else {
        output::print_search_results(&outcome, &root, &query, mode, output_mode);
    }
    Ok(())
}
