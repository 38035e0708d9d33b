//! Move command feature.
//!
//! This module owns and handles the "shelve move" command behavior.

use crate::cli;
use crate::output::{self, OutputMode};
use crate::planner::{self, SelectionSet};
use crate::progress;
use crate::theme::Theme;
use std::path::PathBuf;

pub(crate) fn handle_move(
    files: Vec<PathBuf>,
    to: PathBuf,
    yes: bool,
    json: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let mut selection = SelectionSet::new();
    for file in &files {
        // Toggling twice would deselect; repeated arguments count once
        if !selection.contains(file) {
            selection.toggle(file)?;
        }
    }

    let plan = planner::build_plan(&selection, &to)?;

    if !json && output_mode != OutputMode::Quiet {
        output::print_move_preview(&plan);
    }

    let prompt = format!(
        "Move {} file(s) to {}?",
        plan.len(),
        plan.destination_dir.display()
    );
    if !yes && !json && !cli::confirm(&prompt)? {
        println!("{}", Theme::muted("Cancelled."));
        return Ok(());
    }

    let show_bar = !json && output_mode != OutputMode::Quiet && plan.len() > 1;
    let bar = show_bar.then(|| progress::create_progress_bar(plan.len() as u64, "Moving..."));
    let report = planner::execute_with_progress(&plan, |_, step| {
        if let Some(pb) = &bar {
            pb.set_message(
                step.source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            pb.inc(1);
        }
    });
    if let Some(pb) = &bar {
        pb.finish_and_clear();
    }

    if json {
        println!("{}", output::move_report_json(&report)?);
    } else {
        output::print_move_report(&report, output_mode);
    }

    if !report.is_clean() && report.moved.is_empty() {
        anyhow::bail!("No files were moved");
    }
    Ok(())
}
