//! Screenshots command feature.
//!
//! This module owns and handles the "shelve screenshots" command behavior.

use crate::config::Config;
use crate::output::{self, OutputMode};
use crate::screenshots::{IntervalTrigger, ScreenshotOrganizer, ScreenshotSettings};
use crate::theme::Theme;
use anyhow::Context;
use std::path::PathBuf;

pub(crate) fn handle_screenshots(
    mut config: Config,
    once: bool,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    interval: Option<u64>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    config.apply_cli_overrides(source, dest, interval);
    let settings = ScreenshotSettings::from_config(&config.screenshots)?;
    let organizer = ScreenshotOrganizer::new(settings)?;

    if once {
        let report = organizer.run_cycle()?;
        output::print_cycle_report(&report, output_mode);
        return Ok(());
    }

    let (mut trigger, shutdown) = IntervalTrigger::new(organizer.settings().poll_interval);
    ctrlc::set_handler(move || shutdown.shutdown())
        .context("Failed to install Ctrl-C handler")?;

    if output_mode != OutputMode::Quiet {
        println!(
            "Watching {} every {} s, filing into {} (Ctrl-C to stop)",
            organizer.settings().source_dir.display(),
            organizer.settings().poll_interval.as_secs(),
            organizer.settings().destination_root.display()
        );
    }

    let totals = organizer.run(&mut trigger)?;

    if output_mode != OutputMode::Quiet {
        println!(
            "{}",
            Theme::success(&format!(
                "Stopped after {} cycle(s): {} moved, {} skipped, {} failed",
                totals.cycles, totals.moved, totals.skipped, totals.failed
            ))
        );
    }
    Ok(())
}
