//! Plain CLI output for the non-interactive commands

use crate::planner::{MovePlan, MoveReport};
use crate::screenshots::CycleReport;
use crate::search::{SearchMode, SearchOutcome};
use crate::theme::Theme;
use crate::utils;
use serde::Serialize;
use std::path::{Path, PathBuf};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,       // Only errors
    Normal,      // Standard output
    Verbose,     // More details
    VeryVerbose, // All details including file paths
}

impl OutputMode {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            OutputMode::Quiet
        } else if verbose >= 2 {
            OutputMode::VeryVerbose
        } else if verbose == 1 {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

/// Truncate a string to a maximum display width (adds ellipsis if needed).
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }

    let ellipsis = "…";
    let ellipsis_w = UnicodeWidthStr::width(ellipsis);
    let target = max_width.saturating_sub(ellipsis_w);

    let mut out = String::new();
    let mut w = 0usize;
    for ch in s.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w + cw > target {
            break;
        }
        out.push(ch);
        w += cw;
    }
    out.push_str(ellipsis);
    out
}

/// Pad/truncate content to a specific display width (Unicode-aware).
fn pad_right_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let w = UnicodeWidthStr::width(truncated.as_str());
    format!("{}{}", truncated, " ".repeat(width.saturating_sub(w)))
}

/// Print a table row with borders and 1-space cell padding.
fn print_table_row(cols: &[(String, usize)]) {
    let mut row = String::from("│");
    for (content, width) in cols {
        row.push(' ');
        row.push_str(&pad_right_to_width(content, *width));
        row.push(' ');
        row.push('│');
    }
    println!("{}", row);
}

/// Print a horizontal separator line (Unicode box drawing).
/// Widths are content widths (excluding the 1-space left/right padding).
fn print_table_separator(widths: &[usize], left: &str, mid: &str, right: &str) {
    let mut sep = left.to_string();
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            sep.push_str(mid);
        }
        // +2 for the 1-space padding on each side of the cell
        sep.push_str(&"─".repeat(width + 2));
    }
    sep.push_str(right);
    println!("{}", sep);
}

fn print_table(headers: &[&str], widths: &[usize], rows: &[Vec<String>]) {
    print_table_separator(widths, "┌", "┬", "┐");
    let header_cols: Vec<(String, usize)> = headers
        .iter()
        .zip(widths)
        .map(|(h, w)| (h.to_string(), *w))
        .collect();
    print_table_row(&header_cols);
    print_table_separator(widths, "├", "┼", "┤");
    for row in rows {
        let cols: Vec<(String, usize)> = row.iter().cloned().zip(widths.iter().copied()).collect();
        print_table_row(&cols);
    }
    print_table_separator(widths, "└", "┴", "┘");
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Search results as a table (or a bare path list in verbose mode)
pub fn print_search_results(outcome: &SearchOutcome, root: &Path, query: &str, mode: SearchMode, output_mode: OutputMode) {
    if output_mode == OutputMode::Quiet {
        for m in &outcome.matches {
            println!("{}", m.entry.path.display());
        }
        return;
    }

    if outcome.cancelled {
        println!("{}", Theme::warning("Search cancelled"));
        return;
    }

    println!();
    println!(
        "{} {} matching '{}' under {} ({} scanned)",
        Theme::header("Found"),
        Theme::value(&format!("{} {}", outcome.matches.len(), mode.label())),
        query,
        root.display(),
        outcome.scanned
    );
    if outcome.matches.is_empty() {
        println!("{}", Theme::muted("No matches. Try a shorter query."));
        return;
    }
    println!();

    let rows: Vec<Vec<String>> = outcome
        .matches
        .iter()
        .map(|m| {
            vec![
                m.entry.name.clone(),
                utils::display_relative(&m.entry.path, root),
                format!("{:?}", m.tier).to_lowercase(),
                m.entry.size_human(),
            ]
        })
        .collect();
    print_table(&["NAME", "LOCATION", "MATCH", "SIZE"], &[24, 40, 9, 10], &rows);

    if output_mode == OutputMode::VeryVerbose {
        println!();
        for m in &outcome.matches {
            println!("  {} {} (score {})", Theme::muted("→"), m.entry.path.display(), m.score);
        }
    }
}

/// Preview of what a plan will do
pub fn print_move_preview(plan: &MovePlan) {
    println!();
    println!("{}", Theme::header("Move Preview"));
    println!();
    let rows: Vec<Vec<String>> = plan
        .steps
        .iter()
        .map(|step| {
            let from = step
                .source
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            let to = if step.keeps_name() {
                plan.destination_dir.display().to_string()
            } else {
                format!("{} (as {})", plan.destination_dir.display(), name_of(&step.destination))
            };
            vec![name_of(&step.source), from, to]
        })
        .collect();
    print_table(&["FILE", "FROM", "TO"], &[24, 30, 36], &rows);
    if plan.renamed_count() > 0 {
        println!(
            "{}",
            Theme::muted(&format!(
                "{} file(s) will be renamed to avoid overwriting existing files",
                plan.renamed_count()
            ))
        );
    }
}

/// End-of-batch summary with failure reasons
pub fn print_move_report(report: &MoveReport, output_mode: OutputMode) {
    if output_mode == OutputMode::Quiet && report.is_clean() {
        return;
    }
    println!();
    if output_mode != OutputMode::Normal || report.moved.len() <= 10 {
        for step in &report.moved {
            println!(
                "  {} {} → {}",
                Theme::success("OK"),
                name_of(&step.source),
                step.destination.display()
            );
        }
    }
    for failure in &report.failures {
        eprintln!(
            "  {} {}: {}",
            Theme::error("FAILED"),
            failure.source.display(),
            failure.error
        );
    }
    println!();
    let line = report.summary();
    if report.is_clean() {
        println!("{}", Theme::success(&line));
    } else {
        println!("{}", Theme::warning(&line));
    }
}

pub fn print_cycle_report(report: &CycleReport, output_mode: OutputMode) {
    if output_mode == OutputMode::Quiet {
        return;
    }
    for moved in &report.moved {
        println!(
            "  {} {} → {}",
            Theme::muted("→"),
            name_of(&moved.source),
            moved.bucket
        );
    }
    println!(
        "{}",
        Theme::primary(&format!(
            "Organized {} screenshot(s), {} skipped, {} failed",
            report.moved.len(),
            report.skipped,
            report.failed
        ))
    );
}

#[derive(Serialize)]
struct JsonMove {
    source: PathBuf,
    destination: PathBuf,
}

#[derive(Serialize)]
struct JsonFailure {
    source: PathBuf,
    reason: &'static str,
    message: String,
}

#[derive(Serialize)]
struct JsonMoveReport {
    version: String,
    timestamp: String,
    moved: Vec<JsonMove>,
    failed: Vec<JsonFailure>,
    moved_bytes: u64,
}

pub fn move_report_json(report: &MoveReport) -> anyhow::Result<String> {
    let json = JsonMoveReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Local::now().to_rfc3339(),
        moved: report
            .moved
            .iter()
            .map(|s| JsonMove {
                source: s.source.clone(),
                destination: s.destination.clone(),
            })
            .collect(),
        failed: report
            .failures
            .iter()
            .map(|f| JsonFailure {
                source: f.source.clone(),
                reason: f.error.reason(),
                message: f.error.to_string(),
            })
            .collect(),
        moved_bytes: report.moved_bytes,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

pub fn search_results_json(outcome: &SearchOutcome, query: &str, mode: SearchMode) -> anyhow::Result<String> {
    #[derive(Serialize)]
    struct JsonSearch<'a> {
        query: &'a str,
        mode: SearchMode,
        scanned: usize,
        cancelled: bool,
        matches: &'a [crate::search::SearchMatch],
    }
    Ok(serde_json::to_string_pretty(&JsonSearch {
        query,
        mode,
        scanned: outcome.scanned,
        cancelled: outcome.cancelled,
        matches: &outcome.matches,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShelveError;
    use crate::planner::{MoveFailure, MoveStep};

    #[test]
    fn test_output_mode_from_flags() {
        assert_eq!(OutputMode::from_flags(true, 2), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(false, 0), OutputMode::Normal);
        assert_eq!(OutputMode::from_flags(false, 1), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(false, 3), OutputMode::VeryVerbose);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a-very-long-file-name.txt", 10);
        assert_eq!(UnicodeWidthStr::width(cut.as_str()), 10);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_pad_right_to_width() {
        assert_eq!(pad_right_to_width("ab", 4), "ab  ");
    }

    #[test]
    fn test_move_report_json() {
        let report = MoveReport {
            moved: vec![MoveStep {
                source: PathBuf::from("/a/x.txt"),
                destination: PathBuf::from("/b/x.txt"),
            }],
            failures: vec![MoveFailure {
                source: PathBuf::from("/a/y.txt"),
                error: ShelveError::VanishedSource(PathBuf::from("/a/y.txt")),
            }],
            moved_bytes: 12,
        };
        let json = move_report_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["moved"].as_array().unwrap().len(), 1);
        assert_eq!(value["failed"][0]["reason"], "source vanished");
        assert_eq!(value["moved_bytes"], 12);
    }
}
