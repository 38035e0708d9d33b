//! Progress indicators shared by the CLI (indicatif) and the TUI (frame table)

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Braille spinner frames; the same set indicatif draws in the terminal
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame for a TUI tick. Advances every second tick so redraws at 10 Hz
/// don't make it flicker.
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize / 2) % SPINNER_FRAMES.len()]
}

fn spinner_chars() -> String {
    SPINNER_FRAMES.concat()
}

/// Spinner for a search whose size is unknown up front
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars(&spinner_chars())
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Bar for executing a move plan, one tick per file
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|s| s.progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_frame_cycles_through_all_frames() {
        let seen: std::collections::HashSet<_> = (0..20).map(spinner_frame).collect();
        assert_eq!(seen.len(), SPINNER_FRAMES.len());
        assert_eq!(spinner_frame(0), spinner_frame(1));
    }

    #[test]
    fn test_spinner_chars_match_frames() {
        assert_eq!(spinner_chars().chars().count(), SPINNER_FRAMES.len());
    }

    #[test]
    fn test_create_spinner() {
        let pb = create_spinner("Searching");
        assert!(!pb.is_finished());
        pb.finish_and_clear();
        assert!(pb.is_finished());
    }

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(4, "Moving");
        assert_eq!(pb.length(), Some(4));
        pb.inc(3);
        assert_eq!(pb.position(), 3);
        pb.finish();
    }
}
