//! Integration tests for shelve
//!
//! These tests verify end-to-end workflows and interactions between modules

use chrono::{Local, TimeZone};
use shelve::config::Config;
use shelve::error::ShelveError;
use shelve::navigator::Navigator;
use shelve::planner::{self, SelectionSet};
use shelve::scan_events::CancelToken;
use shelve::screenshots::{
    bucket_for, CountedTrigger, ScreenshotOrganizer, ScreenshotSettings,
};
use shelve::search::{self, MatchTier, SearchMode, SearchOptions};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn organizer_for(desktop: &Path) -> ScreenshotOrganizer {
    let mut config = Config::default();
    config.apply_cli_overrides(Some(desktop.to_path_buf()), None, Some(1));
    let settings = ScreenshotSettings::from_config(&config.screenshots).unwrap();
    assert_eq!(settings.destination_root, desktop.join("Screenshots"));
    assert_eq!(settings.poll_interval, Duration::from_secs(1));
    ScreenshotOrganizer::new(settings).unwrap()
}

#[test]
fn test_navigate_search_select_and_move() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("inbox")).unwrap();
    fs::create_dir_all(root.join("archive/reports")).unwrap();
    fs::write(root.join("inbox/report.pdf"), "pdf").unwrap();
    fs::write(root.join("inbox/report-draft.pdf"), "draft").unwrap();
    fs::write(root.join("inbox/notes.txt"), "notes").unwrap();

    // Browse into the inbox and find the report files
    let nav = Navigator::open(root, false).unwrap().enter("inbox").unwrap();
    let cancel = CancelToken::new();
    let files = search::search(
        nav.current(),
        "report",
        SearchMode::Files,
        &SearchOptions::default(),
        &cancel,
        &mut |_| {},
    )
    .unwrap();
    assert_eq!(files.matches.len(), 2);

    let mut selection = SelectionSet::new();
    for m in &files.matches {
        selection.toggle(&m.entry.path).unwrap();
    }

    // Find the destination by searching directories from the root
    let nav = nav.up().unwrap();
    let dirs = search::search(
        nav.current(),
        "reports",
        SearchMode::Directories,
        &SearchOptions::default(),
        &cancel,
        &mut |_| {},
    )
    .unwrap();
    assert_eq!(dirs.matches[0].tier, MatchTier::Exact);
    let destination = dirs.matches[0].entry.path.clone();

    let plan = planner::build_plan(&selection, &destination).unwrap();
    let report = planner::execute(&plan);
    assert!(report.is_clean());
    assert_eq!(report.moved.len(), 2);
    assert!(destination.join("report.pdf").exists());
    assert!(destination.join("report-draft.pdf").exists());
    assert!(root.join("inbox/notes.txt").exists());
    assert!(report.summary().starts_with("Moved 2 files"));
}

#[test]
fn test_move_into_own_directory_touches_nothing() {
    let temp_dir = create_test_dir();
    let src = temp_dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.txt"), "a").unwrap();
    fs::write(src.join("b.txt"), "b").unwrap();

    let mut selection = SelectionSet::new();
    selection.toggle(&src.join("a.txt")).unwrap();
    selection.toggle(&src.join("b.txt")).unwrap();

    let err = planner::build_plan(&selection, &src).unwrap_err();
    assert!(matches!(err, ShelveError::NoOpMove { .. }));

    let mut listing: Vec<String> = fs::read_dir(&src)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    listing.sort();
    assert_eq!(listing, vec!["a.txt", "b.txt"]);
}

#[test]
fn test_repeated_same_name_moves_get_distinct_names() {
    let temp_dir = create_test_dir();
    let dst = temp_dir.path().join("dst");
    fs::create_dir(&dst).unwrap();

    for round in 0..3 {
        let src = temp_dir.path().join(format!("src{}", round));
        fs::create_dir(&src).unwrap();
        fs::write(src.join("photo.jpg"), format!("round {}", round)).unwrap();

        let mut selection = SelectionSet::new();
        selection.toggle(&src.join("photo.jpg")).unwrap();
        let report = planner::execute(&planner::build_plan(&selection, &dst).unwrap());
        assert!(report.is_clean());
    }

    assert_eq!(fs::read_to_string(dst.join("photo.jpg")).unwrap(), "round 0");
    assert_eq!(fs::read_to_string(dst.join("photo (1).jpg")).unwrap(), "round 1");
    assert_eq!(fs::read_to_string(dst.join("photo (2).jpg")).unwrap(), "round 2");
}

#[test]
fn test_screenshot_collision_gets_suffix() {
    let temp_dir = create_test_dir();
    let desk = temp_dir.path();
    let bucket = desk.join("Screenshots").join(bucket_for(&Local::now()));
    fs::create_dir_all(&bucket).unwrap();
    fs::write(bucket.join("Screenshot 2024-03-15.png"), "older").unwrap();
    fs::write(desk.join("Screenshot 2024-03-15.png"), "newer").unwrap();

    let report = organizer_for(desk).run_cycle().unwrap();

    assert_eq!(report.moved.len(), 1);
    assert_eq!(
        fs::read_to_string(bucket.join("Screenshot 2024-03-15.png")).unwrap(),
        "older"
    );
    assert_eq!(
        fs::read_to_string(bucket.join("Screenshot 2024-03-15 (1).png")).unwrap(),
        "newer"
    );
    assert!(!desk.join("Screenshot 2024-03-15.png").exists());
}

#[test]
fn test_screenshot_routed_by_modification_time() {
    let temp_dir = create_test_dir();
    let desk = temp_dir.path();
    let shot = desk.join("Screenshot 2024-03-15.png");
    fs::write(&shot, "png").unwrap();
    let march = Local.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
    fs::File::options()
        .write(true)
        .open(&shot)
        .unwrap()
        .set_modified(march.into())
        .unwrap();

    let mut config = Config::default();
    config.apply_cli_overrides(Some(desk.to_path_buf()), None, Some(1));
    config.screenshots.prefer_creation_time = false;
    let settings = ScreenshotSettings::from_config(&config.screenshots).unwrap();
    let report = ScreenshotOrganizer::new(settings).unwrap().run_cycle().unwrap();

    assert_eq!(report.moved.len(), 1);
    assert!(desk
        .join("Screenshots/March_2024/Screenshot 2024-03-15.png")
        .exists());
    assert!(!shot.exists());
}

#[test]
fn test_organizer_rerun_after_partial_cycle() {
    let temp_dir = create_test_dir();
    let desk = temp_dir.path();
    let bucket = desk.join("Screenshots").join(bucket_for(&Local::now()));

    // Simulate a cycle that was interrupted after moving one file
    fs::create_dir_all(&bucket).unwrap();
    fs::write(bucket.join("Screenshot 1.png"), "1").unwrap();
    fs::write(desk.join("Screenshot 2.png"), "2").unwrap();
    fs::write(desk.join("Screen Shot 3.png"), "3").unwrap();
    fs::write(desk.join("holiday.png"), "keep").unwrap();

    let organizer = organizer_for(desk);
    let totals = organizer.run(&mut CountedTrigger::new(1)).unwrap();
    assert_eq!(totals.cycles, 2);
    assert_eq!(totals.moved, 2);
    assert_eq!(totals.failed, 0);

    let mut filed: Vec<PathBuf> = fs::read_dir(&bucket)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    filed.sort();
    assert_eq!(
        names(&filed),
        vec!["Screen Shot 3.png", "Screenshot 1.png", "Screenshot 2.png"]
    );
    assert!(desk.join("holiday.png").exists());

    // Nothing left to do on a third run
    let report = organizer.run_cycle().unwrap();
    assert!(report.is_idle());
}

#[test]
fn test_search_is_deterministic_and_tiered() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    for dir in ["Docs", "docs-old/nested", "my-docs", "node_modules/docs", "zdocs"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }

    let run = || {
        search::search(
            root,
            "docs",
            SearchMode::Directories,
            &SearchOptions::default(),
            &CancelToken::new(),
            &mut |_| {},
        )
        .unwrap()
    };
    let first = run();
    let second = run();

    let names: Vec<&str> = first.matches.iter().map(|m| m.entry.name.as_str()).collect();
    assert_eq!(names, vec!["Docs", "docs-old", "my-docs", "zdocs"]);
    assert_eq!(
        first.matches.iter().map(|m| m.score).collect::<Vec<_>>(),
        vec![100, 90, 80, 80]
    );
    let again: Vec<&str> = second.matches.iter().map(|m| m.entry.name.as_str()).collect();
    assert_eq!(names, again);
}

#[test]
fn test_cancelled_search_returns_cleanly() {
    let temp_dir = create_test_dir();
    fs::create_dir_all(temp_dir.path().join("a/b/c")).unwrap();

    let cancel = CancelToken::new();
    cancel.cancel();
    let outcome = search::search(
        temp_dir.path(),
        "b",
        SearchMode::Directories,
        &SearchOptions::default(),
        &cancel,
        &mut |_| {},
    )
    .unwrap();
    assert!(outcome.cancelled);
    assert!(outcome.matches.is_empty());
}

#[test]
fn test_config_round_trips_through_toml() {
    let mut config = Config::default();
    config.apply_cli_overrides(None, Some(PathBuf::from("/tmp/shots")), Some(0));
    assert_eq!(config.screenshots.poll_interval_secs, 1);

    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed.screenshots.destination_dir.as_deref(), Some("/tmp/shots"));
    assert_eq!(parsed.search.max_depth, 4);

    // Missing sections fall back to defaults
    let partial: Config = toml::from_str("[navigator]\nshow_hidden = true\n").unwrap();
    assert!(partial.navigator.show_hidden);
    assert_eq!(partial.screenshots.patterns, vec!["Screenshot*", "Screen Shot*"]);
}
