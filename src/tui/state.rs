//! Application state management for TUI

use crate::config::{Config, SearchSettings};
use crate::navigator::{DirectoryEntry, Navigator};
use crate::planner::{self, MovePlan, MoveReport, SelectionSet};
use crate::scan_events::SearchProgress;
use crate::search::{SearchMatch, SearchMode, SearchOptions, SearchOutcome};
use std::path::Path;

/// Which half of the move flow the user is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Marking files to move
    PickFiles,
    /// Navigating to the folder they should go to
    PickDestination,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::PickFiles => "Select files",
            Stage::PickDestination => "Choose destination",
        }
    }

    /// Files are what you search for while selecting, folders while
    /// choosing where to put them
    pub fn search_mode(&self) -> SearchMode {
        match self {
            Stage::PickFiles => SearchMode::Files,
            Stage::PickDestination => SearchMode::Directories,
        }
    }
}

/// Current screen being displayed
#[derive(Debug)]
pub enum Screen {
    Browse,
    SearchInput {
        mode: SearchMode,
        query: String,
    },
    /// A search is pending or running; the event loop drives it
    Scanning {
        mode: SearchMode,
        query: String,
        progress: SearchProgress,
    },
    SearchResults {
        mode: SearchMode,
        query: String,
        matches: Vec<SearchMatch>,
        scanned: usize,
        cursor: usize,
    },
    Confirm {
        plan: MovePlan,
        scroll: usize,
    },
    /// A plan is pending or executing; the event loop drives it
    Moving {
        plan: MovePlan,
        done: usize,
    },
    Summary {
        report: MoveReport,
    },
}

pub struct AppState {
    pub screen: Screen,
    pub stage: Stage,
    pub nav: Navigator,
    pub entries: Vec<DirectoryEntry>,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub selection: SelectionSet,
    /// One-line status shown under the listing until the next key press
    pub message: Option<String>,
    pub search_settings: SearchSettings,
    pub tick: u64,
    /// Rows the listing had on the last draw; used for scrolling
    pub visible_height: usize,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let nav = Navigator::at_home(config.navigator.show_hidden)?;
        Ok(Self::with_navigator(nav, config.search.clone()))
    }

    pub fn with_navigator(nav: Navigator, search_settings: SearchSettings) -> Self {
        let mut state = Self {
            screen: Screen::Browse,
            stage: Stage::PickFiles,
            nav,
            entries: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            selection: SelectionSet::new(),
            message: None,
            search_settings,
            tick: 0,
            visible_height: 20,
        };
        state.refresh();
        state
    }

    /// Re-read the current directory. A listing error leaves an empty view
    /// and a message; the user can still go up.
    pub fn refresh(&mut self) {
        match self.nav.list() {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                self.entries.clear();
                self.message = Some(e.to_string());
            }
        }
        if self.cursor >= self.entries.len() {
            self.cursor = self.entries.len().saturating_sub(1);
        }
        self.ensure_cursor_visible();
    }

    fn set_navigator(&mut self, nav: Navigator) {
        self.nav = nav;
        self.cursor = 0;
        self.scroll_offset = 0;
        self.refresh();
    }

    pub fn current_entry(&self) -> Option<&DirectoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.ensure_cursor_visible();
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor = 0;
        self.ensure_cursor_visible();
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.entries.len().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    pub fn ensure_cursor_visible(&mut self) {
        let height = self.visible_height.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Enter the directory under the cursor, or toggle the file under it
    pub fn activate_current(&mut self) {
        let Some(entry) = self.current_entry().cloned() else {
            return;
        };
        if entry.is_dir() {
            match self.nav.enter(&entry.name) {
                Ok(nav) => self.set_navigator(nav),
                Err(e) => self.message = Some(e.to_string()),
            }
        } else {
            self.toggle_current();
        }
    }

    pub fn go_up(&mut self) {
        let child = self.nav.current().to_path_buf();
        match self.nav.up() {
            Ok(nav) => {
                self.set_navigator(nav);
                // Land on the directory we just left
                if let Some(idx) = self.entries.iter().position(|e| e.path == child) {
                    self.cursor = idx;
                    self.ensure_cursor_visible();
                }
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn toggle_current(&mut self) {
        let Some(entry) = self.current_entry().cloned() else {
            return;
        };
        self.toggle_path(&entry.path);
    }

    fn toggle_path(&mut self, path: &Path) {
        if self.stage != Stage::PickFiles {
            self.message = Some("Files can only be selected before choosing a destination".to_string());
            return;
        }
        match self.selection.toggle(path) {
            Ok(_) => self.message = Some(format!("{} selected", self.selection.len())),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn toggle_hidden(&mut self) {
        let show = !self.nav.show_hidden();
        self.nav = self.nav.with_hidden(show);
        self.refresh();
        self.message = Some(if show {
            "Showing hidden entries".to_string()
        } else {
            "Hiding hidden entries".to_string()
        });
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.message = Some("Selection cleared".to_string());
    }

    /// Switch to destination picking
    pub fn start_destination(&mut self) {
        if self.selection.is_empty() {
            self.message = Some("Select at least one file first".to_string());
            return;
        }
        self.stage = Stage::PickDestination;
        self.message = Some("Navigate to the destination and press d".to_string());
    }

    pub fn back_to_files(&mut self) {
        self.stage = Stage::PickFiles;
        self.screen = Screen::Browse;
        self.message = None;
    }

    /// Plan a move into the current directory and show the preview.
    /// Validation errors stay on the browse screen as a message.
    pub fn choose_destination(&mut self) {
        match planner::build_plan(&self.selection, self.nav.current()) {
            Ok(plan) => {
                self.message = None;
                self.screen = Screen::Confirm { plan, scroll: 0 };
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn begin_search(&mut self) {
        self.message = None;
        self.screen = Screen::SearchInput {
            mode: self.stage.search_mode(),
            query: String::new(),
        };
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::from_settings(&self.search_settings, self.nav.show_hidden())
    }

    pub fn finish_search(&mut self, mode: SearchMode, query: String, outcome: SearchOutcome) {
        if outcome.cancelled {
            self.screen = Screen::Browse;
            self.message = Some("Search cancelled".to_string());
            return;
        }
        self.screen = Screen::SearchResults {
            mode,
            query,
            matches: outcome.matches,
            scanned: outcome.scanned,
            cursor: 0,
        };
    }

    /// Act on a search result: directories are opened, files are toggled
    /// while selecting and revealed in their folder otherwise
    pub fn open_result(&mut self, result: &SearchMatch) {
        let target = if result.entry.is_dir() {
            Some(result.entry.path.clone())
        } else if self.stage == Stage::PickFiles {
            self.toggle_path(&result.entry.path);
            None
        } else {
            result.entry.path.parent().map(Path::to_path_buf)
        };

        if let Some(dir) = target {
            match Navigator::open(&dir, self.nav.show_hidden()) {
                Ok(nav) => {
                    self.set_navigator(nav);
                    if let Some(idx) = self.entries.iter().position(|e| e.path == result.entry.path) {
                        self.cursor = idx;
                        self.ensure_cursor_visible();
                    }
                    self.screen = Screen::Browse;
                }
                Err(e) => self.message = Some(e.to_string()),
            }
        }
    }

    pub fn finish_move(&mut self, report: MoveReport) {
        self.selection.clear();
        self.refresh();
        self.screen = Screen::Summary { report };
    }

    /// Abandon the batch: selection cleared, back to picking files
    pub fn cancel_move(&mut self) {
        self.selection.clear();
        self.back_to_files();
        self.message = Some("Move cancelled".to_string());
    }

    /// Start a new batch after a summary
    pub fn restart(&mut self) {
        self.selection.clear();
        self.back_to_files();
        self.refresh();
    }
}
