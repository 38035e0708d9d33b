//! TUI module for interactive terminal interface
//!
//! Provides a full-screen terminal UI using Ratatui for picking files, finding
//! a destination and moving them there.

pub mod events;
pub mod screens;
pub mod state;
pub mod theme;
pub mod widgets;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::time::Duration;

use self::events::{handle_event, handle_mouse_event, EventResult};
use self::screens::render;
use self::state::{AppState, Screen};
use crate::config::Config;
use crate::planner;
use crate::scan_events::{CancelToken, SearchProgress};
use crate::search;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI application
pub fn run(config: Config) -> Result<()> {
    // Resolve the home directory before touching the terminal so a failure
    // prints normally
    let mut app_state = AppState::new(&config).context("Cannot start at the home directory")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut app_state, &mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(app_state: &mut AppState, terminal: &mut Term) -> Result<()> {
    loop {
        // Increment tick for animations
        app_state.tick = app_state.tick.wrapping_add(1);
        terminal.draw(|f| render(f, app_state))?;

        // Handle pending search
        if matches!(app_state.screen, Screen::Scanning { .. }) {
            perform_search(app_state, terminal);
            continue;
        }

        // Handle pending move
        if matches!(app_state.screen, Screen::Moving { .. }) {
            perform_move(app_state, terminal);
            continue;
        }

        // Use polling with timeout for animation updates
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let result = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_event(app_state, key.code, key.modifiers)
            }
            Event::Mouse(mouse) => handle_mouse_event(app_state, mouse),
            _ => EventResult::Continue,
        };
        if result == EventResult::Quit {
            return Ok(());
        }
    }
}

/// Run the pending search, redrawing the scanning screen on each progress
/// callback and cancelling on Esc
fn perform_search(app_state: &mut AppState, terminal: &mut Term) {
    let (mode, query) = match &app_state.screen {
        Screen::Scanning { mode, query, .. } => (*mode, query.clone()),
        _ => return,
    };
    let root = app_state.nav.current().to_path_buf();
    let options = app_state.search_options();
    let cancel = CancelToken::new();

    let outcome = {
        let mut on_progress = |p: &SearchProgress| {
            if let Screen::Scanning {
                ref mut progress, ..
            } = app_state.screen
            {
                *progress = p.clone();
            }
            app_state.tick = app_state.tick.wrapping_add(1);
            let _ = terminal.draw(|f| render(f, app_state));

            // Process any pending events (non-blocking) to allow cancellation
            while event::poll(Duration::from_millis(0)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press
                        && matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
                    {
                        cancel.cancel();
                    }
                }
            }
        };
        search::search(&root, &query, mode, &options, &cancel, &mut on_progress)
    };

    match outcome {
        Ok(outcome) => {
            tracing::debug!(
                %query,
                mode = mode.label(),
                matches = outcome.matches.len(),
                cancelled = outcome.cancelled,
                "tui search finished"
            );
            app_state.finish_search(mode, query, outcome);
        }
        Err(e) => {
            tracing::warn!(error = %e, "tui search failed");
            app_state.screen = Screen::Browse;
            app_state.message = Some(e.to_string());
        }
    }
}

/// Execute the confirmed plan, updating the progress screen per file
fn perform_move(app_state: &mut AppState, terminal: &mut Term) {
    let plan = match &app_state.screen {
        Screen::Moving { plan, .. } => plan.clone(),
        _ => return,
    };

    let report = planner::execute_with_progress(&plan, |idx, _step| {
        if let Screen::Moving { ref mut done, .. } = app_state.screen {
            *done = idx;
        }
        app_state.tick = app_state.tick.wrapping_add(1);
        let _ = terminal.draw(|f| render(f, app_state));
    });

    app_state.finish_move(report);
}
