//! Event handling for TUI

use crate::tui::state::{AppState, Screen, Stage};
use crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
}

/// Handle a keyboard event
pub fn handle_event(app_state: &mut AppState, key: KeyCode, modifiers: KeyModifiers) -> EventResult {
    if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
        return EventResult::Quit;
    }

    match app_state.screen {
        Screen::Browse => handle_browse_event(app_state, key),
        Screen::SearchInput { .. } => handle_search_input_event(app_state, key),
        Screen::SearchResults { .. } => handle_results_event(app_state, key),
        Screen::Confirm { .. } => handle_confirm_event(app_state, key),
        Screen::Summary { .. } => handle_summary_event(app_state, key),
        // Driven by the event loop, which polls for Esc itself
        Screen::Scanning { .. } | Screen::Moving { .. } => EventResult::Continue,
    }
}

/// Handle a mouse event
pub fn handle_mouse_event(app_state: &mut AppState, mouse: MouseEvent) -> EventResult {
    let key = match mouse.kind {
        MouseEventKind::ScrollDown => KeyCode::Down,
        MouseEventKind::ScrollUp => KeyCode::Up,
        _ => return EventResult::Continue,
    };
    match app_state.screen {
        Screen::Browse | Screen::SearchResults { .. } | Screen::Confirm { .. } => {
            handle_event(app_state, key, KeyModifiers::empty())
        }
        _ => EventResult::Continue,
    }
}

fn handle_browse_event(app_state: &mut AppState, key: KeyCode) -> EventResult {
    // Any key dismisses the previous status line
    app_state.message = None;

    match key {
        KeyCode::Up | KeyCode::Char('k') => app_state.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app_state.move_cursor(1),
        KeyCode::PageUp => app_state.move_cursor(-(app_state.visible_height.max(1) as isize)),
        KeyCode::PageDown => app_state.move_cursor(app_state.visible_height.max(1) as isize),
        KeyCode::Home | KeyCode::Char('g') => app_state.cursor_to_start(),
        KeyCode::End | KeyCode::Char('G') => app_state.cursor_to_end(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app_state.activate_current(),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => app_state.go_up(),
        KeyCode::Char(' ') => app_state.toggle_current(),
        KeyCode::Char('/') => app_state.begin_search(),
        KeyCode::Char('.') => app_state.toggle_hidden(),
        KeyCode::Char('c') if app_state.stage == Stage::PickFiles => app_state.clear_selection(),
        KeyCode::Char('m') if app_state.stage == Stage::PickFiles => app_state.start_destination(),
        KeyCode::Char('d') if app_state.stage == Stage::PickDestination => {
            app_state.choose_destination()
        }
        KeyCode::Esc if app_state.stage == Stage::PickDestination => app_state.back_to_files(),
        KeyCode::Char('q') | KeyCode::Esc => return EventResult::Quit,
        _ => {}
    }
    EventResult::Continue
}

fn handle_search_input_event(app_state: &mut AppState, key: KeyCode) -> EventResult {
    let Screen::SearchInput {
        ref mut mode,
        ref mut query,
    } = app_state.screen
    else {
        return EventResult::Continue;
    };

    match key {
        KeyCode::Esc => app_state.screen = Screen::Browse,
        KeyCode::Tab => *mode = mode.toggled(),
        KeyCode::Backspace => {
            query.pop();
        }
        KeyCode::Char(c) => query.push(c),
        KeyCode::Enter => {
            if query.trim().is_empty() {
                app_state.screen = Screen::Browse;
                app_state.message = Some("Type something to search for".to_string());
            } else {
                let (mode, query) = (*mode, query.clone());
                app_state.screen = Screen::Scanning {
                    mode,
                    query,
                    progress: Default::default(),
                };
            }
        }
        _ => {}
    }
    EventResult::Continue
}

fn handle_results_event(app_state: &mut AppState, key: KeyCode) -> EventResult {
    let Screen::SearchResults {
        ref matches,
        ref mut cursor,
        ..
    } = app_state.screen
    else {
        return EventResult::Continue;
    };
    let last = matches.len().saturating_sub(1);

    match key {
        KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => *cursor = (*cursor + 1).min(last),
        KeyCode::Esc | KeyCode::Char('q') => app_state.screen = Screen::Browse,
        KeyCode::Char('/') => app_state.begin_search(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(result) = matches.get(*cursor).cloned() {
                // Space only ever toggles; it never navigates away
                if key == KeyCode::Char(' ') && result.entry.is_dir() {
                    app_state.message = Some("Only files can be selected".to_string());
                } else {
                    app_state.open_result(&result);
                }
            }
        }
        _ => {}
    }
    EventResult::Continue
}

fn handle_confirm_event(app_state: &mut AppState, key: KeyCode) -> EventResult {
    let Screen::Confirm {
        ref plan,
        ref mut scroll,
    } = app_state.screen
    else {
        return EventResult::Continue;
    };

    match key {
        KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => {
            *scroll = (*scroll + 1).min(plan.len().saturating_sub(1))
        }
        KeyCode::Char('y') | KeyCode::Enter => {
            let plan = plan.clone();
            app_state.screen = Screen::Moving { plan, done: 0 };
        }
        // Back to choosing a different destination, selection kept
        KeyCode::Esc => app_state.screen = Screen::Browse,
        KeyCode::Char('n') => app_state.cancel_move(),
        _ => {}
    }
    EventResult::Continue
}

fn handle_summary_event(app_state: &mut AppState, key: KeyCode) -> EventResult {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => {
            app_state.restart();
            EventResult::Continue
        }
        _ => EventResult::Continue,
    }
}
