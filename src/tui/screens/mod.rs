//! Screen rendering modules

pub mod browse;
pub mod confirm;
pub mod scanning;
pub mod search;
pub mod summary;

use crate::tui::state::{AppState, Screen};
use ratatui::Frame;

/// Main render function that dispatches to the appropriate screen
pub fn render(f: &mut Frame, app_state: &mut AppState) {
    match app_state.screen {
        Screen::Browse => browse::render(f, app_state),
        Screen::SearchInput { .. } => search::render_input(f, app_state),
        Screen::Scanning { .. } => scanning::render(f, app_state),
        Screen::SearchResults { .. } => search::render_results(f, app_state),
        Screen::Confirm { .. } => confirm::render(f, app_state),
        Screen::Moving { .. } => scanning::render_moving(f, app_state),
        Screen::Summary { .. } => summary::render(f, app_state),
    }
}
