//! Shortcuts bar widget

use crate::tui::state::{AppState, Screen, Stage};
use crate::tui::theme::Styles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render shortcuts bar at the bottom of the screen
pub fn render_shortcuts(f: &mut Frame, area: Rect, shortcuts: &[(&str, &str)]) {
    if shortcuts.is_empty() {
        return;
    }

    let available_width = area.width.saturating_sub(2) as usize;
    let mut spans: Vec<Span> = vec![];
    let mut current_width = 0;

    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        let separator = if i > 0 { " • " } else { "" };
        let key_text = format!("[{}]", key);
        let desc_text = format!(" {}", desc);
        let item_width = UnicodeWidthStr::width(separator)
            + UnicodeWidthStr::width(key_text.as_str())
            + UnicodeWidthStr::width(desc_text.as_str());

        if i > 0 && current_width + item_width > available_width {
            spans.push(Span::styled(" ...", Styles::secondary()));
            break;
        }

        if i > 0 {
            spans.push(Span::styled(separator, Styles::secondary()));
        }
        spans.push(Span::styled(key_text, Styles::emphasis()));
        spans.push(Span::styled(desc_text, Styles::secondary()));
        current_width += item_width;
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Styles::border())
            .padding(ratatui::widgets::Padding::new(0, 1, 0, 0)),
    );
    f.render_widget(paragraph, area);
}

/// Get shortcuts for the current screen and stage
pub fn get_shortcuts(app_state: &AppState) -> Vec<(&'static str, &'static str)> {
    match app_state.screen {
        Screen::Browse => match app_state.stage {
            Stage::PickFiles => vec![
                ("↑↓", "Navigate"),
                ("Enter", "Open/Toggle"),
                ("←", "Up"),
                ("Space", "Select"),
                ("/", "Search files"),
                ("M", "Move selected"),
                ("C", "Clear"),
                (".", "Hidden"),
                ("Q", "Quit"),
            ],
            Stage::PickDestination => vec![
                ("↑↓", "Navigate"),
                ("Enter", "Open"),
                ("←", "Up"),
                ("/", "Search folders"),
                ("D", "Move here"),
                ("Esc", "Back to files"),
            ],
        },
        Screen::SearchInput { .. } => vec![
            ("Type", "Query"),
            ("Tab", "Files/Folders"),
            ("Enter", "Search"),
            ("Esc", "Cancel"),
        ],
        Screen::Scanning { .. } => vec![("Esc", "Cancel")],
        Screen::SearchResults { .. } => vec![
            ("↑↓", "Navigate"),
            ("Enter", "Open/Toggle"),
            ("Space", "Toggle file"),
            ("/", "New search"),
            ("Esc", "Back"),
        ],
        Screen::Confirm { .. } => vec![
            ("Y/Enter", "Move"),
            ("↑↓", "Scroll"),
            ("Esc", "Change destination"),
            ("N", "Cancel"),
        ],
        Screen::Moving { .. } => vec![],
        Screen::Summary { .. } => vec![("Enter", "New batch"), ("Q", "Quit")],
    }
}
