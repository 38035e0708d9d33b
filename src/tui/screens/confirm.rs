//! Confirm screen - preview of the planned moves

use crate::tui::{
    state::{AppState, Screen},
    theme::Styles,
    widgets::{
        logo::{render_header, HEADER_HEIGHT},
        shortcuts::{get_shortcuts, render_shortcuts},
        table::render_move_preview,
    },
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, app_state: &AppState) {
    let Screen::Confirm { ref plan, scroll } = app_state.screen else {
        return;
    };
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if area.height < 20 { 1 } else { HEADER_HEIGHT }),
            Constraint::Length(2),
            Constraint::Min(4),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(f, chunks[0], "Confirm move");

    let mut spans = vec![Span::styled(
        format!(
            "Move {} file(s) ({})?",
            plan.len(),
            bytesize::to_string(app_state.selection.total_size(), false)
        ),
        Styles::emphasis(),
    )];
    let renamed = plan.renamed_count();
    if renamed > 0 {
        spans.push(Span::styled(
            format!("  {} will be renamed to avoid overwriting", renamed),
            Styles::warning(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

    render_move_preview(f, chunks[2], plan, scroll);
    render_shortcuts(f, chunks[3], &get_shortcuts(app_state));
}
