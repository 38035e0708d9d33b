//! Summary screen shown after a batch finishes

use crate::tui::{
    state::{AppState, Screen},
    theme::Styles,
    widgets::{
        logo::{render_header, HEADER_HEIGHT},
        shortcuts::{get_shortcuts, render_shortcuts},
    },
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app_state: &AppState) {
    let Screen::Summary { ref report } = app_state.screen else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_header(f, chunks[0], "Done");

    let headline_style = if report.is_clean() {
        Styles::success()
    } else {
        Styles::warning()
    };
    let mut lines = vec![
        Line::from(Span::styled(report.summary(), headline_style)),
        Line::from(""),
    ];
    for step in &report.moved {
        lines.push(Line::from(vec![
            Span::styled("  moved  ", Styles::success()),
            Span::styled(step.destination.display().to_string(), Styles::primary()),
        ]));
    }
    for failure in &report.failures {
        lines.push(Line::from(vec![
            Span::styled("  failed ", Styles::error()),
            Span::styled(failure.source.display().to_string(), Styles::primary()),
            Span::styled(format!("  {}", failure.error.reason()), Styles::secondary()),
        ]));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border()),
        );
    f.render_widget(body, chunks[1]);

    render_shortcuts(f, chunks[2], &get_shortcuts(app_state));
}
