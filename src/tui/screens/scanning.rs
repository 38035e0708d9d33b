//! Progress screens for a running search and a running move

use crate::progress::spinner_frame;
use crate::tui::{
    state::{AppState, Screen},
    theme::Styles,
    widgets::{
        logo::{render_header, HEADER_HEIGHT},
        shortcuts::{get_shortcuts, render_shortcuts},
    },
};
use crate::utils;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area)
}

pub fn render(f: &mut Frame, app_state: &AppState) {
    let Screen::Scanning {
        mode,
        ref query,
        ref progress,
    } = app_state.screen
    else {
        return;
    };
    let chunks = layout(f.area());
    let spinner = spinner_frame(app_state.tick);

    render_header(f, chunks[0], "Searching");

    let current = progress
        .current_path
        .as_ref()
        .map(|p| utils::display_relative(p, app_state.nav.current()))
        .unwrap_or_else(|| "...".to_string());
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{}  ", spinner), Styles::emphasis()),
            Span::styled(
                format!("Searching {} for '{}'", mode.label(), query),
                Styles::emphasis(),
            ),
        ]),
        Line::from(Span::styled(
            format!("{} scanned, {} found", progress.scanned, progress.found),
            Styles::secondary(),
        )),
        Line::from(Span::styled(current, Styles::muted())),
    ];
    let status = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border()),
    );
    f.render_widget(status, chunks[1]);

    render_shortcuts(f, chunks[3], &get_shortcuts(app_state));
}

pub fn render_moving(f: &mut Frame, app_state: &AppState) {
    let Screen::Moving { ref plan, done } = app_state.screen else {
        return;
    };
    let chunks = layout(f.area());

    render_header(f, chunks[0], "Moving");

    let total = plan.len().max(1);
    let current = plan
        .steps
        .get(done)
        .and_then(|s| s.source.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border())
                .title(format!(" {} ", current)),
        )
        .gauge_style(Styles::success())
        .ratio((done as f64 / total as f64).clamp(0.0, 1.0))
        .label(format!("{}/{}", done, plan.len()));
    f.render_widget(gauge, chunks[1]);
}
