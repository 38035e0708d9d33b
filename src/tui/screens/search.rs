//! Search query input and result list

use crate::output::truncate_to_width;
use crate::search::SearchMode;
use crate::tui::{
    screens::browse,
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
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
    let is_small = area.height < 20;
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if is_small { 1 } else { HEADER_HEIGHT }),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(area)
}

fn mode_span(mode: SearchMode) -> Span<'static> {
    Span::styled(format!("[{}] ", mode.label()), Styles::emphasis())
}

pub fn render_input(f: &mut Frame, app_state: &mut AppState) {
    let Screen::SearchInput { mode, ref query } = app_state.screen else {
        return;
    };
    let chunks = layout(f.area());

    render_header(f, chunks[0], "Search");

    let input = Paragraph::new(Line::from(vec![
        mode_span(mode),
        Span::styled(query.clone(), Styles::primary()),
        Span::styled("_", Styles::emphasis()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .title(format!(" Search in {} ", app_state.nav.current().display())),
    );
    f.render_widget(input, chunks[1]);

    let hint = match mode {
        SearchMode::Files => "Matches file names directly inside this folder.",
        SearchMode::Directories => "Matches folder names anywhere below this folder.",
    };
    let body = Paragraph::new(vec![
        Line::from(Span::styled(hint, Styles::secondary())),
        Line::from(Span::styled(
            "Exact names rank first, then names starting with the query, then names containing it.",
            Styles::muted(),
        )),
    ])
    .block(Block::default().padding(ratatui::widgets::Padding::uniform(1)));
    f.render_widget(body, chunks[2]);

    browse::render_message(f, chunks[3], app_state.message.as_deref());
    render_shortcuts(f, chunks[4], &get_shortcuts(app_state));
}

pub fn render_results(f: &mut Frame, app_state: &mut AppState) {
    let Screen::SearchResults {
        mode,
        ref query,
        ref matches,
        scanned,
        cursor,
    } = app_state.screen
    else {
        return;
    };
    let chunks = layout(f.area());
    let root = app_state.nav.current();

    render_header(f, chunks[0], "Search results");

    let summary = Paragraph::new(Line::from(vec![
        mode_span(mode),
        Span::styled(format!("'{}'", query), Styles::primary()),
        Span::styled(
            format!("  {} match(es), {} scanned", matches.len(), scanned),
            Styles::secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border()),
    );
    f.render_widget(summary, chunks[1]);

    let table_area = chunks[2];
    let visible_rows = (table_area.height as usize).saturating_sub(3).max(1);
    let start = cursor.saturating_sub(visible_rows.saturating_sub(1));
    let end = (start + visible_rows).min(matches.len());
    let location_width = (table_area.width as usize / 2).max(10);

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("NAME").style(Styles::header()),
        Cell::from("LOCATION").style(Styles::header()),
        Cell::from("MATCH").style(Styles::header()),
    ]);

    let rows: Vec<Row> = matches[start..end]
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let idx = start + i;
            let marker = if m.entry.is_dir() {
                "   "
            } else if app_state.selection.contains(&m.entry.path) {
                "[x]"
            } else {
                "[ ]"
            };
            let name_style = if m.entry.is_dir() {
                Styles::directory()
            } else {
                Styles::primary()
            };
            let location = m
                .entry
                .path
                .parent()
                .map(|p| utils::display_relative(p, root))
                .unwrap_or_default();
            let row_style = if idx == cursor { Styles::selected() } else { Style::default() };
            Row::new(vec![
                Cell::from(Span::styled(marker, Styles::checked())),
                Cell::from(Span::styled(m.entry.name.clone(), name_style)),
                Cell::from(truncate_to_width(&location, location_width)),
                Cell::from(Span::styled(format!("{:?}", m.tier).to_lowercase(), Styles::muted())),
            ])
            .style(row_style)
        })
        .collect();

    let title = if matches.is_empty() {
        " No matches ".to_string()
    } else {
        format!(" {}/{} ", cursor + 1, matches.len())
    };
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Percentage(45),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .title(title),
    );
    f.render_widget(table, table_area);

    browse::render_message(f, chunks[3], app_state.message.as_deref());
    render_shortcuts(f, chunks[4], &get_shortcuts(app_state));
}
