//! Browse screen - directory listing plus the current selection

use crate::output::truncate_to_width;
use crate::tui::{
    state::{AppState, Stage},
    theme::Styles,
    widgets::{
        logo::{render_header, HEADER_HEIGHT},
        shortcuts::{get_shortcuts, render_shortcuts},
    },
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app_state: &mut AppState) {
    let area = f.area();
    let is_small = area.height < 20 || area.width < 60;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if is_small { 1 } else { HEADER_HEIGHT }),
            Constraint::Length(3), // Path bar
            Constraint::Min(3),    // Listing + selection
            Constraint::Length(1), // Status message
            Constraint::Length(2), // Shortcuts
        ])
        .split(area);

    render_header(f, chunks[0], app_state.stage.label());
    render_path_bar(f, chunks[1], app_state);

    if is_small {
        render_listing(f, chunks[2], app_state);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[2]);
        render_listing(f, columns[0], app_state);
        render_selection(f, columns[1], app_state);
    }

    render_message(f, chunks[3], app_state.message.as_deref());
    render_shortcuts(f, chunks[4], &get_shortcuts(app_state));
}

fn render_path_bar(f: &mut Frame, area: Rect, app_state: &AppState) {
    let stage_style = match app_state.stage {
        Stage::PickFiles => Styles::emphasis(),
        Stage::PickDestination => Styles::warning(),
    };
    let width = area.width.saturating_sub(4) as usize;
    let path = app_state.nav.current().display().to_string();
    let line = Line::from(vec![
        Span::styled(format!("{} ", app_state.stage.label()), stage_style),
        Span::styled(
            truncate_to_width(&path, width.saturating_sub(app_state.stage.label().len() + 1)),
            Styles::primary(),
        ),
    ]);
    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border()),
    );
    f.render_widget(bar, area);
}

fn render_listing(f: &mut Frame, area: Rect, app_state: &mut AppState) {
    // Borders take two rows
    app_state.visible_height = (area.height as usize).saturating_sub(2).max(1);
    app_state.ensure_cursor_visible();

    let name_width = (area.width as usize).saturating_sub(20);
    let start = app_state.scroll_offset.min(app_state.entries.len());
    let end = (start + app_state.visible_height).min(app_state.entries.len());

    let items: Vec<ListItem> = app_state.entries[start..end]
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let idx = start + i;
            let is_cursor = idx == app_state.cursor;
            let (marker, marker_style) = if entry.is_dir() {
                ("   ", Styles::secondary())
            } else if app_state.selection.contains(&entry.path) {
                ("[x]", Styles::checked())
            } else {
                ("[ ]", Styles::secondary())
            };
            let (name, name_style) = if entry.is_dir() {
                (format!("{}/", entry.name), Styles::directory())
            } else {
                (entry.name.clone(), Styles::primary())
            };
            let row_style = if is_cursor { Styles::selected() } else { Style::default() };

            ListItem::new(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::raw(" "),
                Span::styled(truncate_to_width(&name, name_width), name_style),
                Span::raw("  "),
                Span::styled(entry.size_human(), Styles::muted()),
            ]))
            .style(row_style)
        })
        .collect();

    let title = if app_state.entries.is_empty() {
        " (empty) ".to_string()
    } else {
        format!(" {}/{} ", app_state.cursor + 1, app_state.entries.len())
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .title(title),
    );
    f.render_widget(list, area);
}

fn render_selection(f: &mut Frame, area: Rect, app_state: &AppState) {
    let width = area.width.saturating_sub(4) as usize;
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} file(s)", app_state.selection.len()), Styles::emphasis()),
        Span::styled(
            format!("  {}", bytesize::to_string(app_state.selection.total_size(), false)),
            Styles::secondary(),
        ),
    ])];
    lines.push(Line::from(""));

    let rows = (area.height as usize).saturating_sub(4);
    for path in app_state.selection.iter().take(rows) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(
            truncate_to_width(&name, width),
            Styles::primary(),
        )));
    }
    if app_state.selection.len() > rows {
        lines.push(Line::from(Span::styled(
            format!("... {} more", app_state.selection.len() - rows),
            Styles::muted(),
        )));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .title(" Selected "),
    );
    f.render_widget(panel, area);
}

pub(crate) fn render_message(f: &mut Frame, area: Rect, message: Option<&str>) {
    if let Some(message) = message {
        let line = Paragraph::new(Line::from(Span::styled(
            format!(" {}", message),
            Styles::warning(),
        )));
        f.render_widget(line, area);
    }
}
