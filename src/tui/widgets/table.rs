//! Move preview table used by the confirm screen

use crate::planner::MovePlan;
use crate::tui::theme::Styles;
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One row per step: file, the folder it leaves, and the name it gets.
/// Renamed targets are highlighted.
pub fn render_move_preview(f: &mut Frame, area: Rect, plan: &MovePlan, scroll: usize) {
    let visible_rows = (area.height as usize).saturating_sub(3);
    let start = scroll.min(plan.steps.len().saturating_sub(1));
    let end = (start + visible_rows).min(plan.steps.len());

    let header = Row::new(vec![
        Cell::from("FILE").style(Styles::header()),
        Cell::from("FROM").style(Styles::header()),
        Cell::from("NEW NAME").style(Styles::header()),
        Cell::from("SIZE").style(Styles::header()),
    ]);

    let mut rows: Vec<Row> = plan.steps[start..end]
        .iter()
        .map(|step| {
            let from = step
                .source
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            let target = file_name(&step.destination);
            let target_cell = if step.keeps_name() {
                Cell::from(Span::styled(target, Styles::primary()))
            } else {
                Cell::from(Span::styled(format!("{} (renamed)", target), Styles::warning()))
            };
            let size = std::fs::metadata(&step.source)
                .map(|m| bytesize::to_string(m.len(), false))
                .unwrap_or_else(|_| "--".to_string());
            Row::new(vec![
                Cell::from(file_name(&step.source)),
                Cell::from(Span::styled(from, Styles::secondary())),
                target_cell,
                Cell::from(size),
            ])
        })
        .collect();

    if end < plan.steps.len() {
        rows.push(Row::new(vec![Cell::from(Span::styled(
            format!("... {} more", plan.steps.len() - end),
            Styles::secondary(),
        ))]));
    }

    let title = format!(" Move to {} ", plan.destination_dir.display());
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .title(Span::styled(title, Styles::title())),
    );

    f.render_widget(table, area);
}
