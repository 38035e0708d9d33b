//! Header banner shown at the top of every screen

use crate::tui::theme::Styles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LOGO_LINES: &[&str] = &[
    "  ┌─┐┬ ┬┌─┐┬  ┬  ┬┌─┐",
    "  └─┐├─┤├┤ │  └┐┌┘├┤ ",
    "  └─┘┴ ┴└─┘┴─┘ └┘ └─┘",
];

/// Height of the logo in lines
pub const LOGO_HEIGHT: u16 = 3;

/// Logo plus one tagline row
pub const HEADER_HEIGHT: u16 = LOGO_HEIGHT + 1;

/// Logo with the tagline underneath. Collapses to a single title line when
/// the area is too short for the full banner.
pub fn render_header(f: &mut Frame, area: Rect, subtitle: &str) {
    if area.height < HEADER_HEIGHT {
        let title = Paragraph::new(Line::from(vec![
            Span::styled("shelve", Styles::title()),
            Span::styled(format!("  {}", subtitle), Styles::secondary()),
        ]));
        f.render_widget(title, area);
        return;
    }

    let mut lines: Vec<Line> = LOGO_LINES
        .iter()
        .map(|line| Line::from(Span::styled(*line, Styles::title())))
        .collect();
    lines.push(Line::from(Span::styled(
        format!("  {}", subtitle),
        Styles::secondary(),
    )));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}
