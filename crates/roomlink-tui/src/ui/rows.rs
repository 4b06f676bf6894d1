//! Service and app rows
//!
//! One bordered card per entry, laid out evenly across the row. The focused
//! card is highlighted; each row remembers its own focus even when inactive.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use roomlink_app::App;
use roomlink_core::{Row, SERVICES, STREAMING_APPS};

use super::focus_style;

/// Render the guest services row.
pub fn render_services(frame: &mut Frame, app: &App, area: Rect) {
    let cards = SERVICES.iter().map(|service| {
        vec![
            Line::from(service.title),
            Line::from(Span::styled(service.description, Style::default().fg(Color::DarkGray))),
        ]
    });
    render_row(frame, app, area, Row::Services, " Services ", cards.collect());
}

/// Render the streaming apps row.
pub fn render_apps(frame: &mut Frame, app: &App, area: Rect) {
    let cards = STREAMING_APPS.iter().map(|entry| vec![Line::from(entry.name)]);
    render_row(frame, app, area, Row::Apps, " Apps ", cards.collect());
}

fn render_row(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    row: Row,
    title: &str,
    cards: Vec<Vec<Line<'static>>>,
) {
    let active = app.focus().row() == row;
    let block = Block::default()
        .borders(Borders::TOP)
        .title(title)
        .border_style(if active { Style::default().fg(Color::Cyan) } else { Style::default() });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let count = cards.len() as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(inner);

    for (index, (lines, slot)) in cards.into_iter().zip(chunks.iter()).enumerate() {
        let style = focus_style(app.focus().is_focused(row, index));
        let card = Paragraph::new(lines)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(card, *slot);
    }
}
