//! Footer actions

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use roomlink_app::App;
use roomlink_core::{FOOTER_SLOTS, FooterAction, Row};

use super::focus_style;

/// Render the footer row.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.focus().row() == Row::Footer;
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(if active { Style::default().fg(Color::Cyan) } else { Style::default() });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, FOOTER_SLOTS as u32); FOOTER_SLOTS])
        .split(inner);

    for (index, slot) in chunks.iter().enumerate() {
        let Some(action) = FooterAction::from_index(index) else {
            continue;
        };
        let style = focus_style(app.focus().is_focused(Row::Footer, index));
        let label = Paragraph::new(label(action, app.sync().dnd()))
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(label, *slot);
    }
}

fn label(action: FooterAction, dnd: bool) -> String {
    match action {
        FooterAction::DoNotDisturb if dnd => "Do Not Disturb: On".to_owned(),
        FooterAction::DoNotDisturb => "Do Not Disturb: Off".to_owned(),
        FooterAction::SetAlarm => "Set Alarm".to_owned(),
        FooterAction::Privacy => "Privacy".to_owned(),
        FooterAction::Checkout => "Check Out".to_owned(),
    }
}
