//! Overlays
//!
//! Everything drawn above the launcher screen. Each function checks whether
//! its layer is active and draws nothing otherwise.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use roomlink_app::{App, PRIVACY_ENTRIES};
use roomlink_core::{ModalControl, ModalState};

use super::{centered, focus_style};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;
const PRIVACY_WIDTH: u16 = 32;
const MODAL_WIDTH: u16 = 72;
const ALARM_WIDTH: u16 = 44;
const ALARM_HEIGHT: u16 = 7;

/// Toast in the top-right corner.
pub fn render_toast(frame: &mut Frame, app: &App, area: Rect) {
    let Some(toast) = app.toast() else {
        return;
    };
    let width = TOAST_WIDTH.min(area.width);
    let rect = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height: TOAST_HEIGHT.min(area.height),
    };

    let lines = vec![
        Line::from(Span::styled(toast.title.as_str(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(toast.body.as_str()),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), rect);
}

/// Privacy menu popup.
pub fn render_privacy(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ring) = app.privacy() else {
        return;
    };
    let lines: Vec<Line> = PRIVACY_ENTRIES
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let focused = ring.index() == index;
            let marker = if focused { "> " } else { "  " };
            Line::from(Span::styled(format!("{marker}{}", entry.label), focus_style(focused)))
        })
        .collect();

    let rect = centered(area, PRIVACY_WIDTH, PRIVACY_ENTRIES.len() as u16 + 2);
    let block = Block::default().borders(Borders::ALL).title(" Privacy ");
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

/// Service modal.
pub fn render_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(modal) = app.modal() else {
        return;
    };
    let lines = modal_lines(modal);
    let rect = centered(area, MODAL_WIDTH, area.height.saturating_sub(2));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", modal.content().title))
        .title_bottom(control_line(modal, ModalControl::Close, "[ Close ]"));
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), rect);
}

/// Body of a modal: overline, intro, items, facts, footnote and buttons.
fn modal_lines(modal: &ModalState) -> Vec<Line<'_>> {
    let content = modal.content();
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(Span::styled(content.subtitle(), dim)), Line::default()];

    if let Some(intro) = &content.intro {
        lines.push(Line::from(intro.as_str()));
        lines.push(Line::default());
    }

    for (index, item) in content.items.iter().enumerate() {
        let focused = modal.focused() == ModalControl::Item(index);
        let selected = modal.selected_index() == Some(index);
        let marker = match (item.focusable, selected) {
            (true, true) => "[x] ",
            (true, false) => "[ ] ",
            (false, _) => " -  ",
        };
        let mut spans = vec![Span::styled(format!("{marker}{}", item.label), focus_style(focused))];
        if let Some(price) = &item.price {
            spans.push(Span::styled(format!("  {price}"), Style::default().fg(Color::Green)));
        }
        lines.push(Line::from(spans));
        if let Some(detail) = &item.detail {
            lines.push(Line::from(Span::styled(format!("    {detail}"), dim)));
        }
    }

    for fact in &content.facts {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", fact.label), dim),
            Span::raw(fact.value.as_str()),
        ]));
    }

    if let Some(footnote) = &content.footnote {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(footnote.as_str(), dim)));
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        control_span(modal, ModalControl::Confirm, "[ Confirm Selection ]"),
        Span::raw("  "),
        control_span(modal, ModalControl::Back, "[ Back ]"),
    ]));
    lines
}

fn control_span(modal: &ModalState, control: ModalControl, text: &'static str) -> Span<'static> {
    Span::styled(text, focus_style(modal.focused() == control))
}

fn control_line(modal: &ModalState, control: ModalControl, text: &'static str) -> Line<'static> {
    Line::from(control_span(modal, control, text)).alignment(Alignment::Right)
}

/// Wake-up overlay while the alarm tone plays.
pub fn render_alarm(frame: &mut Frame, app: &App, area: Rect) {
    if !app.alarm_ringing() {
        return;
    }
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Wake Up Service",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Good Morning, Suite {}", app.guest().room)),
        Line::default(),
        Line::from(Span::styled("Press OK to dismiss", Style::default().fg(Color::DarkGray))),
    ];
    let rect = centered(area, ALARM_WIDTH, ALARM_HEIGHT);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        rect,
    );
}

/// Full-screen welcome splash.
pub fn render_splash(frame: &mut Frame, app: &App, area: Rect) {
    if !app.splash_visible() {
        return;
    }
    let guest = app.guest();
    let mut lines = vec![Line::default(); usize::from(area.height / 3)];
    lines.extend([
        Line::from(Span::styled(
            format!("Welcome, {}", guest.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Suite {}", guest.room)),
        Line::default(),
        Line::from(Span::styled("Press any key to begin", Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
