//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into the frame.
//!
//! The launcher screen is drawn first; the toast, privacy menu, modal, alarm
//! overlay and splash are layered on top in that order.

mod footer;
mod header;
mod overlay;
mod rows;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
};
use roomlink_app::App;

pub use header::{clock_text, date_text, weather_text};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const HEADER_HEIGHT: u16 = 4;
    const ROW_HEIGHT: u16 = 5;
    const FOOTER_HEIGHT: u16 = 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(ROW_HEIGHT),
            Constraint::Length(ROW_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, services_area, apps_area, _, footer_area] = chunks.as_ref() else {
        return;
    };

    header::render(frame, app, *header_area);
    rows::render_services(frame, app, *services_area);
    rows::render_apps(frame, app, *apps_area);
    footer::render(frame, app, *footer_area);

    let area = frame.area();
    overlay::render_toast(frame, app, area);
    overlay::render_privacy(frame, app, area);
    overlay::render_modal(frame, app, area);
    overlay::render_alarm(frame, app, area);
    overlay::render_splash(frame, app, area);
}

/// A `width` x `height` rectangle centred in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Border and text style of a focusable element.
fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}
