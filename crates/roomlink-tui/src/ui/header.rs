//! Header
//!
//! Welcome banner and guest on the left; clock, date and weather on the
//! right.

use chrono::NaiveDateTime;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use roomlink_app::{App, WelcomeBanner};
use roomlink_core::WeatherSnapshot;

/// Render the header.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let [left, right] = chunks.as_ref() else {
        return;
    };

    let guest = app.guest();
    let banner_style = match (app.welcome(), app.low_motion()) {
        (WelcomeBanner::Visible, _) => Some(Style::default().add_modifier(Modifier::BOLD)),
        (WelcomeBanner::Fading, false) => Some(Style::default().add_modifier(Modifier::DIM)),
        _ => None,
    };
    let banner = banner_style.map_or_else(Line::default, |style| {
        Line::from(Span::styled(format!(" Welcome, {}", guest.first_name()), style))
    });

    let guest_line = Line::from(Span::styled(
        format!(" Suite {} | {} Member", guest.room, guest.tier),
        Style::default().fg(Color::Cyan),
    ));
    frame.render_widget(Paragraph::new(vec![Line::default(), banner, guest_line]), *left);

    let clock = Line::from(Span::styled(
        clock_text(app.now()),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let date = Line::from(Span::styled(date_text(app.now()), Style::default().fg(Color::DarkGray)));
    let weather = Line::from(weather_text(app.weather()));
    frame.render_widget(
        Paragraph::new(vec![Line::default(), clock, date, weather]).alignment(Alignment::Right),
        *right,
    );
}

/// `HH:MM`, or dashes before the first clock tick.
pub fn clock_text(now: Option<NaiveDateTime>) -> String {
    now.map_or_else(|| "--:--".to_owned(), |now| now.format("%H:%M").to_string())
}

/// Weekday, month and day, e.g. `Monday, March 2`.
pub fn date_text(now: Option<NaiveDateTime>) -> String {
    now.map(|now| now.format("%A, %B %-d").to_string()).unwrap_or_default()
}

/// Temperature, condition and city on one line.
pub fn weather_text(weather: Option<&WeatherSnapshot>) -> String {
    weather.map_or_else(
        || "Loading weather...".to_owned(),
        |w| format!("{:.0}° {} | {}", w.temp, w.condition, w.city),
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn clock_and_date() {
        let now = NaiveDate::from_ymd_opt(2026, 3, 2).and_then(|d| d.and_hms_opt(7, 5, 0));
        insta::assert_snapshot!(clock_text(now), @"07:05");
        insta::assert_snapshot!(date_text(now), @"Monday, March 2");
        insta::assert_snapshot!(clock_text(None), @"--:--");
    }

    #[test]
    fn weather_line() {
        let snapshot = WeatherSnapshot {
            temp: 17.6,
            condition: "Partly Cloudy".into(),
            city: "San Francisco".into(),
            icon: "cloud-sun".into(),
            forecast: vec![],
        };
        insta::assert_snapshot!(weather_text(Some(&snapshot)), @"18° Partly Cloudy | San Francisco");
        insta::assert_snapshot!(weather_text(None), @"Loading weather...");
    }
}
