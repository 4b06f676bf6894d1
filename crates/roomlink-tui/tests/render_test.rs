//! Rendering tests against ratatui's in-memory backend.

use chrono::NaiveDate;
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use roomlink_app::{LauncherOptions, TimerId};
use roomlink_proto::HostEvent;
use roomlink_tui::{App, AppEvent, KeyInput, ui};
use serde_json::json;

const WIDTH: u16 = 120;
const HEIGHT: u16 = 32;

fn draw(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn ready_app() -> App {
    App::new(LauncherOptions { show_splash: false, low_motion: false })
}

fn press(app: &mut App, keys: &[KeyInput]) {
    for key in keys {
        app.handle(AppEvent::Key(*key));
    }
}

#[test]
fn launcher_screen_shows_rows_and_guest() {
    let mut app = ready_app();
    let now = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(9, 41, 0).unwrap();
    app.handle(AppEvent::ClockTick(now));

    let screen = draw(&app);
    assert!(screen.contains("Welcome, Alexander"));
    assert!(screen.contains("Suite 802 | Gold Member"));
    assert!(screen.contains("09:41"));
    assert!(screen.contains("Monday, March 2"));
    assert!(screen.contains("Loading weather..."));
    for label in ["Live TV", "Hotel Info", "Netflix", "Prime Video", "Check Out"] {
        assert!(screen.contains(label), "missing {label}");
    }
    assert!(screen.contains("Do Not Disturb: Off"));
}

#[test]
fn splash_covers_the_screen() {
    let app = App::new(LauncherOptions { show_splash: true, low_motion: false });
    let screen = draw(&app);
    assert!(screen.contains("Welcome, Alexander Henderson"));
    assert!(screen.contains("Press any key to begin"));
    assert!(!screen.contains("Netflix"));
}

#[test]
fn hidden_banner_is_not_drawn() {
    let mut app = ready_app();
    press(&mut app, &[KeyInput::Right]);
    app.handle(AppEvent::Timer(TimerId::WelcomeHide));
    assert!(!draw(&app).contains("Welcome, Alexander"));
}

#[test]
fn low_motion_skips_the_fade() {
    let mut app = App::new(LauncherOptions { show_splash: false, low_motion: true });
    press(&mut app, &[KeyInput::Right]);
    assert!(!draw(&app).contains("Welcome, Alexander"));
}

#[test]
fn toast_and_dnd_state() {
    let mut app = ready_app();
    press(&mut app, &[KeyInput::Down, KeyInput::Down, KeyInput::Select]);

    let screen = draw(&app);
    assert!(screen.contains("Do Not Disturb ON"));
    assert!(screen.contains("Do Not Disturb: On"));
}

#[test]
fn modal_overlay_for_dining() {
    let mut app = ready_app();
    press(&mut app, &[KeyInput::Right, KeyInput::Right, KeyInput::Select]);

    let screen = draw(&app);
    assert!(screen.contains("Signature Dining"));
    assert!(screen.contains("Lobster Risotto"));
    assert!(screen.contains("$52"));
    assert!(screen.contains("[ Close ]"));
    assert!(screen.contains("[ Confirm Selection ]"));
}

#[test]
fn privacy_menu_marks_focus() {
    let mut app = ready_app();
    press(&mut app, &[KeyInput::Down, KeyInput::Down, KeyInput::Right, KeyInput::Right]);
    press(&mut app, &[KeyInput::Select, KeyInput::Down]);

    let screen = draw(&app);
    assert!(screen.contains("  Terms of Service"));
    assert!(screen.contains("> Usage & Diagnostics"));
}

#[test]
fn alarm_overlay_names_the_room() {
    let mut app = ready_app();
    app.handle(AppEvent::Host(HostEvent::new("ui.checkin", json!({ "roomNumber": "1204" }))));
    press(&mut app, &[KeyInput::Select]);
    app.handle(AppEvent::State(json!({
        "alarms": [{ "id": "a", "time": "06:30", "enabled": true }]
    })));
    let now = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(6, 30, 0).unwrap();
    app.handle(AppEvent::AlarmTick(now));

    let screen = draw(&app);
    assert!(screen.contains("Wake Up Service"));
    assert!(screen.contains("Good Morning, Suite 1204"));
}

#[test]
fn weather_line_after_load() {
    let mut app = ready_app();
    app.handle(AppEvent::State(json!({
        "weather": { "temp": 9.0, "condition": "Light Rain", "city": "London" }
    })));
    assert!(draw(&app).contains("9° Light Rain | London"));
}
