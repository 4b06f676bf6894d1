//! Integration tests for App behavior.
//!
//! Each test drives the launcher purely through events and checks both the
//! actions it asks for and the state it ends up in.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use roomlink_app::{
    App, AppAction, AppEvent, KeyInput, LauncherOptions, TimerId, WelcomeBanner,
};
use roomlink_core::{Location, ModalControl, Row, ServiceId, WeatherSnapshot};
use roomlink_proto::{AppPackage, HostCommand, HostEvent};
use serde_json::json;

use KeyInput::{Back, Down, End, Home, Left, Right, Select, Up};

/// Launcher with the splash already dismissed.
fn ready_app() -> App {
    App::new(LauncherOptions { show_splash: false, low_motion: false })
}

fn press(app: &mut App, keys: &[KeyInput]) -> Vec<AppAction> {
    keys.iter().flat_map(|key| app.handle(AppEvent::Key(*key))).collect()
}

fn host(app: &mut App, method: &str, params: serde_json::Value) -> Vec<AppAction> {
    app.handle(AppEvent::Host(HostEvent::new(method, params)))
}

fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    // 2026-03-02 is a Monday.
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(hour, minute, second).unwrap()
}

fn paris_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temp: 12.0,
        condition: "Light Rain".into(),
        city: "Paris".into(),
        icon: "cloud-rain".into(),
        forecast: vec![],
    }
}

#[test]
fn back_closes_modal_and_restores_exact_focus() {
    let mut app = ready_app();
    press(&mut app, &[Right, Right, Down, Right, Up]);
    let before = *app.focus();
    assert_eq!(before.row(), Row::Services);
    assert_eq!(before.index(), 2);

    press(&mut app, &[Select]);
    assert!(app.modal().is_some());

    // Modal input never reaches the rows underneath.
    press(&mut app, &[Right, Down, Left, Left, Up]);
    assert_eq!(*app.focus(), before);

    press(&mut app, &[Back]);
    assert!(app.modal().is_none());
    assert_eq!(*app.focus(), before);
}

#[test]
fn reopening_modal_resets_its_focus() {
    let mut app = ready_app();
    press(&mut app, &[Right, Right, Select, Right, Right]);
    assert_ne!(app.modal().map(|m| m.focus_index()), Some(0));

    press(&mut app, &[Back, Select]);
    assert_eq!(app.modal().map(|m| m.focused()), Some(ModalControl::Close));
}

#[test]
fn modal_close_button_closes() {
    let mut app = ready_app();
    press(&mut app, &[Right, Right, Right, Select]);
    assert_eq!(app.modal().map(|m| m.content().service), Some(ServiceId::Spa));

    press(&mut app, &[Select]);
    assert!(app.modal().is_none());
}

#[test]
fn confirm_reports_selection_and_closes() {
    let mut app = ready_app();
    press(&mut app, &[Right, Right, Select]);

    let actions = press(&mut app, &[Right, Select]);

    assert_eq!(
        actions,
        vec![
            AppAction::Render,
            AppAction::ConfirmSelection { service: ServiceId::Dining, item: None },
            AppAction::Render,
        ]
    );
    assert!(app.modal().is_none());
}

#[test]
fn concierge_modal_greets_current_guest() {
    let mut app = ready_app();
    host(&mut app, "ui.checkin", json!({ "guestName": "Ravi Patel" }));
    press(&mut app, &[Select]); // dismiss the splash the check-in raised
    press(&mut app, &[Right, Right, Right, Right, Select]);

    let intro = app.modal().and_then(|m| m.content().intro.clone()).unwrap_or_default();
    assert!(intro.contains("Ravi"), "intro was {intro:?}");
}

#[test]
fn app_row_launches_focused_package() {
    let mut app = ready_app();
    let actions = press(&mut app, &[Down, Right, Select]);
    assert_eq!(actions.last(), Some(&AppAction::LaunchApp(AppPackage::YouTube)));
}

#[test]
fn dnd_toggles_and_toasts_new_value() {
    let mut app = ready_app();
    press(&mut app, &[Down, Down]);

    press(&mut app, &[Select]);
    assert!(app.sync().dnd());
    assert_eq!(app.toast().map(|t| t.title.as_str()), Some("Do Not Disturb ON"));
    assert_eq!(app.toast().map(|t| t.icon.as_str()), Some("fa-moon"));

    press(&mut app, &[Select]);
    assert!(!app.sync().dnd());
    assert_eq!(app.toast().map(|t| t.title.as_str()), Some("Do Not Disturb OFF"));
}

#[test]
fn set_alarm_is_a_notification_only() {
    let mut app = ready_app();
    let actions = press(&mut app, &[Down, Down, Right, Select]);
    assert!(!actions.iter().any(|a| matches!(a, AppAction::SendCommand(_))));
    assert_eq!(app.toast().map(|t| t.body.as_str()), Some("Alarm setup is not configured yet."));
}

#[test]
fn checkout_sends_command_and_confirms() {
    let mut app = ready_app();
    press(&mut app, &[Down, Down, Right, Right, Right]);

    let actions = press(&mut app, &[Select]);

    assert_eq!(
        actions,
        vec![
            AppAction::SendCommand(HostCommand::Checkout),
            AppAction::Schedule {
                timer: TimerId::ToastExpiry(1),
                after: Duration::from_millis(2500)
            },
            AppAction::Render,
        ]
    );
    let toast = app.toast().unwrap();
    assert_eq!(toast.id, "toast-1");
    assert_eq!(toast.icon, "fa-arrow-right-from-bracket");
}

#[test]
fn replaced_toast_ignores_stale_expiry() {
    let mut app = ready_app();
    press(&mut app, &[Down, Down, Select, Select]);
    assert_eq!(app.toast().map(|t| t.id.as_str()), Some("toast-2"));

    assert!(app.handle(AppEvent::Timer(TimerId::ToastExpiry(1))).is_empty());
    assert!(app.toast().is_some());

    assert_eq!(app.handle(AppEvent::Timer(TimerId::ToastExpiry(2))), vec![AppAction::Render]);
    assert!(app.toast().is_none());
}

#[test]
fn privacy_menu_wraps_and_sends_selected_command() {
    let mut app = ready_app();
    press(&mut app, &[Down, Down, Right, Right, Select]);
    assert_eq!(app.privacy().map(|r| r.index()), Some(0));

    press(&mut app, &[Down, Down, Up]);
    assert_eq!(app.privacy().map(|r| r.index()), Some(1));

    let actions = press(&mut app, &[Select]);
    assert_eq!(
        actions,
        vec![AppAction::SendCommand(HostCommand::UsageDiagnostics), AppAction::Render]
    );
    assert!(app.privacy().is_none());
    assert_eq!(app.focus().row(), Row::Footer);
    assert_eq!(app.focus().index(), 2);
}

#[test]
fn privacy_menu_home_end_and_back() {
    let mut app = ready_app();
    press(&mut app, &[Down, Down, Right, Right, Select]);

    press(&mut app, &[End]);
    assert_eq!(app.privacy().map(|r| r.index()), Some(1));
    press(&mut app, &[Home]);
    assert_eq!(app.privacy().map(|r| r.index()), Some(0));

    // Horizontal keys are swallowed while the menu is open.
    assert!(press(&mut app, &[Left]).is_empty());
    assert_eq!(app.focus().index(), 2);

    press(&mut app, &[Back]);
    assert!(app.privacy().is_none());
}

#[test]
fn top_level_back_is_a_no_op() {
    let mut app = ready_app();
    press(&mut app, &[Right, Down]);
    let before = *app.focus();
    assert!(press(&mut app, &[Back]).is_empty());
    assert_eq!(*app.focus(), before);
}

#[test]
fn alarm_rings_once_per_minute_and_select_stops_it() {
    let mut app = ready_app();
    app.handle(AppEvent::State(json!({
        "alarms": [{ "id": "wake", "time": "07:00", "label": "Wake up", "enabled": true }]
    })));

    assert_eq!(
        app.handle(AppEvent::AlarmTick(at(7, 0, 10))),
        vec![AppAction::PlayAlarm, AppAction::Render]
    );
    assert!(app.alarm_ringing());
    assert!(app.handle(AppEvent::AlarmTick(at(7, 0, 40))).is_empty());

    assert_eq!(press(&mut app, &[Select]), vec![AppAction::StopAlarm, AppAction::Render]);
    assert!(!app.alarm_ringing());

    // Dismissed within the same minute: no retrigger.
    assert!(app.handle(AppEvent::AlarmTick(at(7, 0, 50))).is_empty());
    assert!(app.handle(AppEvent::AlarmTick(at(7, 1, 20))).is_empty());
}

#[test]
fn alarm_overlay_takes_precedence_over_modal() {
    let mut app = ready_app();
    app.handle(AppEvent::State(json!({
        "alarms": [{ "id": "nap", "time": "15:30", "enabled": true, "repeat": [1] }]
    })));
    press(&mut app, &[Right, Right, Select]);
    app.handle(AppEvent::AlarmTick(at(15, 30, 0)));

    assert!(press(&mut app, &[Right, Down]).is_empty());
    assert_eq!(app.modal().map(|m| m.focus_index()), Some(0));

    press(&mut app, &[Back]);
    assert!(!app.alarm_ringing());
    assert!(app.modal().is_some());
}

#[test]
fn splash_precedes_everything() {
    let mut app = App::new(LauncherOptions::default());
    assert_eq!(press(&mut app, &[Select]), vec![AppAction::InitAudio, AppAction::Render]);
    assert!(app.modal().is_none());
    assert_eq!(app.focus().index(), 0);
}

#[test]
fn checkin_reshows_splash_even_when_unchanged() {
    let mut app = ready_app();
    let actions = host(&mut app, "ui.checkin", json!({ "guest": { "roomNumber": "802" } }));

    assert_eq!(actions, vec![AppAction::Render]);
    assert!(app.splash_visible());

    // Without any guest field nothing happens.
    press(&mut app, &[Select]);
    assert!(host(&mut app, "ui.checkin", json!({ "hello": "world" })).is_empty());
    assert!(!app.splash_visible());
}

#[test]
fn state_changed_event_merges_like_bootstrap() {
    let mut app = ready_app();
    host(&mut app, "state.changed", json!({ "guest": { "name": "Jane Doe" }, "dnd": true }));
    host(&mut app, "state.changed", json!({ "guest": { "roomNumber": "504" } }));

    assert_eq!(app.guest().name, "Jane Doe");
    assert_eq!(app.guest().room, "504");
    assert!(app.sync().dnd());
}

#[test]
fn bootstrap_falls_back_to_default_location() {
    let mut app = ready_app();
    app.handle(AppEvent::Config(json!({ "checkin": { "guestName": "Jane Doe" } })));

    let actions = app.handle(AppEvent::BootstrapComplete);

    assert_eq!(actions, vec![AppAction::FetchWeather(Location::fallback())]);
    assert!(app.bootstrapped());
    assert!(app.weather_pending());
}

#[test]
fn no_fallback_while_location_fetch_outstanding() {
    let mut app = ready_app();
    let actions = app.handle(AppEvent::State(json!({
        "location": { "lat": 48.8566, "lon": 2.3522, "city": "Paris" }
    })));
    assert!(matches!(actions.as_slice(), [AppAction::FetchWeather(l)] if l.city.as_deref() == Some("Paris")));

    assert_eq!(app.handle(AppEvent::BootstrapComplete), vec![AppAction::Render]);

    app.handle(AppEvent::WeatherLoaded(Some(paris_weather())));
    assert_eq!(app.weather().map(|w| w.city.as_str()), Some("Paris"));
    assert!(!app.weather_pending());
}

#[test]
fn no_fallback_when_weather_already_known() {
    let mut app = ready_app();
    app.handle(AppEvent::CachedState(json!({
        "weather": { "temp": 21.5, "condition": "Sunny", "city": "Lisbon" }
    })));
    assert_eq!(app.handle(AppEvent::BootstrapComplete), vec![AppAction::Render]);
    assert_eq!(app.weather().map(|w| w.city.as_str()), Some("Lisbon"));
}

#[test]
fn failed_weather_lookup_keeps_last_snapshot() {
    let mut app = ready_app();
    app.handle(AppEvent::WeatherLoaded(Some(paris_weather())));
    host(&mut app, "location.update", json!({ "lat": 1.0, "lon": 2.0 }));

    assert!(app.handle(AppEvent::WeatherLoaded(None)).is_empty());
    assert_eq!(app.weather(), Some(&paris_weather()));
}

#[test]
fn welcome_banner_fades_then_hides_on_timers() {
    let mut app = ready_app();
    assert_eq!(app.welcome(), WelcomeBanner::Visible);

    app.handle(AppEvent::Timer(TimerId::WelcomeFade));
    assert_eq!(app.welcome(), WelcomeBanner::Fading);

    app.handle(AppEvent::Timer(TimerId::WelcomeHide));
    assert_eq!(app.welcome(), WelcomeBanner::Hidden);
}

#[test]
fn clock_tick_updates_time() {
    let mut app = ready_app();
    assert_eq!(app.handle(AppEvent::ClockTick(at(9, 15, 0))), vec![AppAction::Render]);
    assert_eq!(app.now(), Some(at(9, 15, 0)));
}

#[test]
fn quit_event_quits() {
    let mut app = ready_app();
    assert_eq!(app.handle(AppEvent::Quit), vec![AppAction::Quit]);
}
