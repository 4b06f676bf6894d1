//! Property-based tests for App state machine.
//!
//! Tests verify that invariants hold under arbitrary key and event sequences.

use proptest::prelude::*;
use roomlink_app::{App, AppAction, AppEvent, KeyInput, LauncherOptions, TimerId};
use roomlink_core::{FOOTER_SLOTS, Row, SERVICES, STREAMING_APPS};
use roomlink_proto::HostEvent;
use serde_json::json;

fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        3 => Just(KeyInput::Up),
        3 => Just(KeyInput::Down),
        3 => Just(KeyInput::Left),
        3 => Just(KeyInput::Right),
        2 => Just(KeyInput::Select),
        2 => Just(KeyInput::Back),
        1 => Just(KeyInput::Home),
        1 => Just(KeyInput::End),
        1 => Just(KeyInput::Char('x')),
    ]
}

/// Generate random app events, mostly keys.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        8 => key_strategy().prop_map(AppEvent::Key),
        1 => (0u64..6).prop_map(|n| AppEvent::Timer(TimerId::ToastExpiry(n))),
        1 => Just(AppEvent::Timer(TimerId::WelcomeFade)),
        1 => Just(AppEvent::Host(HostEvent::new("ui.checkin", json!({ "guestName": "Jane" })))),
        1 => any::<bool>().prop_map(|dnd| AppEvent::State(json!({ "dnd": dnd }))),
    ]
}

fn indices_in_bounds(app: &App) -> bool {
    let focus = app.focus();
    focus.index_of(Row::Services) < SERVICES.len()
        && focus.index_of(Row::Apps) < STREAMING_APPS.len()
        && focus.index_of(Row::Footer) < FOOTER_SLOTS
}

proptest! {
    #[test]
    fn prop_focus_stays_in_bounds(events in prop::collection::vec(event_strategy(), 0..200)) {
        let mut app = App::default();
        for event in events {
            app.handle(event);
            prop_assert!(indices_in_bounds(&app));
        }
    }

    #[test]
    fn prop_modal_and_privacy_never_both_open(
        events in prop::collection::vec(event_strategy(), 0..200),
    ) {
        let mut app = App::default();
        for event in events {
            app.handle(event);
            prop_assert!(!(app.modal().is_some() && app.privacy().is_some()));
        }
    }

    #[test]
    fn prop_toast_id_matches_latest_schedule(
        events in prop::collection::vec(event_strategy(), 0..200),
    ) {
        let mut app = App::new(LauncherOptions { show_splash: false, low_motion: false });
        let mut latest = None;
        for event in events {
            for action in app.handle(event) {
                if let AppAction::Schedule { timer: TimerId::ToastExpiry(n), .. } = action {
                    latest = Some(n);
                }
            }
            if let Some(toast) = app.toast() {
                prop_assert_eq!(Some(toast.id.clone()), latest.map(|n| format!("toast-{n}")));
            }
        }
    }

    #[test]
    fn prop_modal_round_trip_preserves_focus(
        setup in prop::collection::vec(
            prop_oneof![Just(KeyInput::Left), Just(KeyInput::Right)], 0..8),
        inside in prop::collection::vec(key_strategy(), 0..16),
    ) {
        let mut app = App::new(LauncherOptions { show_splash: false, low_motion: false });
        for key in setup {
            app.handle(AppEvent::Key(key));
        }
        let before = *app.focus();
        app.handle(AppEvent::Key(KeyInput::Select));

        if app.modal().is_some() {
            // Stop before anything that would close the modal.
            for key in inside {
                if matches!(key, KeyInput::Select | KeyInput::Back) {
                    break;
                }
                app.handle(AppEvent::Key(key));
            }
            app.handle(AppEvent::Key(KeyInput::Back));
            prop_assert!(app.modal().is_none());
        }
        prop_assert_eq!(*app.focus(), before);
    }
}
