//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns every piece of
//! launcher state and decides what each input means, completely decoupled
//! from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Key routing
//!
//! A key goes to the first layer that is active, and only to that layer:
//!
//! 1. the welcome splash (any key dismisses it),
//! 2. the alarm overlay (Select or Back dismisses it),
//! 3. an open modal (its own focus ring),
//! 4. the privacy menu (its own focus ring),
//! 5. the three top-level rows.

use chrono::NaiveDateTime;
use roomlink_core::{
    AlarmClock, Direction, FocusRing, FocusState, FooterAction, GuestState, Location,
    ModalContent, ModalOutcome, ModalState, Row, RowSizes, SERVICES, STREAMING_APPS, ServiceId,
    StateSync, SyncOutcome, ToastEntry, WeatherSnapshot, sync::parse_location,
};
use roomlink_proto::{AppPackage, HostCommand, HostEvent, method::EventKind};
use serde_json::Value;

use crate::{
    AppAction, AppEvent, KeyInput,
    action::TimerId,
    state::{LauncherOptions, PRIVACY_ENTRIES, WELCOME_FADE_FOR, WELCOME_VISIBLE_FOR, WelcomeBanner},
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a host or a terminal.
#[derive(Debug, Clone)]
pub struct App {
    /// Top-level row focus. Never touched while a modal is open.
    focus: FocusState,
    /// Row lengths used for clamping.
    sizes: RowSizes,
    /// Guest, weather, DND and alarms.
    sync: StateSync,
    /// Open service modal.
    modal: Option<ModalState>,
    /// Open privacy menu.
    privacy: Option<FocusRing>,
    /// Welcome splash overlay.
    splash_visible: bool,
    /// Alarm overlay; shown while the tone plays.
    alarm_ringing: bool,
    /// Once-per-minute alarm dedup.
    alarm_clock: AlarmClock,
    /// Welcome banner lifecycle.
    welcome: WelcomeBanner,
    /// The single toast slot.
    toast: Option<ToastEntry>,
    /// Sequence number of the most recent toast.
    toast_seq: u64,
    /// A weather lookup is in flight.
    weather_pending: bool,
    /// Bootstrap sequence finished.
    bootstrapped: bool,
    /// Last clock tick.
    now: Option<NaiveDateTime>,
    /// Reduced-motion rendering.
    low_motion: bool,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl Default for App {
    fn default() -> Self {
        Self::new(LauncherOptions::default())
    }
}

impl App {
    /// Create the launcher in its initial state: first service card focused,
    /// default guest, no weather.
    pub fn new(options: LauncherOptions) -> Self {
        Self {
            focus: FocusState::new(),
            sizes: RowSizes::default(),
            sync: StateSync::new(),
            modal: None,
            privacy: None,
            splash_visible: options.show_splash,
            alarm_ringing: false,
            alarm_clock: AlarmClock::new(),
            welcome: WelcomeBanner::Visible,
            toast: None,
            toast_seq: 0,
            weather_pending: false,
            bootstrapped: false,
            now: None,
            low_motion: options.low_motion,
            terminal_size: (80, 24),
        }
    }

    /// Actions to run once when the launcher is shown.
    pub fn start(&self) -> Vec<AppAction> {
        vec![
            AppAction::Schedule { timer: TimerId::WelcomeFade, after: WELCOME_VISIBLE_FOR },
            AppAction::Render,
        ]
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::ClockTick(now) => {
                self.now = Some(now);
                vec![AppAction::Render]
            },
            AppEvent::AlarmTick(now) => self.check_alarms(now),
            AppEvent::Host(event) => self.handle_host_event(&event),
            AppEvent::CachedState(state) | AppEvent::State(state) => {
                let outcome = self.sync.apply_state(&state);
                self.apply_outcome(outcome)
            },
            AppEvent::Config(config) => {
                let outcome = self.sync.apply_config(&config);
                self.apply_outcome(outcome)
            },
            AppEvent::BootstrapComplete => {
                self.bootstrapped = true;
                tracing::info!(guest = %self.sync.guest().name, "bootstrap complete");
                if !self.sync.has_weather() && !self.weather_pending {
                    return self.request_weather(Location::fallback());
                }
                vec![AppAction::Render]
            },
            AppEvent::WeatherLoaded(snapshot) => {
                self.weather_pending = false;
                match snapshot {
                    Some(snapshot) if self.sync.set_weather(snapshot.clone()) => vec![AppAction::Render],
                    _ => vec![],
                }
            },
            AppEvent::Timer(timer) => self.handle_timer(timer),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Quit => vec![AppAction::Quit],
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if self.splash_visible {
            self.splash_visible = false;
            return vec![AppAction::InitAudio, AppAction::Render];
        }

        if self.alarm_ringing {
            return match key {
                KeyInput::Select | KeyInput::Back => {
                    self.alarm_ringing = false;
                    vec![AppAction::StopAlarm, AppAction::Render]
                },
                _ => vec![],
            };
        }

        if let Some(modal) = self.modal.as_mut() {
            return match key {
                KeyInput::Back => self.close_modal(),
                KeyInput::Select => match modal.activate() {
                    ModalOutcome::Close => self.close_modal(),
                    ModalOutcome::Selected(_) => vec![AppAction::Render],
                    ModalOutcome::Confirmed { service, item } => {
                        let mut actions = vec![AppAction::ConfirmSelection { service, item }];
                        actions.extend(self.close_modal());
                        actions
                    },
                },
                _ => match key.direction() {
                    Some(direction) => {
                        modal.navigate(direction);
                        vec![AppAction::Render]
                    },
                    None => vec![],
                },
            };
        }

        if let Some(ring) = self.privacy.as_mut() {
            match key {
                KeyInput::Up => ring.previous(),
                KeyInput::Down => ring.next(),
                KeyInput::Home => ring.first(),
                KeyInput::End => ring.last(),
                KeyInput::Select => {
                    let entry = PRIVACY_ENTRIES.get(ring.index()).copied();
                    self.privacy = None;
                    let mut actions: Vec<AppAction> =
                        entry.map(|e| AppAction::SendCommand(e.command)).into_iter().collect();
                    actions.push(AppAction::Render);
                    return actions;
                },
                KeyInput::Back => self.privacy = None,
                _ => return vec![],
            }
            return vec![AppAction::Render];
        }

        match key {
            KeyInput::Select => self.activate(),
            // Top-level rows have no parent to return to.
            KeyInput::Back => vec![],
            _ => match key.direction() {
                Some(direction) => self.navigate(direction),
                None => vec![],
            },
        }
    }

    /// Whether the active layer acts on `key`, so the front end must not
    /// also apply its own default behavior.
    ///
    /// The splash claims every key. The rows claim arrows and Select. An
    /// open modal also claims Back, as does the privacy menu, which adds
    /// Home and End.
    pub fn claims_key(&self, key: KeyInput) -> bool {
        if self.splash_visible {
            return true;
        }
        if self.alarm_ringing {
            return matches!(key, KeyInput::Select | KeyInput::Back);
        }
        if self.modal.is_some() {
            return key == KeyInput::Back || key.claims_default();
        }
        if self.privacy.is_some() {
            return matches!(key, KeyInput::Back | KeyInput::Home | KeyInput::End)
                || key.claims_default();
        }
        key.claims_default()
    }

    fn navigate(&mut self, direction: Direction) -> Vec<AppAction> {
        let step = self.focus.navigate(direction, &self.sizes);
        let mut actions = Vec::new();
        if step.interacted && self.welcome == WelcomeBanner::Visible {
            actions.extend(self.start_welcome_fade());
        } else if step.changed {
            actions.push(AppAction::Render);
        }
        actions
    }

    /// Confirm input on the top-level rows.
    fn activate(&mut self) -> Vec<AppAction> {
        let index = self.focus.index();
        match self.focus.row() {
            Row::Services => match SERVICES.get(index) {
                Some(service) if service.id == ServiceId::Cast => {
                    vec![AppAction::SendCommand(HostCommand::Cast)]
                },
                Some(service) if service.id == ServiceId::Tv => {
                    vec![AppAction::LaunchApp(AppPackage::LiveTv)]
                },
                Some(service) => {
                    let content = ModalContent::for_service(service, self.sync.guest());
                    tracing::debug!(service = ?service.id, "opening modal");
                    self.modal = Some(ModalState::open(content));
                    vec![AppAction::Render]
                },
                None => vec![],
            },
            Row::Apps => STREAMING_APPS
                .get(index)
                .map(|app| vec![AppAction::LaunchApp(app.package)])
                .unwrap_or_default(),
            Row::Footer => match FooterAction::from_index(index) {
                Some(FooterAction::DoNotDisturb) => {
                    let dnd = self.sync.toggle_dnd();
                    let toast = if dnd {
                        ("Do Not Disturb ON", "You will not be disturbed during your rest")
                    } else {
                        ("Do Not Disturb OFF", "Normal service has been resumed")
                    };
                    self.show_toast(|id| ToastEntry::new(id, toast.0, toast.1).with_icon("fa-moon"))
                },
                Some(FooterAction::SetAlarm) => self.show_toast(|id| {
                    ToastEntry::new(id, "Set Alarm", "Alarm setup is not configured yet.")
                        .with_icon("fa-bell")
                }),
                Some(FooterAction::Privacy) => {
                    self.privacy = Some(FocusRing::new(PRIVACY_ENTRIES.len()));
                    vec![AppAction::Render]
                },
                Some(FooterAction::Checkout) => {
                    let mut actions = vec![AppAction::SendCommand(HostCommand::Checkout)];
                    actions.extend(self.show_toast(|id| {
                        ToastEntry::new(id, "Check Out", "Processing your checkout request...")
                            .with_icon("fa-arrow-right-from-bracket")
                            .with_duration(std::time::Duration::from_millis(2500))
                    }));
                    actions
                },
                None => vec![],
            },
        }
    }

    fn close_modal(&mut self) -> Vec<AppAction> {
        self.modal = None;
        vec![AppAction::Render]
    }

    fn handle_host_event(&mut self, event: &HostEvent) -> Vec<AppAction> {
        match event.kind() {
            Some(EventKind::StateChanged) => {
                let outcome = self.sync.apply_state(&event.params);
                self.apply_outcome(outcome)
            },
            Some(EventKind::CheckIn) => {
                if self.sync.apply_checkin(&event.params) {
                    tracing::info!(room = %self.sync.guest().room, "guest checked in");
                    self.splash_visible = true;
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            Some(EventKind::LocationUpdate) => {
                parse_location(&event.params).map(|l| self.request_weather(l)).unwrap_or_default()
            },
            Some(EventKind::Toast) => {
                let title = text_or(&event.params, "title", "Notification");
                let body = text_or(&event.params, "text", "");
                self.show_toast(|id| ToastEntry::new(id, title, body))
            },
            None => {
                tracing::debug!(method = %event.method, "ignoring unrecognized host event");
                vec![]
            },
        }
    }

    fn apply_outcome(&mut self, outcome: SyncOutcome) -> Vec<AppAction> {
        let mut actions = Vec::new();
        if outcome.changed {
            actions.push(AppAction::Render);
        }
        if let Some(location) = outcome.weather_request {
            actions.extend(self.request_weather(location));
        }
        actions
    }

    fn request_weather(&mut self, location: Location) -> Vec<AppAction> {
        self.weather_pending = true;
        vec![AppAction::FetchWeather(location)]
    }

    fn check_alarms(&mut self, now: NaiveDateTime) -> Vec<AppAction> {
        self.now = Some(now);
        let due = self.alarm_clock.poll(self.sync.alarms(), now);
        if due.is_empty() || self.alarm_ringing {
            return vec![];
        }
        tracing::info!(alarms = ?due, "alarm due");
        self.alarm_ringing = true;
        vec![AppAction::PlayAlarm, AppAction::Render]
    }

    fn handle_timer(&mut self, timer: TimerId) -> Vec<AppAction> {
        match timer {
            TimerId::ToastExpiry(seq) => {
                if seq == self.toast_seq && self.toast.take().is_some() {
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            TimerId::WelcomeFade if self.welcome == WelcomeBanner::Visible => {
                self.start_welcome_fade()
            },
            TimerId::WelcomeHide if self.welcome == WelcomeBanner::Fading => {
                self.welcome = WelcomeBanner::Hidden;
                vec![AppAction::Render]
            },
            TimerId::WelcomeFade | TimerId::WelcomeHide => vec![],
        }
    }

    fn start_welcome_fade(&mut self) -> Vec<AppAction> {
        self.welcome = WelcomeBanner::Fading;
        vec![
            AppAction::Schedule { timer: TimerId::WelcomeHide, after: WELCOME_FADE_FOR },
            AppAction::Render,
        ]
    }

    /// Put a toast in the single slot, replacing any current one.
    fn show_toast(&mut self, build: impl FnOnce(String) -> ToastEntry) -> Vec<AppAction> {
        self.toast_seq += 1;
        let toast = build(format!("toast-{}", self.toast_seq));
        let after = toast.duration;
        self.toast = Some(toast);
        vec![
            AppAction::Schedule { timer: TimerId::ToastExpiry(self.toast_seq), after },
            AppAction::Render,
        ]
    }

    /// Top-level focus.
    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    /// Guest, weather, DND and alarms.
    pub fn sync(&self) -> &StateSync {
        &self.sync
    }

    /// Current guest.
    pub fn guest(&self) -> &GuestState {
        self.sync.guest()
    }

    /// Current weather.
    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.sync.weather()
    }

    /// Open service modal.
    pub fn modal(&self) -> Option<&ModalState> {
        self.modal.as_ref()
    }

    /// Privacy menu ring, when open.
    pub fn privacy(&self) -> Option<&FocusRing> {
        self.privacy.as_ref()
    }

    /// Whether the welcome splash is showing.
    pub fn splash_visible(&self) -> bool {
        self.splash_visible
    }

    /// Whether the alarm overlay is showing.
    pub fn alarm_ringing(&self) -> bool {
        self.alarm_ringing
    }

    /// Welcome banner state.
    pub fn welcome(&self) -> WelcomeBanner {
        self.welcome
    }

    /// Visible toast.
    pub fn toast(&self) -> Option<&ToastEntry> {
        self.toast.as_ref()
    }

    /// Whether a weather lookup is in flight.
    pub fn weather_pending(&self) -> bool {
        self.weather_pending
    }

    /// Whether bootstrap has finished.
    pub fn bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// Local time at the last clock tick.
    pub fn now(&self) -> Option<NaiveDateTime> {
        self.now
    }

    /// Whether to render without animation.
    pub fn low_motion(&self) -> bool {
        self.low_motion
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}

/// A string member of `params`, or `default` when absent or not a string.
fn text_or(params: &Value, key: &str, default: &str) -> String {
    params.get(key).and_then(Value::as_str).unwrap_or(default).to_owned()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ready_app() -> App {
        App::new(LauncherOptions { show_splash: false, low_motion: false })
    }

    fn press(app: &mut App, keys: &[KeyInput]) -> Vec<AppAction> {
        keys.iter().flat_map(|k| app.handle(AppEvent::Key(*k))).collect()
    }

    #[test]
    fn start_schedules_welcome_fade() {
        assert_eq!(
            ready_app().start(),
            vec![
                AppAction::Schedule { timer: TimerId::WelcomeFade, after: WELCOME_VISIBLE_FOR },
                AppAction::Render,
            ]
        );
    }

    #[test]
    fn splash_swallows_first_key() {
        let mut app = App::default();
        assert!(app.splash_visible());

        let actions = press(&mut app, &[KeyInput::Right]);
        assert_eq!(actions, vec![AppAction::InitAudio, AppAction::Render]);
        assert_eq!(app.focus().index(), 0);
        assert!(!app.splash_visible());
    }

    #[test]
    fn key_claims_follow_the_active_layer() {
        let mut app = App::default();
        assert!(app.claims_key(KeyInput::Char('q')));
        press(&mut app, &[KeyInput::Select]);

        assert!(app.claims_key(KeyInput::Down));
        assert!(app.claims_key(KeyInput::Select));
        assert!(!app.claims_key(KeyInput::Back));
        assert!(!app.claims_key(KeyInput::Char('q')));

        press(&mut app, &[KeyInput::Right, KeyInput::Right, KeyInput::Select]);
        assert!(app.modal().is_some());
        assert!(app.claims_key(KeyInput::Back));
        assert!(!app.claims_key(KeyInput::Home));

        press(&mut app, &[KeyInput::Back, KeyInput::Down, KeyInput::Down]);
        press(&mut app, &[KeyInput::Right, KeyInput::Right, KeyInput::Select]);
        assert!(app.privacy().is_some());
        assert!(app.claims_key(KeyInput::End));
        assert!(!app.claims_key(KeyInput::Char('q')));
    }

    #[test]
    fn cast_and_tv_cards_talk_to_host() {
        let mut app = ready_app();
        assert_eq!(
            press(&mut app, &[KeyInput::Select]),
            vec![AppAction::LaunchApp(AppPackage::LiveTv)]
        );

        press(&mut app, &[KeyInput::Right]);
        assert_eq!(
            press(&mut app, &[KeyInput::Select]),
            vec![AppAction::SendCommand(HostCommand::Cast)]
        );
        assert!(app.modal().is_none());
    }

    #[test]
    fn first_right_starts_banner_fade() {
        let mut app = ready_app();
        let actions = press(&mut app, &[KeyInput::Right]);
        assert_eq!(app.welcome(), WelcomeBanner::Fading);
        assert!(actions.contains(&AppAction::Schedule {
            timer: TimerId::WelcomeHide,
            after: WELCOME_FADE_FOR
        }));

        // Later rights don't reschedule.
        let actions = press(&mut app, &[KeyInput::Right]);
        assert_eq!(actions, vec![AppAction::Render]);
    }

    #[test]
    fn stale_welcome_timers_are_ignored() {
        let mut app = ready_app();
        press(&mut app, &[KeyInput::Right]);
        assert!(app.handle(AppEvent::Timer(TimerId::WelcomeFade)).is_empty());
        app.handle(AppEvent::Timer(TimerId::WelcomeHide));
        assert_eq!(app.welcome(), WelcomeBanner::Hidden);
        assert!(app.handle(AppEvent::Timer(TimerId::WelcomeHide)).is_empty());
    }

    #[test]
    fn unknown_host_events_are_ignored() {
        let mut app = ready_app();
        let event = HostEvent::new("ui.unknown", json!({}));
        assert!(app.handle(AppEvent::Host(event)).is_empty());
    }

    #[test]
    fn ui_toast_defaults_title() {
        let mut app = ready_app();
        app.handle(AppEvent::Host(HostEvent::new("ui.toast", json!({ "text": "Towels" }))));
        let toast = app.toast().map(|t| (t.title.as_str(), t.body.as_str()));
        assert_eq!(toast, Some(("Notification", "Towels")));
    }
}
