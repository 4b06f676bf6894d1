//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: launcher state machine
//! - [`Bridge`]: requests, commands and host events
//! - [`Driver`]: front-end input and rendering
//! - the weather and audio collaborators
//!
//! Event sources are multiplexed with `tokio::select!`: driver input, host
//! events and task results (one queue), the 10 s clock tick and the 30 s
//! alarm tick. Every background task and timer lives in one [`JoinSet`], so
//! shutdown can cancel all of them at once.

use std::{collections::VecDeque, sync::Arc, time::Duration};

use roomlink_client::{Bridge, Subscription};
use roomlink_core::{Environment, Location};
use tokio::{
    sync::mpsc,
    task::JoinSet,
    time::{Interval, MissedTickBehavior, interval},
};

use crate::{
    App, AppAction, AppEvent, Driver,
    action::TimerId,
    bootstrap::bootstrap,
    services::{AudioAlert, WeatherService},
};

/// Period of the header clock refresh.
pub const CLOCK_TICK: Duration = Duration::from_secs(10);

/// Period of the alarm check.
pub const ALARM_TICK: Duration = Duration::from_secs(30);

/// Collaborators the runtime hands work to.
pub struct Collaborators {
    /// Weather lookups.
    pub weather: Arc<dyn WeatherService>,
    /// Alarm tone.
    pub audio: Box<dyn AudioAlert>,
}

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Front-end I/O driver
/// - `E`: Environment for time
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    env: E,
    app: App,
    bridge: Bridge<E>,
    weather: Arc<dyn WeatherService>,
    audio: Box<dyn AudioAlert>,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    tasks: JoinSet<()>,
    subscription: Option<Subscription>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a runtime. `bridge` should already be started.
    pub fn new(driver: D, env: E, bridge: Bridge<E>, app: App, services: Collaborators) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            driver,
            env,
            app,
            bridge,
            weather: services.weather,
            audio: services.audio,
            events_tx,
            events_rx,
            tasks: JoinSet::new(),
            subscription: None,
        }
    }

    /// Run the main event loop until the app asks to quit or the driver
    /// fails. Resources are released either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.run_loop().await;
        self.shutdown();
        result
    }

    async fn run_loop(&mut self) -> Result<(), D::Error> {
        self.start()?;

        let mut clock = ticker(CLOCK_TICK);
        let mut alarm = ticker(ALARM_TICK);

        loop {
            let event = tokio::select! {
                polled = self.driver.poll_event() => match polled? {
                    Some(event) => event,
                    None => continue,
                },
                Some(event) = self.events_rx.recv() => event,
                _ = clock.tick() => AppEvent::ClockTick(self.env.local_time()),
                _ = alarm.tick() => AppEvent::AlarmTick(self.env.local_time()),
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    if let Err(e) = joined
                        && e.is_panic()
                    {
                        tracing::warn!(error = %e, "background task panicked");
                    }
                    continue;
                },
            };

            let event = if let AppEvent::Key(key) = event
                && !self.app.claims_key(key)
                && let Some(fallback) = self.driver.unclaimed_key(key)
            {
                tracing::debug!(?key, "unclaimed key handled by the driver");
                fallback
            } else {
                event
            };

            let actions = self.app.handle(event);
            if self.process_actions(actions)? {
                return Ok(());
            }
        }
    }

    /// Subscribe to host events, spawn the bootstrap sequence and run the
    /// app's start-up actions.
    fn start(&mut self) -> Result<(), D::Error> {
        let host_events = self.events_tx.clone();
        self.subscription = Some(self.bridge.on_event(move |event| {
            let _ = host_events.send(AppEvent::Host(event.clone()));
        }));

        let bridge = self.bridge.clone();
        let env = self.env.clone();
        let events = self.events_tx.clone();
        self.tasks.spawn(async move { bootstrap(&bridge, &env, &events).await });

        tracing::info!("runtime started");
        let actions = self.app.start();
        self.process_actions(actions).map(|_| ())
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if the app asked to quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut queue = VecDeque::from(actions);
        while let Some(action) = queue.pop_front() {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::SendCommand(command) => {
                    if let Err(e) = self.bridge.send_command(command) {
                        tracing::warn!(error = %e, "host command failed");
                    }
                },
                AppAction::LaunchApp(package) => {
                    if let Err(e) = self.bridge.launch_app(package) {
                        tracing::warn!(error = %e, "app launch failed");
                    }
                },
                AppAction::FetchWeather(location) => self.fetch_weather(location),
                AppAction::PlayAlarm => {
                    if !self.audio.is_playing() {
                        self.audio.play();
                    }
                },
                AppAction::StopAlarm => self.audio.stop(),
                AppAction::InitAudio => self.audio.init(),
                AppAction::Schedule { timer, after } => self.schedule(timer, after),
                AppAction::ConfirmSelection { service, item } => {
                    tracing::info!(?service, item = item.as_deref().unwrap_or("-"), "selection confirmed");
                },
            }
        }
        Ok(false)
    }

    fn fetch_weather(&mut self, location: Location) {
        let weather = Arc::clone(&self.weather);
        let events = self.events_tx.clone();
        self.tasks.spawn(async move {
            let snapshot = weather.weather(&location).await;
            let _ = events.send(AppEvent::WeatherLoaded(snapshot));
        });
    }

    fn schedule(&mut self, timer: TimerId, after: Duration) {
        let env = self.env.clone();
        let events = self.events_tx.clone();
        self.tasks.spawn(async move {
            env.sleep(after).await;
            let _ = events.send(AppEvent::Timer(timer));
        });
    }

    /// Detach from the bridge, cancel every task and timer, silence the alarm
    /// and release the front end.
    fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.detach();
        }
        self.bridge.shutdown();
        self.tasks.abort_all();
        self.audio.stop();
        self.driver.stop();
        tracing::info!("runtime stopped");
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }
}

fn ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}
