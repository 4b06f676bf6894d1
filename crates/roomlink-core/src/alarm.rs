//! Wake-up alarm matching.
//!
//! The runtime polls every 30 seconds, so a matching minute is usually seen
//! twice. [`AlarmClock`] remembers which alarms already fired in the current
//! minute and reports each one at most once per minute, so a guest who
//! dismissed the tone is not woken again by the second poll.

use std::{collections::HashMap, fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use thiserror::Error;

use crate::state::AlarmEntry;

/// Invalid alarm time text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlarmTimeError {
    /// Not of the form `HH:MM`.
    #[error("alarm time {0:?} is not HH:MM")]
    Format(String),

    /// Hour above 23 or minute above 59.
    #[error("alarm time {0:?} is out of range")]
    OutOfRange(String),
}

/// A local time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlarmTime {
    hour: u32,
    minute: u32,
}

impl AlarmTime {
    /// The minute containing `time`.
    pub fn of(time: NaiveDateTime) -> Self {
        Self { hour: time.hour(), minute: time.minute() }
    }

    /// Hour, 0 to 23.
    pub fn hour(self) -> u32 {
        self.hour
    }

    /// Minute, 0 to 59.
    pub fn minute(self) -> u32 {
        self.minute
    }
}

impl FromStr for AlarmTime {
    type Err = AlarmTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = || AlarmTimeError::Format(s.to_owned());
        let (h, m) = s.split_once(':').ok_or_else(format)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(format());
        }
        let hour: u32 = h.parse().map_err(|_| format())?;
        let minute: u32 = m.parse().map_err(|_| format())?;
        if hour > 23 || minute > 59 {
            return Err(AlarmTimeError::OutOfRange(s.to_owned()));
        }
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Whether `alarm` should ring at `now`, ignoring once-per-minute dedup.
pub fn is_due(alarm: &AlarmEntry, now: NaiveDateTime) -> bool {
    if !alarm.enabled {
        return false;
    }
    let Ok(time) = alarm.time.parse::<AlarmTime>() else {
        return false;
    };
    let weekday = now.weekday().num_days_from_sunday() as u8;
    time == AlarmTime::of(now) && (alarm.repeat.is_empty() || alarm.repeat.contains(&weekday))
}

type MinuteKey = (NaiveDate, u32, u32);

/// Fires each due alarm once per minute.
#[derive(Debug, Clone, Default)]
pub struct AlarmClock {
    fired: HashMap<String, MinuteKey>,
}

impl AlarmClock {
    /// No alarm has fired yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of alarms that fire at this poll.
    ///
    /// An alarm reported once is not reported again until the minute changes.
    pub fn poll(&mut self, alarms: &[AlarmEntry], now: NaiveDateTime) -> Vec<String> {
        let minute: MinuteKey = (now.date(), now.hour(), now.minute());
        self.fired.retain(|_, fired_at| *fired_at == minute);

        let mut due = Vec::new();
        for alarm in alarms.iter().filter(|a| is_due(a, now)) {
            if self.fired.insert(alarm.id.clone(), minute).is_none() {
                due.push(alarm.id.clone());
            }
        }
        due
    }
}
