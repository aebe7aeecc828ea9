//! Clock abstraction and human-facing time labels.
//!
//! # Responsibility
//! - Provide the epoch-millisecond clock consumed by id generation.
//! - Render note timestamps as relative labels for card views.
//!
//! # Invariants
//! - `Clock::now_ms` returns Unix epoch milliseconds.
//! - Label helpers are pure; callers pass `now_ms` explicitly.

use std::time::{SystemTime, UNIX_EPOCH};

const MS_PER_MINUTE: i64 = 60 * 1000;

/// Source of the current time in Unix epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        // A clock set before 1970 reads as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clock frozen at one instant.
///
/// Used by tests and replay tooling that need deterministic ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// Formats `posted_on_ms` relative to `now_ms`.
///
/// Rules:
/// - under one minute: `Just now`
/// - under one hour: `{n} min ago`
/// - under one day: `{n} hour ago`
/// - otherwise: `{n} day ago`
///
/// Timestamps in the future are treated as `Just now`.
pub fn relative_time_label(posted_on_ms: i64, now_ms: i64) -> String {
    let minutes = now_ms.saturating_sub(posted_on_ms).div_euclid(MS_PER_MINUTE);
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} min ago")
    } else if hours < 24 {
        format!("{hours} hour ago")
    } else {
        format!("{days} day ago")
    }
}

/// Part of the day shown in the greeting banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Noon,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    /// Maps a 24h clock hour onto a part of the day.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=4 => Self::Night,
            5..=11 => Self::Morning,
            12..=14 => Self::Noon,
            15..=16 => Self::Afternoon,
            17..=19 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Noon => "Noon",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

/// Builds the `Good {part}` greeting for the given hour.
pub fn greeting(hour: u32) -> String {
    format!("Good {}", DayPart::from_hour(hour).as_str())
}
