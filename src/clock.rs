//! Wall-clock access and timestamp formatting.
//!
//! Health timestamps are naive local time, not normalised to UTC.

use chrono::{Local, NaiveDateTime, Timelike};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The system clock, in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Format as ISO-8601 without offset: `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
///
/// The fractional part has microsecond precision and is omitted when zero.
pub fn isoformat(dt: NaiveDateTime) -> String {
    // Leap seconds are carried as nanosecond values >= 1_000_000_000
    let micros = (dt.nanosecond() % 1_000_000_000) / 1_000;
    if micros == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        format!("{}.{:06}", dt.format("%Y-%m-%dT%H:%M:%S"), micros)
    }
}
