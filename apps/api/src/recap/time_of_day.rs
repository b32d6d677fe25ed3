//! Time-of-day classification from the game's local tip-off timestamp.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }

    fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            TimeOfDay::Morning
        } else if hour < 17 {
            TimeOfDay::Afternoon
        } else {
            TimeOfDay::Evening
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Classifies an ISO-8601 timestamp by the local hour written in it.
///
/// The embedded offset is never applied: `19:30-05:00` is an evening game.
/// Anything that cannot be parsed is treated as an evening game. The input is
/// not trimmed first, so trailing whitespace makes a timestamp unparseable.
pub fn classify(timestamp: &str) -> TimeOfDay {
    local_hour(timestamp)
        .map(TimeOfDay::from_hour)
        .unwrap_or(TimeOfDay::Evening)
}

fn local_hour(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }

    // RFC 3339 covers both `Z` and `+hh:mm`; the second form also takes `+hhmm`.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.hour());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.hour());
        }
    }

    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.hour());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(|_| 0)
}
