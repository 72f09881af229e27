//! Countdown state and readout formatting

use chrono::{DateTime, Duration, FixedOffset, Utc};
use sun_core::SolarError;

/// A countdown from the moment it was armed to a target event
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    start: DateTime<Utc>,
    target: DateTime<FixedOffset>,
}

impl Countdown {
    pub fn new(start: DateTime<Utc>, target: DateTime<FixedOffset>) -> Self {
        Self { start, target }
    }

    pub fn target(&self) -> DateTime<FixedOffset> {
        self.target
    }

    pub fn is_finished(&self, now: DateTime<Utc>) -> bool {
        self.target.with_timezone(&Utc) <= now
    }

    /// Time left until the target, never negative
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let left = self.target.with_timezone(&Utc) - now;
        left.max(Duration::zero())
    }

    /// Fraction of the countdown elapsed, within [0, 1]
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let total = (self.target.with_timezone(&Utc) - self.start).num_milliseconds();
        if total <= 0 {
            return 1.0;
        }
        let elapsed = (now - self.start).num_milliseconds();
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }
}

/// Format remaining time as "1d 2h 3m 02:03:04.500"
///
/// The day/hour/minute prefix only lists non-zero parts.
pub fn format_remaining(remaining: Duration) -> String {
    let total_ms = remaining.num_milliseconds().max(0);
    let milliseconds = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let seconds = total_secs % 60;
    let minutes = (total_secs / 60) % 60;
    let hours = (total_secs / 3600) % 24;
    let days = total_secs / 86_400;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }

    let clock = format!(
        "{:02}:{:02}:{:02}.{:03}",
        hours, minutes, seconds, milliseconds
    );
    if parts.is_empty() {
        clock
    } else {
        format!("{} {}", parts.join(" "), clock)
    }
}

/// Format a UTC offset as "UTC±hh:mm"
pub fn format_utc_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds >= 0 { "+" } else { "-" };
    let abs_minutes = offset_seconds.abs() / 60;
    format!("UTC{}{:02}:{:02}", sign, abs_minutes / 60, abs_minutes % 60)
}

/// User-facing message for a failed calculation
pub fn describe_error(error: SolarError) -> &'static str {
    match error {
        SolarError::SunNeverRises => "Sun never rises on this date/location.",
        SolarError::SunNeverSets => "Sun never sets on this date/location.",
        SolarError::EventNotFoundWithinYear => "Event does not occur within the next year.",
        SolarError::InvalidCoordinate => "Invalid location.",
        SolarError::InvalidDate => "Error calculating sun time.",
    }
}
