//! Angle and calendar helpers used by both solvers

use chrono::{Datelike, NaiveDate};

/// Normalize an angle in degrees into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    wrap(degrees, 360.0)
}

/// Normalize decimal hours into [0, 24)
pub fn normalize_hours(hours: f64) -> f64 {
    wrap(hours, 24.0)
}

/// Wrap an hour angle in degrees into [-180, 180]
pub fn wrap_hour_angle(degrees: f64) -> f64 {
    if degrees < -180.0 {
        degrees + 360.0
    } else if degrees > 180.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Sine of an angle given in degrees
pub fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Cosine of an angle given in degrees
pub fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Tangent of an angle given in degrees
pub fn tan_deg(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

/// Ordinal day within the year (1..=366)
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Split decimal hours into floor-truncated (hour, minute, second).
///
/// Fractions below one second are discarded. Input is expected in [0, 24).
pub fn split_hours(hours: f64) -> (u32, u32, u32) {
    let hour = hours.floor();
    let minutes = (hours - hour) * 60.0;
    let minute = minutes.floor();
    let second = ((minutes - minute) * 60.0).floor();
    (
        (hour as u32).min(23),
        (minute as u32).min(59),
        (second as u32).min(59),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-720.0), 0.0);
        let tiny = normalize_degrees(-1e-17);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_normalize_hours() {
        assert_eq!(normalize_hours(25.5), 1.5);
        assert_eq!(normalize_hours(-1.0), 23.0);
        assert_eq!(normalize_hours(24.0), 0.0);
    }

    #[test]
    fn test_wrap_hour_angle() {
        assert_eq!(wrap_hour_angle(190.0), -170.0);
        assert_eq!(wrap_hour_angle(-190.0), 170.0);
        assert_eq!(wrap_hour_angle(45.0), 45.0);
    }

    #[test]
    fn test_day_of_year() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(day_of_year(d(2024, 1, 1)), 1);
        assert_eq!(day_of_year(d(2024, 3, 1)), 61);
        assert_eq!(day_of_year(d(2023, 3, 1)), 60);
        assert_eq!(day_of_year(d(2024, 12, 31)), 366);
    }

    #[test]
    fn test_split_hours_truncates() {
        assert_eq!(split_hours(4.5), (4, 30, 0));
        // 12:34:56.9 keeps 56 seconds
        let h = 12.0 + 34.0 / 60.0 + 56.9 / 3600.0;
        assert_eq!(split_hours(h), (12, 34, 56));
        assert_eq!(split_hours(23.999_999_999), (23, 59, 59));
    }

    #[test]
    fn test_trig_in_degrees() {
        assert!((sin_deg(30.0) - 0.5).abs() < 1e-12);
        assert!((cos_deg(60.0) - 0.5).abs() < 1e-12);
        assert!((tan_deg(45.0) - 1.0).abs() < 1e-12);
    }
}
