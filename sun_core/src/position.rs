//! Solar position solver
//!
//! Altitude and azimuth of the sun at an instant, using the NOAA fractional
//! year approximation of the equation of time and declination. Every call is
//! a fixed amount of trigonometry, so sweeping a whole year at minute
//! resolution is fine without caching.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::error::SolarError;
use crate::math::{normalize_degrees, wrap_hour_angle};
use crate::types::{GeoCoordinate, SolarPosition};

/// Sun altitude and azimuth at `instant` as seen from `location`.
///
/// The instant may carry any time zone; the calculation works from its UTC
/// reading. Altitude is negative while the sun is below the horizon.
///
/// # Errors
///
/// [`SolarError::InvalidDate`] if the computation does not produce finite
/// angles.
pub fn solve_position<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: GeoCoordinate,
) -> Result<SolarPosition, SolarError> {
    let utc = instant.with_timezone(&Utc);
    let (zenith, azimuth) = zenith_and_azimuth(&utc, location);

    let altitude = 90.0 - zenith;
    if !altitude.is_finite() || !azimuth.is_finite() {
        return Err(SolarError::InvalidDate);
    }

    Ok(SolarPosition {
        instant: utc,
        altitude_degrees: altitude,
        azimuth_degrees: azimuth,
    })
}

/// Like [`solve_position`], but only for instants when the sun is up.
///
/// # Errors
///
/// [`SolarError::SunNeverRises`] when the zenith angle is 90° or more.
pub fn solve_position_above_horizon<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: GeoCoordinate,
) -> Result<SolarPosition, SolarError> {
    let position = solve_position(instant, location)?;
    if position.altitude_degrees <= 0.0 {
        return Err(SolarError::SunNeverRises);
    }
    Ok(position)
}

/// Zenith and azimuth in degrees
fn zenith_and_azimuth(utc: &DateTime<Utc>, location: GeoCoordinate) -> (f64, f64) {
    let n = f64::from(utc.ordinal());
    let hour = f64::from(utc.hour())
        + f64::from(utc.minute()) / 60.0
        + f64::from(utc.second()) / 3600.0;

    // Fractional year
    let gamma = 2.0 * PI / 365.0 * (n - 1.0 + (hour - 12.0) / 24.0);

    // Minutes
    let eq_time = 229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin());

    // Radians
    let decl = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin();

    let true_solar_time = hour + eq_time / 60.0 + location.longitude() / 15.0;
    let hour_angle = wrap_hour_angle(15.0 * (true_solar_time - 12.0));
    let ha = hour_angle.to_radians();

    let lat = location.latitude().to_radians();
    let cos_zenith = lat.sin() * decl.sin() + lat.cos() * decl.cos() * ha.cos();
    let zenith = cos_zenith.clamp(-1.0, 1.0).acos();

    // cos(altitude) == sin(zenith); zero when the sun is at the zenith or nadir
    let sin_zenith = zenith.sin();
    let azimuth = if sin_zenith.abs() < 1e-12 {
        0.0
    } else {
        let cos_azimuth = (decl.sin() * lat.cos() - decl.cos() * lat.sin() * ha.cos()) / sin_zenith;
        let degrees = cos_azimuth.clamp(-1.0, 1.0).acos().to_degrees();
        if hour_angle > 0.0 {
            360.0 - degrees
        } else {
            degrees
        }
    };

    (zenith.to_degrees(), normalize_degrees(azimuth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::solve_event;
    use crate::types::SolarEventKind;
    use chrono::{Duration, FixedOffset, NaiveDate};

    fn zagreb() -> GeoCoordinate {
        GeoCoordinate::new(45.8150, 15.9819).unwrap()
    }

    #[test]
    fn test_sunrise_round_trip_altitude() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        for kind in [SolarEventKind::Sunrise, SolarEventKind::Sunset] {
            let t = solve_event(day, kind, zagreb(), 7200).unwrap();
            let pos = solve_position(&t, zagreb()).unwrap();
            assert!(
                (pos.altitude_degrees + 0.833).abs() < 1.0,
                "{}: altitude {}",
                kind,
                pos.altitude_degrees
            );
        }
    }

    #[test]
    fn test_subsolar_noon_near_zenith() {
        let tropic = GeoCoordinate::new(23.44, 0.0).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let noon = solve_event(day, SolarEventKind::SolarNoon, tropic, 0).unwrap();
        let pos = solve_position(&noon, tropic).unwrap();
        assert!(pos.altitude_degrees > 89.0, "altitude {}", pos.altitude_degrees);
    }

    #[test]
    fn test_offset_does_not_change_position() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 20, 10, 15, 0).unwrap();
        let local = utc.with_timezone(&FixedOffset::east_opt(3600).unwrap());
        let a = solve_position(&utc, zagreb()).unwrap();
        let b = solve_position(&local, zagreb()).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.instant, utc);
    }

    #[test]
    fn test_morning_sun_is_east() {
        let t = Utc.with_ymd_and_hms(2024, 6, 21, 5, 0, 0).unwrap();
        let pos = solve_position(&t, zagreb()).unwrap();
        assert!(pos.altitude_degrees > 0.0);
        assert!((45.0..135.0).contains(&pos.azimuth_degrees), "{}", pos.azimuth_degrees);

        let t = Utc.with_ymd_and_hms(2024, 6, 21, 16, 0, 0).unwrap();
        let pos = solve_position(&t, zagreb()).unwrap();
        assert!((225.0..315.0).contains(&pos.azimuth_degrees), "{}", pos.azimuth_degrees);
    }

    #[test]
    fn test_ranges_over_a_year() {
        let places = [
            zagreb(),
            GeoCoordinate::new(-77.85, 166.67).unwrap(),
            GeoCoordinate::new(0.0, -179.9).unwrap(),
            GeoCoordinate::new(89.9, 45.0).unwrap(),
        ];
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for loc in places {
            let mut t = start;
            while t.year() == 2024 {
                let pos = solve_position(&t, loc).unwrap();
                assert!((-90.0..=90.0).contains(&pos.altitude_degrees), "{} {}", loc, t);
                assert!((0.0..360.0).contains(&pos.azimuth_degrees), "{} {}", loc, t);
                t = t + Duration::minutes(97);
            }
        }
    }

    #[test]
    fn test_above_horizon_rejects_night() {
        let night = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        assert_eq!(
            solve_position_above_horizon(&night, zagreb()),
            Err(SolarError::SunNeverRises)
        );
        let day = Utc.with_ymd_and_hms(2024, 6, 21, 11, 0, 0).unwrap();
        assert!(solve_position_above_horizon(&day, zagreb()).is_ok());
    }
}
