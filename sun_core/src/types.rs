//! Value types passed into and returned from the solvers

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SolarError;

/// A point on Earth in degrees. Latitude is positive north, longitude positive east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = SolarError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        GeoCoordinate::new(raw.latitude, raw.longitude)
    }
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting values outside [-90, 90] x [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SolarError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            // NaN fails both range checks
            return Err(SolarError::InvalidCoordinate);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// Which root of the hour-angle equation an event uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPolarity {
    /// Morning crossing of the zenith threshold
    Dawn,
    /// Evening crossing of the zenith threshold
    Dusk,
    /// Meridian transit (solar noon)
    Neither,
}

/// A named solar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarEventKind {
    Sunrise,
    Sunset,
    CivilDawn,
    CivilDusk,
    NauticalDawn,
    NauticalDusk,
    AstronomicalDawn,
    AstronomicalDusk,
    SolarNoon,
}

impl SolarEventKind {
    /// Every event, in chronological pairing order
    pub const ALL: [SolarEventKind; 9] = [
        SolarEventKind::Sunrise,
        SolarEventKind::Sunset,
        SolarEventKind::CivilDawn,
        SolarEventKind::CivilDusk,
        SolarEventKind::NauticalDawn,
        SolarEventKind::NauticalDusk,
        SolarEventKind::AstronomicalDawn,
        SolarEventKind::AstronomicalDusk,
        SolarEventKind::SolarNoon,
    ];

    /// Zenith angle in degrees that defines the event
    ///
    /// Sunrise and sunset use 90.833° to account for refraction and the
    /// solar disc radius.
    pub fn zenith_degrees(self) -> f64 {
        match self {
            SolarEventKind::Sunrise | SolarEventKind::Sunset => 90.833,
            SolarEventKind::CivilDawn | SolarEventKind::CivilDusk => 96.0,
            SolarEventKind::NauticalDawn | SolarEventKind::NauticalDusk => 102.0,
            SolarEventKind::AstronomicalDawn | SolarEventKind::AstronomicalDusk => 108.0,
            SolarEventKind::SolarNoon => 90.0,
        }
    }

    pub fn polarity(self) -> EventPolarity {
        match self {
            SolarEventKind::Sunrise
            | SolarEventKind::CivilDawn
            | SolarEventKind::NauticalDawn
            | SolarEventKind::AstronomicalDawn => EventPolarity::Dawn,
            SolarEventKind::Sunset
            | SolarEventKind::CivilDusk
            | SolarEventKind::NauticalDusk
            | SolarEventKind::AstronomicalDusk => EventPolarity::Dusk,
            SolarEventKind::SolarNoon => EventPolarity::Neither,
        }
    }

    /// Human-readable name, e.g. "Civil Dawn"
    pub fn label(self) -> &'static str {
        match self {
            SolarEventKind::Sunrise => "Sunrise",
            SolarEventKind::Sunset => "Sunset",
            SolarEventKind::CivilDawn => "Civil Dawn",
            SolarEventKind::CivilDusk => "Civil Dusk",
            SolarEventKind::NauticalDawn => "Nautical Dawn",
            SolarEventKind::NauticalDusk => "Nautical Dusk",
            SolarEventKind::AstronomicalDawn => "Astronomical Dawn",
            SolarEventKind::AstronomicalDusk => "Astronomical Dusk",
            SolarEventKind::SolarNoon => "Solar Noon",
        }
    }
}

impl fmt::Display for SolarEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SolarEventKind {
    type Err = String;

    /// Accepts `civil_dawn`, `civil-dawn`, `civilDawn` or `Civil Dawn`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(*c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        SolarEventKind::ALL
            .into_iter()
            .find(|kind| kind.label().replace(' ', "").to_lowercase() == key)
            .ok_or_else(|| format!("Unknown solar event: {}", s))
    }
}

/// Sun altitude and azimuth at an instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// The instant the position was computed for
    pub instant: DateTime<Utc>,
    /// Degrees above the horizon, negative below, within [-90, 90]
    pub altitude_degrees: f64,
    /// Degrees clockwise from north, within [0, 360)
    pub azimuth_degrees: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(GeoCoordinate::new(45.815, 15.9819).is_ok());
        assert!(GeoCoordinate::new(90.0, -180.0).is_ok());
        assert_eq!(
            GeoCoordinate::new(90.5, 0.0),
            Err(SolarError::InvalidCoordinate)
        );
        assert_eq!(
            GeoCoordinate::new(0.0, 181.0),
            Err(SolarError::InvalidCoordinate)
        );
        assert_eq!(
            GeoCoordinate::new(f64::NAN, 0.0),
            Err(SolarError::InvalidCoordinate)
        );
    }

    #[test]
    fn test_coordinate_display() {
        let c = GeoCoordinate::new(-33.87, 151.21).unwrap();
        assert_eq!(c.to_string(), "33.8700°S, 151.2100°E");
    }

    #[test]
    fn test_zenith_table() {
        let zeniths: Vec<f64> = SolarEventKind::ALL
            .iter()
            .map(|k| k.zenith_degrees())
            .collect();
        assert_eq!(
            zeniths,
            vec![90.833, 90.833, 96.0, 96.0, 102.0, 102.0, 108.0, 108.0, 90.0]
        );
    }

    #[test]
    fn test_polarity() {
        assert_eq!(SolarEventKind::NauticalDawn.polarity(), EventPolarity::Dawn);
        assert_eq!(SolarEventKind::AstronomicalDusk.polarity(), EventPolarity::Dusk);
        assert_eq!(SolarEventKind::SolarNoon.polarity(), EventPolarity::Neither);
    }

    #[test]
    fn test_parse_event_kind() {
        assert_eq!("sunrise".parse::<SolarEventKind>(), Ok(SolarEventKind::Sunrise));
        assert_eq!("civil_dawn".parse::<SolarEventKind>(), Ok(SolarEventKind::CivilDawn));
        assert_eq!("nautical-dusk".parse::<SolarEventKind>(), Ok(SolarEventKind::NauticalDusk));
        assert_eq!("astronomicalDawn".parse::<SolarEventKind>(), Ok(SolarEventKind::AstronomicalDawn));
        assert_eq!("Solar Noon".parse::<SolarEventKind>(), Ok(SolarEventKind::SolarNoon));
        assert!("moonrise".parse::<SolarEventKind>().is_err());
    }

    #[test]
    fn test_coordinate_deserialize_validates() {
        let ok: GeoCoordinate = toml::from_str("latitude = 10.0\nlongitude = 20.0").unwrap();
        assert_eq!(ok.latitude(), 10.0);
        let bad = toml::from_str::<GeoCoordinate>("latitude = 100.0\nlongitude = 20.0");
        assert!(bad.is_err());
    }
}
