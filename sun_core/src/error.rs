//! Error taxonomy shared by both solvers

use thiserror::Error;

/// Outcome of a failed solar calculation.
///
/// `SunNeverRises` and `SunNeverSets` describe real polar or seasonal geometry,
/// not faults. Callers are expected to match on them and degrade gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolarError {
    /// The sun stays below the event's zenith threshold all day
    #[error("sun never rises on this date at this location")]
    SunNeverRises,

    /// The sun stays above the event's zenith threshold all day
    #[error("sun never sets on this date at this location")]
    SunNeverSets,

    /// Calendar input or offset cannot form a valid date-time
    #[error("invalid date")]
    InvalidDate,

    /// A day-by-day scan ran for a full year without finding the event
    #[error("event not found within one year")]
    EventNotFoundWithinYear,

    /// Latitude or longitude outside the valid range, or not finite
    #[error("invalid coordinate")]
    InvalidCoordinate,
}

impl SolarError {
    /// True for the two outcomes caused by sun geometry rather than bad input
    pub fn is_polar(self) -> bool {
        matches!(self, SolarError::SunNeverRises | SolarError::SunNeverSets)
    }
}
