//! Solar event solver
//!
//! Computes the clock time of sunrise, sunset, the twilight bounds and solar
//! noon with the zenith-angle hour-angle method (the "Almanac for Computers"
//! sunrise algorithm). Accuracy is within a couple of minutes for non-polar
//! latitudes.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use log::{debug, trace};

use crate::error::SolarError;
use crate::math::{
    cos_deg, day_of_year, normalize_degrees, normalize_hours, sin_deg, split_hours, tan_deg,
};
use crate::offset::UtcOffsetResolver;
use crate::types::{EventPolarity, GeoCoordinate, SolarEventKind};

/// Number of days [`next_event_after`] scans before giving up
pub const MAX_SCAN_DAYS: u32 = 365;

/// Compute the local time of `kind` on `date` at `location`.
///
/// `date` is a calendar date in the caller's local calendar and
/// `utc_offset_seconds` the offset in effect there. The result carries that
/// offset and always falls on `date`: the local decimal hour is wrapped into
/// [0, 24) and truncated to whole seconds.
///
/// # Errors
///
/// - [`SolarError::SunNeverRises`] / [`SolarError::SunNeverSets`] when the sun
///   does not cross the event's zenith threshold that day (checked for solar
///   noon too).
/// - [`SolarError::InvalidDate`] when the offset is not within ±24 hours.
pub fn solve_event(
    date: NaiveDate,
    kind: SolarEventKind,
    location: GeoCoordinate,
    utc_offset_seconds: i32,
) -> Result<DateTime<FixedOffset>, SolarError> {
    let offset = FixedOffset::east_opt(utc_offset_seconds).ok_or(SolarError::InvalidDate)?;
    let ut = event_utc_hours(date, kind, location)?;

    let local = normalize_hours(ut + f64::from(utc_offset_seconds) / 3600.0);
    let (hour, minute, second) = split_hours(local);
    let naive = date
        .and_hms_opt(hour, minute, second)
        .ok_or(SolarError::InvalidDate)?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or(SolarError::InvalidDate)
}

/// UTC decimal hours in [0, 24) of the event on `date`
fn event_utc_hours(
    date: NaiveDate,
    kind: SolarEventKind,
    location: GeoCoordinate,
) -> Result<f64, SolarError> {
    let polarity = kind.polarity();
    let lng_hour = location.longitude() / 15.0;

    let base_hour = match polarity {
        EventPolarity::Dawn => 6.0,
        EventPolarity::Dusk => 18.0,
        EventPolarity::Neither => 12.0,
    };
    let approx_time = f64::from(day_of_year(date)) + (base_hour - lng_hour) / 24.0;

    // Mean anomaly and true longitude
    let m = 0.9856 * approx_time - 3.289;
    let l = normalize_degrees(m + 1.916 * sin_deg(m) + 0.020 * sin_deg(2.0 * m) + 282.634);

    // Right ascension, pulled into the same quadrant as L, in hours
    let mut ra = normalize_degrees((0.91764 * tan_deg(l)).atan().to_degrees());
    ra += (l / 90.0).floor() * 90.0 - (ra / 90.0).floor() * 90.0;
    ra /= 15.0;

    let sin_dec = 0.39782 * sin_deg(l);
    let cos_dec = sin_dec.asin().cos();

    let latitude = location.latitude();
    let cos_h = (cos_deg(kind.zenith_degrees()) - sin_dec * sin_deg(latitude))
        / (cos_dec * cos_deg(latitude));

    if cos_h > 1.0 {
        return Err(SolarError::SunNeverRises);
    }
    if cos_h < -1.0 {
        return Err(SolarError::SunNeverSets);
    }

    let h = match polarity {
        EventPolarity::Dawn => 360.0 - cos_h.acos().to_degrees(),
        EventPolarity::Dusk => cos_h.acos().to_degrees(),
        EventPolarity::Neither => 0.0,
    } / 15.0;

    let local_mean_time = h + ra - 0.06571 * approx_time - 6.622;
    let ut = normalize_hours(local_mean_time - lng_hour);

    trace!("{} on {} at {}: {:.5}h UT", kind, date, location, ut);
    Ok(ut)
}

/// Find the first occurrence of `kind` strictly after `instant`.
///
/// Scanning starts on the local day after `instant`'s local date and runs for
/// at most [`MAX_SCAN_DAYS`] days. Days where the sun never rises or never
/// sets are skipped.
///
/// # Errors
///
/// [`SolarError::EventNotFoundWithinYear`] when the scan is exhausted.
pub fn next_event_after<R: UtcOffsetResolver + ?Sized>(
    instant: DateTime<Utc>,
    kind: SolarEventKind,
    location: GeoCoordinate,
    resolver: &R,
) -> Result<DateTime<FixedOffset>, SolarError> {
    let start_offset = resolver.offset_on(instant.date_naive());
    let mut date = instant.with_timezone(&start_offset).date_naive();

    for _ in 0..MAX_SCAN_DAYS {
        date = date.succ_opt().ok_or(SolarError::InvalidDate)?;
        let offset = resolver.offset_on(date).local_minus_utc();

        match solve_event(date, kind, location, offset) {
            Ok(time) if time.with_timezone(&Utc) > instant => return Ok(time),
            Ok(_) => {}
            Err(e) if e.is_polar() => debug!("Skipping {} for {}: {}", date, kind, e),
            Err(e) => return Err(e),
        }
    }

    Err(SolarError::EventNotFoundWithinYear)
}

/// Time between sunrise and sunset on `date`.
///
/// Both events use the resolver's offset for `date`. If the offset wraps
/// sunset's clock reading past local midnight the result is still reported
/// within [0, 24h).
pub fn day_length<R: UtcOffsetResolver + ?Sized>(
    date: NaiveDate,
    location: GeoCoordinate,
    resolver: &R,
) -> Result<Duration, SolarError> {
    let offset = resolver.offset_on(date).local_minus_utc();
    let sunrise = solve_event(date, SolarEventKind::Sunrise, location, offset)?;
    let sunset = solve_event(date, SolarEventKind::Sunset, location, offset)?;

    let length = sunset.signed_duration_since(sunrise);
    if length < Duration::zero() {
        Ok(length + Duration::days(1))
    } else {
        Ok(length)
    }
}

/// The event a countdown should target at `now`.
///
/// Returns the event on `date` when it is still ahead of `now`, otherwise the
/// next occurrence after `now`.
pub fn upcoming_event<R: UtcOffsetResolver + ?Sized>(
    now: DateTime<Utc>,
    date: NaiveDate,
    kind: SolarEventKind,
    location: GeoCoordinate,
    resolver: &R,
) -> Result<DateTime<FixedOffset>, SolarError> {
    let offset = resolver.offset_on(date).local_minus_utc();
    let today = solve_event(date, kind, location, offset)?;
    if today.with_timezone(&Utc) > now {
        Ok(today)
    } else {
        next_event_after(now, kind, location, resolver)
    }
}
