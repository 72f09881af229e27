//! Year-long solar altitude sweep
//!
//! Samples the sun's position at a fixed interval over every local day of a
//! year and summarizes the daytime samples per month.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone};
use sun_core::{solve_position_above_horizon, GeoCoordinate, SolarError, UtcOffsetResolver};

/// Daytime statistics for one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthSummary {
    /// Month (1-12)
    pub month: u32,
    /// Highest altitude seen, in degrees, if the sun was ever up
    pub max_altitude: Option<f64>,
    /// Samples with the sun above the horizon
    pub daylight_samples: u32,
    /// All samples taken
    pub total_samples: u32,
}

impl MonthSummary {
    fn new(month: u32) -> Self {
        Self {
            month,
            max_altitude: None,
            daylight_samples: 0,
            total_samples: 0,
        }
    }

    /// Fraction of samples with the sun up
    pub fn daylight_share(&self) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            f64::from(self.daylight_samples) / f64::from(self.total_samples)
        }
    }
}

/// Sweep `year` at `location`, sampling every `interval_minutes` of local time
///
/// Each local day runs from its midnight to the next day's midnight, both
/// taken at the resolver's offset for their date, so days with a DST change
/// get one sample more or less and no instant is sampled twice.
pub fn sweep_year<R: UtcOffsetResolver + ?Sized>(
    year: i32,
    location: GeoCoordinate,
    resolver: &R,
    interval_minutes: u32,
) -> Result<Vec<MonthSummary>, SolarError> {
    let mut months: Vec<MonthSummary> = (1..=12).map(MonthSummary::new).collect();
    let step = interval_minutes.clamp(1, 1440);

    let mut date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(SolarError::InvalidDate)?;
    let mut midnight = local_midnight(resolver, date)?;
    while date.year() == year {
        let next_date = date.succ_opt().ok_or(SolarError::InvalidDate)?;
        let next_midnight = local_midnight(resolver, next_date)?;
        let summary = &mut months[date.month0() as usize];

        let mut instant = midnight;
        while instant < next_midnight {
            summary.total_samples += 1;
            match solve_position_above_horizon(&instant, location) {
                Ok(position) => {
                    summary.daylight_samples += 1;
                    let altitude = position.altitude_degrees;
                    summary.max_altitude =
                        Some(summary.max_altitude.map_or(altitude, |max| max.max(altitude)));
                }
                // Sun below the horizon
                Err(SolarError::SunNeverRises) | Err(SolarError::SunNeverSets) => {}
                Err(e) => return Err(e),
            }
            instant = instant + Duration::minutes(i64::from(step));
        }

        date = next_date;
        midnight = next_midnight;
    }

    log::debug!("Swept {} at {} every {} min", year, location, step);
    Ok(months)
}

fn local_midnight<R: UtcOffsetResolver + ?Sized>(
    resolver: &R,
    date: NaiveDate,
) -> Result<DateTime<FixedOffset>, SolarError> {
    let start = date.and_hms_opt(0, 0, 0).ok_or(SolarError::InvalidDate)?;
    resolver
        .offset_on(date)
        .from_local_datetime(&start)
        .single()
        .ok_or(SolarError::InvalidDate)
}
