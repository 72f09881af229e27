//! UTC offset resolution for multi-day calculations
//!
//! The solvers never consult the host time zone. Operations that walk across
//! several dates ask a [`UtcOffsetResolver`] for the offset in effect on each
//! local date, so DST transitions are honoured when the resolver knows them.

use chrono::{FixedOffset, NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;

/// Supplies the UTC offset in effect on a local calendar date
pub trait UtcOffsetResolver {
    fn offset_on(&self, date: NaiveDate) -> FixedOffset;
}

impl UtcOffsetResolver for FixedOffset {
    fn offset_on(&self, _date: NaiveDate) -> FixedOffset {
        *self
    }
}

/// Uses the offset in effect at local noon, which is never inside a DST gap
impl UtcOffsetResolver for Tz {
    fn offset_on(&self, date: NaiveDate) -> FixedOffset {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        match self.from_local_datetime(&noon).earliest() {
            Some(local) => local.offset().fix(),
            None => self.offset_from_utc_datetime(&noon).fix(),
        }
    }
}

impl<R: UtcOffsetResolver + ?Sized> UtcOffsetResolver for &R {
    fn offset_on(&self, date: NaiveDate) -> FixedOffset {
        (**self).offset_on(date)
    }
}

/// Adapts a closure into a resolver
#[derive(Debug, Clone, Copy)]
pub struct OffsetFn<F>(pub F);

impl<F: Fn(NaiveDate) -> FixedOffset> UtcOffsetResolver for OffsetFn<F> {
    fn offset_on(&self, date: NaiveDate) -> FixedOffset {
        (self.0)(date)
    }
}

/// Parse an IANA time zone name into a Tz
pub fn parse_timezone(tz_str: &str) -> Result<Tz, String> {
    tz_str
        .parse::<Tz>()
        .map_err(|_| format!("Invalid timezone: {}", tz_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_offset_resolver() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(offset.offset_on(date(2024, 1, 1)), offset);
        assert_eq!(offset.offset_on(date(2024, 7, 1)), offset);
    }

    #[test]
    fn test_tz_resolver_follows_dst() {
        let tz = parse_timezone("Europe/Zagreb").unwrap();
        assert_eq!(tz.offset_on(date(2024, 1, 15)).local_minus_utc(), 3600);
        assert_eq!(tz.offset_on(date(2024, 6, 21)).local_minus_utc(), 7200);
        // Transition day: 2024-03-31 02:00 -> 03:00, noon is already CEST
        assert_eq!(tz.offset_on(date(2024, 3, 31)).local_minus_utc(), 7200);
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = OffsetFn(|d: NaiveDate| {
            let hours = if d.month0() < 6 { 1 } else { 2 };
            FixedOffset::east_opt(hours * 3600).unwrap()
        });
        assert_eq!(resolver.offset_on(date(2024, 2, 1)).local_minus_utc(), 3600);
        assert_eq!(resolver.offset_on(date(2024, 8, 1)).local_minus_utc(), 7200);
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("America/New_York").is_ok());
        let err = parse_timezone("Mars/Olympus_Mons").unwrap_err();
        assert!(err.contains("Invalid timezone"));
    }
}
