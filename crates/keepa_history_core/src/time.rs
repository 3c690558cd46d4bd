//! Keepa time base.
//!
//! History series count time in "Keepa minutes": minutes since
//! 2011-01-01T00:00:00Z. A few coarser fields use "Keepa hours" from the same
//! origin. Both origins are expressed below in units since the Unix epoch.

use jiff::Timestamp;

use crate::error::{KeepaError, Result};

/// Keepa hour 0 in hours since the Unix epoch.
pub const KEEPA_START_HOUR: i64 = 359_400;
/// Keepa minute 0 in minutes since the Unix epoch.
pub const KEEPA_START_MINUTE: i64 = 21_564_000;

pub const MILLIS_PER_MINUTE: i64 = 60 * 1000;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Current time in Keepa minutes.
pub fn now_minutes() -> i32 {
    unix_millis_to_keepa_minutes(Timestamp::now().as_millisecond())
}

/// Current time in Keepa hours.
pub fn now_hours() -> i32 {
    unix_millis_to_keepa_hours(Timestamp::now().as_millisecond())
}

/// Unix milliseconds to Keepa minutes, flooring partial minutes.
/// Saturates at the `i32` range.
pub fn unix_millis_to_keepa_minutes(unix_millis: i64) -> i32 {
    saturate(unix_millis.div_euclid(MILLIS_PER_MINUTE) - KEEPA_START_MINUTE)
}

/// Unix milliseconds to Keepa hours, flooring partial hours.
pub fn unix_millis_to_keepa_hours(unix_millis: i64) -> i32 {
    saturate(unix_millis.div_euclid(MILLIS_PER_HOUR) - KEEPA_START_HOUR)
}

pub fn keepa_minutes_to_unix_millis(minutes: i32) -> i64 {
    (minutes as i64 + KEEPA_START_MINUTE) * MILLIS_PER_MINUTE
}

pub fn keepa_hours_to_unix_millis(hours: i32) -> i64 {
    (hours as i64 + KEEPA_START_HOUR) * MILLIS_PER_HOUR
}

/// Parse Keepa minutes from their string form, as some response fields
/// carry them.
pub fn parse_minutes(s: &str) -> Result<i32> {
    s.trim()
        .parse::<i32>()
        .map_err(|e| KeepaError::invalid_minutes(s, e))
}

pub fn keepa_minutes_str_to_unix_millis(s: &str) -> Result<i64> {
    parse_minutes(s).map(keepa_minutes_to_unix_millis)
}

pub fn keepa_minutes_to_timestamp(minutes: i32) -> Result<Timestamp> {
    Ok(Timestamp::from_millisecond(keepa_minutes_to_unix_millis(
        minutes,
    ))?)
}

pub fn timestamp_to_keepa_minutes(ts: Timestamp) -> i32 {
    unix_millis_to_keepa_minutes(ts.as_millisecond())
}

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let origin: Timestamp = "2011-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(timestamp_to_keepa_minutes(origin), 0);
        assert_eq!(unix_millis_to_keepa_hours(origin.as_millisecond()), 0);
        assert_eq!(keepa_minutes_to_timestamp(0).unwrap(), origin);
        assert_eq!(keepa_hours_to_unix_millis(0), origin.as_millisecond());
    }

    #[test]
    fn test_minutes_roundtrip_at_unit_granularity() {
        let m = 7_654_321;
        assert_eq!(unix_millis_to_keepa_minutes(keepa_minutes_to_unix_millis(m)), m);
        // 59.999s into the minute still maps to the same minute
        let ms = keepa_minutes_to_unix_millis(m) + 59_999;
        assert_eq!(unix_millis_to_keepa_minutes(ms), m);
    }

    #[test]
    fn test_floor_before_origin() {
        let origin_ms = keepa_minutes_to_unix_millis(0);
        assert_eq!(unix_millis_to_keepa_minutes(origin_ms - 1), -1);
        assert_eq!(unix_millis_to_keepa_hours(origin_ms - 1), -1);
        // Before the Unix epoch the division must floor, not truncate
        assert_eq!(unix_millis_to_keepa_minutes(-1), -KEEPA_START_MINUTE as i32 - 1);
    }

    #[test]
    fn test_hours_roundtrip() {
        let h = 120_000;
        assert_eq!(unix_millis_to_keepa_hours(keepa_hours_to_unix_millis(h)), h);
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("411180").unwrap(), 411_180);
        assert_eq!(parse_minutes(" 42 ").unwrap(), 42);
        assert_eq!(
            keepa_minutes_str_to_unix_millis("1").unwrap(),
            keepa_minutes_to_unix_millis(1)
        );
        let err = parse_minutes("abc").unwrap_err();
        assert!(matches!(err, KeepaError::InvalidMinutes { ref input, .. } if input == "abc"));
    }

    #[test]
    fn test_now_is_after_origin() {
        assert!(now_minutes() > 0);
        assert!(now_hours() > 0);
        assert!(now_minutes() / 60 >= now_hours() - 1);
    }
}
