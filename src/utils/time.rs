//! Time utilities: HH:MM parsing, minute-of-day conversions and formatting.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: u16 = 1440;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Parse `HH:MM` into a minute of the day in `[0, 1440)`.
pub fn parse_minute_of_day(t: &str) -> AppResult<u16> {
    parse_time(t)
        .map(|nt| minute_of_day(&nt))
        .ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Minute of day of any time-carrying value. Seconds are ignored.
pub fn minute_of_day<T: Timelike>(at: &T) -> u16 {
    (at.hour() * 60 + at.minute()) as u16
}

pub fn format_minute_of_day(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_minutes() {
        assert_eq!(parse_minute_of_day("09:30").unwrap(), 570);
        assert_eq!(parse_minute_of_day("23:59").unwrap(), 1439);
        assert_eq!(format_minute_of_day(570), "09:30");
        assert_eq!(format_minute_of_day(0), "00:00");
    }

    #[test]
    fn rejects_bad_times() {
        assert!(matches!(
            parse_minute_of_day("24:00"),
            Err(AppError::InvalidTime(_))
        ));
        assert!(parse_minute_of_day("9h").is_err());
    }

    #[test]
    fn minute_of_day_ignores_seconds() {
        let t = NaiveTime::from_hms_opt(17, 0, 59).unwrap();
        assert_eq!(minute_of_day(&t), 1020);
    }
}
