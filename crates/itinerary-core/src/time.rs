//! Wall-clock time arithmetic and duration formatting.
//!
//! [`ClockTime`] is a minute-resolution time of day. All arithmetic wraps
//! at midnight and discards the day boundary, so `23:30 + 45min` is `00:15`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TimeError, ValidationError};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Separator used by [`format_time_range`].
pub const RANGE_SEPARATOR: char = '–';

/// A wall-clock `HH:MM` time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build from hours (0-23) and minutes (0-59).
    pub fn new(hours: u32, minutes: u32) -> Result<Self, TimeError> {
        NaiveTime::from_hms_opt(hours, minutes, 0)
            .map(Self)
            .ok_or(TimeError::OutOfRange { hours, minutes })
    }

    /// Build from a minute-of-day, wrapping into `0..1440`.
    pub fn from_minute_of_day(minutes: i64) -> Self {
        let m = minutes.rem_euclid(MINUTES_PER_DAY) as u32;
        // rem_euclid keeps the value in range
        Self(NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap_or(NaiveTime::MIN))
    }

    pub fn hours(&self) -> u32 {
        self.0.hour()
    }

    pub fn minutes(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minute_of_day(&self) -> i64 {
        i64::from(self.hours() * 60 + self.minutes())
    }

    /// Add minutes, wrapping at midnight.
    pub fn add_minutes(self, delta: i64) -> Self {
        Self::from_minute_of_day(self.minute_of_day() + delta)
    }

    /// Plain minute-of-day difference `end - self`.
    ///
    /// Not midnight-aware: `23:00 -> 01:00` yields `-1320`.
    pub fn minutes_until(self, end: ClockTime) -> i64 {
        end.minute_of_day() - self.minute_of_day()
    }

    /// Normalize free-text input such as `"7:30 pm"` or `"09:05"`.
    ///
    /// Accepts one or two hour digits, exactly two minute digits, and an
    /// optional `AM`/`PM` suffix. Out-of-range values are rejected, never
    /// clamped.
    pub fn parse_user_input(input: &str) -> Result<Self, TimeError> {
        let trimmed = input.trim();
        let upper = trimmed.to_ascii_uppercase();
        let (clock, period) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end(), Some(true))
        } else {
            (upper.as_str(), None)
        };

        let (mut hours, minutes) =
            split_clock(clock).ok_or_else(|| TimeError::InvalidFormat(input.to_string()))?;

        match period {
            Some(true) if hours != 12 => hours += 12,
            Some(false) if hours == 12 => hours = 0,
            _ => {}
        }
        Self::new(hours, minutes)
    }

    /// 12-hour display, e.g. `7:30 PM`.
    pub fn format_12h(&self) -> String {
        let period = if self.hours() >= 12 { "PM" } else { "AM" };
        let display = match self.hours() % 12 {
            0 => 12,
            h => h,
        };
        format!("{display}:{:02} {period}", self.minutes())
    }
}

/// Split `H:MM` / `HH:MM` into numbers without range checks.
fn split_clock(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.split_once(':')?;
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&h.len()) || m.len() != 2 || !digits(h) || !digits(m) {
        return None;
    }
    Some((h.parse().ok()?, m.parse().ok()?))
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hours, minutes) =
            split_clock(s).ok_or_else(|| TimeError::InvalidFormat(s.to_string()))?;
        Self::new(hours, minutes)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Add minutes to a time, wrapping at midnight.
pub fn add_minutes(time: ClockTime, minutes: i64) -> ClockTime {
    time.add_minutes(minutes)
}

/// Minute-of-day difference `end - start`, not midnight-aware.
pub fn minutes_between(start: ClockTime, end: ClockTime) -> i64 {
    start.minutes_until(end)
}

/// Short duration label: `45m`, `2h`, `2h 30m`.
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    hours_label(minutes)
}

/// Long duration label used in warnings: `45 min`, `2h`, `2h 30m`.
pub fn format_duration_long(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    hours_label(minutes)
}

fn hours_label(minutes: u32) -> String {
    let (h, m) = duration_to_hours_minutes(minutes);
    if m == 0 {
        format!("{h}h")
    } else {
        format!("{h}h {m}m")
    }
}

/// `HH:MM–HH:MM` for a visit starting at `start`.
pub fn format_time_range(start: ClockTime, duration_minutes: u32) -> String {
    let end = start.add_minutes(i64::from(duration_minutes));
    format!("{start}{RANGE_SEPARATOR}{end}")
}

pub fn duration_to_hours_minutes(total_minutes: u32) -> (u32, u32) {
    (total_minutes / 60, total_minutes % 60)
}

/// Combine hour and minute fields into a minute count.
///
/// # Errors
/// Returns [`ValidationError::InvalidDuration`] if `minutes` is above 59 or
/// the total does not fit in a `u32`.
pub fn hours_minutes_to_duration(hours: u32, minutes: u32) -> Result<u32, ValidationError> {
    if minutes > 59 {
        return Err(ValidationError::InvalidDuration(format!("{hours}h {minutes}m")));
    }
    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| ValidationError::InvalidDuration(format!("{hours}h {minutes}m")))
}

/// Parse a positive length typed by the user: `90`, `45m`, `45 min`, `2h`
/// or `1h 30m`.
///
/// # Errors
/// Returns [`ValidationError::InvalidDuration`] for anything else, for zero,
/// and for totals that overflow.
pub fn parse_duration_input(input: &str) -> Result<u32, ValidationError> {
    let invalid = || ValidationError::InvalidDuration(input.to_string());
    let text = input.trim().to_ascii_lowercase();

    let minutes = match text.split_once('h') {
        Some((hours, rest)) => {
            let hours = hours.trim().parse::<u32>().map_err(|_| invalid())?;
            let rest = rest.trim();
            let minutes = if rest.is_empty() {
                0
            } else {
                minutes_field(rest).ok_or_else(invalid)?
            };
            hours_minutes_to_duration(hours, minutes).map_err(|_| invalid())?
        }
        None => minutes_field(&text).ok_or_else(invalid)?,
    };
    ensure_positive_duration(minutes).map_err(|_| invalid())
}

fn minutes_field(text: &str) -> Option<u32> {
    let digits = text
        .strip_suffix("min")
        .or_else(|| text.strip_suffix('m'))
        .unwrap_or(text);
    digits.trim().parse().ok()
}

/// Reject zero-length durations coming from typed callers.
pub fn ensure_positive_duration(minutes: u32) -> Result<u32, ValidationError> {
    if minutes == 0 {
        Err(ValidationError::InvalidDuration(minutes.to_string()))
    } else {
        Ok(minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn parses_strict_hh_mm() {
        assert_eq!(t("10:00").to_string(), "10:00");
        assert_eq!(t("9:05").to_string(), "09:05");
        assert_eq!(t("00:00").minute_of_day(), 0);
        assert_eq!(t("23:59").minute_of_day(), 1439);
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "10", "10:0", "10:000", "24:00", "12:60", "ab:cd", "-1:00", "123:00", " 10:00"] {
            assert!(bad.parse::<ClockTime>().is_err(), "accepted {bad:?}");
        }
        assert_eq!(
            "24:00".parse::<ClockTime>(),
            Err(TimeError::OutOfRange { hours: 24, minutes: 0 })
        );
    }

    #[test]
    fn add_minutes_wraps_at_midnight() {
        assert_eq!(add_minutes(t("23:30"), 45), t("00:15"));
        assert_eq!(add_minutes(t("10:00"), 90), t("11:30"));
        assert_eq!(add_minutes(t("00:10"), -20), t("23:50"));
        assert_eq!(add_minutes(t("10:00"), 1440 * 2 + 1), t("10:01"));
    }

    #[test]
    fn minutes_between_is_not_midnight_aware() {
        assert_eq!(minutes_between(t("12:42"), t("19:30")), 408);
        assert_eq!(minutes_between(t("23:00"), t("01:00")), -1320);
    }

    #[test]
    fn user_input_normalization() {
        assert_eq!(ClockTime::parse_user_input("7:30 PM").unwrap(), t("19:30"));
        assert_eq!(ClockTime::parse_user_input("12:00 am").unwrap(), t("00:00"));
        assert_eq!(ClockTime::parse_user_input("12:15PM").unwrap(), t("12:15"));
        assert_eq!(ClockTime::parse_user_input(" 9:05 ").unwrap(), t("09:05"));
        assert!(ClockTime::parse_user_input("13:00 PM").is_err());
        assert!(ClockTime::parse_user_input("noon").is_err());
    }

    #[test]
    fn twelve_hour_display() {
        assert_eq!(t("19:30").format_12h(), "7:30 PM");
        assert_eq!(t("00:05").format_12h(), "12:05 AM");
        assert_eq!(t("12:00").format_12h(), "12:00 PM");
    }

    #[test]
    fn duration_labels() {
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(150), "2h 30m");
        assert_eq!(format_duration_long(45), "45 min");
        assert_eq!(format_duration_long(408), "6h 48m");
    }

    #[test]
    fn time_range_end_matches_add_minutes() {
        let range = format_time_range(t("10:00"), 90);
        assert_eq!(range, "10:00–11:30");
        let (_, end) = range.split_once(RANGE_SEPARATOR).unwrap();
        assert_eq!(t(end), add_minutes(t("10:00"), 90));
    }

    #[test]
    fn hours_and_minutes_combine() {
        assert_eq!(hours_minutes_to_duration(1, 30), Ok(90));
        assert_eq!(hours_minutes_to_duration(0, 59), Ok(59));
        assert!(hours_minutes_to_duration(1, 60).is_err());
        assert!(hours_minutes_to_duration(100_000_000, 0).is_err());
        assert!(hours_minutes_to_duration(u32::MAX / 60, 59).is_err());
        assert_eq!(duration_to_hours_minutes(135), (2, 15));
    }

    #[test]
    fn duration_input_accepts_minutes_and_hours() {
        assert_eq!(parse_duration_input("45"), Ok(45));
        assert_eq!(parse_duration_input("45m"), Ok(45));
        assert_eq!(parse_duration_input(" 45 min "), Ok(45));
        assert_eq!(parse_duration_input("2h"), Ok(120));
        assert_eq!(parse_duration_input("1h 30m"), Ok(90));
        assert_eq!(parse_duration_input("1H30M"), Ok(90));
    }

    #[test]
    fn duration_input_rejects_zero_junk_and_overflow() {
        for bad in ["0", "0h", "0h 0m", "-5", "abc", "", "h", "1h 75m", "1h 30x", "4294967296", "100000000h"] {
            assert_eq!(
                parse_duration_input(bad),
                Err(ValidationError::InvalidDuration(bad.to_string())),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn serde_uses_hh_mm_strings() {
        let json = serde_json::to_string(&t("07:05")).unwrap();
        assert_eq!(json, "\"07:05\"");
        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }
}
