//! The one-hour observation window that every query is bucketed by.
//!
//! An [`HourWindow`] can only be built from a timezone-naive timestamp that sits exactly
//! on an hour boundary. Everything downstream (store queries, rendering) takes the window
//! rather than a raw timestamp, so the alignment check happens once, at construction.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HourWindowError {
    #[error("Timestamp {timestamp} is not hour-aligned: {field} is {value}")]
    NotHourAligned {
        timestamp: NaiveDateTime,
        field: &'static str,
        value: u32,
    },

    #[error("Timestamp carries a timezone ({offset}); hour windows take naive timestamps")]
    TimezoneAttached { offset: String },

    #[error("Invalid date or hour {year}-{month:02}-{day:02} {hour:02}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    },

    #[error("Failed to parse hour window from '{0}', expected 'YYYY-MM-DD HH'")]
    Parse(String),

    #[error("Hour window starting at {0} is outside the supported date range")]
    OutOfRange(NaiveDateTime),
}

/// Half-open interval `[start, start + 1h)` with `start` on an exact hour.
///
/// # Examples
///
/// ```
/// use century::HourWindow;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(1978, 10, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let window = HourWindow::new(start).unwrap();
/// assert_eq!(window.to_string(), "1978-10-01 10:00");
///
/// let off_hour = NaiveDate::from_ymd_opt(1978, 10, 1).unwrap().and_hms_opt(10, 30, 0).unwrap();
/// assert!(HourWindow::new(off_hour).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourWindow {
    start: NaiveDateTime,
}

impl HourWindow {
    /// Validates that `start` has zero minutes, seconds and sub-second part.
    pub fn new(start: NaiveDateTime) -> Result<Self, HourWindowError> {
        let checks = [
            ("minute", start.minute()),
            ("second", start.second()),
            ("nanosecond", start.nanosecond()),
        ];
        if let Some((field, value)) = checks.into_iter().find(|(_, value)| *value != 0) {
            return Err(HourWindowError::NotHourAligned {
                timestamp: start,
                field,
                value,
            });
        }

        // end() must always be representable
        if start.checked_add_signed(Duration::hours(1)).is_none() {
            return Err(HourWindowError::OutOfRange(start));
        }

        Ok(Self { start })
    }

    pub fn from_ymd_h(year: i32, month: u32, day: u32, hour: u32) -> Result<Self, HourWindowError> {
        let start = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .ok_or(HourWindowError::InvalidDate {
                year,
                month,
                day,
                hour,
            })?;
        Self::new(start)
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::hours(1)
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start && timestamp < self.end()
    }

    /// The window starting where this one ends.
    pub fn next(&self) -> Result<Self, HourWindowError> {
        Self::new(self.end())
    }

    pub fn previous(&self) -> Result<Self, HourWindowError> {
        self.start
            .checked_sub_signed(Duration::hours(1))
            .ok_or(HourWindowError::OutOfRange(self.start))
            .and_then(Self::new)
    }
}

impl TryFrom<NaiveDateTime> for HourWindow {
    type Error = HourWindowError;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<DateTime<Utc>> for HourWindow {
    type Error = HourWindowError;

    fn try_from(_value: DateTime<Utc>) -> Result<Self, Self::Error> {
        Err(HourWindowError::TimezoneAttached {
            offset: "UTC".to_string(),
        })
    }
}

impl TryFrom<DateTime<FixedOffset>> for HourWindow {
    type Error = HourWindowError;

    fn try_from(value: DateTime<FixedOffset>) -> Result<Self, Self::Error> {
        Err(HourWindowError::TimezoneAttached {
            offset: value.offset().to_string(),
        })
    }
}

const HOUR_LAYOUT: &str = "####-##-## ##";
const FULL_LAYOUT: &str = "####-##-## ##:##:##";

/// Every `#` in `layout` is an ASCII digit in `s`, every other byte matches exactly.
fn matches_layout(s: &str, layout: &str) -> bool {
    s.len() == layout.len()
        && s.bytes().zip(layout.bytes()).all(|(c, l)| match l {
            b'#' => c.is_ascii_digit(),
            _ => c == l,
        })
}

/// Accepts the zero-padded `"1978-10-01 10"` form as well as a full `"1978-10-01 10:00:00"`.
impl FromStr for HourWindow {
    type Err = HourWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse_error = || HourWindowError::Parse(s.to_string());

        if matches_layout(trimmed, FULL_LAYOUT) {
            let full = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .map_err(|_| parse_error())?;
            return Self::new(full);
        }
        if !matches_layout(trimmed, HOUR_LAYOUT) {
            return Err(parse_error());
        }

        let (date_part, hour_part) = trimmed.split_once(' ').ok_or_else(parse_error)?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| parse_error())?;
        let hour: u32 = hour_part.parse().map_err(|_| parse_error())?;
        let start = date.and_hms_opt(hour, 0, 0).ok_or_else(parse_error)?;
        Self::new(start)
    }
}

impl fmt::Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start.format("%Y-%m-%d %H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_accepts_exact_hour() {
        let window = HourWindow::new(at(7, 0, 0)).unwrap();
        assert_eq!(window.start(), at(7, 0, 0));
        assert_eq!(window.end(), at(8, 0, 0));
    }

    #[test]
    fn test_rejects_non_zero_minute() {
        let err = HourWindow::new(at(7, 15, 0)).unwrap_err();
        assert_eq!(
            err,
            HourWindowError::NotHourAligned {
                timestamp: at(7, 15, 0),
                field: "minute",
                value: 15,
            }
        );
    }

    #[test]
    fn test_rejects_seconds_and_sub_seconds() {
        assert!(matches!(
            HourWindow::new(at(7, 0, 1)),
            Err(HourWindowError::NotHourAligned { field: "second", .. })
        ));

        let micro = NaiveDate::from_ymd_opt(2013, 6, 1)
            .unwrap()
            .and_hms_micro_opt(7, 0, 0, 1)
            .unwrap();
        assert!(matches!(
            HourWindow::new(micro),
            Err(HourWindowError::NotHourAligned {
                field: "nanosecond",
                value: 1000,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_timezone_bearing_timestamps() {
        let utc = Utc.with_ymd_and_hms(2013, 6, 1, 7, 0, 0).unwrap();
        assert!(matches!(
            HourWindow::try_from(utc),
            Err(HourWindowError::TimezoneAttached { .. })
        ));

        let offset = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2013, 6, 1, 7, 0, 0)
            .unwrap();
        assert_eq!(
            HourWindow::try_from(offset),
            Err(HourWindowError::TimezoneAttached {
                offset: "+02:00".to_string()
            })
        );
    }

    #[test]
    fn test_contains_is_half_open() {
        let window = HourWindow::new(at(7, 0, 0)).unwrap();
        assert!(window.contains(at(7, 0, 0)));
        assert!(window.contains(at(7, 59, 59)));
        assert!(!window.contains(at(8, 0, 0)));
        assert!(!window.contains(at(6, 59, 59)));
    }

    #[test]
    fn test_parse_front_end_format() {
        let window: HourWindow = "1978-10-01 10".parse().unwrap();
        assert_eq!(window, HourWindow::from_ymd_h(1978, 10, 1, 10).unwrap());

        let full: HourWindow = "1978-10-01 10:00:00".parse().unwrap();
        assert_eq!(full, window);

        assert!(matches!(
            "1978-10-01 10:30:00".parse::<HourWindow>(),
            Err(HourWindowError::NotHourAligned { .. })
        ));
        assert!(matches!(
            "1978-10-01".parse::<HourWindow>(),
            Err(HourWindowError::Parse(_))
        ));
        assert!(matches!(
            "1978-10-01 24".parse::<HourWindow>(),
            Err(HourWindowError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_requires_zero_padded_fields() {
        let cases = [
            "1978-10-01 +5",
            "1978-10-01 -0",
            "1978-10-01 5",
            "1978-1-1 5",
            "1978-1-01 05",
            "1978-10-01 5:00:00",
            "1978-10-1 05:00:00",
            "1978-10-01 05:00:00.000",
            "1978-10-01T05",
        ];
        for case in cases {
            assert!(
                matches!(case.parse::<HourWindow>(), Err(HourWindowError::Parse(_))),
                "{case}"
            );
        }

        let padded: HourWindow = " 1978-10-01 05 ".parse().unwrap();
        assert_eq!(padded, HourWindow::from_ymd_h(1978, 10, 1, 5).unwrap());
    }

    #[test]
    fn test_next_and_previous_cross_day_boundaries() {
        let last = HourWindow::from_ymd_h(1999, 12, 31, 23).unwrap();
        let next = last.next().unwrap();
        assert_eq!(next, HourWindow::from_ymd_h(2000, 1, 1, 0).unwrap());
        assert_eq!(next.previous().unwrap(), last);
    }

    #[test]
    fn test_invalid_calendar_date() {
        assert!(matches!(
            HourWindow::from_ymd_h(2013, 2, 30, 0),
            Err(HourWindowError::InvalidDate { day: 30, .. })
        ));
    }
}
