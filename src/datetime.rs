//! UTC date-time handling for feed timestamps.
//!
//! RSS `pubDate` requires the fixed-width RFC 822 text form
//! (`Wed, 02 Oct 2024 15:00:00 GMT`). `DateTimeUtc` formats it from
//! fixed English name tables, so the output is byte-identical
//! regardless of the host locale.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// A validated UTC date-time, second precision, no timezone machinery.
///
/// `Ord` compares chronologically (fields are ordered most significant
/// first). Deserialization goes through [`DateTimeUtc::new`], so a
/// held value is always a real calendar date.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "RawDateTime")]
pub struct DateTimeUtc {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

/// Unvalidated wire form of [`DateTimeUtc`].
#[derive(Deserialize)]
struct RawDateTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl TryFrom<RawDateTime> for DateTimeUtc {
    type Error = Error;

    fn try_from(raw: RawDateTime) -> Result<Self, Error> {
        Self::new(raw.year, raw.month, raw.day, raw.hour, raw.minute, raw.second)
    }
}

impl DateTimeUtc {
    /// Create a date-time, validating every field (including leap-day
    /// handling). Errors name the out-of-range field.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_argument("month", format!("out of range: {month}")));
        }
        let max_day = days_in_month(year, month);
        if day == 0 || day > max_day {
            return Err(Error::invalid_argument("day", format!("out of range: {day}")));
        }
        if hour > 23 {
            return Err(Error::invalid_argument("hour", format!("out of range: {hour}")));
        }
        if minute > 59 {
            return Err(Error::invalid_argument("minute", format!("out of range: {minute}")));
        }
        if second > 59 {
            return Err(Error::invalid_argument("second", format!("out of range: {second}")));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Midnight on the given date.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, Error> {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn parse(s: &str) -> Option<Self> {
        let (date, time) = match s.split_once('T') {
            Some((date, time)) => (date, Some(time.strip_suffix('Z')?)),
            None => (s, None),
        };

        let mut fields = date.splitn(3, '-');
        let year = parse_fixed(fields.next()?, 4)? as u16;
        let month = parse_fixed(fields.next()?, 2)? as u8;
        let day = parse_fixed(fields.next()?, 2)? as u8;

        let (hour, minute, second) = match time {
            Some(time) => {
                let mut fields = time.splitn(3, ':');
                (
                    parse_fixed(fields.next()?, 2)? as u8,
                    parse_fixed(fields.next()?, 2)? as u8,
                    parse_fixed(fields.next()?, 2)? as u8,
                )
            }
            None => (0, 0, 0),
        };

        Self::new(year, month, day, hour, minute, second).ok()
    }

    /// Format as RFC 822 / RFC 2822 for RSS `pubDate`.
    ///
    /// Returns e.g. `Wed, 02 Oct 2024 15:00:00 GMT`.
    pub fn to_rfc2822(self) -> String {
        // Zeller's congruence yields 0 = Saturday
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[self.weekday_index()],
            self.day,
            MONTHS[usize::from(self.month - 1)],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// Format as RFC 3339 (`YYYY-MM-DDTHH:MM:SSZ`).
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    fn weekday_index(self) -> usize {
        // Zeller's congruence; January/February count as months 13/14
        // of the previous year.
        let (year, month) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let day = i32::from(self.day);
        let index = (day + (13 * (month + 1)) / 5 + year + year / 4 - year / 100 + year / 400) % 7;
        index as usize
    }
}

const fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Parse an unsigned decimal field of exactly `width` ASCII digits.
fn parse_fixed(s: &str, width: usize) -> Option<u32> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
