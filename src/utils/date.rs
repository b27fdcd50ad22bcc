//! Calendar dates for blog posts, without timezone dependencies.
//!
//! Posts carry a day-precision date written for humans in the `postDate`
//! block (`March 1, 2021`). Feeds and sitemaps need it machine-readable,
//! at UTC midnight.
//!
//! # Examples
//!
//! ```ignore
//! let date = PostDate::parse_long("January 5th, 2021").unwrap();
//! assert_eq!(date.ymd(), "2021-01-05");
//! assert_eq!(date.to_rfc3339(), "2021-01-05T00:00:00Z");
//! assert_eq!(date.to_rfc2822(), "Tue, 05 Jan 2021 00:00:00 GMT");
//! ```

use anyhow::{Result, bail};
use serde::{Serialize, Serializer};
use std::fmt;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar day. Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl PostDate {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        let date = Self { year, month, day };
        date.validate()?;
        Ok(date)
    }

    /// Parse `"<Month> <day>[st|nd|rd|th], <year>"`, e.g. `"March 1, 2021"`.
    ///
    /// The month must be the full English name (case-insensitive); the
    /// year must have four digits.
    pub fn parse_long(s: &str) -> Option<Self> {
        let (month_day, year) = s.trim().split_once(',')?;
        let mut parts = month_day.split_whitespace();
        let (month_name, day) = (parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        let month = MONTHS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(month_name))?;

        let day = strip_ordinal(day);
        if day.is_empty() || day.len() > 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let day: u8 = day.parse().ok()?;

        let year = year.trim();
        if year.len() != 4 {
            return None;
        }
        let year = parse_u16(year.as_bytes())?;

        Self::new(year, month as u8 + 1, day).ok()
    }

    /// Parse `YYYY-MM-DD`.
    pub fn parse_iso(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let year = parse_u16(&bytes[0..4])?;
        let month = parse_u8(&bytes[5..7])?;
        let day = parse_u8(&bytes[8..10])?;
        Self::new(year, month, day).ok()
    }

    pub fn validate(&self) -> Result<()> {
        let Self { year, month, day } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }
        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// `YYYY-MM-DD`, used for sitemap `<lastmod>`.
    pub fn ymd(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Format as RFC 3339 at UTC midnight, for Atom feeds.
    pub fn to_rfc3339(self) -> String {
        format!("{}T00:00:00Z", self.ymd())
    }

    /// Format as RFC 2822 at UTC midnight, for RSS `pubDate`.
    pub fn to_rfc2822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];

        format!(
            "{}, {:02} {} {:04} 00:00:00 GMT",
            WEEKDAYS[self.weekday_index()],
            self.day,
            &MONTHS[(self.month - 1) as usize][..3],
            self.year,
        )
    }

    /// Zeller's congruence, 0 = Saturday.
    #[inline]
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(self) -> usize {
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

/// Long form without ordinal, e.g. `March 1, 2021`.
impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {:04}",
            MONTHS[(self.month - 1) as usize],
            self.day,
            self.year
        )
    }
}

impl Serialize for PostDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn strip_ordinal(day: &str) -> &str {
    ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| day.strip_suffix(suffix))
        .unwrap_or(day)
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}
