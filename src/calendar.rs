// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Schedule timestamps and their conversions.
//!
//! Observing schedules express instants as *year, day-of-year, hour, minute,
//! second* (written `2015y262d11h56m15s`).  This module converts those
//! timestamps to:
//!
//! - seconds since the start of the year (`86400·doy + 3600·h + 60·m + s`, with
//!   the 1-based day-of-year counted in, so day 1 starts at 86400 s),
//! - a calendar date on the proleptic Gregorian calendar,
//! - Julian Date via the Duffett-Smith & Zwart algorithm (Julian calendar
//!   before 1582-10-15, Gregorian from then on),
//! - Modified Julian Date: the day's `JD − 2 400 000.5` plus the fraction of
//!   the day elapsed.
//!
//! Seconds arithmetic never rolls into the next year: adding past the last day
//! simply yields day-of-year 366, 367, … of the same year.  The calendar-date
//! view does roll over, so MJD stays continuous across the boundary.

use chrono::{Datelike, NaiveDate, TimeDelta};
use qtty::Days;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::{JulianDate, ModifiedJulianDate, MJD};

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// First day of the Gregorian calendar.
const GREGORIAN_CUTOVER: (i32, u32, u32) = (1582, 10, 15);

/// A schedule instant with whole-second resolution.
///
/// Ordering compares the parsed fields (year, day-of-year, hour, minute,
/// second) and never the text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarTimestamp {
    year: i32,
    day_of_year: u16,
    hour: u8,
    minute: u8,
    second: u8,
}

impl CalendarTimestamp {
    /// Build a timestamp, rejecting fields outside their calendar ranges.
    pub fn new(year: i32, day_of_year: u16, hour: u8, minute: u8, second: u8) -> Result<Self> {
        if year <= 0 {
            return Err(Error::invalid(format!("year must be positive, got {year}")));
        }
        if day_of_year == 0 {
            return Err(Error::invalid("day-of-year is 1-based, got 0"));
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(Error::invalid(format!(
                "time of day {hour:02}:{minute:02}:{second:02} out of range"
            )));
        }
        Ok(Self {
            year,
            day_of_year,
            hour,
            minute,
            second,
        })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn day_of_year(&self) -> u16 {
        self.day_of_year
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Seconds since the start of the year, counting the 1-based day-of-year.
    pub fn day_of_year_seconds(&self) -> i64 {
        i64::from(self.second)
            + SECONDS_PER_MINUTE * i64::from(self.minute)
            + SECONDS_PER_HOUR * i64::from(self.hour)
            + SECONDS_PER_DAY * i64::from(self.day_of_year)
    }

    /// Inverse of [`day_of_year_seconds`](Self::day_of_year_seconds).
    ///
    /// Decomposes by truncating division through days, hours and minutes in
    /// that order.  The day-of-year is not wrapped into the following year.
    pub fn from_day_of_year_seconds(seconds: i64, year: i32) -> Result<Self> {
        if seconds < 0 {
            return Err(Error::invalid(format!(
                "seconds-of-year must be non-negative, got {seconds}"
            )));
        }
        if year <= 0 {
            return Err(Error::invalid(format!("year must be positive, got {year}")));
        }
        let day_of_year = u16::try_from(seconds / SECONDS_PER_DAY)
            .map_err(|_| Error::invalid(format!("{seconds} s exceeds the day-of-year range")))?;
        let rem = seconds % SECONDS_PER_DAY;
        let hour = (rem / SECONDS_PER_HOUR) as u8;
        let rem = rem % SECONDS_PER_HOUR;
        let minute = (rem / SECONDS_PER_MINUTE) as u8;
        let second = (rem % SECONDS_PER_MINUTE) as u8;
        Ok(Self {
            year,
            day_of_year,
            hour,
            minute,
            second,
        })
    }

    /// Shift by `delta` seconds within the same year.
    pub fn add_seconds(&self, delta: i64) -> Result<Self> {
        Self::from_day_of_year_seconds(self.day_of_year_seconds() + delta, self.year)
    }

    /// Proleptic Gregorian date of this timestamp.
    ///
    /// A day-of-year beyond the end of the year lands in the next year.
    pub fn calendar_date(&self) -> Result<NaiveDate> {
        let offset = TimeDelta::try_days(i64::from(self.day_of_year) - 1)
            .ok_or_else(|| Error::invalid("day-of-year offset overflows"))?;
        NaiveDate::from_yo_opt(self.year, 1)
            .and_then(|jan1| jan1.checked_add_signed(offset))
            .ok_or_else(|| Error::invalid(format!("{self} is outside the supported calendar")))
    }

    /// `(month, day-of-month)`, both 1-based.
    pub fn month_and_day(&self) -> Result<(u32, u32)> {
        let date = self.calendar_date()?;
        Ok((date.month(), date.day()))
    }

    /// Modified Julian Date of this instant.
    ///
    /// The day boundary is shifted to MJD first, where it is a whole number;
    /// the time of day is added at MJD magnitude.
    pub fn to_mjd(&self) -> Result<ModifiedJulianDate> {
        let date = self.calendar_date()?;
        let midnight = julian_date(date.year(), date.month(), date.day()).to::<MJD>();
        let since_midnight = i64::from(self.hour) * SECONDS_PER_HOUR
            + i64::from(self.minute) * SECONDS_PER_MINUTE
            + i64::from(self.second);
        Ok(midnight + Days::new(since_midnight as f64 / SECONDS_PER_DAY as f64))
    }
}

/// Julian Date of a calendar day (Duffett-Smith & Zwart, *Practical Astronomy
/// with your Calculator or Spreadsheet*, 4th ed.).
///
/// The result sits on the `.5` boundary, i.e. the start of the civil day.
/// Dates before 1582-10-15 are read on the Julian calendar, so 1582-10-04 and
/// 1582-10-15 are consecutive Julian Days.  Intermediate terms truncate toward
/// zero.
pub fn julian_date(year: i32, month: u32, day: u32) -> JulianDate {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let y = f64::from(y);

    let b = if (year, month, day) < GREGORIAN_CUTOVER {
        0.0
    } else {
        let a = (y / 100.0).trunc();
        2.0 - a + (a / 4.0).trunc()
    };
    let c = if y < 0.0 {
        (365.25 * y - 0.75).trunc()
    } else {
        (365.25 * y).trunc()
    };
    let d = (30.6001 * f64::from(m + 1)).trunc();

    JulianDate::new(b + c + d + f64::from(day) + 1_720_994.5)
}

impl fmt::Display for CalendarTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}y{:03}d{:02}h{:02}m{:02}s",
            self.year, self.day_of_year, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for CalendarTimestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let mut rest = text;
        let year = take_field(text, &mut rest, 'y')?;
        let day_of_year = take_field(text, &mut rest, 'd')?;
        let hour = take_field(text, &mut rest, 'h')?;
        let minute = take_field(text, &mut rest, 'm')?;
        let second = take_field(text, &mut rest, 's')?;
        if !rest.is_empty() {
            return Err(Error::parse(text, format!("trailing '{rest}'")));
        }
        Self::new(year, day_of_year, hour, minute, second)
            .map_err(|e| Error::parse(text, e.to_string()))
    }
}

fn take_field<T: FromStr>(text: &str, rest: &mut &str, unit: char) -> Result<T> {
    let (digits, tail) = rest
        .split_once(unit)
        .ok_or_else(|| Error::parse(text, format!("missing '{unit}' field")))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::parse(text, format!("'{digits}{unit}' is not a number")));
    }
    let value = digits
        .parse()
        .map_err(|_| Error::parse(text, format!("'{digits}{unit}' out of range")))?;
    *rest = tail;
    Ok(value)
}

#[cfg(feature = "serde")]
impl serde::Serialize for CalendarTimestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CalendarTimestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
