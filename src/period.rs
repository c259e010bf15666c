// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open time intervals.
//!
//! - [`Interval<T>`]: `[start, end)` over any ordered instant type
//! - [`Period<S>`]: alias for `Interval<Time<S>>`
//!
//! Off-source gaps are `Interval<CalendarTimestamp>` (see [`Gap`](crate::Gap));
//! block mapping works on their [`Period<MJD>`] view.

use super::{CalendarTimestamp, Time, MJD};
use crate::error::Result;
use std::fmt;

/// An interval `[start, end)` between two instants.
///
/// # Examples
///
/// ```
/// use zapints::{CalendarTimestamp, Interval};
///
/// let start: CalendarTimestamp = "2015y262d12h00m00s".parse()?;
/// let period = Interval::new(start, start.add_seconds(43_200)?).to_mjd()?;
/// assert_eq!((period.start.value(), period.end.value()), (57284.5, 57285.0));
/// # Ok::<(), zapints::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
}

/// Day-count period alias, e.g. `Period<MJD>`.
pub type Period<S> = Interval<Time<S>>;

impl<T: Copy + PartialOrd> Interval<T> {
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// `true` when the interval covers nothing (`start >= end`).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl Interval<CalendarTimestamp> {
    /// The same interval expressed in Modified Julian Date.
    pub fn to_mjd(&self) -> Result<Period<MJD>> {
        Ok(Interval::new(self.start.to_mjd()?, self.end.to_mjd()?))
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
