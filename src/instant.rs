// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-parameterised day-count instant.
//!
//! [`Time<S>`] stores a single [`Days`] quantity whose epoch is fixed by the
//! compile-time marker `S: TimeScale`.  Schedules and filterbank headers both
//! label their instants in UTC, so the scales used here are plain epoch
//! counters on that axis: converting between them is a constant offset and no
//! ΔT or leap-second correction is ever applied.

use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for day-count scales.
///
/// A scale is a label plus the offset between its native day count and the
/// absolute Julian Day.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a day count on this scale to an absolute Julian Day.
    fn to_jd(value: Days) -> Days;

    /// Convert an absolute Julian Day back to this scale's day count.
    fn from_jd(jd: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>
// ═══════════════════════════════════════════════════════════════════════════

/// A point on day-count scale `S`.
///
/// Layout-identical to a single `f64`; `PhantomData` is zero-sized.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Create from a raw scalar (days since the scale's epoch).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Build an instant from an absolute Julian Day.
    #[inline]
    pub fn from_julian_day(jd: Days) -> Self {
        Self::from_days(S::from_jd(jd))
    }

    /// Convert this instant to another scale through the absolute Julian Day.
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day(S::to_jd(self.quantity))
    }

    /// `true` when the underlying value is neither NaN nor infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.value().is_finite()
    }
}

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.12}", S::LABEL, self.value())
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::super::scales::{JD, MJD};
    use super::*;

    #[test]
    fn mjd_to_jd_applies_epoch_offset() {
        let mjd = Time::<MJD>::new(51_544.5);
        let jd = mjd.to::<JD>();
        assert_eq!(jd.quantity(), Days::new(2_451_545.0));
    }

    #[test]
    fn jd_to_mjd_roundtrip() {
        let jd = Time::<JD>::new(2_457_284.958_333);
        let back = jd.to::<MJD>().to::<JD>();
        assert!((back.quantity() - jd.quantity()).abs() < Days::new(1e-9));
    }

    #[test]
    fn add_days() {
        let mjd = Time::<MJD>::new(57_284.0);
        assert_eq!((mjd + Days::new(0.25)).value(), 57_284.25);
        assert_eq!((mjd + Days::new(-1.0)).value(), 57_283.0);
    }

    #[test]
    fn difference_is_days() {
        let a = Time::<MJD>::new(57_284.5);
        let b = Time::<MJD>::new(57_284.0);
        assert_eq!(a - b, Days::new(0.5));
        assert!(b < a);
    }

    #[test]
    fn display_carries_label() {
        let s = format!("{}", Time::<MJD>::new(57_284.5));
        assert!(s.starts_with("MJD 57284.5"));
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!Time::<MJD>::new(f64::NAN).is_finite());
        assert!(Time::<MJD>::new(0.0).is_finite());
    }
}
