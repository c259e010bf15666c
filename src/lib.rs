// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Off-source flagging intervals from VLBI observing schedules.
//!
//! Given a decoded observing [`Schedule`], a station and a source, this crate
//! finds the time ranges during which the station was *not* dwelling on the
//! source and expresses them as block ranges of a filterbank recording,
//! ready for PRESTO `rfifind -zapints`.
//!
//! # Pipeline
//!
//! | Step | Item |
//! |------|------|
//! | select the station's scans, then those on the source | [`Schedule::select`] |
//! | walk the selection into off-source [`Gap`]s | [`extract_gaps`] |
//! | floor/ceil each gap onto the block grid | [`map_gap`] |
//! | collect non-empty ranges in order | [`IntervalList`] |
//!
//! [`find_zap_intervals`] runs all four steps.
//!
//! # Time
//!
//! - [`CalendarTimestamp`] — `2015y262d11h56m15s` schedule instants.
//! - [`Time<S>`] — day count on scale `S`; [`JulianDate`] and
//!   [`ModifiedJulianDate`] are its aliases.
//! - [`julian_date`] — calendar day to Julian Date across the 1582 cutover.

mod blocks;
mod calendar;
mod command;
mod error;
mod gaps;
mod header;
pub(crate) mod instant;
mod period;
mod pipeline;
mod schedule;
pub(crate) mod scales;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use blocks::{
    map_gap, map_period, BlockRange, IntervalList, RecordingReference, BLOCK_SNAP,
    SPECTRA_PER_SUBINT,
};
pub use calendar::{julian_date, CalendarTimestamp};
pub use command::RfifindCommand;
pub use error::{Error, Result};
pub use gaps::{extract_gaps, Gap, GapWalk};
pub use header::{FilterbankHeader, HEADER_PROG};
pub use instant::{Time, TimeScale};
pub use period::{Interval, Period};
pub use pipeline::{find_zap_intervals, NothingToFlag, ZapOutcome};
pub use schedule::{
    involves_station, is_on_source, on_source, ScanSelection, Schedule, ScheduleEntry,
    StationScan,
};
pub use scales::{JD, MJD};

/// Julian Date — day count since the Julian Period epoch.
pub type JulianDate = Time<JD>;

/// Modified Julian Date — `JD − 2 400 000.5`.
pub type ModifiedJulianDate = Time<MJD>;
