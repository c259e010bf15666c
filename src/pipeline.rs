// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Schedule → station/source selection → gaps → block ranges.

use tracing::{debug, info};

use crate::error::Result;
use crate::{extract_gaps, map_gap, IntervalList, RecordingReference, Schedule};

/// Why a run produced nothing to flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NothingToFlag {
    /// No scan involves the station.
    StationAbsent,
    /// The station never observes the source.
    SourceAbsent,
}

/// Outcome of [`find_zap_intervals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZapOutcome {
    /// Block ranges to flag, possibly empty when every gap was shorter than a block.
    Flagged(IntervalList),
    /// The station or the source is missing from the schedule; not an error.
    NothingToFlag(NothingToFlag),
}

impl ZapOutcome {
    /// The intervals, or an empty list for [`ZapOutcome::NothingToFlag`].
    pub fn into_intervals(self) -> IntervalList {
        match self {
            Self::Flagged(list) => list,
            Self::NothingToFlag(_) => IntervalList::new(),
        }
    }
}

/// Off-source block ranges of `station` with respect to `source`.
///
/// `station` matches case-insensitively, `source` exactly.
///
/// # Examples
///
/// ```
/// use qtty::{Day, Seconds};
/// use zapints::{find_zap_intervals, CalendarTimestamp, RecordingReference, Schedule, ScheduleEntry};
///
/// let ts = |s: &str| s.parse::<CalendarTimestamp>().unwrap();
/// let schedule = Schedule::new(
///     "n15dh01a",
///     ts("2015y262d11h30m00s"),
///     vec![
///         ScheduleEntry::new("No0001", "X", ts("2015y262d11h00m00s"), [("Ku", 300)]),
///         ScheduleEntry::new("No0002", "Y", ts("2015y262d11h10m00s"), [("Ku", 300)]),
///         ScheduleEntry::new("No0003", "X", ts("2015y262d11h20m00s"), [("Ku", 300)]),
///     ],
/// )
/// .unwrap();
/// let reference = RecordingReference::new(
///     ts("2015y262d11h00m00s").to_mjd().unwrap(),
///     Seconds::new(300.0).to::<Day>(),
/// )
/// .unwrap();
///
/// let intervals = find_zap_intervals(&schedule, "ku", "X", &reference)
///     .unwrap()
///     .into_intervals();
/// assert_eq!(intervals.to_string(), "1:4,5:6");
/// ```
pub fn find_zap_intervals(
    schedule: &Schedule,
    station: &str,
    source: &str,
    reference: &RecordingReference,
) -> Result<ZapOutcome> {
    let selection = schedule.select(station, source);
    info!(
        scans = schedule.entries().len(),
        with_station = selection.station_scans.len(),
        on_source = selection.on_source.len(),
        station,
        source,
        "selected scans"
    );
    if selection.station_scans.is_empty() {
        return Ok(ZapOutcome::NothingToFlag(NothingToFlag::StationAbsent));
    }

    let Some(walk) = extract_gaps(
        &selection.station_scans,
        &selection.on_source,
        schedule.nominal_stop(),
    )?
    else {
        return Ok(ZapOutcome::NothingToFlag(NothingToFlag::SourceAbsent));
    };
    debug!(gaps = walk.gaps.len(), cursor = %walk.cursor, "gap walk finished");

    let mut intervals = IntervalList::new();
    for gap in &walk.gaps {
        if let Some(range) = map_gap(gap, reference)? {
            intervals.push(range);
        }
    }
    info!(
        ranges = intervals.len(),
        blocks = intervals.total_blocks(),
        "off-source block ranges"
    );
    Ok(ZapOutcome::Flagged(intervals))
}
