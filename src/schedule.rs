// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observing schedule model and scan selection.
//!
//! A [`Schedule`] is the decoded form of an observing plan: scans in start
//! order, each naming a source and listing the stations that take part with
//! their dwell time in seconds.  It is built once and only ever read.
//!
//! Selection is two independent predicates applied one after the other:
//! [`involves_station`] (case-insensitive) and then [`is_on_source`]
//! (exact).  The station-only result is kept because the off-source walk
//! starts from the first scan of the station, whatever its source.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::CalendarTimestamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One scan of the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleEntry {
    name: String,
    source: String,
    start: CalendarTimestamp,
    #[cfg_attr(feature = "serde", serde(rename = "stations"))]
    dwell: BTreeMap<String, u32>,
}

impl ScheduleEntry {
    /// `dwell` maps station identifiers to their on-source time in seconds.
    pub fn new<I, K>(
        name: impl Into<String>,
        source: impl Into<String>,
        start: CalendarTimestamp,
        dwell: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        Self {
            name: name.into(),
            source: source.into(),
            start,
            dwell: dwell.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn start(&self) -> CalendarTimestamp {
        self.start
    }

    pub fn stations(&self) -> impl Iterator<Item = &str> {
        self.dwell.keys().map(String::as_str)
    }

    /// Dwell of `station` in seconds; station names compare case-insensitively.
    pub fn dwell_for(&self, station: &str) -> Option<u32> {
        self.dwell
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(station))
            .map(|(_, &secs)| secs)
    }
}

/// The whole observing session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ScheduleModel"))]
pub struct Schedule {
    experiment: String,
    nominal_stop: CalendarTimestamp,
    #[cfg_attr(feature = "serde", serde(rename = "scans"))]
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Build a schedule, verifying that scan starts never go backwards.
    pub fn new(
        experiment: impl Into<String>,
        nominal_stop: CalendarTimestamp,
        entries: Vec<ScheduleEntry>,
    ) -> Result<Self> {
        if let Some(pos) = entries.windows(2).position(|w| w[1].start < w[0].start) {
            return Err(Error::OutOfOrder { index: pos + 1 });
        }
        Ok(Self {
            experiment: experiment.into(),
            nominal_stop,
            entries,
        })
    }

    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    pub fn nominal_stop(&self) -> CalendarTimestamp {
        self.nominal_stop
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Scans in which `station` takes part, in schedule order.
    pub fn station_scans(&self, station: &str) -> Vec<StationScan<'_>> {
        self.entries
            .iter()
            .filter(|entry| involves_station(entry, station))
            .filter_map(|entry| StationScan::new(entry, station))
            .collect()
    }

    /// Both filter stages for one station and source.
    pub fn select(&self, station: &str, source: &str) -> ScanSelection<'_> {
        let station_scans = self.station_scans(station);
        let on_source = on_source(&station_scans, source);
        ScanSelection {
            station_scans,
            on_source,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct ScheduleModel {
    experiment: String,
    nominal_stop: CalendarTimestamp,
    scans: Vec<ScheduleEntry>,
}

#[cfg(feature = "serde")]
impl TryFrom<ScheduleModel> for Schedule {
    type Error = Error;

    fn try_from(raw: ScheduleModel) -> Result<Self> {
        Schedule::new(raw.experiment, raw.nominal_stop, raw.scans)
    }
}

/// A scan seen from one station, with that station's dwell resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationScan<'a> {
    entry: &'a ScheduleEntry,
    dwell_secs: u32,
}

impl<'a> StationScan<'a> {
    /// `None` when `station` is not part of the scan.
    pub fn new(entry: &'a ScheduleEntry, station: &str) -> Option<Self> {
        entry
            .dwell_for(station)
            .map(|dwell_secs| Self { entry, dwell_secs })
    }

    pub fn entry(&self) -> &'a ScheduleEntry {
        self.entry
    }

    pub fn start(&self) -> CalendarTimestamp {
        self.entry.start
    }

    pub fn dwell_secs(&self) -> u32 {
        self.dwell_secs
    }

    /// End of the station's dwell.
    pub fn end(&self) -> Result<CalendarTimestamp> {
        self.entry.start.add_seconds(i64::from(self.dwell_secs))
    }
}

/// Output of [`Schedule::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSelection<'a> {
    /// Every scan involving the station.
    pub station_scans: Vec<StationScan<'a>>,
    /// The subset of `station_scans` on the target source.
    pub on_source: Vec<StationScan<'a>>,
}

/// `true` when `station` has a dwell entry in the scan (case-insensitive).
pub fn involves_station(entry: &ScheduleEntry, station: &str) -> bool {
    entry.dwell_for(station).is_some()
}

/// `true` when the scan observes exactly `source`.
pub fn is_on_source(entry: &ScheduleEntry, source: &str) -> bool {
    entry.source == source
}

/// Keep the scans on `source`, preserving order.
pub fn on_source<'a>(scans: &[StationScan<'a>], source: &str) -> Vec<StationScan<'a>> {
    scans
        .iter()
        .filter(|scan| is_on_source(scan.entry, source))
        .copied()
        .collect()
}
