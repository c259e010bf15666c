// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Off-source gap extraction.
//!
//! The walk threads a cursor through the on-source scans of one station:
//!
//! ```text
//! cursor := start of the station's first scan (any source)
//! for scan in on-source scans:
//!     emit [cursor, scan.start)
//!     cursor := scan.start + dwell(station)
//! if cursor != start of the station's last scan:
//!     emit [cursor, nominal stop)
//! ```
//!
//! Gaps are emitted as found, zero-length ones included; dropping what maps
//! to no whole block is left to [`map_gap`](crate::map_gap).

use tracing::debug;

use crate::error::Result;
use crate::{CalendarTimestamp, Interval, StationScan};

/// Off-source time span `[start, end)` of one station.
pub type Gap = Interval<CalendarTimestamp>;

/// Result of a full walk: the gaps in order and where the cursor stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapWalk {
    pub gaps: Vec<Gap>,
    pub cursor: CalendarTimestamp,
}

/// Walk `on_source` (a subsequence of `station_scans`) and collect the
/// off-source gaps up to `nominal_stop`.
///
/// Returns `None` when either list is empty.
pub fn extract_gaps(
    station_scans: &[StationScan<'_>],
    on_source: &[StationScan<'_>],
    nominal_stop: CalendarTimestamp,
) -> Result<Option<GapWalk>> {
    let (Some(first), Some(last)) = (station_scans.first(), station_scans.last()) else {
        return Ok(None);
    };
    if on_source.is_empty() {
        return Ok(None);
    }

    let (mut gaps, cursor) = on_source.iter().try_fold(
        (Vec::with_capacity(on_source.len() + 1), first.start()),
        |(mut gaps, cursor), scan| -> Result<_> {
            gaps.push(Gap::new(cursor, scan.start()));
            let next = scan.end()?;
            debug!(
                scan = scan.entry().name(),
                dwell_s = scan.dwell_secs(),
                from = %cursor,
                to = %next,
                "on-source scan"
            );
            Ok((gaps, next))
        },
    )?;

    if cursor != last.start() {
        gaps.push(Gap::new(cursor, nominal_stop));
    }

    Ok(Some(GapWalk { gaps, cursor }))
}
