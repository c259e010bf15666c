// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Mapping gaps onto sample-block indices.
//!
//! A recording is cut into blocks of fixed duration starting at a reference
//! MJD.  A gap `[t0, t1)` becomes the block range
//!
//! ```text
//! start = max(0, floor((t0 - ref) / block))
//! stop  = max(0, ceil ((t1 - ref) / block))
//! ```
//!
//! so the range always covers the whole gap.  An MJD near 57000 resolves only
//! about 0.6 µs, which is a visible fraction of a 30 ms `rfifind` block.
//! Quotients closer to an integer than that noise (and never less than
//! [`BLOCK_SNAP`]) are taken as the integer first, so an exact block boundary
//! does not turn into an extra block.  Ranges with `start >= stop` are dropped.

use qtty::{Day, Days, Seconds, Simplify};
use std::fmt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::{Gap, ModifiedJulianDate, Period, MJD};

/// Spectra per block in SIGPROC filterbank input to `rfifind`.
pub const SPECTRA_PER_SUBINT: u32 = 480;

/// Smallest fraction of a block below which a quotient snaps to the nearest
/// integer.
pub const BLOCK_SNAP: f64 = 1e-6;

/// Float noise of an MJD difference, in units of `f64::EPSILON × |MJD|`.
const MJD_NOISE: f64 = 4.0;

/// Start and block geometry of the recording being flagged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordingReference {
    start: ModifiedJulianDate,
    block_duration: Days,
}

impl RecordingReference {
    pub fn new(start: ModifiedJulianDate, block_duration: Days) -> Result<Self> {
        if !start.is_finite() {
            return Err(Error::invalid(format!("start MJD {} is not finite", start.value())));
        }
        let block = block_duration.value();
        if !block.is_finite() || block <= 0.0 {
            return Err(Error::invalid(format!(
                "block duration must be positive, got {block} d"
            )));
        }
        Ok(Self {
            start,
            block_duration,
        })
    }

    /// Block duration from the sampling: `sample_interval × samples_per_block × blocks`.
    pub fn from_sampling(
        start: ModifiedJulianDate,
        sample_interval: Seconds,
        samples_per_block: u32,
        blocks: u32,
    ) -> Result<Self> {
        let per_block = sample_interval.value() * f64::from(samples_per_block) * f64::from(blocks);
        Self::new(start, Seconds::new(per_block).to::<Day>())
    }

    pub fn start(&self) -> ModifiedJulianDate {
        self.start
    }

    pub fn block_duration(&self) -> Days {
        self.block_duration
    }

    fn blocks_since_start(&self, t: ModifiedJulianDate) -> f64 {
        let quotient = ((t - self.start) / self.block_duration).simplify().value();
        snap(quotient, self.snap_tolerance(t))
    }

    /// Tolerance, in blocks, for reading [`blocks_since_start`](Self::blocks_since_start)
    /// as a whole number.
    fn snap_tolerance(&self, t: ModifiedJulianDate) -> f64 {
        let magnitude = t.value().abs().max(self.start.value().abs());
        let noise = MJD_NOISE * f64::EPSILON * magnitude;
        (noise / self.block_duration.value()).max(BLOCK_SNAP)
    }
}

/// Half-open block range `[start, stop)`, written `start:stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRange {
    pub start: u64,
    pub stop: u64,
}

impl BlockRange {
    pub fn len(&self) -> u64 {
        self.stop.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.stop
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.stop)
    }
}

fn snap(x: f64, tolerance: f64) -> f64 {
    let nearest = x.round();
    if (x - nearest).abs() < tolerance {
        nearest
    } else {
        x
    }
}

fn to_index(x: f64) -> u64 {
    // NaN is excluded by the finiteness checks; saturating cast for the rest.
    x.max(0.0) as u64
}

/// Block range covering `period`, or `None` when it spans no whole block.
pub fn map_period(period: &Period<MJD>, reference: &RecordingReference) -> Result<Option<BlockRange>> {
    if !period.start.is_finite() || !period.end.is_finite() {
        return Err(Error::invalid(format!("non-finite period {period}")));
    }
    let start = to_index(reference.blocks_since_start(period.start).floor());
    let stop = to_index(reference.blocks_since_start(period.end).ceil());
    let range = BlockRange { start, stop };
    Ok((!range.is_empty()).then_some(range))
}

/// [`map_period`] for a schedule gap.
pub fn map_gap(gap: &Gap, reference: &RecordingReference) -> Result<Option<BlockRange>> {
    let mapped = map_period(&gap.to_mjd()?, reference)?;
    match mapped {
        Some(range) => debug!(%gap, %range, "flag"),
        None => debug!(%gap, "gap spans no whole block"),
    }
    Ok(mapped)
}

/// Ordered list of block ranges to flag, written `a:b,c:d,...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalList {
    ranges: Vec<BlockRange>,
}

impl IntervalList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append in arrival order; empty ranges are ignored.
    pub fn push(&mut self, range: BlockRange) {
        if !range.is_empty() {
            self.ranges.push(range);
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn as_slice(&self) -> &[BlockRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlockRange> {
        self.ranges.iter()
    }

    /// Total number of flagged blocks.
    pub fn total_blocks(&self) -> u64 {
        self.ranges.iter().map(BlockRange::len).sum()
    }

}

impl Extend<BlockRange> for IntervalList {
    fn extend<I: IntoIterator<Item = BlockRange>>(&mut self, iter: I) {
        for range in iter {
            self.push(range);
        }
    }
}

impl FromIterator<BlockRange> for IntervalList {
    fn from_iter<I: IntoIterator<Item = BlockRange>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a IntervalList {
    type Item = &'a BlockRange;
    type IntoIter = std::slice::Iter<'a, BlockRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for IntervalList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}
