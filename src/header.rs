// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Filterbank recording geometry read through SIGPROC's `header` utility.
//!
//! `header FILE -tstart` prints the start MJD, `-tsamp` the sample interval in
//! microseconds and `-nsamples` the sample count, one number each.

use std::path::Path;
use std::process::Command;

use qtty::{Day, Days, Second, Seconds};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::{ModifiedJulianDate, RecordingReference, SPECTRA_PER_SUBINT};

/// Default name of the SIGPROC header tool.
pub const HEADER_PROG: &str = "header";

/// Start time and sampling of a filterbank file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterbankHeader {
    pub start: ModifiedJulianDate,
    pub sample_interval: Seconds,
    pub samples: u64,
}

impl FilterbankHeader {
    /// Query `program` for the three header fields of `file`.
    pub fn read(program: impl AsRef<Path>, file: impl AsRef<Path>) -> Result<Self> {
        let program = program.as_ref();
        let file = file.as_ref();
        let start: f64 = parse_field("tstart", &query(program, file, "tstart")?)?;
        let tsamp_us: f64 = parse_field("tsamp", &query(program, file, "tsamp")?)?;
        let samples: u64 = parse_field("nsamples", &query(program, file, "nsamples")?)?;
        let header = Self::from_fields(start, tsamp_us, samples)?;
        info!(
            file = %file.display(),
            start_mjd = header.start.value(),
            tsamp_us,
            samples,
            duration_s = header.duration().to::<Second>().value(),
            "determined start time and sampling"
        );
        Ok(header)
    }

    /// Assemble from raw header values; `tsamp_us` is in microseconds.
    pub fn from_fields(start_mjd: f64, tsamp_us: f64, samples: u64) -> Result<Self> {
        if !start_mjd.is_finite() {
            return Err(Error::header("tstart", format!("{start_mjd} is not finite")));
        }
        if !tsamp_us.is_finite() || tsamp_us <= 0.0 {
            return Err(Error::header("tsamp", format!("{tsamp_us} us is not a positive interval")));
        }
        Ok(Self {
            start: ModifiedJulianDate::new(start_mjd),
            sample_interval: Seconds::new(tsamp_us * 1e-6),
            samples,
        })
    }

    /// Length of the recording.
    pub fn duration(&self) -> Days {
        Seconds::new(self.sample_interval.value() * self.samples as f64).to::<Day>()
    }

    /// Number of `rfifind` blocks in the recording, counting a trailing partial one.
    pub fn block_count(&self, blocks: u32) -> u64 {
        let per_block = u64::from(SPECTRA_PER_SUBINT) * u64::from(blocks.max(1));
        self.samples.div_ceil(per_block)
    }

    /// Block geometry for `rfifind -blocks blocks`.
    pub fn recording_reference(&self, blocks: u32) -> Result<RecordingReference> {
        RecordingReference::from_sampling(
            self.start,
            self.sample_interval,
            SPECTRA_PER_SUBINT,
            blocks,
        )
    }
}

fn query(program: &Path, file: &Path, field: &str) -> Result<String> {
    debug!(program = %program.display(), file = %file.display(), field, "querying header");
    let output = Command::new(program)
        .arg(file)
        .arg(format!("-{field}"))
        .output()
        .map_err(|e| {
            Error::header(field, format!("cannot run '{}': {e}", program.display()))
        })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::header(
            field,
            format!("'{}' exited with {}: {}", program.display(), output.status, stderr.trim()),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn parse_field<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    let text = raw.trim();
    text.parse()
        .map_err(|_| Error::header(field, format!("'{text}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numbers() {
        assert_eq!(parse_field::<f64>("tstart", " 57284.458333\n").unwrap(), 57_284.458_333);
        assert_eq!(parse_field::<u64>("nsamples", "1048576\n").unwrap(), 1_048_576);
        assert!(matches!(
            parse_field::<f64>("tsamp", "Unknown parameter"),
            Err(Error::Header { .. })
        ));
    }

    #[test]
    fn converts_microseconds() {
        let header = FilterbankHeader::from_fields(57_284.5, 64.0, 480 * 1_000).unwrap();
        assert!((header.sample_interval.value() - 64e-6).abs() < 1e-15);
        assert!((header.duration().value() - 30.72 / 86_400.0).abs() < 1e-12);
        assert_eq!(header.block_count(1), 1_000);
        assert_eq!(header.block_count(3), 334);
    }

    #[test]
    fn rejects_bad_sampling() {
        assert!(FilterbankHeader::from_fields(57_284.5, 0.0, 10).is_err());
        assert!(FilterbankHeader::from_fields(f64::NAN, 64.0, 10).is_err());
    }

    #[test]
    fn reference_uses_rfifind_block_size() {
        let header = FilterbankHeader::from_fields(57_284.5, 100.0, 0).unwrap();
        let reference = header.recording_reference(2).unwrap();
        let expected = 100e-6 * 480.0 * 2.0 / 86_400.0;
        assert!((reference.block_duration().value() - expected).abs() < 1e-15);
        assert_eq!(reference.start(), header.start);
    }

    #[test]
    fn missing_program_is_a_header_error() {
        let err = FilterbankHeader::read("/nonexistent/zapints-header", "x.fil").unwrap_err();
        assert!(matches!(err, Error::Header { ref field, .. } if field == "tstart"));
    }
}
