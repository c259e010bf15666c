// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use qtty::Seconds;
use tracing::{info, warn};
use zapints::{
    find_zap_intervals, FilterbankHeader, ModifiedJulianDate, RecordingReference, RfifindCommand,
    Schedule, ZapOutcome, HEADER_PROG, SPECTRA_PER_SUBINT,
};

/// Write an `rfifind -zapints` command that flags the blocks of a filterbank
/// recording during which STATION was not observing SOURCE.
#[derive(Parser, Debug)]
#[command(name = "zapints", version, about)]
struct Cli {
    /// Schedule model (JSON)
    schedule: PathBuf,

    /// Source name, exactly as in the schedule
    source: String,

    /// Station name (case-insensitive)
    station: String,

    /// Filterbank file whose start time and sampling are read with `header`
    #[arg(short, long)]
    filterbank: Option<PathBuf>,

    /// Start MJD of the filterbank data, when no file is given
    #[arg(short = 's', long = "startmjd")]
    start_mjd: Option<f64>,

    /// Sample interval of the filterbank data in seconds, when no file is given
    #[arg(short, long)]
    tint: Option<f64>,

    /// Value later passed to `rfifind -blocks`
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    blocks: u32,

    /// Command file to write
    #[arg(short, long, default_value = "zapints.cmd")]
    output: PathBuf,

    /// SIGPROC `header` program
    #[arg(long, env = "ZAPINTS_HEADER_PROG", default_value = HEADER_PROG)]
    header_prog: PathBuf,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;
    run(&cli)
}

fn init_tracing(quiet: bool, verbose: u8) -> Result<()> {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ZAPINTS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.schedule)
        .with_context(|| format!("cannot read schedule {}", cli.schedule.display()))?;
    let schedule: Schedule = serde_json::from_str(&text)
        .with_context(|| format!("invalid schedule {}", cli.schedule.display()))?;
    info!(
        experiment = schedule.experiment(),
        scans = schedule.entries().len(),
        "loaded schedule"
    );

    let header = cli
        .filterbank
        .as_ref()
        .map(|file| FilterbankHeader::read(&cli.header_prog, file))
        .transpose()?;
    let Some(reference) = recording_reference(cli, &schedule, header.as_ref())? else {
        warn!(station = %cli.station, "no scans include the station, nothing to do");
        return Ok(());
    };

    let intervals = match find_zap_intervals(&schedule, &cli.station, &cli.source, &reference)? {
        ZapOutcome::Flagged(list) => list,
        ZapOutcome::NothingToFlag(reason) => {
            warn!(?reason, source = %cli.source, station = %cli.station, "nothing to do");
            return Ok(());
        }
    };

    if let (Some(header), Some(last)) = (&header, intervals.as_slice().last()) {
        let total = header.block_count(cli.blocks);
        if last.stop > total {
            warn!(stop = last.stop, blocks = total, "flagged range runs past the end of the recording");
        }
    }

    let command = RfifindCommand {
        blocks: cli.blocks,
        output_base: schedule.experiment().to_string(),
        intervals,
        filterbank: cli.filterbank.clone(),
    };
    let line = command.to_string();
    fs::write(&cli.output, &line)
        .with_context(|| format!("cannot write {}", cli.output.display()))?;
    info!(path = %cli.output.display(), "wrote command file");
    println!("{line}");
    Ok(())
}

/// Start and block duration from the header, or from the explicit flags.
///
/// Without any start time the first scan of the station is used; `None` means
/// the station has no scans at all.
fn recording_reference(
    cli: &Cli,
    schedule: &Schedule,
    header: Option<&FilterbankHeader>,
) -> Result<Option<RecordingReference>> {
    let (start, tint) = match header {
        Some(h) => (Some(h.start), h.sample_interval),
        None => {
            let Some(tint) = cli.tint else {
                bail!("sample interval unknown: pass --filterbank or --tint");
            };
            (cli.start_mjd.map(ModifiedJulianDate::new), Seconds::new(tint))
        }
    };

    let start = match start {
        Some(start) => start,
        None => {
            let Some(first) = schedule.station_scans(&cli.station).first().map(|s| s.start())
            else {
                return Ok(None);
            };
            warn!(%first, "filterbank start time unspecified, assuming the first scan start");
            first.to_mjd()?
        }
    };

    let reference = RecordingReference::from_sampling(start, tint, SPECTRA_PER_SUBINT, cli.blocks)?;
    Ok(Some(reference))
}
