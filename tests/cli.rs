use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCHEDULE: &str = r#"{
    "experiment": "n15dh01a",
    "nominal_stop": "2015y262d11h30m00s",
    "scans": [
        {"name": "No0001", "source": "X", "start": "2015y262d11h00m00s", "stations": {"stationA": 300}},
        {"name": "No0002", "source": "Y", "start": "2015y262d11h10m00s", "stations": {"stationA": 300}},
        {"name": "No0003", "source": "X", "start": "2015y262d11h20m00s", "stations": {"stationA": 300}}
    ]
}"#;

// 2015-09-19 11:00:00 UTC
const START_MJD: &str = "57284.458333333333";

fn zapints() -> Command {
    let mut cmd = Command::cargo_bin("zapints").unwrap();
    cmd.env_remove("ZAPINTS_LOG").env_remove("ZAPINTS_HEADER_PROG");
    cmd
}

fn workspace(schedule: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("n15dh01a.json");
    fs::write(&path, schedule).unwrap();
    (dir, path)
}

fn output_in(dir: &Path) -> PathBuf {
    dir.join("zapints.cmd")
}

// ============================================================
// Explicit start and sampling
// ============================================================

#[test]
fn test_explicit_start_and_tint() {
    let (dir, schedule) = workspace(SCHEDULE);
    let output = output_in(dir.path());
    zapints()
        .arg(&schedule)
        .args(["X", "stationA", "--startmjd", START_MJD, "--tint", "0.625", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("-zapints 1:4,5:6"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "rfifind -blocks 1 -o n15dh01a -zapints 1:4,5:6"
    );
}

#[test]
fn test_station_is_case_insensitive() {
    let (dir, schedule) = workspace(SCHEDULE);
    let output = output_in(dir.path());
    zapints()
        .arg(&schedule)
        .args(["X", "STATIONA", "-s", START_MJD, "-t", "0.625", "-o"])
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn test_start_defaults_to_first_scan() {
    let (dir, schedule) = workspace(SCHEDULE);
    let output = output_in(dir.path());
    zapints()
        .arg(&schedule)
        .args(["X", "stationA", "--tint", "0.625", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("assuming the first scan start"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "rfifind -blocks 1 -o n15dh01a -zapints 1:4,5:6"
    );
}

#[test]
fn test_blocks_scale_the_grid() {
    let (dir, schedule) = workspace(SCHEDULE);
    let output = output_in(dir.path());
    // 600 s blocks: [11:05, 11:20) → 0:2, [11:25, 11:30) → 2:3
    zapints()
        .arg(&schedule)
        .args(["X", "stationA", "-s", START_MJD, "-t", "0.625", "-b", "2", "-o"])
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "rfifind -blocks 2 -o n15dh01a -zapints 0:2,2:3"
    );
}

// ============================================================
// Nothing to flag
// ============================================================

#[test]
fn test_unknown_source_writes_nothing() {
    let (dir, schedule) = workspace(SCHEDULE);
    let output = output_in(dir.path());
    zapints()
        .arg(&schedule)
        .args(["Z", "stationA", "-s", START_MJD, "-t", "0.625", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("nothing to do"));
    assert!(!output.exists());
}

#[test]
fn test_unknown_station_writes_nothing() {
    let (dir, schedule) = workspace(SCHEDULE);
    let output = output_in(dir.path());
    zapints()
        .arg(&schedule)
        .args(["X", "stationB", "-t", "0.625", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to do"));
    assert!(!output.exists());
}

// ============================================================
// Errors
// ============================================================

#[test]
fn test_missing_tint_fails() {
    let (dir, schedule) = workspace(SCHEDULE);
    zapints()
        .arg(&schedule)
        .args(["X", "stationA", "-s", START_MJD, "-o"])
        .arg(output_in(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample interval unknown"));
}

#[test]
fn test_zero_blocks_rejected() {
    let (dir, schedule) = workspace(SCHEDULE);
    zapints()
        .arg(&schedule)
        .args(["X", "stationA", "-t", "0.625", "-b", "0", "-o"])
        .arg(output_in(dir.path()))
        .assert()
        .failure();
}

#[test]
fn test_out_of_order_schedule_fails() {
    let (dir, schedule) = workspace(
        r#"{
            "experiment": "bad",
            "nominal_stop": "2015y262d12h00m00s",
            "scans": [
                {"name": "a", "source": "X", "start": "2015y262d11h20m00s", "stations": {"Ku": 60}},
                {"name": "b", "source": "X", "start": "2015y262d11h00m00s", "stations": {"Ku": 60}}
            ]
        }"#,
    );
    zapints()
        .arg(&schedule)
        .args(["X", "Ku", "-t", "0.625", "-o"])
        .arg(output_in(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("starts before"));
}

#[test]
fn test_missing_schedule_fails() {
    let dir = tempfile::tempdir().unwrap();
    zapints()
        .arg(dir.path().join("absent.json"))
        .args(["X", "Ku", "-t", "0.625"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read schedule"));
}

// ============================================================
// Header utility
// ============================================================

/// A stand-in for SIGPROC `header`, run as `sh FILE -field`.
#[cfg(unix)]
const FAKE_HEADER: &str = r#"case "$1" in
    -tstart) echo 57284.458333333333 ;;
    -tsamp) echo 625000 ;;
    -nsamples) echo 2880 ;;
    *) echo "Unknown parameter $1" >&2; exit 1 ;;
esac
"#;

#[cfg(unix)]
#[test]
fn test_filterbank_header_supplies_sampling() {
    let (dir, schedule) = workspace(SCHEDULE);
    let filterbank = dir.path().join("n15dh01a_Ku.fil");
    fs::write(&filterbank, FAKE_HEADER).unwrap();
    let output = output_in(dir.path());

    zapints()
        .arg(&schedule)
        .args(["X", "stationA", "--header-prog", "sh", "-f"])
        .arg(&filterbank)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let expected = format!(
        "rfifind -blocks 1 -o n15dh01a -zapints 1:4,5:6 -filterbank {}",
        filterbank.display()
    );
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
}

#[cfg(unix)]
#[test]
fn test_header_sampling_is_logged() {
    let (dir, schedule) = workspace(SCHEDULE);
    let filterbank = dir.path().join("n15dh01a_Ku.fil");
    fs::write(&filterbank, FAKE_HEADER).unwrap();

    zapints()
        .arg(&schedule)
        .args(["X", "stationA", "-v", "--header-prog", "sh", "-f"])
        .arg(&filterbank)
        .arg("-o")
        .arg(output_in(dir.path()))
        .assert()
        .success()
        .stderr(predicate::str::contains("determined start time and sampling"))
        .stderr(predicate::str::contains("duration_s"));
}

#[cfg(unix)]
#[test]
fn test_failing_header_program_fails() {
    let (dir, schedule) = workspace(SCHEDULE);
    let filterbank = dir.path().join("broken.fil");
    fs::write(&filterbank, "exit 3\n").unwrap();

    zapints()
        .arg(&schedule)
        .args(["X", "stationA", "--header-prog", "sh", "-f"])
        .arg(&filterbank)
        .arg("-o")
        .arg(output_in(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("tstart"));
}
