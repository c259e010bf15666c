use qtty::{Day, Seconds};
use zapints::{find_zap_intervals, RecordingReference, Schedule, ScheduleEntry};

fn main() -> zapints::Result<()> {
    let schedule = Schedule::new(
        "n15dh01a",
        "2015y262d11h30m00s".parse()?,
        vec![
            ScheduleEntry::new("No0001", "X", "2015y262d11h00m00s".parse()?, [("Ku", 300)]),
            ScheduleEntry::new("No0002", "Y", "2015y262d11h10m00s".parse()?, [("Ku", 300)]),
            ScheduleEntry::new("No0003", "X", "2015y262d11h20m00s".parse()?, [("Ku", 300)]),
        ],
    )?;

    let first = schedule.entries()[0].start();
    let reference = RecordingReference::new(first.to_mjd()?, Seconds::new(300.0).to::<Day>())?;

    println!("recording start: {}", reference.start());
    let intervals = find_zap_intervals(&schedule, "Ku", "X", &reference)?.into_intervals();
    println!("-zapints {intervals}");
    Ok(())
}
