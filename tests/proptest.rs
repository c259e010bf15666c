use proptest::prelude::*;
use zapints::CalendarTimestamp;

fn arb_timestamp_in(years: std::ops::Range<i32>) -> impl Strategy<Value = CalendarTimestamp> {
    (years, 1u16..=366, 0u8..24, 0u8..60, 0u8..60)
        .prop_map(|(y, d, h, m, s)| CalendarTimestamp::new(y, d, h, m, s).unwrap())
}

fn arb_timestamp() -> impl Strategy<Value = CalendarTimestamp> {
    arb_timestamp_in(1..3000)
}

/// Gregorian-only years; Julian Dates jump backwards inside October 1582.
fn arb_gregorian_timestamp() -> impl Strategy<Value = CalendarTimestamp> {
    arb_timestamp_in(1583..3000)
}

proptest! {
    #[test]
    fn day_of_year_seconds_roundtrip(t in arb_timestamp()) {
        let secs = t.day_of_year_seconds();
        let back = CalendarTimestamp::from_day_of_year_seconds(secs, t.year()).unwrap();
        prop_assert_eq!(back, t);
    }

    #[test]
    fn text_form_roundtrip(t in arb_timestamp()) {
        let back: CalendarTimestamp = t.to_string().parse().unwrap();
        prop_assert_eq!(back, t);
    }

    #[test]
    fn mjd_increases_with_time(t in arb_gregorian_timestamp(), delta in 1i64..(30 * 86_400)) {
        let later = t.add_seconds(delta).unwrap();
        prop_assert!(t < later);
        prop_assert!(t.to_mjd().unwrap() < later.to_mjd().unwrap());
    }

    #[test]
    fn add_then_subtract_is_identity(t in arb_timestamp(), delta in 0i64..(30 * 86_400)) {
        let back = t.add_seconds(delta).unwrap().add_seconds(-delta).unwrap();
        prop_assert_eq!(back, t);
    }
}
