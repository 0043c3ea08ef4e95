//! Alarm time computation over arbitrary clocks and timezones

use proptest::prelude::*;
use weatherwake_connectors::{next_alarm_epoch, Preference};

proptest! {
    #[test]
    fn next_alarm_is_within_one_day_ahead(
        hour in 0u32..24,
        minute in 0u32..60,
        now in 0i64..2_000_000_000,
        tz in -840i32..=840,
    ) {
        let local_now = now + 60 * i64::from(tz);
        let epoch = next_alarm_epoch(hour, minute, now, tz).unwrap();

        prop_assert!(epoch >= local_now);
        prop_assert!(epoch < local_now + 86_400);
        prop_assert_eq!(epoch.rem_euclid(86_400), i64::from(hour * 3600 + minute * 60));
    }

    #[test]
    fn clock_text_round_trips(hour in 0u32..24, minute in 0u32..60) {
        let text = format!("{:02}:{:02}", hour, minute);
        prop_assert_eq!(Preference::parse("alarm", &text), Ok(Preference::Alarm { hour, minute }));
    }

    #[test]
    fn out_of_range_clock_is_rejected(hour in 24u32..100, minute in 0u32..60) {
        let text = format!("{}:{:02}", hour, minute);
        prop_assert!(Preference::parse("alarm", &text).is_err());
    }
}
