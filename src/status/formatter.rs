use chrono::{
    format::{parse, Item, Parsed, StrftimeItems},
    DateTime, NaiveTime, TimeZone,
};
use chrono_tz::Tz;
use tracing::debug;

use crate::{
    cafe::cafe::Cafe,
    error::StatusError,
    timing::{clock::Clock, schedule::Opening},
    DISPLAY_TIME_FORMAT,
};

use super::display::StatusDisplay;

/// Decides whether a cafe is open and builds the hours line for it.
///
/// The strftime items are built once here and reused for formatting and
/// parsing. Nothing is mutated after construction so one formatter can be
/// shared between threads.
pub struct CafeStatusFormatter {
    time_items: Vec<Item<'static>>,
}

impl Default for CafeStatusFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CafeStatusFormatter {
    pub fn new() -> Self {
        Self {
            time_items: StrftimeItems::new(DISPLAY_TIME_FORMAT).collect(),
        }
    }

    /// Status of `cafe` at `now`, judged against the hours of `now`'s weekday
    /// and any late shift carried over from the day before.
    ///
    /// Fails with `InvalidSchedule` when the cafe does not carry one entry per
    /// weekday. The caller should show the hours as unavailable in that case.
    pub fn describe_status<Z: TimeZone>(
        &self,
        cafe: &Cafe,
        now: &DateTime<Z>,
    ) -> Result<StatusDisplay, StatusError> {
        let opening = cafe.status_at(now)?;
        debug!(cafe = %cafe.name, ?opening, "Evaluated status");

        let display = match opening {
            Opening::Open { closes } => StatusDisplay::open(&self.format_time(closes)),
            Opening::Closed { opens } => StatusDisplay::closed(&self.format_time(opens)),
        };
        Ok(display)
    }

    /// Reads `clock` in `timezone` and describes the status at that moment.
    pub fn describe_status_at(
        &self,
        cafe: &Cafe,
        clock: &dyn Clock,
        timezone: Tz,
    ) -> Result<StatusDisplay, StatusError> {
        let now = clock.now_in(timezone)?;
        self.describe_status(cafe, &now)
    }

    /// 12 hour clock without a leading zero, e.g. "9:00 AM".
    pub fn format_time(&self, time: NaiveTime) -> String {
        time.format_with_items(self.time_items.iter()).to_string()
    }

    /// Inverse of `format_time`, read with the same items. The AM/PM suffix is
    /// case insensitive.
    pub fn parse_formatted(&self, text: &str) -> Result<NaiveTime, StatusError> {
        let mut parsed = Parsed::default();
        parse(&mut parsed, text.trim(), self.time_items.iter())
            .and_then(|_| parsed.to_naive_time())
            .map_err(|err| StatusError::UnparseableTime(format!("{} ({})", text, err)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
    use chrono_tz::Pacific;

    use crate::timing::{clock::FixedClock, daily::Daily, schedule::Schedule};

    use super::*;

    fn cafe_with(schedule: Schedule) -> Cafe {
        Cafe {
            name: "Flight Coffee Hangar".to_string(),
            address: "119 Dixon St, Wellington".to_string(),
            description: "Roastery and brunch".to_string(),
            rating: 4,
            images: vec!["hangar.jpg".to_string()],
            opening_hours: schedule,
        }
    }

    fn nine_to_five() -> Cafe {
        cafe_with(Schedule::every_day(Daily::from_hm((9, 0), (17, 0)).unwrap()))
    }

    // 2024-05-13 is a Monday.
    fn monday(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 13)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn open_mid_morning() {
        let formatter = CafeStatusFormatter::new();
        let display = formatter
            .describe_status(&nine_to_five(), &monday(10, 0).and_utc())
            .unwrap();
        assert_eq!(
            display,
            StatusDisplay {
                status_label: "Open".to_string(),
                time_label: "Closes at 5:00 PM".to_string(),
                is_open: true,
            }
        );
    }

    #[test]
    fn closed_in_the_evening() {
        let formatter = CafeStatusFormatter::new();
        let display = formatter
            .describe_status(&nine_to_five(), &monday(19, 0).and_utc())
            .unwrap();
        assert_eq!(
            display,
            StatusDisplay {
                status_label: "Closed".to_string(),
                time_label: "Opens at 9:00 AM".to_string(),
                is_open: false,
            }
        );
    }

    #[test]
    fn opening_time_is_open() {
        let formatter = CafeStatusFormatter::new();
        let display = formatter
            .describe_status(&nine_to_five(), &monday(9, 0).and_utc())
            .unwrap();
        assert!(display.is_open);
    }

    #[test]
    fn closing_time_is_closed() {
        let formatter = CafeStatusFormatter::new();
        let display = formatter
            .describe_status(&nine_to_five(), &monday(17, 0).and_utc())
            .unwrap();
        assert!(!display.is_open);
        assert_eq!(display.time_label, "Opens at 9:00 AM");
    }

    #[test]
    fn six_entries_is_invalid() {
        let formatter = CafeStatusFormatter::new();
        let cafe = cafe_with(Schedule::from_timings(vec![
            Daily::from_hm((9, 0), (17, 0)).unwrap();
            6
        ]));
        assert!(matches!(
            formatter.describe_status(&cafe, &monday(10, 0).and_utc()),
            Err(StatusError::InvalidSchedule { entries: 6, .. })
        ));
    }

    #[test]
    fn uses_todays_entry() {
        let formatter = CafeStatusFormatter::new();
        let mut timings = vec![Daily::from_hm((9, 0), (17, 0)).unwrap(); 7];
        // Monday is index 2, stored at position 1.
        timings[1] = Daily::from_hm((6, 30), (14, 30)).unwrap();
        let cafe = cafe_with(Schedule::from_timings(timings));

        let monday_afternoon = formatter
            .describe_status(&cafe, &monday(15, 0).and_utc())
            .unwrap();
        assert_eq!(monday_afternoon.headline(), "Closed Opens at 6:30 AM");

        let tuesday_afternoon = formatter
            .describe_status(&cafe, &(monday(15, 0) + Duration::days(1)).and_utc())
            .unwrap();
        assert_eq!(tuesday_afternoon.headline(), "Open Closes at 5:00 PM");
    }

    #[test]
    fn late_shift_is_judged_across_midnight() {
        let formatter = CafeStatusFormatter::new();
        let mut timings = vec![Daily::from_hm((9, 0), (17, 0)).unwrap(); 7];
        timings[1] = Daily::from_hm((18, 0), (2, 0)).unwrap();
        let cafe = cafe_with(Schedule::from_timings(timings));

        // Sunday ran 9 to 5, so nothing carries into Monday morning.
        let monday_night = formatter
            .describe_status(&cafe, &monday(1, 0).and_utc())
            .unwrap();
        assert_eq!(
            monday_night,
            StatusDisplay {
                status_label: "Closed".to_string(),
                time_label: "Opens at 6:00 PM".to_string(),
                is_open: false,
            }
        );

        let monday_late = formatter
            .describe_status(&cafe, &monday(22, 0).and_utc())
            .unwrap();
        assert_eq!(monday_late.headline(), "Open Closes at 2:00 AM");

        let tuesday_small_hours = formatter
            .describe_status(&cafe, &(monday(1, 0) + Duration::days(1)).and_utc())
            .unwrap();
        assert_eq!(
            tuesday_small_hours,
            StatusDisplay {
                status_label: "Open".to_string(),
                time_label: "Closes at 2:00 AM".to_string(),
                is_open: true,
            }
        );

        let tuesday_after_close = formatter
            .describe_status(&cafe, &(monday(2, 0) + Duration::days(1)).and_utc())
            .unwrap();
        assert_eq!(tuesday_after_close.headline(), "Closed Opens at 9:00 AM");
    }

    #[test]
    fn every_minute_matches_interval() {
        let formatter = CafeStatusFormatter::new();
        let cafe = nine_to_five();
        let start = monday(0, 0);
        for minute in 0..24 * 60 {
            let now = start + Duration::minutes(minute);
            let display = formatter.describe_status(&cafe, &now.and_utc()).unwrap();
            let inside = now.hour() >= 9 && now.hour() < 17;
            assert_eq!(display.is_open, inside, "at {}", now);
            if inside {
                assert!(display.time_label.contains("5:00 PM"));
            } else {
                assert!(display.time_label.contains("9:00 AM"));
            }
        }
    }

    #[test]
    fn reads_clock_in_region() {
        let formatter = CafeStatusFormatter::new();
        // 22:00 UTC Sunday is 10:00 Monday in Auckland during NZST.
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2024, 5, 12)
                .unwrap()
                .and_hms_opt(22, 0, 0)
                .unwrap()
                .and_utc(),
        );
        let display = formatter
            .describe_status_at(&nine_to_five(), &clock, Pacific::Auckland)
            .unwrap();
        assert!(display.is_open);

        let display = formatter
            .describe_status_at(&nine_to_five(), &clock, chrono_tz::UTC)
            .unwrap();
        assert!(!display.is_open);
    }

    #[test]
    fn formats_twelve_hour_clock() {
        let formatter = CafeStatusFormatter::new();
        assert_eq!(formatter.format_time(at(9, 0)), "9:00 AM");
        assert_eq!(formatter.format_time(at(17, 30)), "5:30 PM");
        assert_eq!(formatter.format_time(at(0, 5)), "12:05 AM");
        assert_eq!(formatter.format_time(at(12, 0)), "12:00 PM");
        assert_eq!(formatter.format_time(at(23, 59)), "11:59 PM");
    }

    #[test]
    fn parses_formatted_times() {
        let formatter = CafeStatusFormatter::new();
        assert_eq!(formatter.parse_formatted("9:00 AM"), Ok(at(9, 0)));
        assert_eq!(formatter.parse_formatted("12:00 AM"), Ok(at(0, 0)));
        assert_eq!(formatter.parse_formatted("12:15 pm"), Ok(at(12, 15)));
        assert_eq!(formatter.parse_formatted(" 5:30 PM "), Ok(at(17, 30)));
        assert!(formatter.parse_formatted("13:00 PM").is_err());
        assert!(formatter.parse_formatted("0:30 AM").is_err());
        assert!(formatter.parse_formatted("9:75 AM").is_err());
        assert!(formatter.parse_formatted("noon").is_err());
    }

    #[test]
    fn formatting_is_idempotent() {
        let formatter = CafeStatusFormatter::new();
        for minute in 0..24 * 60 {
            let time = at(minute / 60, minute % 60);
            let text = formatter.format_time(time);
            let reparsed = formatter.parse_formatted(&text).unwrap();
            assert_eq!(formatter.format_time(reparsed), text);
        }
    }

    #[test]
    fn utc_and_local_agree_for_utc() {
        let formatter = CafeStatusFormatter::new();
        let now = Utc::now();
        let direct = formatter.describe_status(&nine_to_five(), &now).unwrap();
        let via_clock = formatter
            .describe_status_at(&nine_to_five(), &FixedClock(now), chrono_tz::UTC)
            .unwrap();
        assert_eq!(direct, via_clock);
    }
}
