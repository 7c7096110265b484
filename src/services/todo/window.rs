//! The 8-day look-ahead window the report buckets by.

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Number of day buckets in the look-ahead window.
pub const WINDOW_DAYS: usize = 8;

/// Contiguous calendar-day window starting at day 1.
///
/// Weekends are NOT skipped here: jobs can carry weekend due dates, and the
/// report shows them on the day they are due. (The vacation calendar does
/// its own weekend math; this window intentionally does not.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayWindow {
    days: [NaiveDate; WINDOW_DAYS],
}

impl DayWindow {
    /// Build the window starting at `day1`.
    pub fn starting(day1: NaiveDate) -> Self {
        let days = std::array::from_fn(|offset| {
            day1.checked_add_days(Days::new(offset as u64))
                .expect("day window within calendar range")
        });
        Self { days }
    }

    pub fn days(&self) -> &[NaiveDate; WINDOW_DAYS] {
        &self.days
    }

    pub fn first(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.days[WINDOW_DAYS - 1]
    }

    /// Bucket index for a date, if it falls inside the window.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = date.signed_duration_since(self.days[0]).num_days();
        if (0..WINDOW_DAYS as i64).contains(&offset) {
            Some(offset as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_spans_eight_contiguous_days() {
        let window = DayWindow::starting(date(2025, 6, 6)); // a Friday
        let days = window.days();
        assert_eq!(days.len(), 8);
        for i in 1..WINDOW_DAYS {
            assert_eq!(
                days[i].signed_duration_since(days[i - 1]).num_days(),
                1,
                "gap between day {} and day {}",
                i,
                i + 1
            );
        }
        // Saturday and Sunday are present, not skipped.
        assert_eq!(days[1], date(2025, 6, 7));
        assert_eq!(days[2], date(2025, 6, 8));
    }

    #[test]
    fn index_of_maps_window_dates_only() {
        let window = DayWindow::starting(date(2025, 6, 2));
        assert_eq!(window.index_of(date(2025, 6, 2)), Some(0));
        assert_eq!(window.index_of(date(2025, 6, 9)), Some(7));
        assert_eq!(window.index_of(date(2025, 6, 1)), None);
        assert_eq!(window.index_of(date(2025, 6, 10)), None);
    }

    proptest! {
        #[test]
        fn window_is_contiguous_from_any_start(days_from_epoch in 0i64..40_000) {
            let day1 = NaiveDate::from_num_days_from_ce_opt(719_163 + days_from_epoch as i32).unwrap();
            let window = DayWindow::starting(day1);
            for (i, day) in window.days().iter().enumerate() {
                prop_assert_eq!(day.signed_duration_since(day1).num_days(), i as i64);
                prop_assert_eq!(window.index_of(*day), Some(i));
            }
        }
    }
}
