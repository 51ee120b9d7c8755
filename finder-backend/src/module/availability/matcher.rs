///! Availability matcher
///!
///! Decides whether one creature's seasonal windows cover a given month and
///! time of day. Input is assumed valid; this never fails.

use finder_common::{Month, SeasonalWindow, TimeOfDay, TimeWindow};

/// Whether `time` falls inside `window`.
///
/// Same-day windows are half-open (`start <= t < end`), except that an end of
/// `23:59` is inclusive so the all-day window covers the last minute.
/// Wrapping windows match on either side of midnight.
pub fn window_contains(window: &TimeWindow, time: TimeOfDay) -> bool {
    let TimeWindow { start, end } = *window;

    if start == end {
        return true;
    }

    if start < end {
        time >= start && (time < end || end == TimeOfDay::LAST_MINUTE)
    } else {
        time >= start || time < end
    }
}

/// Whether any seasonal window lists `month` and has a daily window covering `time`.
pub fn is_available(windows: &[SeasonalWindow], month: Month, time: TimeOfDay) -> bool {
    windows.iter().any(|season| {
        season.months.contains(&month)
            && season
                .time_windows
                .iter()
                .any(|window| window_contains(window, time))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn w(start: &str, end: &str) -> TimeWindow {
        TimeWindow::new(t(start), t(end))
    }

    fn months(list: &[i64]) -> Vec<Month> {
        list.iter().map(|&m| Month::new(m).unwrap()).collect()
    }

    #[test]
    fn test_overnight_window() {
        let window = w("21:00", "04:00");
        for time in ["21:00", "23:59", "00:00", "03:59"] {
            assert!(window_contains(&window, t(time)), "{} should match", time);
        }
        for time in ["04:00", "20:59", "12:00"] {
            assert!(!window_contains(&window, t(time)), "{} should not match", time);
        }
    }

    #[test]
    fn test_same_day_window_is_half_open() {
        let window = w("09:00", "16:00");
        assert!(window_contains(&window, t("09:00")));
        assert!(window_contains(&window, t("15:59")));
        assert!(!window_contains(&window, t("16:00")));
        assert!(!window_contains(&window, t("08:59")));
    }

    #[test]
    fn test_all_day_window_covers_every_minute() {
        let window = TimeWindow::all_day();
        for minutes in 0..finder_common::time::MINUTES_PER_DAY {
            let time = TimeOfDay::from_hm((minutes / 60) as u32, (minutes % 60) as u32).unwrap();
            assert!(window_contains(&window, time));
        }
    }

    #[test]
    fn test_equal_bounds_mean_all_day() {
        let window = w("04:00", "04:00");
        assert!(window_contains(&window, t("03:59")));
        assert!(window_contains(&window, t("04:00")));
        assert!(window_contains(&window, t("23:59")));
    }

    #[test]
    fn test_late_end_inclusive_only_at_last_minute() {
        let window = w("16:00", "23:59");
        assert!(window_contains(&window, t("23:59")));
        assert!(!window_contains(&window, t("00:00")));

        let window = w("16:00", "23:00");
        assert!(!window_contains(&window, t("23:00")));
    }

    #[test]
    fn test_month_must_match() {
        let seasons = vec![SeasonalWindow::new(months(&[6, 7, 8]), vec![TimeWindow::all_day()])];
        assert!(is_available(&seasons, Month::new(7).unwrap(), t("10:00")));
        assert!(!is_available(&seasons, Month::new(9).unwrap(), t("10:00")));
    }

    #[test]
    fn test_multiple_disjoint_windows() {
        // Sea bass style: two seasons with different hours
        let seasons = vec![
            SeasonalWindow::new(months(&[1, 2, 3]), vec![w("04:00", "21:00")]),
            SeasonalWindow::new(
                months(&[9, 10]),
                vec![w("09:00", "16:00"), w("21:00", "04:00")],
            ),
        ];
        let jan = Month::new(1).unwrap();
        let oct = Month::new(10).unwrap();

        assert!(is_available(&seasons, jan, t("12:00")));
        assert!(!is_available(&seasons, jan, t("22:00")));
        assert!(is_available(&seasons, oct, t("10:00")));
        assert!(is_available(&seasons, oct, t("23:00")));
        assert!(!is_available(&seasons, oct, t("17:00")));
    }

    #[test]
    fn test_degenerate_windows_never_match() {
        let no_months = vec![SeasonalWindow::new(Vec::new(), vec![TimeWindow::all_day()])];
        let no_hours = vec![SeasonalWindow::new(months(&[1]), Vec::new())];
        let jan = Month::new(1).unwrap();

        assert!(!is_available(&no_months, jan, t("10:00")));
        assert!(!is_available(&no_hours, jan, t("10:00")));
        assert!(!is_available(&[], jan, t("10:00")));
    }
}
