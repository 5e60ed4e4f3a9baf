use chrono::{Datelike, Months, NaiveDateTime};

/// Earliest timestamp still inside a trailing window of `window_months`
/// calendar months ending at `now`.
///
/// The day of month is clamped to the target month's length, so a window of
/// one month ending on March 31 starts on February 28 (or 29). Windows that
/// reach before the representable calendar start at `NaiveDateTime::MIN`.
pub fn window_cutoff(now: NaiveDateTime, window_months: u32) -> NaiveDateTime {
    now.checked_sub_months(Months::new(window_months))
        .unwrap_or(NaiveDateTime::MIN)
}

pub fn is_in_window(occurred_at: NaiveDateTime, cutoff: NaiveDateTime) -> bool {
    occurred_at >= cutoff
}

/// Zero-padded `YYYY-MM` key of the record's wall-clock date.
pub fn month_key(occurred_at: NaiveDateTime) -> String {
    format!("{:04}-{:02}", occurred_at.year(), occurred_at.month())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::{is_in_window, month_key, window_cutoff};

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap_or(NaiveDateTime::MIN)
    }

    #[test]
    fn cutoff_clamps_to_end_of_shorter_month() {
        assert_eq!(window_cutoff(at("2026-03-31 10:00:00"), 1), at("2026-02-28 10:00:00"));
        assert_eq!(window_cutoff(at("2024-03-31 10:00:00"), 1), at("2024-02-29 10:00:00"));
    }

    #[test]
    fn cutoff_crosses_year_boundary() {
        assert_eq!(window_cutoff(at("2026-02-15 08:30:00"), 3), at("2025-11-15 08:30:00"));
        assert_eq!(window_cutoff(at("2026-01-31 00:00:00"), 13), at("2024-12-31 00:00:00"));
    }

    #[test]
    fn zero_month_window_ends_at_now() {
        let now = at("2026-05-10 12:00:00");
        assert_eq!(window_cutoff(now, 0), now);
    }

    #[test]
    fn enormous_window_saturates_to_calendar_start() {
        assert_eq!(window_cutoff(at("2026-05-10 12:00:00"), u32::MAX), NaiveDateTime::MIN);
    }

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(month_key(at("2026-01-05 00:00:00")), "2026-01");
        assert_eq!(month_key(at("2026-11-30 23:59:59")), "2026-11");
    }

    #[test]
    fn cutoff_instant_is_inside_the_window() {
        let cutoff = window_cutoff(at("2026-05-31 09:15:00"), 3);
        assert_eq!(cutoff, at("2026-02-28 09:15:00"));
        assert!(is_in_window(cutoff, cutoff));
        assert!(!is_in_window(at("2026-02-28 09:14:59"), cutoff));
    }
}
