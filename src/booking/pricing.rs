//! Stay-length and price computation. Pure and infallible: callers are
//! responsible for validating the date range first (see
//! [`crate::booking::validation`]); unvalidated input yields a zero or
//! non-positive result, never an error.

use chrono::NaiveDate;

/// Number of calendar nights between check-in and check-out. Non-positive
/// when the range is empty or reversed.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Total price for a stay: nightly rate times nights. Occupancy does not
/// affect the rate; rooms are priced per night regardless of guest count.
/// A non-positive night count or an unset rate means "no total yet".
pub fn stay_total(nightly_rate: f64, nights: i64, _num_guests: i64) -> f64 {
    if nights <= 0 || nightly_rate <= 0.0 {
        return 0.0;
    }
    nightly_rate * nights as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn nights_is_the_calendar_day_difference() {
        assert_eq!(nights_between(date("2025-03-10"), date("2025-03-13")), 3);
        assert_eq!(nights_between(date("2025-03-10"), date("2025-03-11")), 1);
        assert_eq!(nights_between(date("2025-02-27"), date("2025-03-02")), 3);
        assert_eq!(nights_between(date("2025-12-30"), date("2026-01-02")), 3);
        for n in 1..=30 {
            let check_in = date("2025-06-01");
            let check_out = check_in + chrono::Duration::days(n);
            assert_eq!(nights_between(check_in, check_out), n);
        }
    }

    #[test]
    fn reversed_or_empty_ranges_are_non_positive() {
        assert_eq!(nights_between(date("2025-03-13"), date("2025-03-10")), -3);
        assert_eq!(nights_between(date("2025-03-10"), date("2025-03-10")), 0);
    }

    #[test]
    fn total_is_rate_times_nights() {
        assert_eq!(stay_total(100.0, 3, 1), 300.0);
        assert_eq!(stay_total(89.5, 2, 1), 179.0);
        assert_eq!(stay_total(250.0, 7, 1), 1750.0);
    }

    #[test]
    fn guest_count_never_multiplies_the_price() {
        for guests in 1..=6 {
            assert_eq!(stay_total(100.0, 3, guests), 300.0);
        }
    }

    #[test]
    fn missing_inputs_mean_no_total_yet() {
        assert_eq!(stay_total(100.0, 0, 2), 0.0);
        assert_eq!(stay_total(100.0, -3, 2), 0.0);
        assert_eq!(stay_total(0.0, 3, 2), 0.0);
    }

    #[test]
    fn example_three_nights_at_one_hundred() {
        let nights = nights_between(date("2025-03-10"), date("2025-03-13"));
        assert_eq!(nights, 3);
        assert_eq!(stay_total(100.0, nights, 2), 300.0);
    }
}
