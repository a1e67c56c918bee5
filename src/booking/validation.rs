//! Submission-time checks for a booking request. The checks run in a fixed
//! order and the first failure is surfaced; nothing is persisted and no
//! price is computed until every check passes.

use chrono::NaiveDate;
use thiserror::Error;

use crate::error::ApiError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingRequestError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("Check-in date cannot be in the past")]
    DateInPast,

    #[error("Number of guests exceeds the room capacity of {0}")]
    OverCapacity(i64),
}

impl From<BookingRequestError> for ApiError {
    fn from(e: BookingRequestError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

/// Gate a booking request before it may become a booking. `today` is the
/// caller's current date so the past-date rule stays at day granularity.
pub fn validate_request(
    room_type: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<(), BookingRequestError> {
    if room_type.trim().is_empty() {
        return Err(BookingRequestError::MissingField("Room type"));
    }
    if check_out <= check_in {
        return Err(BookingRequestError::InvalidDateRange);
    }
    if check_in < today {
        return Err(BookingRequestError::DateInPast);
    }
    Ok(())
}

/// Capacity bound from the selected room type, checked once the room type
/// is known.
pub fn check_capacity(num_guests: i64, max_guests: i64) -> Result<(), BookingRequestError> {
    if num_guests > max_guests {
        return Err(BookingRequestError::OverCapacity(max_guests));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    const TODAY: &str = "2025-03-01";

    #[test]
    fn accepts_a_well_formed_request() {
        assert_eq!(
            validate_request(
                "Deluxe Room",
                date("2025-03-10"),
                date("2025-03-13"),
                date(TODAY)
            ),
            Ok(())
        );
    }

    #[test]
    fn same_day_check_in_is_allowed() {
        assert_eq!(
            validate_request("Suite", date(TODAY), date("2025-03-02"), date(TODAY)),
            Ok(())
        );
    }

    #[test]
    fn missing_room_type_is_reported_first() {
        // Even with a reversed, past range the required-field rule wins.
        assert_eq!(
            validate_request("", date("2025-02-13"), date("2025-02-10"), date(TODAY)),
            Err(BookingRequestError::MissingField("Room type"))
        );
        assert_eq!(
            validate_request("   ", date("2025-03-10"), date("2025-03-13"), date(TODAY)),
            Err(BookingRequestError::MissingField("Room type"))
        );
    }

    #[test]
    fn reversed_dates_are_rejected_before_the_past_date_rule() {
        assert_eq!(
            validate_request(
                "Deluxe Room",
                date("2025-02-13"),
                date("2025-02-10"),
                date(TODAY)
            ),
            Err(BookingRequestError::InvalidDateRange)
        );
    }

    #[test]
    fn zero_night_stays_are_rejected() {
        assert_eq!(
            validate_request(
                "Deluxe Room",
                date("2025-03-10"),
                date("2025-03-10"),
                date(TODAY)
            ),
            Err(BookingRequestError::InvalidDateRange)
        );
    }

    #[test]
    fn past_check_in_is_rejected() {
        assert_eq!(
            validate_request(
                "Deluxe Room",
                date("2025-02-10"),
                date("2025-02-13"),
                date(TODAY)
            ),
            Err(BookingRequestError::DateInPast)
        );
    }

    #[test]
    fn capacity_bound_is_inclusive() {
        assert_eq!(check_capacity(2, 2), Ok(()));
        assert_eq!(check_capacity(3, 2), Err(BookingRequestError::OverCapacity(2)));
    }

    #[test]
    fn error_messages_match_the_user_facing_strings() {
        assert_eq!(
            BookingRequestError::InvalidDateRange.to_string(),
            "Check-out date must be after check-in date"
        );
        assert_eq!(
            BookingRequestError::DateInPast.to_string(),
            "Check-in date cannot be in the past"
        );
    }
}
