use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Stay status of a booking. A booking is never deleted; it only moves
/// through these states until it reaches a terminal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Legal staff-initiated moves. Everything else, including any move out
    /// of a terminal state, must be refused rather than written.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, CheckedIn)
                | (Confirmed, CheckedOut)
                | (Confirmed, Cancelled)
                | (CheckedIn, CheckedOut)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::CheckedOut | BookingStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub booking_id: i64,
    pub hotel_id: i64,
    pub traveler_id: i64,
    pub room_type: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub num_guests: i64,
    pub total_price: f64,
    pub booking_status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBooking {
    pub room_type: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default = "default_num_guests")]
    #[validate(range(min = 1))]
    pub num_guests: i64,
    pub special_requests: Option<String>,
}

fn default_num_guests() -> i64 {
    1
}

/// The only mutation the update endpoint accepts. Dates, guest count and
/// the stored total are fixed at creation time.
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatus {
    pub booking_status: BookingStatus,
}
