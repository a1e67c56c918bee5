use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A hotel's bookable category. The nightly base rate on this row is the
/// price multiplier for every booking of the type; the calculator never
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomType {
    pub room_type_id: i64,
    pub hotel_id: i64,
    pub room_type_name: String,
    pub description: Option<String>,
    pub base_price_per_night: f64,
    pub max_guests: i64,
    pub total_rooms: i64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomType {
    #[validate(length(min = 1))]
    pub room_type_name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub base_price_per_night: f64,
    #[validate(range(min = 1))]
    pub max_guests: Option<i64>,
    #[serde(default)]
    pub total_rooms: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomType {
    pub room_type_name: Option<String>,
    pub description: Option<String>,
    pub base_price_per_night: Option<f64>,
    pub max_guests: Option<i64>,
    pub total_rooms: Option<i64>,
    pub is_active: Option<bool>,
}

/// One row per (hotel, room type, night). Decremented when a booking covers
/// the night, restored on cancellation; nights without a row carry no
/// bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomAvailability {
    pub availability_id: i64,
    pub hotel_id: i64,
    pub room_type: String,
    pub date: NaiveDate,
    pub total_rooms: i64,
    pub available_rooms: i64,
    pub price_per_night: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub room_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAvailability {
    #[validate(length(min = 1))]
    pub room_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_rooms: Option<i64>,
    pub price_per_night: Option<f64>,
}
