use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::booking::{pricing, validation};
use crate::error::ApiError;
use crate::handlers::require_hotel_owner;
use crate::models::booking::{Booking, BookingStatus, CreateBooking, UpdateBookingStatus};
use crate::models::room_type::RoomType;
use crate::models::user::Role;

pub async fn create_booking(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<CreateBooking>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();
    current.require(Role::Traveler)?;

    // 1. Field-level checks, then the ordered submission rules
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let today = Utc::now().naive_utc().date();
    validation::validate_request(&body.room_type, body.check_in_date, body.check_out_date, today)?;

    let mut tx = pool.begin().await?;

    // 2. Hotel and room type must exist
    let hotel_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM hotels WHERE id = ?")
        .bind(hotel_id)
        .fetch_optional(&mut *tx)
        .await?;
    if hotel_exists.is_none() {
        return Err(ApiError::NotFound("Hotel not found".to_string()));
    }

    let room_type = sqlx::query_as::<_, RoomType>(
        "SELECT * FROM hotel_room_types WHERE hotel_id = ? AND room_type_name = ? AND is_active = 1",
    )
    .bind(hotel_id)
    .bind(&body.room_type)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::NotFound("Room type not found".to_string()))?;

    // 3. Capacity bound from the selected room type
    validation::check_capacity(body.num_guests, room_type.max_guests)?;

    // 4. The total is fixed here, once; later transitions never touch it
    let nights = pricing::nights_between(body.check_in_date, body.check_out_date);
    let total_price = pricing::stay_total(room_type.base_price_per_night, nights, body.num_guests);

    // 5. Persist in pending
    let booking = sqlx::query_as::<_, Booking>(
        "INSERT INTO hotel_bookings \
         (hotel_id, traveler_id, room_type, check_in_date, check_out_date, num_guests, total_price, booking_status, special_requests) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 'pending', ?) RETURNING *",
    )
    .bind(hotel_id)
    .bind(current.user_id)
    .bind(&body.room_type)
    .bind(body.check_in_date)
    .bind(body.check_out_date)
    .bind(body.num_guests)
    .bind(total_price)
    .bind(&body.special_requests)
    .fetch_one(&mut *tx)
    .await?;

    // 6. Per-night availability bookkeeping, where rows exist
    let mut day = body.check_in_date;
    while day < body.check_out_date {
        sqlx::query(
            "UPDATE room_availability \
             SET available_rooms = available_rooms - 1, updated_at = datetime('now') \
             WHERE hotel_id = ? AND room_type = ? AND date = ? AND available_rooms > 0",
        )
        .bind(hotel_id)
        .bind(&body.room_type)
        .bind(day)
        .execute(&mut *tx)
        .await?;
        day = day + Duration::days(1);
    }

    tx.commit().await?;

    log::info!(
        "booking {} created by {} for hotel {} ({} nights, total {})",
        booking.booking_id,
        current.name,
        hotel_id,
        nights,
        total_price
    );
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Booking created successfully",
        "booking": booking,
    })))
}

pub async fn get_hotel_bookings(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();
    require_hotel_owner(pool.get_ref(), hotel_id, &current).await?;

    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT * FROM hotel_bookings WHERE hotel_id = ? ORDER BY created_at DESC, booking_id DESC",
    )
    .bind(hotel_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(bookings))
}

pub async fn get_traveler_bookings(
    pool: web::Data<SqlitePool>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    current.require(Role::Traveler)?;

    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT * FROM hotel_bookings WHERE traveler_id = ? ORDER BY created_at DESC, booking_id DESC",
    )
    .bind(current.user_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(bookings))
}

/// Staff-side lifecycle transition. The requested move must be legal from
/// the booking's current state; anything else is refused without touching
/// the stored row.
pub async fn update_booking_status(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateBookingStatus>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let booking_id = path.into_inner();

    let booking = fetch_booking(pool.get_ref(), booking_id).await?;
    require_hotel_owner(pool.get_ref(), booking.hotel_id, &current).await?;

    let next = body.booking_status;
    if !booking.booking_status.can_transition_to(next) {
        let message = if booking.booking_status.is_terminal() {
            format!("Booking is already {}", booking.booking_status.as_str())
        } else {
            format!(
                "Cannot change booking status from {} to {}",
                booking.booking_status.as_str(),
                next.as_str()
            )
        };
        return Err(ApiError::Conflict(message));
    }

    let updated = sqlx::query_as::<_, Booking>(
        "UPDATE hotel_bookings SET booking_status = ?, updated_at = datetime('now') \
         WHERE booking_id = ? RETURNING *",
    )
    .bind(next)
    .bind(booking_id)
    .fetch_one(pool.get_ref())
    .await?;

    log::info!(
        "booking {} moved from {} to {}",
        booking_id,
        booking.booking_status.as_str(),
        next.as_str()
    );
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn cancel_booking(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let booking_id = path.into_inner();

    let mut tx = pool.begin().await?;

    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM hotel_bookings WHERE booking_id = ?")
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    // The booking's traveler or the hotel's owner may cancel
    match current.role {
        Role::Traveler if booking.traveler_id == current.user_id => {}
        Role::HotelOwner => {
            let owns: Option<i64> =
                sqlx::query_scalar("SELECT id FROM hotels WHERE id = ? AND owner_id = ?")
                    .bind(booking.hotel_id)
                    .bind(current.user_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if owns.is_none() {
                return Err(ApiError::Forbidden("Access denied".to_string()));
            }
        }
        _ => return Err(ApiError::Forbidden("Access denied".to_string())),
    }

    if !booking.booking_status.can_transition_to(BookingStatus::Cancelled) {
        return Err(ApiError::Conflict(format!(
            "Cannot cancel a {} booking",
            booking.booking_status.as_str()
        )));
    }

    let cancelled = sqlx::query_as::<_, Booking>(
        "UPDATE hotel_bookings SET booking_status = 'cancelled', updated_at = datetime('now') \
         WHERE booking_id = ? RETURNING *",
    )
    .bind(booking_id)
    .fetch_one(&mut *tx)
    .await?;

    // Give the covered nights back
    let mut day = booking.check_in_date;
    while day < booking.check_out_date {
        sqlx::query(
            "UPDATE room_availability \
             SET available_rooms = available_rooms + 1, updated_at = datetime('now') \
             WHERE hotel_id = ? AND room_type = ? AND date = ? AND available_rooms < total_rooms",
        )
        .bind(booking.hotel_id)
        .bind(&booking.room_type)
        .bind(day)
        .execute(&mut *tx)
        .await?;
        day = day + Duration::days(1);
    }

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Booking cancelled successfully",
        "booking": cancelled,
    })))
}

#[derive(Debug, Serialize)]
pub struct BookingStatistics {
    pub total_bookings: i64,
    pub confirmed_bookings: i64,
    pub pending_bookings: i64,
    pub total_revenue: f64,
    pub occupancy_rate: f64,
}

pub async fn get_booking_statistics(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();
    require_hotel_owner(pool.get_ref(), hotel_id, &current).await?;

    let total_bookings: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM hotel_bookings WHERE hotel_id = ?")
            .bind(hotel_id)
            .fetch_one(pool.get_ref())
            .await?;
    let confirmed_bookings: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM hotel_bookings WHERE hotel_id = ? AND booking_status = 'confirmed'",
    )
    .bind(hotel_id)
    .fetch_one(pool.get_ref())
    .await?;
    let pending_bookings: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM hotel_bookings WHERE hotel_id = ? AND booking_status = 'pending'",
    )
    .bind(hotel_id)
    .fetch_one(pool.get_ref())
    .await?;
    let total_revenue: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_price), 0.0) FROM hotel_bookings \
         WHERE hotel_id = ? AND booking_status IN ('confirmed', 'checked_in', 'checked_out')",
    )
    .bind(hotel_id)
    .fetch_one(pool.get_ref())
    .await?;

    let occupancy_rate = if total_bookings > 0 {
        confirmed_bookings as f64 / total_bookings as f64 * 100.0
    } else {
        0.0
    };

    Ok(HttpResponse::Ok().json(BookingStatistics {
        total_bookings,
        confirmed_bookings,
        pending_bookings,
        total_revenue,
        occupancy_rate,
    }))
}

pub(crate) async fn fetch_booking(pool: &SqlitePool, booking_id: i64) -> Result<Booking, ApiError> {
    sqlx::query_as::<_, Booking>("SELECT * FROM hotel_bookings WHERE booking_id = ?")
        .bind(booking_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))
}
