pub mod auth;
pub mod bookings;
pub mod hotels;
pub mod requests;
pub mod room_types;

use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::models::hotel::Hotel;
use crate::models::user::Role;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::scope("/auth")
                .route("/signup", web::post().to(auth::signup))
                .route("/signin", web::post().to(auth::signin))
                .route("/signout", web::post().to(auth::signout)),
        )
        .service(
            web::scope("/hotels")
                .route("", web::get().to(hotels::get_hotels))
                .route("", web::post().to(hotels::create_hotel))
                .route("/{id}", web::get().to(hotels::get_hotel_by_id))
                .route("/{id}/room-types", web::get().to(room_types::get_room_types))
                .route("/{id}/room-types", web::post().to(room_types::create_room_type))
                .route("/{id}/availability", web::get().to(room_types::get_availability))
                .route("/{id}/availability", web::post().to(room_types::create_availability))
                .route("/{id}/book", web::post().to(bookings::create_booking))
                .route("/{id}/bookings", web::get().to(bookings::get_hotel_bookings))
                .route(
                    "/{id}/booking-statistics",
                    web::get().to(bookings::get_booking_statistics),
                )
                .route("/{id}/requests", web::get().to(requests::get_hotel_requests)),
        )
        .service(
            web::scope("/bookings")
                .route("/{id}", web::put().to(bookings::update_booking_status))
                .route("/{id}/cancel", web::post().to(bookings::cancel_booking))
                .route("/{id}/requests", web::post().to(requests::create_request))
                .route("/{id}/requests", web::get().to(requests::get_booking_requests)),
        )
        .route("/traveler/bookings", web::get().to(bookings::get_traveler_bookings))
        .route("/room-types/{id}", web::put().to(room_types::update_room_type))
        .route("/requests/{id}", web::put().to(requests::update_request));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Look up a hotel and check that the caller is its hotel-owner account.
/// Used by every owner-side endpoint.
pub(crate) async fn require_hotel_owner(
    pool: &SqlitePool,
    hotel_id: i64,
    current: &CurrentUser,
) -> Result<Hotel, ApiError> {
    current.require(Role::HotelOwner)?;

    let hotel = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?")
        .bind(hotel_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    if hotel.owner_id != current.user_id {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }
    Ok(hotel)
}
