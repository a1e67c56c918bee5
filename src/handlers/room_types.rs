use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::config::Config;
use crate::error::ApiError;
use crate::handlers::require_hotel_owner;
use crate::models::room_type::{
    AvailabilityQuery, CreateAvailability, CreateRoomType, RoomAvailability, RoomType,
    UpdateRoomType,
};

pub async fn get_room_types(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();

    let room_types = sqlx::query_as::<_, RoomType>(
        "SELECT * FROM hotel_room_types WHERE hotel_id = ? AND is_active = 1 ORDER BY room_type_name",
    )
    .bind(hotel_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(room_types))
}

pub async fn create_room_type(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    path: web::Path<i64>,
    body: web::Json<CreateRoomType>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();
    require_hotel_owner(pool.get_ref(), hotel_id, &current).await?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let room_type = sqlx::query_as::<_, RoomType>(
        "INSERT INTO hotel_room_types \
         (hotel_id, room_type_name, description, base_price_per_night, max_guests, total_rooms) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(hotel_id)
    .bind(&body.room_type_name)
    .bind(&body.description)
    .bind(body.base_price_per_night)
    .bind(body.max_guests.unwrap_or(config.default_max_guests))
    .bind(body.total_rooms)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(room_type))
}

pub async fn update_room_type(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateRoomType>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let room_type_id = path.into_inner();

    let hotel_id: i64 = sqlx::query_scalar("SELECT hotel_id FROM hotel_room_types WHERE room_type_id = ?")
        .bind(room_type_id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Room type not found".to_string()))?;
    require_hotel_owner(pool.get_ref(), hotel_id, &current).await?;

    let room_type = sqlx::query_as::<_, RoomType>(
        "UPDATE hotel_room_types SET \
         room_type_name = COALESCE(?, room_type_name), \
         description = COALESCE(?, description), \
         base_price_per_night = COALESCE(?, base_price_per_night), \
         max_guests = COALESCE(?, max_guests), \
         total_rooms = COALESCE(?, total_rooms), \
         is_active = COALESCE(?, is_active), \
         updated_at = datetime('now') \
         WHERE room_type_id = ? RETURNING *",
    )
    .bind(&body.room_type_name)
    .bind(&body.description)
    .bind(body.base_price_per_night)
    .bind(body.max_guests)
    .bind(body.total_rooms)
    .bind(body.is_active)
    .bind(room_type_id)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(room_type))
}

pub async fn get_availability(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    params: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();

    let rows = sqlx::query_as::<_, RoomAvailability>(
        "SELECT * FROM room_availability \
         WHERE hotel_id = ? AND room_type = ? AND date >= ? AND date <= ? \
         ORDER BY date",
    )
    .bind(hotel_id)
    .bind(&params.room_type)
    .bind(params.start_date)
    .bind(params.end_date)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Seed one availability row per night in the range, defaulting room count
/// and price from the room type. Existing rows are left untouched.
pub async fn create_availability(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<CreateAvailability>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();
    require_hotel_owner(pool.get_ref(), hotel_id, &current).await?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    if body.end_date <= body.start_date {
        return Err(ApiError::Validation(
            "End date must be after start date".to_string(),
        ));
    }

    let room_type = sqlx::query_as::<_, RoomType>(
        "SELECT * FROM hotel_room_types WHERE hotel_id = ? AND room_type_name = ?",
    )
    .bind(hotel_id)
    .bind(&body.room_type)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| ApiError::NotFound("Room type not found".to_string()))?;

    let rooms = body.total_rooms.unwrap_or(room_type.total_rooms);
    let price = body.price_per_night.unwrap_or(room_type.base_price_per_night);

    let mut tx = pool.begin().await?;
    let mut day = body.start_date;
    let mut created = 0u64;
    while day < body.end_date {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO room_availability \
             (hotel_id, room_type, date, total_rooms, available_rooms, price_per_night) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(hotel_id)
        .bind(&body.room_type)
        .bind(day)
        .bind(rooms)
        .bind(rooms)
        .bind(price)
        .execute(&mut *tx)
        .await?;
        created += result.rows_affected();
        day = day + chrono::Duration::days(1);
    }
    tx.commit().await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "nights_created": created })))
}
