use actix_web::{web, HttpResponse};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::models::hotel::{CreateHotel, Hotel, HotelSearch};
use crate::models::user::Role;

pub async fn get_hotels(
    pool: web::Data<SqlitePool>,
    params: web::Query<HotelSearch>,
) -> Result<HttpResponse, ApiError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM hotels WHERE 1=1");

    if let Some(city) = &params.city {
        query.push(" AND city LIKE ");
        query.push_bind(format!("%{city}%"));
    }
    if let Some(min) = params.min_rating {
        query.push(" AND rating >= ");
        query.push_bind(min);
    }
    query.push(" ORDER BY name");

    let hotels: Vec<Hotel> = query.build_query_as().fetch_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(hotels))
}

pub async fn get_hotel_by_id(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let hotel = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    Ok(HttpResponse::Ok().json(hotel))
}

pub async fn create_hotel(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateHotel>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    current.require(Role::HotelOwner)?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let hotel = sqlx::query_as::<_, Hotel>(
        "INSERT INTO hotels (owner_id, name, city, address) VALUES (?, ?, ?, ?) RETURNING *",
    )
    .bind(current.user_id)
    .bind(&body.name)
    .bind(&body.city)
    .bind(&body.address)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(hotel))
}
