use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::handlers::bookings::fetch_booking;
use crate::handlers::require_hotel_owner;
use crate::models::guest_request::{
    CreateGuestRequest, GuestRequest, RequestStatus, UpdateGuestRequest,
};
use crate::models::user::Role;

pub async fn create_request(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<CreateGuestRequest>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let booking_id = path.into_inner();
    current.require(Role::Traveler)?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let booking = fetch_booking(pool.get_ref(), booking_id).await?;
    if booking.traveler_id != current.user_id {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }

    let request = sqlx::query_as::<_, GuestRequest>(
        "INSERT INTO guest_requests (booking_id, request_type, request_details, priority) \
         VALUES (?, ?, ?, ?) RETURNING *",
    )
    .bind(booking_id)
    .bind(body.request_type)
    .bind(&body.request_details)
    .bind(body.priority)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Request created successfully",
        "request": request,
    })))
}

pub async fn get_booking_requests(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let booking_id = path.into_inner();
    let booking = fetch_booking(pool.get_ref(), booking_id).await?;

    // Visible to the booking's traveler and to the hotel's owner
    match current.role {
        Role::Traveler if booking.traveler_id == current.user_id => {}
        Role::HotelOwner => {
            require_hotel_owner(pool.get_ref(), booking.hotel_id, &current).await?;
        }
        _ => return Err(ApiError::Forbidden("Access denied".to_string())),
    }

    let requests = sqlx::query_as::<_, GuestRequest>(
        "SELECT * FROM guest_requests WHERE booking_id = ? ORDER BY created_at DESC, request_id DESC",
    )
    .bind(booking_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(requests))
}

pub async fn get_hotel_requests(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();
    require_hotel_owner(pool.get_ref(), hotel_id, &current).await?;

    let requests = sqlx::query_as::<_, GuestRequest>(
        "SELECT r.* FROM guest_requests r \
         JOIN hotel_bookings b ON b.booking_id = r.booking_id \
         WHERE b.hotel_id = ? ORDER BY r.created_at DESC, r.request_id DESC",
    )
    .bind(hotel_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(requests))
}

pub async fn update_request(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateGuestRequest>,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let request_id = path.into_inner();

    let request = sqlx::query_as::<_, GuestRequest>(
        "SELECT * FROM guest_requests WHERE request_id = ?",
    )
    .bind(request_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    let booking = fetch_booking(pool.get_ref(), request.booking_id).await?;
    require_hotel_owner(pool.get_ref(), booking.hotel_id, &current).await?;

    let completed = body.request_status == Some(RequestStatus::Completed);
    let updated = sqlx::query_as::<_, GuestRequest>(
        "UPDATE guest_requests SET \
         request_status = COALESCE(?, request_status), \
         request_details = COALESCE(?, request_details), \
         priority = COALESCE(?, priority), \
         assigned_to = COALESCE(?, assigned_to), \
         completed_at = CASE WHEN ? THEN datetime('now') ELSE completed_at END, \
         updated_at = datetime('now') \
         WHERE request_id = ? RETURNING *",
    )
    .bind(body.request_status)
    .bind(&body.request_details)
    .bind(body.priority)
    .bind(body.assigned_to)
    .bind(completed)
    .bind(request_id)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use chrono::{Duration, Utc};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use crate::config::Config;
    use crate::handlers;

    const TRAVELER_TOKEN: &str = "traveler-token";
    const OWNER_TOKEN: &str = "owner-token";

    async fn seeded_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        sqlx::query(
            "INSERT INTO users (email, password, name, role) VALUES \
             ('tess@example.com', 'travelpass123', 'Tess', 'traveler'), \
             ('oscar@example.com', 'ownerpass123', 'Oscar', 'hotel_owner')",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO hotels (owner_id, name, city) VALUES (2, 'Seaside Inn', 'Lisbon')")
            .execute(&pool)
            .await
            .unwrap();
        let check_in = Utc::now().naive_utc().date() + Duration::days(10);
        sqlx::query(
            "INSERT INTO hotel_bookings \
             (hotel_id, traveler_id, room_type, check_in_date, check_out_date, num_guests, total_price, booking_status) \
             VALUES (1, 1, 'Deluxe Room', ?, ?, 2, 300.0, 'confirmed')",
        )
        .bind(check_in)
        .bind(check_in + Duration::days(3))
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO sessions (token, user_id, expires_at) VALUES \
             (?, 1, datetime('now', '+1 hour')), \
             (?, 2, datetime('now', '+1 hour'))",
        )
        .bind(TRAVELER_TOKEN)
        .bind(OWNER_TOKEN)
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    fn test_config() -> Config {
        Config {
            database_url: String::new(),
            bind_addr: String::new(),
            session_ttl_secs: 3_600,
            default_max_guests: 6,
        }
    }

    macro_rules! test_app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($pool.clone()))
                    .app_data(web::Data::new(test_config()))
                    .configure(handlers::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn traveler_files_a_request_and_staff_completes_it() {
        let pool = seeded_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/bookings/1/requests")
            .insert_header(("Authorization", format!("Bearer {TRAVELER_TOKEN}")))
            .set_json(serde_json::json!({
                "request_type": "housekeeping",
                "request_details": "Extra towels please",
                "priority": "high",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["request"]["request_status"], "pending");
        assert_eq!(body["request"]["priority"], "high");
        let id = body["request"]["request_id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/requests/{id}"))
            .insert_header(("Authorization", format!("Bearer {OWNER_TOKEN}")))
            .set_json(serde_json::json!({ "request_status": "completed", "assigned_to": 2 }))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["request_status"], "completed");
        assert_eq!(updated["assigned_to"], 2);
        assert!(!updated["completed_at"].is_null());
    }

    #[actix_web::test]
    async fn requests_are_scoped_to_the_booking_owner() {
        let pool = seeded_pool().await;
        let app = test_app!(pool);

        // The hotel owner cannot file guest requests
        let req = test::TestRequest::post()
            .uri("/bookings/1/requests")
            .insert_header(("Authorization", format!("Bearer {OWNER_TOKEN}")))
            .set_json(serde_json::json!({
                "request_type": "room_service",
                "request_details": "Dinner for two",
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        // A traveler cannot mutate one either
        sqlx::query(
            "INSERT INTO guest_requests (booking_id, request_type, request_details) \
             VALUES (1, 'maintenance', 'AC is rattling')",
        )
        .execute(&pool)
        .await
        .unwrap();
        let req = test::TestRequest::put()
            .uri("/requests/1")
            .insert_header(("Authorization", format!("Bearer {TRAVELER_TOKEN}")))
            .set_json(serde_json::json!({ "request_status": "completed" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        // Both parties can read; the hotel listing sees it too
        let req = test::TestRequest::get()
            .uri("/hotels/1/requests")
            .insert_header(("Authorization", format!("Bearer {OWNER_TOKEN}")))
            .to_request();
        let listed: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["request_type"], "maintenance");
    }
}
