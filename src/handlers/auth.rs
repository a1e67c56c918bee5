use actix_web::{web, HttpRequest, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::{bearer_token, CurrentUser, Session};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::user::{CreateUser, Credentials, User};

pub async fn signup(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateUser>,
) -> Result<HttpResponse, ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(&body.email)
        .fetch_optional(pool.get_ref())
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password, name, phone, role) VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&body.email)
    .bind(&body.password)
    .bind(&body.name)
    .bind(&body.phone)
    .bind(body.role)
    .fetch_one(pool.get_ref())
    .await?;

    log::info!("new {} account: {}", user.role.as_str(), user.email);
    Ok(HttpResponse::Created().json(user))
}

pub async fn signin(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&body.email)
        .fetch_optional(pool.get_ref())
        .await?
        .filter(|u| u.password == body.password)
        .ok_or(ApiError::Unauthorized("Invalid email or password"))?;

    let token = Session::save(pool.get_ref(), user.id, config.session_ttl_secs).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "user": user,
    })))
}

pub async fn signout(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    _current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    if let Some(token) = bearer_token(&req) {
        Session::clear(pool.get_ref(), &token).await?;
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Signed out" })))
}
