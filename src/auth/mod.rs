//! Session handling. A session is an opaque token row in the database with
//! an explicit lifecycle: [`Session::save`] issues one at signin,
//! [`Session::load`] resolves a bearer token on each request,
//! [`Session::clear`] revokes it at signout.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::user::Role;

pub struct Session;

impl Session {
    /// Issue a fresh token for a user. The token is the only credential a
    /// client holds afterwards.
    pub async fn save(pool: &SqlitePool, user_id: i64, ttl_secs: i64) -> Result<String, sqlx::Error> {
        let token = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, datetime('now', ?))")
            .bind(&token)
            .bind(user_id)
            .bind(format!("+{ttl_secs} seconds"))
            .execute(pool)
            .await?;
        Ok(token)
    }

    /// Resolve a token to its user. Expired rows are treated the same as
    /// unknown ones.
    pub async fn load(pool: &SqlitePool, token: &str) -> Result<CurrentUser, ApiError> {
        sqlx::query_as::<_, CurrentUser>(
            "SELECT u.id AS user_id, u.role, u.name \
             FROM sessions s JOIN users u ON u.id = s.user_id \
             WHERE s.token = ? AND s.expires_at > datetime('now')",
        )
        .bind(token)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::Unauthorized("Session expired or invalid"))
    }

    pub async fn clear(pool: &SqlitePool, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(())
    }
}

pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

/// The authenticated caller, resolved from the `Authorization` header.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CurrentUser {
    pub user_id: i64,
    pub role: Role,
    pub name: String,
}

impl CurrentUser {
    pub fn require(&self, role: Role) -> Result<(), ApiError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!("{} access required", role.label())))
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<SqlitePool>>().cloned();
        let token = bearer_token(req);
        Box::pin(async move {
            let pool = pool.ok_or(ApiError::Unauthorized("Authentication required"))?;
            let token = token.ok_or(ApiError::Unauthorized("Authentication required"))?;
            Session::load(&pool, &token).await
        })
    }
}
