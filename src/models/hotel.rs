use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Hotel {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub rating: f64,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHotel {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HotelSearch {
    pub city: Option<String>,
    pub min_rating: Option<f64>,
}
