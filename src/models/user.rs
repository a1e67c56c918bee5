use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// The closed set of account roles. Role checks are matches on this enum so
/// that adding a role is a localized change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Role {
    Traveler,
    Guide,
    RestaurantOwner,
    HotelOwner,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Traveler => "traveler",
            Role::Guide => "guide",
            Role::RestaurantOwner => "restaurant_owner",
            Role::HotelOwner => "hotel_owner",
            Role::Admin => "admin",
        }
    }

    /// Human-facing label used in access-denied messages.
    pub fn label(self) -> &'static str {
        match self {
            Role::Traveler => "Traveler",
            Role::Guide => "Guide",
            Role::RestaurantOwner => "Restaurant owner",
            Role::HotelOwner => "Hotel owner",
            Role::Admin => "Admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub phone: Option<String>,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Traveler
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::HotelOwner).unwrap(),
            "\"hotel_owner\""
        );
        let role: Role = serde_json::from_str("\"restaurant_owner\"").unwrap();
        assert_eq!(role, Role::RestaurantOwner);
    }

    #[test]
    fn signup_defaults_to_traveler() {
        let user: CreateUser = serde_json::from_value(serde_json::json!({
            "email": "amy@example.com",
            "password": "hunter2hunter2",
            "name": "Amy"
        }))
        .unwrap();
        assert_eq!(user.role, Role::Traveler);
    }
}
