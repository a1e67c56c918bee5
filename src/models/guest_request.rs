use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum RequestType {
    EarlyCheckin,
    LateCheckout,
    RoomService,
    Housekeeping,
    Maintenance,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A service request attached to an existing booking, independent of the
/// booking's stay-status lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GuestRequest {
    pub request_id: i64,
    pub booking_id: i64,
    pub request_type: RequestType,
    pub request_status: RequestStatus,
    pub request_details: String,
    pub priority: Priority,
    pub assigned_to: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGuestRequest {
    pub request_type: RequestType,
    #[validate(length(min = 1))]
    pub request_details: String,
    #[serde(default = "default_priority")]
    pub priority: Priority,
}

fn default_priority() -> Priority {
    Priority::Medium
}

#[derive(Debug, Deserialize)]
pub struct UpdateGuestRequest {
    pub request_status: Option<RequestStatus>,
    pub request_details: Option<String>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&RequestType::EarlyCheckin).unwrap(),
            "\"early_checkin\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let p: Priority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(p, Priority::Urgent);
    }

    #[test]
    fn priority_defaults_to_medium() {
        let req: CreateGuestRequest = serde_json::from_value(serde_json::json!({
            "request_type": "housekeeping",
            "request_details": "Extra towels please"
        }))
        .unwrap();
        assert_eq!(req.priority, Priority::Medium);
    }
}
