use crate::models::{Facet, FilterState, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to open a browsing session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartBrowseRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    /// Role being browsed (a mentee browses mentors and vice versa).
    pub role: Role,
    /// Optional initial filters (deep link from a saved search).
    #[serde(default)]
    pub filters: Option<FilterState>,
}

/// Request to toggle one facet value on a session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ToggleFilterRequest {
    pub facet: Facet,
    #[validate(length(min = 1))]
    pub value: String,
}

/// Request to replace a session's free-text search query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// One completed pointer gesture, start to end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureRequest {
    #[serde(rename = "startX")]
    pub start_x: f64,
    #[serde(rename = "startY")]
    pub start_y: f64,
    #[serde(rename = "startTimeMs")]
    pub start_time_ms: i64,
    #[serde(rename = "endX")]
    pub end_x: f64,
    #[serde(rename = "endY")]
    pub end_y: f64,
    #[serde(rename = "endTimeMs")]
    pub end_time_ms: i64,
}

/// Request to apply a deferred advancement after the settle animation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleRequest {
    pub seq: u64,
}

/// Request to send a connection request to a candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConnectionRequestBody {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "candidate_id", rename = "candidateId")]
    pub candidate_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request from the candidate side to accept or decline
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RespondRequestBody {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "candidate_id", rename = "candidateId")]
    pub candidate_id: String,
    /// "accept" or "decline"
    pub decision: String,
}

/// Request to add an availability slot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddSlotRequest {
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: chrono::Weekday,
    #[serde(rename = "startTime")]
    pub start_time: chrono::NaiveTime,
    #[serde(rename = "endTime")]
    pub end_time: chrono::NaiveTime,
    #[validate(length(min = 1))]
    #[serde(rename = "sessionType")]
    pub session_type: String,
    #[serde(rename = "maxBookings", default = "default_max_bookings")]
    pub max_bookings: u32,
}

fn default_max_bookings() -> u32 {
    1
}

/// Request to register a session type
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddSessionTypeRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
}

/// Request to rename a session type (cascades into tagged slots)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameSessionTypeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "old", rename = "oldName")]
    pub old_name: String,
    #[validate(length(min = 1))]
    #[serde(alias = "new", rename = "newName")]
    pub new_name: String,
}

/// Request to book a session against a specific slot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttemptBookingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "mentor_id", rename = "mentorId")]
    pub mentor_id: String,
    #[serde(rename = "slotId")]
    pub slot_id: Uuid,
    #[serde(default)]
    pub notes: Option<String>,
}
