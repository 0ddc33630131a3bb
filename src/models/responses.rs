use crate::core::{BookingOutcome, Classification, GestureEffect, RequestOutcome, RespondOutcome, SettleOutcome};
use crate::models::domain::{AvailabilitySlot, Candidate, ConnectionStatus, SessionType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response when a browsing session is opened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartBrowseResponse {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    pub stack: StackView,
    #[serde(rename = "activeFilterCount")]
    pub active_filter_count: usize,
}

/// The visible card stack and cursor position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackView {
    pub current: Option<Candidate>,
    /// Cards rendered beneath the current one.
    pub next: Vec<Candidate>,
    pub index: usize,
    pub total: usize,
    pub exhausted: bool,
    pub expanded: bool,
}

/// Response to a completed gesture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureResponse {
    pub classification: Classification,
    pub effect: GestureEffect,
    pub stack: StackView,
}

/// Response to a settle request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleResponse {
    pub outcome: SettleOutcome,
    pub stack: StackView,
}

/// Response to a connection request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionResponse {
    pub outcome: RequestOutcome,
    pub status: Option<ConnectionStatus>,
    /// False when the backend delivery call failed; the local Pending
    /// state is kept and the caller is expected to surface the
    /// divergence.
    #[serde(rename = "deliveryConfirmed")]
    pub delivery_confirmed: bool,
}

/// Response to an accept/decline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondResponse {
    pub outcome: RespondOutcome,
    pub status: Option<ConnectionStatus>,
}

/// Response to a booking attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    /// None when the connection gate blocked the attempt before the
    /// allocator was consulted.
    pub outcome: Option<BookingOutcome>,
    /// Set when the attempt succeeded and was persisted.
    #[serde(rename = "confirmationId")]
    pub confirmation_id: Option<String>,
    pub slot: Option<AvailabilitySlot>,
    /// Directs the caller to the connection flow when the relationship
    /// gate blocked the booking.
    #[serde(rename = "connectionRequired")]
    pub connection_required: bool,
}

/// A mentor's slots and session types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotListResponse {
    #[serde(rename = "mentorId")]
    pub mentor_id: String,
    pub slots: Vec<AvailabilitySlot>,
    #[serde(rename = "sessionTypes")]
    pub session_types: Vec<SessionType>,
}

/// Aggregate capacity for a mentor, recomputed on demand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityResponse {
    #[serde(rename = "mentorId")]
    pub mentor_id: String,
    #[serde(rename = "totalCapacity")]
    pub total_capacity: u32,
    #[serde(rename = "totalBooked")]
    pub total_booked: u32,
    #[serde(rename = "totalAvailable")]
    pub total_available: u32,
}

/// Response to a session-type rename
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameSessionTypeResponse {
    #[serde(rename = "updatedSlots")]
    pub updated_slots: usize,
}

/// Phase-one response for a session-type delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePreviewResponse {
    pub name: String,
    #[serde(rename = "affectedSlots")]
    pub affected_slots: usize,
}

/// Phase-two response for a session-type delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmResponse {
    pub name: String,
    #[serde(rename = "removedSlots")]
    pub removed_slots: usize,
}
