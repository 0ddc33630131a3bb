use crate::models::{Candidate, Role};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when talking to the MentorLink backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Result of persisting a booking externally.
///
/// The backend is the source of truth: a `Conflict` means the slot was
/// taken elsewhere first and the caller must roll back its optimistic
/// local increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Confirmed { confirmation_id: String },
    Conflict,
}

/// HTTP client for the MentorLink backend.
///
/// Covers the engine's external collaborators: candidate pool supply,
/// connection-request delivery, booking persistence, and the mirrored
/// session-type registry. All calls are fire-and-forget from the
/// engine's perspective; local state never blocks on them.
pub struct BackendClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Fetch the candidate pool for a role, as a point-in-time
    /// ordered snapshot. The engine does not subscribe to updates.
    pub async fn fetch_candidates(&self, role: Role) -> Result<Vec<Candidate>, BackendError> {
        let role_str = serde_json::to_string(&role)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        let role_str = role_str.trim_matches('"');

        let url = format!(
            "{}?role={}",
            self.url("profiles"),
            urlencoding::encode(role_str)
        );

        tracing::debug!("Fetching candidate pool from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-MentorLink-Key", &self.api_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(BackendError::Unauthorized),
            status if !status.is_success() => {
                return Err(BackendError::ApiError(format!(
                    "Failed to fetch candidates: {}",
                    status
                )));
            }
            _ => {}
        }

        let json: Value = response.json().await?;

        let profiles = json
            .get("profiles")
            .and_then(|p| p.as_array())
            .ok_or_else(|| BackendError::InvalidResponse("Missing profiles array".into()))?;

        let candidates: Vec<Candidate> = profiles
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .collect();

        tracing::debug!("Fetched {} candidates for role {:?}", candidates.len(), role);

        Ok(candidates)
    }

    /// Deliver a connection request. Notification fan-out (email/push)
    /// is entirely the backend's concern.
    pub async fn send_connection_request(
        &self,
        viewer_id: &str,
        candidate_id: &str,
        message: Option<&str>,
    ) -> Result<(), BackendError> {
        let payload = serde_json::json!({
            "viewerId": viewer_id,
            "candidateId": candidate_id,
            "message": message,
        });

        let response = self
            .client
            .post(self.url("connection-requests"))
            .header("X-MentorLink-Key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::ApiError(format!(
                "Failed to deliver connection request: {}",
                response.status()
            )));
        }

        tracing::debug!("Delivered connection request: {} -> {}", viewer_id, candidate_id);

        Ok(())
    }

    /// Deliver the candidate side's accept/decline decision.
    pub async fn respond_to_connection_request(
        &self,
        viewer_id: &str,
        candidate_id: &str,
        decision: &str,
    ) -> Result<(), BackendError> {
        let payload = serde_json::json!({
            "viewerId": viewer_id,
            "candidateId": candidate_id,
            "decision": decision,
        });

        let response = self
            .client
            .post(self.url("connection-requests/respond"))
            .header("X-MentorLink-Key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::ApiError(format!(
                "Failed to deliver response: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Persist a booking. A 409 from the backend is a capacity
    /// conflict, not a transport error.
    pub async fn persist_booking(
        &self,
        slot_id: Uuid,
        viewer_id: &str,
        notes: Option<&str>,
    ) -> Result<PersistOutcome, BackendError> {
        let payload = serde_json::json!({
            "slotId": slot_id,
            "viewerId": viewer_id,
            "notes": notes,
        });

        let response = self
            .client
            .post(self.url("bookings"))
            .header("X-MentorLink-Key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!("Booking conflict for slot {}", slot_id);
            return Ok(PersistOutcome::Conflict);
        }

        if !response.status().is_success() {
            return Err(BackendError::ApiError(format!(
                "Failed to persist booking: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let confirmation_id = json
            .get("confirmationId")
            .and_then(|c| c.as_str())
            .ok_or_else(|| BackendError::InvalidResponse("Missing confirmationId".into()))?
            .to_string();

        Ok(PersistOutcome::Confirmed { confirmation_id })
    }

    /// Mirror a session-type rename so server state preserves the same
    /// referential-integrity invariant as the local cascade.
    pub async fn mirror_session_type_rename(
        &self,
        mentor_id: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), BackendError> {
        let payload = serde_json::json!({
            "mentorId": mentor_id,
            "oldName": old_name,
            "newName": new_name,
        });

        let response = self
            .client
            .post(self.url("session-types/rename"))
            .header("X-MentorLink-Key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::ApiError(format!(
                "Failed to mirror rename: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Mirror a confirmed session-type cascade delete.
    pub async fn mirror_session_type_delete(
        &self,
        mentor_id: &str,
        name: &str,
    ) -> Result<(), BackendError> {
        let url = format!(
            "{}/{}/{}",
            self.url("session-types"),
            urlencoding::encode(mentor_id),
            urlencoding::encode(name)
        );

        let response = self
            .client
            .delete(&url)
            .header("X-MentorLink-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::ApiError(format!(
                "Failed to mirror delete: {}",
                response.status()
            )));
        }

        Ok(())
    }
}
