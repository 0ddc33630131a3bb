use crate::models::{ConnectionRecord, ConnectionStatus, DeliveryState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What happens to a `Declined` pair on a later request.
///
/// No re-request path is exercised in production today, so `Terminal`
/// is the default; `AllowRerequest` exists as an explicit policy knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclinePolicy {
    Terminal,
    AllowRerequest,
}

impl Default for DeclinePolicy {
    fn default() -> Self {
        DeclinePolicy::Terminal
    }
}

/// Outcome of a connection request.
///
/// Duplicate submissions are expected (UI retries), so the conflicting
/// variants are idempotent no-ops rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestOutcome {
    Requested,
    AlreadyPending,
    AlreadyConnected,
    PreviouslyDeclined,
}

/// Outcome of the candidate side accepting or declining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RespondOutcome {
    Accepted,
    Declined,
    /// No pending request exists for the pair.
    NoPendingRequest,
}

/// Per-(viewer, candidate) relationship records with guarded
/// transitions: `None -> Pending -> Connected` or `None -> Declined`
/// via a declined pending request.
///
/// `None` is the absence of a record, never a stored row.
#[derive(Debug, Clone, Default)]
pub struct ConnectionLedger {
    records: HashMap<(String, String), ConnectionRecord>,
    decline_policy: DeclinePolicy,
}

impl ConnectionLedger {
    pub fn new(decline_policy: DeclinePolicy) -> Self {
        Self {
            records: HashMap::new(),
            decline_policy,
        }
    }

    /// Request a connection. Valid only from the `None` state; existing
    /// records report their status without mutating anything.
    pub fn request(
        &mut self,
        viewer_id: &str,
        candidate_id: &str,
        message: Option<String>,
    ) -> RequestOutcome {
        let key = (viewer_id.to_string(), candidate_id.to_string());

        if let Some(record) = self.records.get(&key) {
            match record.status {
                ConnectionStatus::Pending => return RequestOutcome::AlreadyPending,
                ConnectionStatus::Connected => return RequestOutcome::AlreadyConnected,
                ConnectionStatus::Declined => {
                    if self.decline_policy == DeclinePolicy::Terminal {
                        return RequestOutcome::PreviouslyDeclined;
                    }
                    // AllowRerequest: fall through and overwrite below.
                }
            }
        }

        self.records.insert(
            key,
            ConnectionRecord {
                viewer_id: viewer_id.to_string(),
                candidate_id: candidate_id.to_string(),
                status: ConnectionStatus::Pending,
                requested_at: chrono::Utc::now(),
                responded_at: None,
                message,
                delivery: DeliveryState::Unconfirmed,
            },
        );

        RequestOutcome::Requested
    }

    /// Candidate side accepts: `Pending -> Connected`.
    pub fn accept(&mut self, viewer_id: &str, candidate_id: &str) -> RespondOutcome {
        self.respond(viewer_id, candidate_id, ConnectionStatus::Connected)
    }

    /// Candidate side declines: `Pending -> Declined`.
    pub fn decline(&mut self, viewer_id: &str, candidate_id: &str) -> RespondOutcome {
        self.respond(viewer_id, candidate_id, ConnectionStatus::Declined)
    }

    fn respond(
        &mut self,
        viewer_id: &str,
        candidate_id: &str,
        target: ConnectionStatus,
    ) -> RespondOutcome {
        let key = (viewer_id.to_string(), candidate_id.to_string());

        match self.records.get_mut(&key) {
            Some(record) if record.status == ConnectionStatus::Pending => {
                record.status = target;
                record.responded_at = Some(chrono::Utc::now());
                match target {
                    ConnectionStatus::Connected => RespondOutcome::Accepted,
                    _ => RespondOutcome::Declined,
                }
            }
            // Accepting twice, declining a settled pair, or responding
            // to a request that was never made all land here.
            _ => RespondOutcome::NoPendingRequest,
        }
    }

    /// The booking gate: true iff the pair is `Connected`.
    pub fn can_book_session(&self, viewer_id: &str, candidate_id: &str) -> bool {
        self.status(viewer_id, candidate_id) == Some(ConnectionStatus::Connected)
    }

    /// Current status, or None when no record exists.
    pub fn status(&self, viewer_id: &str, candidate_id: &str) -> Option<ConnectionStatus> {
        self.records
            .get(&(viewer_id.to_string(), candidate_id.to_string()))
            .map(|r| r.status)
    }

    pub fn record(&self, viewer_id: &str, candidate_id: &str) -> Option<&ConnectionRecord> {
        self.records
            .get(&(viewer_id.to_string(), candidate_id.to_string()))
    }

    /// Mark the external delivery of the request as confirmed.
    pub fn confirm_delivery(&mut self, viewer_id: &str, candidate_id: &str) {
        self.set_delivery(viewer_id, candidate_id, DeliveryState::Confirmed);
    }

    /// Record an external delivery failure. The optimistic local state
    /// is kept; callers surface the divergence instead of rolling back.
    pub fn fail_delivery(&mut self, viewer_id: &str, candidate_id: &str) {
        self.set_delivery(viewer_id, candidate_id, DeliveryState::Failed);
    }

    fn set_delivery(&mut self, viewer_id: &str, candidate_id: &str, state: DeliveryState) {
        if let Some(record) = self
            .records
            .get_mut(&(viewer_id.to_string(), candidate_id.to_string()))
        {
            record.delivery = state;
        }
    }

    /// Pending requests addressed to a candidate (their inbox).
    pub fn pending_for_candidate(&self, candidate_id: &str) -> Vec<&ConnectionRecord> {
        self.records
            .values()
            .filter(|r| r.candidate_id == candidate_id && r.status == ConnectionStatus::Pending)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_state_is_absence_of_record() {
        let ledger = ConnectionLedger::default();
        assert_eq!(ledger.status("v", "c"), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_request_creates_pending() {
        let mut ledger = ConnectionLedger::default();

        let outcome = ledger.request("v", "c", Some("Hi!".to_string()));

        assert_eq!(outcome, RequestOutcome::Requested);
        assert_eq!(ledger.status("v", "c"), Some(ConnectionStatus::Pending));
        assert_eq!(ledger.record("v", "c").unwrap().delivery, DeliveryState::Unconfirmed);
    }

    #[test]
    fn test_duplicate_request_is_idempotent() {
        let mut ledger = ConnectionLedger::default();
        ledger.request("v", "c", None);

        assert_eq!(ledger.request("v", "c", None), RequestOutcome::AlreadyPending);
        assert_eq!(ledger.len(), 1);

        ledger.accept("v", "c");
        assert_eq!(ledger.request("v", "c", None), RequestOutcome::AlreadyConnected);
        assert_eq!(ledger.status("v", "c"), Some(ConnectionStatus::Connected));
    }

    #[test]
    fn test_accept_transitions_to_connected() {
        let mut ledger = ConnectionLedger::default();
        ledger.request("v", "c", None);

        assert_eq!(ledger.accept("v", "c"), RespondOutcome::Accepted);
        assert_eq!(ledger.status("v", "c"), Some(ConnectionStatus::Connected));
        assert!(ledger.record("v", "c").unwrap().responded_at.is_some());
    }

    #[test]
    fn test_decline_transitions_to_declined() {
        let mut ledger = ConnectionLedger::default();
        ledger.request("v", "c", None);

        assert_eq!(ledger.decline("v", "c"), RespondOutcome::Declined);
        assert_eq!(ledger.status("v", "c"), Some(ConnectionStatus::Declined));
    }

    #[test]
    fn test_respond_without_pending_is_rejected() {
        let mut ledger = ConnectionLedger::default();

        assert_eq!(ledger.accept("v", "c"), RespondOutcome::NoPendingRequest);

        ledger.request("v", "c", None);
        ledger.accept("v", "c");

        // Settled pairs cannot be re-responded to.
        assert_eq!(ledger.accept("v", "c"), RespondOutcome::NoPendingRequest);
        assert_eq!(ledger.decline("v", "c"), RespondOutcome::NoPendingRequest);
        assert_eq!(ledger.status("v", "c"), Some(ConnectionStatus::Connected));
    }

    #[test]
    fn test_declined_is_terminal_by_default() {
        let mut ledger = ConnectionLedger::default();
        ledger.request("v", "c", None);
        ledger.decline("v", "c");

        assert_eq!(ledger.request("v", "c", None), RequestOutcome::PreviouslyDeclined);
        assert_eq!(ledger.status("v", "c"), Some(ConnectionStatus::Declined));
    }

    #[test]
    fn test_rerequest_policy_allows_new_pending() {
        let mut ledger = ConnectionLedger::new(DeclinePolicy::AllowRerequest);
        ledger.request("v", "c", None);
        ledger.decline("v", "c");

        assert_eq!(ledger.request("v", "c", None), RequestOutcome::Requested);
        assert_eq!(ledger.status("v", "c"), Some(ConnectionStatus::Pending));
    }

    #[test]
    fn test_booking_gate_requires_connected() {
        let mut ledger = ConnectionLedger::default();
        assert!(!ledger.can_book_session("v", "c"));

        ledger.request("v", "c", None);
        assert!(!ledger.can_book_session("v", "c"));

        ledger.accept("v", "c");
        assert!(ledger.can_book_session("v", "c"));

        ledger.request("v", "declined", None);
        ledger.decline("v", "declined");
        assert!(!ledger.can_book_session("v", "declined"));
    }

    #[test]
    fn test_delivery_states() {
        let mut ledger = ConnectionLedger::default();
        ledger.request("v", "c", None);

        ledger.fail_delivery("v", "c");
        assert_eq!(ledger.record("v", "c").unwrap().delivery, DeliveryState::Failed);
        // Local optimistic state survives the failure
        assert_eq!(ledger.status("v", "c"), Some(ConnectionStatus::Pending));

        ledger.confirm_delivery("v", "c");
        assert_eq!(ledger.record("v", "c").unwrap().delivery, DeliveryState::Confirmed);
    }

    #[test]
    fn test_pending_inbox_for_candidate() {
        let mut ledger = ConnectionLedger::default();
        ledger.request("v1", "c", None);
        ledger.request("v2", "c", None);
        ledger.request("v3", "other", None);
        ledger.accept("v1", "c");

        let inbox = ledger.pending_for_candidate("c");
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].viewer_id, "v2");
    }
}
