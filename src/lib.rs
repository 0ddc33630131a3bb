//! MentorLink Engine - Candidate discovery and matching engine for the
//! MentorLink mentorship platform.
//!
//! This library provides the core browsing engine used by the MentorLink
//! web product: filter-driven candidate sets, the swipe/tap-driven
//! navigation cursor, the connection state machine, and the
//! availability/booking allocator.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    AvailabilityBook, BookingOutcome, CandidateCursor, Classification, ConnectionLedger,
    DeclinePolicy, GestureClassifier, GestureEffect, GestureThresholds, MatchingSession,
    RequestOutcome, SettleOutcome,
};
pub use models::{AvailabilitySlot, Candidate, ConnectionStatus, Facet, FilterState, Role, SessionType};
