// Core engine exports
pub mod booking;
pub mod connection;
pub mod cursor;
pub mod filters;
pub mod gesture;
pub mod session;

pub use booking::{AvailabilityBook, BookingOutcome, SlotValidationError};
pub use connection::{ConnectionLedger, DeclinePolicy, RequestOutcome, RespondOutcome};
pub use cursor::CandidateCursor;
pub use gesture::{Classification, GestureClassifier, GestureSample, GestureThresholds};
pub use session::{GestureEffect, MatchingSession, SettleOutcome};
