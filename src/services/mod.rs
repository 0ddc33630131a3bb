// Service exports
pub mod backend;
pub mod cache;

pub use backend::{BackendClient, BackendError, PersistOutcome};
pub use cache::{CacheKey, SnapshotCache};
