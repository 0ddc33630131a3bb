use crate::models::{Candidate, Role};
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache for candidate pool snapshots.
///
/// Browsing sessions take a point-in-time snapshot of the pool, so a
/// short TTL here saves a backend round trip when several sessions
/// start close together without risking long-stale pools.
pub struct SnapshotCache {
    pools: moka::future::Cache<String, Arc<Vec<Candidate>>>,
}

impl SnapshotCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let pools = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { pools }
    }

    pub async fn get(&self, role: Role) -> Option<Arc<Vec<Candidate>>> {
        let hit = self.pools.get(&CacheKey::pool(role)).await;
        if hit.is_some() {
            tracing::trace!("Pool cache hit for {:?}", role);
        }
        hit
    }

    pub async fn insert(&self, role: Role, pool: Vec<Candidate>) -> Arc<Vec<Candidate>> {
        let pool = Arc::new(pool);
        self.pools.insert(CacheKey::pool(role), pool.clone()).await;
        pool
    }

    pub async fn invalidate(&self, role: Role) {
        self.pools.invalidate(&CacheKey::pool(role)).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.pools.entry_count()
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    pub fn pool(role: Role) -> String {
        match role {
            Role::Mentor => "pool:mentor".to_string(),
            Role::Mentee => "pool:mentee".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::pool(Role::Mentor), "pool:mentor");
        assert_eq!(CacheKey::pool(Role::Mentee), "pool:mentee");
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = SnapshotCache::new(10, 60);

        assert!(cache.get(Role::Mentor).await.is_none());

        cache.insert(Role::Mentor, vec![]).await;
        assert!(cache.get(Role::Mentor).await.is_some());
        // Roles are cached independently
        assert!(cache.get(Role::Mentee).await.is_none());

        cache.invalidate(Role::Mentor).await;
        assert!(cache.get(Role::Mentor).await.is_none());
    }
}
