//! Process-wide cache for expensive full-collection fetches
//!
//! Bulk reads like "all projects" are expensive round-trips that many
//! commands repeat within one session. The cache is explicit opt-in per
//! call site, keyed by resource kind, and time-bounded: entries expire
//! after a fixed TTL and are rebuilt transparently on the next opted-in
//! access. Nothing is ever persisted across process invocations, and
//! write operations are never cached.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use capstan_domain::{Resource, ResourceKind};

use crate::ports::{Clock, TransportError};

/// Default time-to-live for cached collections, in seconds.
pub const DEFAULT_TTL_SECONDS: i64 = 60;

/// A cached collection and the instant it becomes stale.
#[derive(Debug, Clone)]
struct CacheEntry {
    resources: Vec<Resource>,
    expires_at: DateTime<Utc>,
}

/// Keyed, time-bounded cache for full-collection reads.
///
/// The clock is injected so expiry behavior is deterministic under
/// test. The cache is safe to share across concurrent commands: the
/// fetch-or-serve decision for a key is taken under a per-key lock, so
/// simultaneous opted-in reads of a stale key perform one fetch, not
/// several.
pub struct ResourceCache {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    state: Mutex<HashMap<ResourceKind, CacheEntry>>,
    fetch_locks: Mutex<HashMap<ResourceKind, Arc<tokio::sync::Mutex<()>>>>,
}

impl ResourceCache {
    /// Creates a cache with the given clock and TTL.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            state: Mutex::new(HashMap::new()),
            fetch_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a cache with the default TTL.
    #[must_use]
    pub fn with_default_ttl(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Duration::seconds(DEFAULT_TTL_SECONDS))
    }

    fn state_guard(&self) -> MutexGuard<'_, HashMap<ResourceKind, CacheEntry>> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn fetch_lock(&self, kind: ResourceKind) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .fetch_locks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(locks.entry(kind).or_default())
    }

    /// The cached collection for a kind, if a live entry exists.
    #[must_use]
    pub fn get(&self, kind: ResourceKind) -> Option<Vec<Resource>> {
        let now = self.clock.now();
        let state = self.state_guard();
        state
            .get(&kind)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.resources.clone())
    }

    /// Stores a freshly fetched collection, stamping a new expiry.
    pub fn set(&self, kind: ResourceKind, resources: Vec<Resource>) {
        let expires_at = self.clock.now() + self.ttl;
        self.state_guard()
            .insert(kind, CacheEntry { resources, expires_at });
    }

    /// Whether the entry for a kind is absent or past its expiry.
    #[must_use]
    pub fn is_expired(&self, kind: ResourceKind) -> bool {
        let now = self.clock.now();
        let state = self.state_guard();
        state.get(&kind).is_none_or(|entry| now >= entry.expires_at)
    }

    /// Drops the entry for a kind, forcing the next opted-in access to
    /// re-fetch.
    pub fn invalidate(&self, kind: ResourceKind) {
        self.state_guard().remove(&kind);
    }

    /// Serves the live entry for a kind, or performs the expensive
    /// fetch, stores the result and serves it.
    ///
    /// The expiry check and the fetch-or-serve branch are one step: the
    /// per-key lock guarantees a caller never observes one freshness
    /// state while acting on another, and that concurrent stale reads
    /// do not fetch twice.
    ///
    /// # Errors
    /// A failed fetch propagates unchanged and stores nothing.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        kind: ResourceKind,
        fetch: F,
    ) -> Result<Vec<Resource>, TransportError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Resource>, TransportError>>,
    {
        let lock = self.fetch_lock(kind);
        let _serialized = lock.lock().await;

        if let Some(live) = self.get(kind) {
            debug!(kind = %kind, "cache hit");
            return Ok(live);
        }

        debug!(kind = %kind, "cache miss, fetching collection");
        let fresh = fetch().await?;
        self.set(kind, fresh.clone());
        Ok(fresh)
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Clock whose time only moves when a test advances it.
    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn starting_at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(now),
            })
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn projects(names: &[&str]) -> Vec<Resource> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Resource::new(format!("Projects-{i}"), *name))
            .collect()
    }

    #[test]
    fn round_trip_within_ttl_returns_value_unchanged() {
        let clock = ManualClock::starting_at(epoch());
        let cache = ResourceCache::new(clock.clone(), Duration::seconds(60));

        let stored = projects(&["Website", "Billing"]);
        cache.set(ResourceKind::Project, stored.clone());

        clock.advance(Duration::seconds(59));
        assert_eq!(cache.get(ResourceKind::Project), Some(stored));
        assert!(!cache.is_expired(ResourceKind::Project));
    }

    #[test]
    fn entry_is_stale_once_ttl_elapses() {
        let clock = ManualClock::starting_at(epoch());
        let cache = ResourceCache::new(clock.clone(), Duration::seconds(60));

        cache.set(ResourceKind::Project, projects(&["Website"]));
        clock.advance(Duration::seconds(60));

        assert!(cache.is_expired(ResourceKind::Project));
        assert_eq!(cache.get(ResourceKind::Project), None);
    }

    #[test]
    fn missing_entry_counts_as_expired() {
        let clock = ManualClock::starting_at(epoch());
        let cache = ResourceCache::with_default_ttl(clock);
        assert!(cache.is_expired(ResourceKind::Machine));
        assert_eq!(cache.get(ResourceKind::Machine), None);
    }

    #[tokio::test]
    async fn get_or_fetch_serves_live_entry_without_fetching() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let clock = ManualClock::starting_at(epoch());
        let cache = ResourceCache::new(clock, Duration::seconds(60));
        cache.set(ResourceKind::Project, projects(&["Website"]));

        let fetches = AtomicUsize::new(0);
        let served = cache
            .get_or_fetch(ResourceKind::Project, || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(Vec::new())
            })
            .await
            .unwrap();
        assert_eq!(served.len(), 1);
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn get_or_fetch_refreshes_after_expiry() {
        let clock = ManualClock::starting_at(epoch());
        let cache = ResourceCache::new(clock.clone(), Duration::seconds(60));

        let first = cache
            .get_or_fetch(ResourceKind::Project, || async {
                Ok(projects(&["Website"]))
            })
            .await
            .unwrap();
        assert_eq!(first.len(), 1);

        clock.advance(Duration::seconds(61));
        let second = cache
            .get_or_fetch(ResourceKind::Project, || async {
                Ok(projects(&["Website", "Billing"]))
            })
            .await
            .unwrap();
        assert_eq!(second.len(), 2);

        // The refreshed entry is now the live one.
        assert_eq!(cache.get(ResourceKind::Project).map(|r| r.len()), Some(2));
    }

    #[tokio::test]
    async fn failed_fetch_stores_nothing() {
        let clock = ManualClock::starting_at(epoch());
        let cache = ResourceCache::new(clock, Duration::seconds(60));

        let result = cache
            .get_or_fetch(ResourceKind::Project, || async {
                Err(TransportError::Network("connection reset".to_string()))
            })
            .await;
        assert!(result.is_err());
        assert!(cache.is_expired(ResourceKind::Project));
    }

    #[test]
    fn invalidate_forces_refetch() {
        let clock = ManualClock::starting_at(epoch());
        let cache = ResourceCache::with_default_ttl(clock);
        cache.set(ResourceKind::Environment, projects(&["Production"]));

        cache.invalidate(ResourceKind::Environment);
        assert!(cache.is_expired(ResourceKind::Environment));
    }
}
