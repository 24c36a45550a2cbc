//! In-memory registry store for tests and single-process runs.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::DiscoveryError;
use crate::store::{LeaseId, RegistryStore};

/// A granted lease and its current expiry deadline.
#[derive(Debug, Clone)]
struct LeaseEntry {
    ttl: Duration,
    expires_at: Instant,
}

impl LeaseEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// A stored key bound to a lease.
#[derive(Debug, Clone)]
struct KeyEntry {
    value: String,
    lease: LeaseId,
}

#[derive(Debug, Default)]
struct Inner {
    next_lease: i64,
    leases: HashMap<LeaseId, LeaseEntry>,
    entries: HashMap<String, KeyEntry>,
}

impl Inner {
    /// Drop leases past their deadline and the keys bound to them.
    fn purge_expired(&mut self) {
        let expired: Vec<LeaseId> = self
            .leases
            .iter()
            .filter(|(_, lease)| lease.is_expired())
            .map(|(id, _)| *id)
            .collect();
        for id in expired {
            self.leases.remove(&id);
            self.entries.retain(|_, entry| entry.lease != id);
        }
    }
}

/// In-memory [`RegistryStore`] implementation.
///
/// Lease expiry uses the tokio clock, so TTL behavior is testable with a
/// paused runtime. Expired state is collected lazily on access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) leases. Useful for asserting that
    /// re-registration does not mint duplicate leases.
    pub async fn lease_count(&self) -> usize {
        let mut inner = self.inner.write().await;
        inner.purge_expired();
        inner.leases.len()
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    async fn grant(&self, ttl: Duration) -> Result<LeaseId, DiscoveryError> {
        let mut inner = self.inner.write().await;
        inner.purge_expired();
        inner.next_lease += 1;
        let id = LeaseId(inner.next_lease);
        inner.leases.insert(
            id,
            LeaseEntry {
                ttl,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(id)
    }

    async fn put(&self, key: &str, value: &str, lease: LeaseId) -> Result<(), DiscoveryError> {
        let mut inner = self.inner.write().await;
        inner.purge_expired();
        if !inner.leases.contains_key(&lease) {
            return Err(DiscoveryError::LeaseExpired(lease));
        }
        inner.entries.insert(
            key.to_string(),
            KeyEntry {
                value: value.to_string(),
                lease,
            },
        );
        Ok(())
    }

    async fn get_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, DiscoveryError> {
        let mut inner = self.inner.write().await;
        inner.purge_expired();
        let mut pairs: Vec<(String, String)> = inner
            .entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect();
        pairs.sort();
        Ok(pairs)
    }

    async fn delete(&self, key: &str) -> Result<(), DiscoveryError> {
        let mut inner = self.inner.write().await;
        inner.entries.remove(key);
        Ok(())
    }

    async fn keep_alive(&self, lease: LeaseId) -> Result<(), DiscoveryError> {
        let mut inner = self.inner.write().await;
        inner.purge_expired();
        match inner.leases.get_mut(&lease) {
            Some(entry) => {
                entry.expires_at = Instant::now() + entry.ttl;
                Ok(())
            }
            None => Err(DiscoveryError::LeaseExpired(lease)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_requires_live_lease() {
        let store = MemoryStore::new();
        let err = store.put("k", "v", LeaseId(99)).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::LeaseExpired(LeaseId(99))));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_lease_takes_its_keys_with_it() {
        let store = MemoryStore::new();
        let lease = store.grant(Duration::from_secs(5)).await.unwrap();
        store.put("/svc/a", "addr", lease).await.unwrap();
        assert_eq!(store.get_prefix("/svc/").await.unwrap().len(), 1);

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(store.get_prefix("/svc/").await.unwrap().is_empty());
        assert!(matches!(
            store.keep_alive(lease).await,
            Err(DiscoveryError::LeaseExpired(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn keep_alive_extends_the_deadline() {
        let store = MemoryStore::new();
        let lease = store.grant(Duration::from_secs(5)).await.unwrap();
        store.put("/svc/a", "addr", lease).await.unwrap();

        tokio::time::advance(Duration::from_secs(4)).await;
        store.keep_alive(lease).await.unwrap();
        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(store.get_prefix("/svc/").await.unwrap().len(), 1);
    }
}
