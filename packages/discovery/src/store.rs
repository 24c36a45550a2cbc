//! Key-value store contract the registry client runs against.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DiscoveryError;

/// Opaque handle for a time-bounded liveness grant issued by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeaseId(pub i64);

impl std::fmt::Display for LeaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Consistent key-value store with lease support.
///
/// Implementations must be safe for concurrent use: register, discover, and
/// deregister calls share one store connection.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Create a lease with the given TTL.
    async fn grant(&self, ttl: Duration) -> Result<LeaseId, DiscoveryError>;

    /// Write `key` → `value` bound to `lease`. Overwrites an existing key.
    async fn put(&self, key: &str, value: &str, lease: LeaseId) -> Result<(), DiscoveryError>;

    /// All live `(key, value)` pairs under `prefix`. Empty is a normal result.
    async fn get_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, DiscoveryError>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), DiscoveryError>;

    /// Push the lease's expiry one TTL window into the future.
    ///
    /// Must be called strictly before expiry; a lease the store has already
    /// collected cannot be revived.
    async fn keep_alive(&self, lease: LeaseId) -> Result<(), DiscoveryError>;
}
