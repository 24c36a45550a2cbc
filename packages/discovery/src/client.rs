//! Registry client: registration with lease keep-alive, discovery, cleanup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use shop_core::{RegistryConfig, ServiceInstance};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use crate::error::DiscoveryError;
use crate::etcd::EtcdStore;
use crate::store::{LeaseId, RegistryStore};

/// Floor for the renewal period so tiny TTLs still renew on a sane cadence.
const MIN_RENEW_PERIOD: Duration = Duration::from_secs(1);

/// One registered instance: its lease and the task renewing it.
struct Registration {
    lease: LeaseId,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Registration {
    /// Cancel the keep-alive task and wait for it to finish.
    async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("keep-alive task failed to join: {}", e);
        }
    }
}

/// Client for the lease-based service registry.
///
/// Registering binds a record to a TTL lease and starts a background task
/// that renews the lease until `deregister` or `close`. If the process dies,
/// renewal stops and the store garbage-collects the record after the TTL.
pub struct RegistryClient {
    store: Arc<dyn RegistryStore>,
    prefix: String,
    registrations: Mutex<HashMap<String, Registration>>,
}

impl RegistryClient {
    /// Create a client over an already-connected store.
    pub fn new(store: Arc<dyn RegistryStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            registrations: Mutex::new(HashMap::new()),
        }
    }

    /// Connect to the configured etcd endpoints.
    pub async fn connect(config: &RegistryConfig) -> Result<Self, DiscoveryError> {
        let store = EtcdStore::connect(config).await?;
        Ok(Self::new(Arc::new(store), config.prefix.clone()))
    }

    /// Key an instance registers under: `<prefix><name>/<host>:<port>`.
    fn registration_key(&self, instance: &ServiceInstance) -> String {
        format!("{}{}/{}", self.prefix, instance.name, instance.address())
    }

    /// Register an instance and keep its lease alive until deregistration.
    ///
    /// Idempotent: registering the same instance again refreshes the record
    /// under the existing lease instead of minting a second one.
    pub async fn register(
        &self,
        instance: &ServiceInstance,
        ttl: Duration,
    ) -> Result<(), DiscoveryError> {
        let key = self.registration_key(instance);
        let value = instance.address();

        let mut registrations = self.registrations.lock().await;
        if let Some(existing) = registrations.get(&key) {
            self.store.put(&key, &value, existing.lease).await?;
            tracing::debug!("re-registered {} under lease {}", instance, existing.lease);
            return Ok(());
        }

        let lease = self.store.grant(ttl).await?;
        self.store.put(&key, &value, lease).await?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(keep_alive_loop(
            self.store.clone(),
            lease,
            ttl,
            key.clone(),
            shutdown_rx,
        ));
        registrations.insert(
            key,
            Registration {
                lease,
                shutdown: shutdown_tx,
                task,
            },
        );

        tracing::info!("registered {} with lease {} (ttl {:?})", instance, lease, ttl);
        Ok(())
    }

    /// Dial addresses of all live instances of a service.
    ///
    /// An empty namespace yields an empty vec, never an error; only store
    /// round-trip failures are `Err`.
    pub async fn discover(&self, service_name: &str) -> Result<Vec<String>, DiscoveryError> {
        let prefix = format!("{}{}/", self.prefix, service_name);
        let pairs = self.store.get_prefix(&prefix).await?;
        Ok(pairs.into_iter().map(|(_, address)| address).collect())
    }

    /// Remove an instance's record and stop renewing its lease.
    ///
    /// Best-effort: if the store is unreachable the lease TTL still cleans
    /// the record up eventually, so callers should log and continue.
    pub async fn deregister(&self, instance: &ServiceInstance) -> Result<(), DiscoveryError> {
        let key = self.registration_key(instance);
        if let Some(registration) = self.registrations.lock().await.remove(&key) {
            registration.stop().await;
        }
        self.store.delete(&key).await?;
        tracing::info!("deregistered {}", instance);
        Ok(())
    }

    /// Stop all keep-alive tasks and release the store connection.
    ///
    /// Leases are not revoked here: a clean shutdown and a crash both leave
    /// cleanup to the TTL, keeping one cleanup path for both.
    pub async fn close(&self) -> Result<(), DiscoveryError> {
        let registrations: Vec<Registration> = {
            let mut map = self.registrations.lock().await;
            map.drain().map(|(_, registration)| registration).collect()
        };
        for registration in registrations {
            registration.stop().await;
        }
        Ok(())
    }
}

/// Renew `lease` every TTL/3 until told to shut down.
async fn keep_alive_loop(
    store: Arc<dyn RegistryStore>,
    lease: LeaseId,
    ttl: Duration,
    key: String,
    mut shutdown: watch::Receiver<bool>,
) {
    let period = (ttl / 3).max(MIN_RENEW_PERIOD);
    let mut ticker = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = store.keep_alive(lease).await {
                    tracing::warn!("lease renewal failed for {}: {}", key, e);
                }
            }
            _ = shutdown.changed() => {
                tracing::debug!("stopping keep-alive for {}", key);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn registration_key_layout() {
        let client = RegistryClient::new(Arc::new(MemoryStore::new()), "/microshop/services/");
        let instance = ServiceInstance::new("order-service", "10.0.0.5", 50052);
        assert_eq!(
            client.registration_key(&instance),
            "/microshop/services/order-service/10.0.0.5:50052"
        );
    }
}
