//! etcd v3 registry store backend.

use std::time::Duration;

use async_trait::async_trait;
use etcd_client::{Client, ConnectOptions, GetOptions, PutOptions};
use shop_core::RegistryConfig;

use crate::error::DiscoveryError;
use crate::store::{LeaseId, RegistryStore};

/// [`RegistryStore`] backed by an etcd v3 cluster.
///
/// The underlying client multiplexes one connection and is cheap to clone,
/// which keeps the trait methods `&self` and safe for concurrent use.
pub struct EtcdStore {
    client: Client,
}

impl EtcdStore {
    /// Connect to the configured endpoints.
    ///
    /// A connection failure here is fatal for a service that must be
    /// discoverable; consumers with a static fallback should treat it as
    /// soft-fail instead (see the gateway).
    pub async fn connect(config: &RegistryConfig) -> Result<Self, DiscoveryError> {
        let options = ConnectOptions::new()
            .with_connect_timeout(Duration::from_secs(config.dial_timeout_secs));
        let client = Client::connect(&config.endpoints, Some(options))
            .await
            .map_err(|e| DiscoveryError::Connect(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RegistryStore for EtcdStore {
    async fn grant(&self, ttl: Duration) -> Result<LeaseId, DiscoveryError> {
        let mut client = self.client.clone();
        let resp = client
            .lease_grant(ttl.as_secs() as i64, None)
            .await
            .map_err(|e| DiscoveryError::store("lease grant", e))?;
        Ok(LeaseId(resp.id()))
    }

    async fn put(&self, key: &str, value: &str, lease: LeaseId) -> Result<(), DiscoveryError> {
        let mut client = self.client.clone();
        client
            .put(key, value, Some(PutOptions::new().with_lease(lease.0)))
            .await
            .map_err(|e| DiscoveryError::store("put", e))?;
        Ok(())
    }

    async fn get_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, DiscoveryError> {
        let mut client = self.client.clone();
        let resp = client
            .get(prefix, Some(GetOptions::new().with_prefix()))
            .await
            .map_err(|e| DiscoveryError::store("get", e))?;

        let mut pairs = Vec::with_capacity(resp.kvs().len());
        for kv in resp.kvs() {
            let key = kv
                .key_str()
                .map_err(|e| DiscoveryError::store("get", e))?
                .to_string();
            let value = kv
                .value_str()
                .map_err(|e| DiscoveryError::store("get", e))?
                .to_string();
            pairs.push((key, value));
        }
        Ok(pairs)
    }

    async fn delete(&self, key: &str) -> Result<(), DiscoveryError> {
        let mut client = self.client.clone();
        client
            .delete(key, None)
            .await
            .map_err(|e| DiscoveryError::store("delete", e))?;
        Ok(())
    }

    async fn keep_alive(&self, lease: LeaseId) -> Result<(), DiscoveryError> {
        let mut client = self.client.clone();
        let (mut keeper, mut responses) = client
            .lease_keep_alive(lease.0)
            .await
            .map_err(|e| DiscoveryError::store("keep alive", e))?;
        keeper
            .keep_alive()
            .await
            .map_err(|e| DiscoveryError::store("keep alive", e))?;
        // The store answers each keep-alive; a TTL of zero means the lease
        // was already collected.
        match responses.message().await {
            Ok(Some(resp)) if resp.ttl() > 0 => Ok(()),
            Ok(_) => Err(DiscoveryError::LeaseExpired(lease)),
            Err(e) => Err(DiscoveryError::store("keep alive", e)),
        }
    }
}
