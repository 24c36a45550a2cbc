//! Long-lived gRPC channel management with discovery-backed resolution.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use discovery::RegistryClient;
use shop_core::GatewayConfig;
use tonic::transport::{Channel, Endpoint};

use crate::error::GatewayError;

/// Manages gRPC client connections to the downstream microservices.
///
/// Discovery is optional: a gateway without a reachable registry still
/// starts and falls back to the static default address per service.
/// Providers of availability are strict about the registry; consumers with
/// a fallback are lenient.
pub struct ClientManager {
    config: GatewayConfig,
    discovery: Option<Arc<RegistryClient>>,
    channels: HashMap<String, Channel>,
}

impl ClientManager {
    /// Create a manager with no discovery; every service resolves to its
    /// static default.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            discovery: None,
            channels: HashMap::new(),
        }
    }

    /// Attach a registry client used to resolve service addresses.
    pub fn with_discovery(mut self, discovery: Arc<RegistryClient>) -> Self {
        self.discovery = Some(discovery);
        self
    }

    /// Resolve a logical service name to a dial address.
    ///
    /// Takes the first discovered instance; an empty result, a discovery
    /// error, or a lookup timeout all fall back to the static default.
    pub async fn resolve_target(&self, service: &str, default_addr: &str) -> String {
        if let Some(ref discovery) = self.discovery {
            let deadline = Duration::from_secs(self.config.discover_timeout_secs);
            match tokio::time::timeout(deadline, discovery.discover(service)).await {
                Ok(Ok(addresses)) if !addresses.is_empty() => {
                    tracing::info!("discovered {} at {}", service, addresses[0]);
                    return addresses[0].clone();
                }
                Ok(Ok(_)) => {
                    tracing::info!("no live instance of {}, using default address", service);
                }
                Ok(Err(e)) => {
                    tracing::warn!("discovery failed for {}: {}, using default address", service, e);
                }
                Err(_) => {
                    tracing::warn!("discovery timed out for {}, using default address", service);
                }
            }
        }
        default_addr.to_string()
    }

    /// Establish connections to all configured services.
    ///
    /// Fails fast with a wrapped error if any service cannot be reached;
    /// the gateway cannot serve requests with a missing dependency.
    pub async fn connect(&mut self) -> Result<(), GatewayError> {
        let targets = self.config.services.clone();
        for target in targets {
            let addr = self.resolve_target(&target.name, &target.default_addr).await;
            tracing::info!("connecting to {} at {}", target.name, addr);

            let endpoint = Endpoint::from_shared(format!("http://{}", addr))
                .map_err(|_| GatewayError::InvalidAddress {
                    service: target.name.clone(),
                    addr: addr.clone(),
                })?
                .connect_timeout(Duration::from_secs(self.config.connect_timeout_secs));

            let channel = endpoint
                .connect()
                .await
                .map_err(|source| GatewayError::Connect {
                    service: target.name.clone(),
                    addr: addr.clone(),
                    source,
                })?;

            tracing::info!("connected to {}", target.name);
            self.channels.insert(target.name, channel);
        }
        Ok(())
    }

    /// Channel for a connected service, for building RPC clients.
    pub fn channel(&self, service: &str) -> Result<Channel, GatewayError> {
        self.channels
            .get(service)
            .cloned()
            .ok_or_else(|| GatewayError::UnknownService(service.to_string()))
    }

    /// Tear down all channels and the attached registry client.
    ///
    /// Collects every close error instead of stopping at the first.
    pub async fn close(&mut self) -> Result<(), GatewayError> {
        let mut errors = Vec::new();

        // Dropping a channel tears down its connection.
        self.channels.clear();

        if let Some(discovery) = self.discovery.take() {
            if let Err(e) = discovery.close().await {
                errors.push(format!("registry close error: {}", e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(GatewayError::Close(errors))
        }
    }
}
