//! Configuration for the registry, services, and the gateway.
//!
//! Values come from defaults and builder methods; parsing a config file is
//! left to the embedding application.

use serde::{Deserialize, Serialize};

use crate::ServiceInstance;

/// Configuration for the etcd-backed service registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// etcd endpoints to connect to.
    pub endpoints: Vec<String>,
    /// Namespace prefix all registration keys live under.
    pub prefix: String,
    /// Store dial timeout in seconds.
    pub dial_timeout_secs: u64,
    /// Lease TTL in seconds; records disappear this long after the last renewal.
    pub lease_ttl_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoints: vec!["localhost:2379".to_string()],
            prefix: "/microshop/services/".to_string(),
            dial_timeout_secs: 5,
            lease_ttl_secs: 30,
        }
    }
}

impl RegistryConfig {
    /// Set the etcd endpoints.
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the namespace prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the lease TTL in seconds.
    pub fn with_lease_ttl_secs(mut self, secs: u64) -> Self {
        self.lease_ttl_secs = secs;
        self
    }
}

/// Identity of the local service process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl ServiceConfig {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }

    /// The instance identity this process registers under.
    pub fn instance(&self) -> ServiceInstance {
        ServiceInstance::new(self.name.clone(), self.host.clone(), self.port)
    }
}

/// One downstream service the gateway connects to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTarget {
    /// Logical service name used for discovery lookups.
    pub name: String,
    /// Static address used when discovery has no live instance.
    pub default_addr: String,
}

impl ServiceTarget {
    pub fn new(name: impl Into<String>, default_addr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_addr: default_addr.into(),
        }
    }
}

/// Configuration for the gateway's client connection manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Downstream services, connected eagerly at startup.
    pub services: Vec<ServiceTarget>,
    /// Timeout in seconds for a single discovery lookup.
    pub discover_timeout_secs: u64,
    /// Timeout in seconds for establishing one channel.
    pub connect_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            services: vec![
                ServiceTarget::new("user-service", "localhost:50051"),
                ServiceTarget::new("order-service", "localhost:50052"),
            ],
            discover_timeout_secs: 2,
            connect_timeout_secs: 5,
        }
    }
}

impl GatewayConfig {
    /// Replace the downstream service list.
    pub fn with_services(mut self, services: Vec<ServiceTarget>) -> Self {
        self.services = services;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_prefix_and_ttl() {
        let config = RegistryConfig::default();
        assert_eq!(config.prefix, "/microshop/services/");
        assert_eq!(config.lease_ttl_secs, 30);
    }

    #[test]
    fn gateway_defaults_cover_both_services() {
        let config = GatewayConfig::default();
        let names: Vec<_> = config.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["user-service", "order-service"]);
    }
}
