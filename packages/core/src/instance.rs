//! Service instance identity for registration and discovery.

use serde::{Deserialize, Serialize};

/// One running replica of a named service.
///
/// Created at process start and immutable for the process lifetime; the
/// registry derives the registration key and dial address from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceInstance {
    /// Logical service name, e.g. `order-service`.
    pub name: String,
    /// Host or IP the instance is reachable at.
    pub host: String,
    /// Port the instance listens on.
    pub port: u16,
}

impl ServiceInstance {
    /// Create a new instance identity.
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }

    /// The dial address advertised to consumers, `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Display for ServiceInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:{}", self.name, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_joins_host_and_port() {
        let instance = ServiceInstance::new("order-service", "10.0.0.5", 50052);
        assert_eq!(instance.address(), "10.0.0.5:50052");
        assert_eq!(instance.to_string(), "order-service@10.0.0.5:50052");
    }
}
