//! Address resolution: discovery result first, static default as fallback.

use std::sync::Arc;
use std::time::Duration;

use discovery::{MemoryStore, RegistryClient};
use gateway::ClientManager;
use shop_core::{GatewayConfig, ServiceInstance};

const PREFIX: &str = "/microshop/services/";

#[tokio::test]
async fn resolves_to_the_discovered_address() {
    let registry = Arc::new(RegistryClient::new(Arc::new(MemoryStore::new()), PREFIX));
    registry
        .register(
            &ServiceInstance::new("order-service", "10.0.0.5", 50052),
            Duration::from_secs(30),
        )
        .await
        .unwrap();

    let manager = ClientManager::new(GatewayConfig::default()).with_discovery(registry.clone());
    let addr = manager.resolve_target("order-service", "localhost:50052").await;
    assert_eq!(addr, "10.0.0.5:50052");

    registry.close().await.unwrap();
}

#[tokio::test]
async fn falls_back_when_no_instance_is_registered() {
    let registry = Arc::new(RegistryClient::new(Arc::new(MemoryStore::new()), PREFIX));
    let manager = ClientManager::new(GatewayConfig::default()).with_discovery(registry);

    let addr = manager.resolve_target("user-service", "localhost:50051").await;
    assert_eq!(addr, "localhost:50051");
}

#[tokio::test]
async fn falls_back_without_a_registry_at_all() {
    let manager = ClientManager::new(GatewayConfig::default());
    let addr = manager.resolve_target("user-service", "localhost:50051").await;
    assert_eq!(addr, "localhost:50051");
}

#[tokio::test]
async fn close_without_connections_is_clean() {
    let registry = Arc::new(RegistryClient::new(Arc::new(MemoryStore::new()), PREFIX));
    let mut manager = ClientManager::new(GatewayConfig::default()).with_discovery(registry);
    manager.close().await.unwrap();
}
