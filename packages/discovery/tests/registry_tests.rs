//! Registry client behavior against the in-memory store.
//!
//! TTL scenarios run on a paused runtime so the 30-second lease window can
//! be crossed deterministically.

use std::sync::Arc;
use std::time::Duration;

use discovery::{MemoryStore, RegistryClient};
use shop_core::ServiceInstance;

const PREFIX: &str = "/microshop/services/";
const TTL: Duration = Duration::from_secs(30);

fn order_instance() -> ServiceInstance {
    ServiceInstance::new("order-service", "10.0.0.5", 50052)
}

/// Advance paused time in one-second steps, yielding so the keep-alive task
/// gets to run between steps.
async fn advance_secs(secs: u64) {
    for _ in 0..secs {
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn register_then_discover_returns_the_address() {
    let store = Arc::new(MemoryStore::new());
    let client = RegistryClient::new(store, PREFIX);

    client.register(&order_instance(), TTL).await.unwrap();

    let addresses = client.discover("order-service").await.unwrap();
    assert_eq!(addresses, vec!["10.0.0.5:50052".to_string()]);

    client.close().await.unwrap();
}

#[tokio::test]
async fn empty_namespace_discovers_to_empty_not_error() {
    let client = RegistryClient::new(Arc::new(MemoryStore::new()), PREFIX);
    let addresses = client.discover("user-service").await.unwrap();
    assert!(addresses.is_empty());
}

#[tokio::test]
async fn reregistration_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let client = RegistryClient::new(store.clone(), PREFIX);
    let instance = order_instance();

    client.register(&instance, TTL).await.unwrap();
    client.register(&instance, TTL).await.unwrap();

    // One record, one lease: the second call re-registered, it did not clone.
    assert_eq!(client.discover("order-service").await.unwrap().len(), 1);
    assert_eq!(store.lease_count().await, 1);

    client.close().await.unwrap();
}

#[tokio::test]
async fn deregister_removes_the_record_immediately() {
    let store = Arc::new(MemoryStore::new());
    let client = RegistryClient::new(store, PREFIX);
    let instance = order_instance();

    client.register(&instance, TTL).await.unwrap();
    client.deregister(&instance).await.unwrap();

    assert!(client.discover("order-service").await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn renewal_keeps_the_record_discoverable_past_the_ttl() {
    let store = Arc::new(MemoryStore::new());
    let client = RegistryClient::new(store, PREFIX);

    client.register(&order_instance(), TTL).await.unwrap();

    // Well past the 30s TTL; the keep-alive task has renewed repeatedly.
    advance_secs(90).await;
    assert_eq!(client.discover("order-service").await.unwrap().len(), 1);

    client.close().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn record_expires_only_after_the_ttl_once_renewal_stops() {
    let store = Arc::new(MemoryStore::new());
    let client = RegistryClient::new(store.clone(), PREFIX);

    client.register(&order_instance(), TTL).await.unwrap();
    // close() stops renewal but leaves the record to the TTL.
    client.close().await.unwrap();

    let observer = RegistryClient::new(store, PREFIX);

    // Inside the TTL window the record is still discoverable.
    advance_secs(10).await;
    assert_eq!(observer.discover("order-service").await.unwrap().len(), 1);

    // 31 seconds after the last renewal it is gone.
    advance_secs(21).await;
    assert!(observer.discover("order-service").await.unwrap().is_empty());
}
