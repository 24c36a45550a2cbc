//! Order service entry point.
//!
//! Registers this instance with the service registry (a provider must be
//! discoverable, so a registry failure here is fatal), starts the actor
//! core, and runs until interrupted. On shutdown the instance deregisters
//! best-effort; the lease TTL covers the crash path.

use std::time::Duration;

use actors::{ActorSystem, NotificationMessage, OrderMessage, start_order_actors};
use discovery::RegistryClient;
use shop_core::{Notification, NotificationKind, OrderItem, RegistryConfig, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let registry_config = RegistryConfig::default();
    let service_config = ServiceConfig::new("order-service", "127.0.0.1", 50052);
    let instance = service_config.instance();

    tracing::info!("starting {}", instance);

    let registry = RegistryClient::connect(&registry_config).await?;
    registry
        .register(&instance, Duration::from_secs(registry_config.lease_ttl_secs))
        .await?;

    let system = ActorSystem::new();
    let service_actors = start_order_actors(&system).await?;

    // Demo request, the same path an inbound RPC handler takes.
    let receipt = system
        .request(
            &service_actors.orders,
            |reply| OrderMessage::Create {
                user_id: "user-123".to_string(),
                items: vec![OrderItem {
                    product_id: "prod-1".to_string(),
                    product_name: "Product 1".to_string(),
                    quantity: 2,
                    price: 99.99,
                }],
                reply,
            },
            actors::DEFAULT_REQUEST_TIMEOUT,
        )
        .await?;
    tracing::info!("order {} created: {}", receipt.order_id, receipt.status);

    system.send(
        &service_actors.notifications,
        NotificationMessage::Notify {
            notification: Notification::new(
                "user-123",
                NotificationKind::Email,
                "Your order was received",
            ),
        },
    )?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    system.shutdown().await;
    if let Err(e) = registry.deregister(&instance).await {
        // Best effort: the lease TTL cleans the record up if the store is
        // unreachable right now.
        tracing::warn!("failed to deregister: {}", e);
    }
    registry.close().await?;

    tracing::info!("order service stopped");
    Ok(())
}
