//! Wiring helper that spawns the standard service actor set.

use ractor::ActorRef;

use crate::messages::{NotificationMessage, OrderMessage, OrderStoreMessage};
use crate::notification_actor::NotificationActor;
use crate::order_actor::OrderActor;
use crate::order_store_actor::OrderStoreActor;
use crate::system::{ActorError, ActorSystem};

/// Handles to the spawned service actors.
pub struct ServiceActors {
    pub orders: ActorRef<OrderMessage>,
    pub order_store: ActorRef<OrderStoreMessage>,
    pub notifications: ActorRef<NotificationMessage>,
}

/// Spawn the order, order-store, and notification actors.
///
/// Called once at service startup, after the system is constructed.
pub async fn start_order_actors(system: &ActorSystem) -> Result<ServiceActors, ActorError> {
    let orders = system.spawn("order-actor", OrderActor, ()).await?;
    let order_store = system.spawn("order-store-actor", OrderStoreActor, ()).await?;
    let notifications = system
        .spawn("notification-actor", NotificationActor, ())
        .await?;

    tracing::info!("service actors started");

    Ok(ServiceActors {
        orders,
        order_store,
        notifications,
    })
}
