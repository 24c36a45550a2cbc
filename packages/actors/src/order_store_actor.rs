//! Stateful keyed-store actor owning the in-memory order map.

use std::collections::HashMap;

use ractor::{Actor, ActorProcessingErr, ActorRef};
use shop_core::{OrderId, OrderReceipt, OrderRecord, OrderState, OrderStatusReply};

use crate::messages::OrderStoreMessage;

/// State for the order store actor.
///
/// The map is owned exclusively by the actor; no other component reads or
/// writes it. Sequential mailbox processing replaces any lock.
pub struct OrderStoreState {
    orders: HashMap<OrderId, OrderRecord>,
}

/// Keyed order store: creates records under fresh IDs and answers lookups.
pub struct OrderStoreActor;

impl Actor for OrderStoreActor {
    type Msg = OrderStoreMessage;
    type State = OrderStoreState;
    type Arguments = ();

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        _args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            "order store actor '{}' started",
            myself.get_name().unwrap_or_default()
        );
        Ok(OrderStoreState {
            orders: HashMap::new(),
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            OrderStoreMessage::Create {
                user_id,
                items,
                reply,
            } => {
                let record = OrderRecord::new(user_id, items);
                let receipt = OrderReceipt {
                    order_id: record.id,
                    status: record.status,
                    message: "Order stored".to_string(),
                };
                tracing::info!("stored order {} for {}", record.id, record.user_id);
                state.orders.insert(record.id, record);
                let _ = reply.send(receipt);
            }

            OrderStoreMessage::GetStatus { order_id, reply } => {
                let status = match state.orders.get(&order_id) {
                    Some(record) => record.status,
                    // A miss is a normal outcome, reported as an explicit
                    // status rather than a failed request.
                    None => OrderState::NotFound,
                };
                let _ = reply.send(OrderStatusReply { order_id, status });
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        tracing::info!(
            "order store actor '{}' stopped with {} orders",
            myself.get_name().unwrap_or_default(),
            state.orders.len()
        );
        Ok(())
    }
}
