//! Stateless request/response actor for order handling.

use std::time::Duration;

use ractor::{Actor, ActorProcessingErr, ActorRef};
use shop_core::{OrderId, OrderReceipt, OrderState, OrderStatusReply};

use crate::messages::OrderMessage;

/// Time the demo handler spends "processing" an order. The latency is the
/// actor's own workload, not mailbox contention.
const SIMULATED_PROCESSING_TIME: Duration = Duration::from_millis(100);

/// Stateless order handler: one request in, exactly one reply out.
pub struct OrderActor;

impl Actor for OrderActor {
    type Msg = OrderMessage;
    type State = ();
    type Arguments = ();

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        _args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            "order actor '{}' started",
            myself.get_name().unwrap_or_default()
        );
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        _state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            OrderMessage::Create {
                user_id,
                items,
                reply,
            } => {
                tracing::info!("creating order for {} ({} items)", user_id, items.len());

                // Simulate order processing I/O.
                tokio::time::sleep(SIMULATED_PROCESSING_TIME).await;

                // The port consumes itself on send; if the caller timed out
                // and dropped the other end, the reply is discarded.
                let _ = reply.send(OrderReceipt {
                    order_id: OrderId::new(),
                    status: OrderState::Created,
                    message: "Order created successfully".to_string(),
                });
            }

            OrderMessage::GetStatus { order_id, reply } => {
                tracing::info!("getting order status for {}", order_id);
                let _ = reply.send(OrderStatusReply {
                    order_id,
                    status: OrderState::Processing,
                });
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        myself: ActorRef<Self::Msg>,
        _state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        tracing::info!(
            "order actor '{}' stopped",
            myself.get_name().unwrap_or_default()
        );
        Ok(())
    }
}
