//! Message types for actor communication.
//!
//! Each actor's inbox is a closed enum, so every message kind is matched
//! exhaustively at compile time. Request-shaped messages carry an
//! [`RpcReplyPort`]; sending through the port consumes it, which is what
//! makes "reply exactly once" a structural property rather than a
//! convention.

use ractor::RpcReplyPort;
use shop_core::{Notification, OrderId, OrderItem, OrderReceipt, OrderStatusReply};

/// Messages for the stateless [`crate::OrderActor`].
#[derive(Debug)]
pub enum OrderMessage {
    /// Create an order; replies exactly once with a receipt.
    Create {
        user_id: String,
        items: Vec<OrderItem>,
        reply: RpcReplyPort<OrderReceipt>,
    },

    /// Look up the processing status of an order.
    GetStatus {
        order_id: OrderId,
        reply: RpcReplyPort<OrderStatusReply>,
    },
}

/// Messages for the keyed [`crate::OrderStoreActor`].
#[derive(Debug)]
pub enum OrderStoreMessage {
    /// Store a new order under a freshly generated ID.
    Create {
        user_id: String,
        items: Vec<OrderItem>,
        reply: RpcReplyPort<OrderReceipt>,
    },

    /// Look up a stored order; a miss replies with a "not found" status,
    /// never an error.
    GetStatus {
        order_id: OrderId,
        reply: RpcReplyPort<OrderStatusReply>,
    },
}

/// Messages for the [`crate::NotificationActor`]. All fire-and-forget.
#[derive(Debug)]
pub enum NotificationMessage {
    /// Deliver a notification; no reply is expected.
    Notify { notification: Notification },
}
