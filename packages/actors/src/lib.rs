//! Actor-based message-processing core for the microshop services.
//!
//! This crate provides the Ractor-based actors that handle asynchronous
//! request processing, and the system that owns them.
//!
//! # Architecture
//!
//! - `ActorSystem` - owns spawned actors, routes sends and timed requests
//! - `OrderActor` - stateless request/response order handler
//! - `OrderStoreActor` - stateful keyed store of order records
//! - `NotificationActor` - fire-and-forget notification sink
//!
//! Each actor processes its mailbox strictly sequentially, so actor state
//! needs no locking: all access is mediated by message exchange.
//!
//! # Usage
//!
//! ```ignore
//! use actors::{ActorSystem, OrderMessage, start_order_actors};
//!
//! let system = ActorSystem::new();
//! let handles = start_order_actors(&system).await?;
//!
//! let receipt = system
//!     .request(&handles.orders, |reply| OrderMessage::Create { user_id, items, reply }, timeout)
//!     .await?;
//! ```

mod messages;
mod notification_actor;
mod order_actor;
mod order_store_actor;
mod service;
mod system;

pub use messages::{NotificationMessage, OrderMessage, OrderStoreMessage};
pub use notification_actor::NotificationActor;
pub use order_actor::OrderActor;
pub use order_store_actor::OrderStoreActor;
pub use service::{ServiceActors, start_order_actors};
pub use system::{ActorError, ActorSystem, DEFAULT_REQUEST_TIMEOUT};

/// Re-export ractor types for convenience.
pub use ractor::{Actor, ActorRef, ActorStatus, RpcReplyPort, concurrency};
