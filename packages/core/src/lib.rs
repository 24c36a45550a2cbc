//! Core domain types for the microshop services.
//!
//! This crate contains shared types used across all packages:
//! - ServiceInstance for one running replica of a named service
//! - Order types for the order-processing actors
//! - Notification types for the fire-and-forget notification sink
//! - Configuration for the registry, services, and the gateway

mod config;
mod instance;
mod notification;
mod order;

pub use config::{GatewayConfig, RegistryConfig, ServiceConfig, ServiceTarget};
pub use instance::ServiceInstance;
pub use notification::{Notification, NotificationKind};
pub use order::{
    OrderId, OrderItem, OrderReceipt, OrderRecord, OrderState, OrderStatusReply, ParseOrderIdError,
};
