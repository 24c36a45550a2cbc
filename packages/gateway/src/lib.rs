//! Client connection manager for the gateway.
//!
//! Resolves logical service names to concrete addresses (discovery result
//! if any, else the configured static default) and keeps one long-lived
//! gRPC channel per downstream service. Connections are established once at
//! startup; there is deliberately no reconnect-on-failure logic.

mod error;
mod manager;

pub use error::GatewayError;
pub use manager::ClientManager;
