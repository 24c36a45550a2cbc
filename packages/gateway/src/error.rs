//! Error type for the connection manager.

/// Errors from connecting to and tearing down downstream services.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The resolved address could not be parsed into an endpoint.
    #[error("invalid address for {service}: {addr}")]
    InvalidAddress { service: String, addr: String },

    /// A downstream service could not be reached at startup.
    #[error("failed to connect to {service} at {addr}: {source}")]
    Connect {
        service: String,
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// No channel exists for this logical service name.
    #[error("not connected to service '{0}'")]
    UnknownService(String),

    /// One or more errors occurred while closing connections.
    #[error("errors closing connections: {}", .0.join("; "))]
    Close(Vec<String>),
}
