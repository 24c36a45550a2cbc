//! Error type for registry operations.

use crate::store::LeaseId;

/// Errors surfaced by the registry client and its store backends.
///
/// "No instances registered" is not an error; `discover` reports it as an
/// empty result so callers can tell an empty namespace apart from an
/// unreachable store.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The store could not be reached at construction time.
    #[error("failed to connect to registry store: {0}")]
    Connect(String),

    /// A store round-trip failed, wrapped with the failing operation.
    #[error("registry store error during {op}: {message}")]
    Store { op: &'static str, message: String },

    /// The lease is unknown to the store or already expired.
    #[error("lease {0} expired or unknown")]
    LeaseExpired(LeaseId),
}

impl DiscoveryError {
    /// Wrap a backend error with the operation it occurred in.
    pub fn store(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Store {
            op,
            message: err.to_string(),
        }
    }
}
