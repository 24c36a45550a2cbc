//! Lease-based service registry client.
//!
//! Services register themselves under a namespaced key bound to a TTL lease
//! and keep the lease alive for as long as the process runs; consumers
//! discover live instances by key prefix. A crashed process stops renewing
//! and its record is garbage-collected by the store once the TTL elapses.
//!
//! # Architecture
//!
//! - [`RegistryStore`] - the consistent key-value store contract
//! - [`EtcdStore`] - etcd v3 backend used in production
//! - [`MemoryStore`] - in-process backend for tests and single-node runs
//! - [`RegistryClient`] - register / discover / deregister / close
//!
//! # Usage
//!
//! ```ignore
//! let client = RegistryClient::connect(&config).await?;
//! client.register(&instance, Duration::from_secs(30)).await?;
//! let addresses = client.discover("order-service").await?;
//! ```

mod client;
mod error;
mod etcd;
mod memory;
mod store;

pub use client::RegistryClient;
pub use error::DiscoveryError;
pub use etcd::EtcdStore;
pub use memory::MemoryStore;
pub use store::{LeaseId, RegistryStore};
