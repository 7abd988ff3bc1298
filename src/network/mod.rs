//! Network Module
//!
//! Connections to a search server.
//!
//! ## Architecture
//! - One blocking stream per client (TCP or Unix domain socket)
//! - Strict request / response alternation on that stream
//! - `SharedClient` serializes concurrent callers with a mutex

mod client;
mod transport;

pub use client::{Client, SharedClient};
pub use transport::{Stream, Transport};
