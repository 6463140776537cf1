//! REST transport adapter
//!
//! Implements the `ResourceClient` port against the deployment
//! server's HTTP API using reqwest. Wire payloads are PascalCase JSON,
//! decoded into domain types at this boundary.

mod client;
mod dto;

pub use client::RestResourceClient;
