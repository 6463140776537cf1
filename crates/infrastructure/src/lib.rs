//! Capstan Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined
//! in the application layer: the reqwest-backed transport client, the
//! system clock, and server profile persistence.

pub mod adapters;
pub mod persistence;
pub mod rest;

pub use adapters::SystemClock;
pub use persistence::{ProfileError, ProfileRepository, ServerProfile};
pub use rest::RestResourceClient;
