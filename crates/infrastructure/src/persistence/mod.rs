//! Connection settings persistence

mod profile_repository;

pub use profile_repository::{ProfileError, ProfileRepository, ServerProfile};
