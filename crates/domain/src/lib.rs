//! Capstan Domain - Core resource and variable types
//!
//! This crate defines the domain model for the Capstan deployment server
//! client. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod policy;
pub mod resource;
pub mod scope;
pub mod variable;
pub mod variable_set;

pub use error::{DomainError, DomainResult};
pub use policy::{DuplicateMatchPolicy, ON_DUPLICATE};
pub use resource::{Resource, ResourceKind};
pub use scope::{Scope, ScopeDimension, ScopeValue};
pub use variable::Variable;
pub use variable_set::VariableSet;
