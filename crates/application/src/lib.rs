//! Capstan Application - Ports and use cases
//!
//! The operations a command surface drives: locating remote resources,
//! building variable scopes, copying variables between collections,
//! caching expensive bulk reads, and applying batch mutations. Ports
//! define the boundary to the transport collaborator; adapters live in
//! the infrastructure crate.

pub mod cache;
pub mod ports;
pub mod session;
pub mod use_cases;
pub mod warning;

pub use cache::ResourceCache;
pub use ports::{Clock, ResourceClient, TransportError};
pub use session::{Session, SessionError};
pub use use_cases::{
    AddVariable, CopyOutcome, CopyVariables, CopyVariablesError, DeleteResources, GetVariables,
    GroupFiltered, LocateError, Locator, RemovalState, RemoveVariable, ResolvedNames, ScopeBuilder,
    ScopeSpec, ScopedVariable, VariableSetError, apply_to_each, copy_into, exclude_by_name,
};
pub use warning::{OperationWarning, WarningSeverity};
