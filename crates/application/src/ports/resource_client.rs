//! Transport port to the deployment server
//!
//! Defines the collection-style operations the remote server exposes
//! per resource kind. The transport performs no retries and offers no
//! cancellation; every call runs to completion or fails.

use std::sync::Arc;

use async_trait::async_trait;
use capstan_domain::{Resource, ResourceKind, VariableSet};

/// Errors surfaced by the transport collaborator.
///
/// These originate outside the core and propagate unchanged; the core
/// performs no retry and no partial-state repair.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server has no resource with the requested identifier.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of the missing resource.
        kind: ResourceKind,
        /// The identifier that matched nothing.
        id: String,
    },

    /// The server rejected the request (authentication, validation).
    #[error("server rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail.
        message: String,
    },

    /// The request never produced a usable response.
    #[error("transport failure: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("malformed server response: {0}")]
    Decode(String),
}

/// Port for the authenticated session handle to the remote server.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Fetches the full remote collection of a resource kind.
    async fn find_all(&self, kind: ResourceKind) -> Result<Vec<Resource>, TransportError>;

    /// Fetches one resource by its stable identifier.
    ///
    /// # Errors
    /// Returns [`TransportError::NotFound`] when the identifier matches
    /// nothing.
    async fn get(&self, kind: ResourceKind, id: &str) -> Result<Resource, TransportError>;

    /// Fetches the variable set behind a hyperlink relation.
    async fn get_variable_set(&self, link: &str) -> Result<VariableSet, TransportError>;

    /// Commits a locally staged variable set as one modify call against
    /// its owning collection.
    async fn update_variable_set(&self, set: &VariableSet) -> Result<(), TransportError>;

    /// Deletes a resource.
    async fn delete(&self, kind: ResourceKind, resource: &Resource) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: ResourceClient + ?Sized> ResourceClient for Arc<T> {
    async fn find_all(&self, kind: ResourceKind) -> Result<Vec<Resource>, TransportError> {
        (**self).find_all(kind).await
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<Resource, TransportError> {
        (**self).get(kind, id).await
    }

    async fn get_variable_set(&self, link: &str) -> Result<VariableSet, TransportError> {
        (**self).get_variable_set(link).await
    }

    async fn update_variable_set(&self, set: &VariableSet) -> Result<(), TransportError> {
        (**self).update_variable_set(set).await
    }

    async fn delete(&self, kind: ResourceKind, resource: &Resource) -> Result<(), TransportError> {
        (**self).delete(kind, resource).await
    }
}
