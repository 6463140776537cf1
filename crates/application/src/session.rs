//! Session precondition
//!
//! Every operation requires an authenticated transport handle. The
//! session holder makes the "no session" condition an explicit, early
//! failure instead of a confusing transport error later.

use thiserror::Error;

use crate::ports::ResourceClient;

/// Raised when an operation runs before a server session exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No server URL / API key was configured for this process.
    #[error("no server session established; set the server URL and API key first")]
    NotEstablished,
}

/// Holder for the process's authenticated transport handle.
#[derive(Debug)]
pub struct Session<C> {
    client: Option<C>,
}

impl<C: ResourceClient> Session<C> {
    /// Wraps an established transport handle.
    pub const fn established(client: C) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A session that was never established. Every operation against it
    /// fails with [`SessionError::NotEstablished`].
    pub const fn unestablished() -> Self {
        Self { client: None }
    }

    /// The transport handle, or the no-session failure.
    ///
    /// # Errors
    /// Returns [`SessionError::NotEstablished`] when no handle was
    /// configured.
    pub fn client(&self) -> Result<&C, SessionError> {
        self.client.as_ref().ok_or(SessionError::NotEstablished)
    }

    /// Whether a transport handle is present.
    #[must_use]
    pub const fn is_established(&self) -> bool {
        self.client.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TransportError;
    use async_trait::async_trait;
    use capstan_domain::{Resource, ResourceKind, VariableSet};

    struct NullClient;

    #[async_trait]
    impl ResourceClient for NullClient {
        async fn find_all(&self, _: ResourceKind) -> Result<Vec<Resource>, TransportError> {
            Ok(Vec::new())
        }

        async fn get(&self, kind: ResourceKind, id: &str) -> Result<Resource, TransportError> {
            Err(TransportError::NotFound {
                kind,
                id: id.to_string(),
            })
        }

        async fn get_variable_set(&self, link: &str) -> Result<VariableSet, TransportError> {
            Err(TransportError::Network(link.to_string()))
        }

        async fn update_variable_set(&self, _: &VariableSet) -> Result<(), TransportError> {
            Ok(())
        }

        async fn delete(&self, _: ResourceKind, _: &Resource) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[test]
    fn unestablished_session_fails_fast() {
        let session: Session<NullClient> = Session::unestablished();
        assert!(!session.is_established());
        assert_eq!(session.client().err(), Some(SessionError::NotEstablished));
    }

    #[test]
    fn established_session_yields_the_handle() {
        let session = Session::established(NullClient);
        assert!(session.is_established());
        assert!(session.client().is_ok());
    }
}
