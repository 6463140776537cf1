//! Variable removal
//!
//! Removal walks a small state machine: Searching, then either Found
//! (a name match located, removed locally, set committed) ending in
//! Removed, or NotFound, which is terminal with a warning rather than
//! a failure - absence is common and expected on repeated invocations.
//! There are no retries at this layer.

use tracing::{debug, warn};

use crate::ports::{ResourceClient, TransportError};

/// States a removal request passes through. Only the terminal states
/// are returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalState {
    /// Scanning the set for a name match.
    Searching,
    /// A match was located and staged for removal.
    Found,
    /// No variable carried the name; terminal, warn and leave the set
    /// untouched (no commit call occurs).
    NotFound,
    /// The match was removed locally and the commit succeeded.
    Removed,
}

/// Removes the first variable matching a name from a remote set.
pub struct RemoveVariable<C> {
    client: C,
}

impl<C: ResourceClient> RemoveVariable<C> {
    /// Creates the use case over a transport handle.
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetches the set, removes the first name match, commits once.
    ///
    /// Returns the terminal [`RemovalState`]: `Removed` on success,
    /// `NotFound` when nothing matched (the set is left unchanged and
    /// no commit happens).
    ///
    /// # Errors
    /// Propagates transport failures unchanged.
    pub async fn execute(&self, set_link: &str, name: &str) -> Result<RemovalState, TransportError> {
        let mut set = self.client.get_variable_set(set_link).await?;

        debug!(name, owner = %set.owner_id, "searching for variable");
        match set.remove_by_name(name) {
            Some(removed) => {
                debug!(name = %removed.name, "variable found, committing removal");
                self.client.update_variable_set(&set).await?;
                Ok(RemovalState::Removed)
            }
            None => {
                warn!(name, owner = %set.owner_id, "variable not found, nothing removed");
                Ok(RemovalState::NotFound)
            }
        }
    }
}
