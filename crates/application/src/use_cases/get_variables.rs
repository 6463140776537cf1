//! Variable set retrieval
//!
//! Resolves the owning project or library variable set by name, then
//! follows its `Variables` hyperlink relation to fetch the set. A
//! missing owner is fatal here: a read that names its target cannot
//! proceed without it.

use capstan_domain::{ResourceKind, VariableSet};

use crate::ports::{ResourceClient, TransportError};
use crate::use_cases::locator::{LocateError, Locator};

/// The hyperlink relation every variable-set owner carries.
pub(crate) const VARIABLES_LINK: &str = "Variables";

/// Errors from variable-set retrieval.
#[derive(Debug, thiserror::Error)]
pub enum VariableSetError {
    /// The owning resource could not be located.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// The owner exposes no `Variables` relation.
    #[error("'{name}' has no variables link")]
    MissingVariablesLink {
        /// Name of the owner.
        name: String,
    },

    /// The transport collaborator failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Fetches the variable set owned by a project or library variable set.
pub struct GetVariables<C> {
    locator: Locator<C>,
    client: C,
}

impl<C: ResourceClient> GetVariables<C> {
    /// Creates the use case over a locator and a transport handle.
    pub const fn new(locator: Locator<C>, client: C) -> Self {
        Self { locator, client }
    }

    /// Resolves the owner by name and fetches its variable set.
    ///
    /// # Errors
    /// A missing owner or a missing `Variables` relation is fatal; the
    /// command cannot proceed without the collection.
    pub async fn execute(
        &self,
        kind: ResourceKind,
        owner_name: &str,
    ) -> Result<VariableSet, VariableSetError> {
        let owner = self.locator.find_by_name(kind, owner_name).await?;
        let link = owner
            .link(VARIABLES_LINK)
            .ok_or_else(|| VariableSetError::MissingVariablesLink {
                name: owner.name.clone(),
            })?;
        Ok(self.client.get_variable_set(link).await?)
    }

    /// Resolves the owner and returns the link its variable set lives
    /// behind, for callers that commit against the set later.
    ///
    /// # Errors
    /// Same conditions as [`GetVariables::execute`].
    pub async fn variables_link(
        &self,
        kind: ResourceKind,
        owner_name: &str,
    ) -> Result<String, VariableSetError> {
        let owner = self.locator.find_by_name(kind, owner_name).await?;
        owner
            .link(VARIABLES_LINK)
            .map(str::to_string)
            .ok_or_else(|| VariableSetError::MissingVariablesLink {
                name: owner.name.clone(),
            })
    }
}
