//! Variable addition
//!
//! Stages one variable into the set behind a collection link and
//! commits the whole set back as one modify call. Duplicate names are
//! legal within a set (the same name may carry different scopes), so
//! addition never rejects on name alone.

use tracing::debug;

use capstan_domain::Variable;

use crate::ports::{ResourceClient, TransportError};

/// Appends a variable to a remote variable set.
pub struct AddVariable<C> {
    client: C,
}

impl<C: ResourceClient> AddVariable<C> {
    /// Creates the use case over a transport handle.
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetches the set, appends the variable, commits once.
    ///
    /// # Errors
    /// Propagates transport failures unchanged; a failed commit leaves
    /// the server untouched.
    pub async fn execute(&self, set_link: &str, variable: Variable) -> Result<(), TransportError> {
        let mut set = self.client.get_variable_set(set_link).await?;
        debug!(name = %variable.name, owner = %set.owner_id, "staging variable");
        set.add(variable);
        self.client.update_variable_set(&set).await
    }
}
