//! Variable copier
//!
//! Copies variables from one collection into another. Each source
//! variable is checked against the target by name; a conflict is
//! reported as a warning and skipped while the rest of the batch
//! continues. The target set is committed once, after all items are
//! processed - one round-trip, at the cost that a post-copy transport
//! failure loses the whole staged batch.

use tracing::{debug, warn};

use capstan_domain::{Variable, VariableSet};

use crate::ports::{ResourceClient, TransportError};
use crate::warning::OperationWarning;

/// Result of a copy batch.
#[derive(Debug, Clone)]
pub struct CopyOutcome {
    /// Number of variables actually appended to the target.
    pub applied: usize,
    /// Per-item conflict reports.
    pub warnings: Vec<OperationWarning>,
}

/// Errors from the copy-and-commit flow.
#[derive(Debug, thiserror::Error)]
pub enum CopyVariablesError {
    /// The transport collaborator failed. A failure after staging
    /// loses the whole batch; nothing was partially persisted.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Copies each source variable into the target set, skipping items
/// whose name the target already carries.
///
/// Appended variables are deep copies including the full scope map and
/// the sensitivity flag. One conflicting name never aborts the rest of
/// the batch. The caller is responsible for committing the target set.
pub fn copy_into(source: &[Variable], target: &mut VariableSet) -> CopyOutcome {
    let mut applied = 0;
    let mut warnings = Vec::new();

    for variable in source {
        if target.contains_name(&variable.name) {
            warn!(name = %variable.name, "variable already exists in target set, skipping");
            warnings.push(OperationWarning::warning(
                &variable.name,
                "variable already exists in the target set",
            ));
            continue;
        }
        debug!(name = %variable.name, "staging variable into target set");
        target.add(variable.clone());
        applied += 1;
    }

    CopyOutcome { applied, warnings }
}

/// Copies the variables behind one collection link into another and
/// commits the target once.
pub struct CopyVariables<C> {
    client: C,
}

impl<C: ResourceClient> CopyVariables<C> {
    /// Creates the use case over a transport handle.
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetches both sets, stages the copy, and commits the target as
    /// one modify call. A batch that stages nothing commits nothing.
    ///
    /// # Errors
    /// Propagates transport failures unchanged; a failed commit loses
    /// every staged item of this invocation.
    pub async fn execute(
        &self,
        source_link: &str,
        target_link: &str,
    ) -> Result<CopyOutcome, CopyVariablesError> {
        let source = self.client.get_variable_set(source_link).await?;
        let mut target = self.client.get_variable_set(target_link).await?;

        let outcome = copy_into(&source.variables, &mut target);
        if outcome.applied > 0 {
            self.client.update_variable_set(&target).await?;
        }
        Ok(outcome)
    }
}
