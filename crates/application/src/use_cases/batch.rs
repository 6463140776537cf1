//! Batch mutation driver
//!
//! Applies one mutation to each resource of a resolved sequence. The
//! driver guarantees input order is preserved and that an empty
//! sequence is a no-op, not an error. Per-item outcomes are collected
//! as diagnostics; transport failures are not caught here - they
//! propagate per the transport collaborator's own contract.

use std::future::Future;

use tracing::info;

use capstan_domain::{Resource, ResourceKind};

use crate::ports::{ResourceClient, TransportError};
use crate::warning::OperationWarning;

/// Runs `action` against each item, in input order, collecting one
/// diagnostic per item.
///
/// # Errors
/// The first transport failure stops the batch and propagates; items
/// already processed stay processed (no rollback exists at this layer).
pub async fn apply_to_each<T, F, Fut>(
    items: Vec<T>,
    mut action: F,
) -> Result<Vec<OperationWarning>, TransportError>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<OperationWarning, TransportError>>,
{
    let mut diagnostics = Vec::with_capacity(items.len());
    for item in items {
        diagnostics.push(action(item).await?);
    }
    Ok(diagnostics)
}

/// Deletes each resource of a resolved sequence.
pub struct DeleteResources<C> {
    client: C,
}

impl<C: ResourceClient> DeleteResources<C> {
    /// Creates the use case over a transport handle.
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Deletes the resources in input order, reporting each deletion.
    ///
    /// # Errors
    /// Propagates the first transport failure unchanged.
    pub async fn execute(
        &self,
        kind: ResourceKind,
        resources: Vec<Resource>,
    ) -> Result<Vec<OperationWarning>, TransportError> {
        apply_to_each(resources, |resource| async move {
            self.client.delete(kind, &resource).await?;
            info!(id = %resource.id, name = %resource.name, "deleted {kind}");
            Ok(OperationWarning::info(
                &resource.name,
                format!("deleted {} ({})", kind.display_name(), resource.id),
            ))
        })
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockClient;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn deletes_in_input_order_and_reports_each() {
        let client = Arc::new(MockClient::new());
        client.seed(
            ResourceKind::Project,
            vec![
                Resource::new("Projects-12", "Website"),
                Resource::new("Projects-45", "Billing"),
            ],
        );

        let targets = vec![
            Resource::new("Projects-12", "Website"),
            Resource::new("Projects-45", "Billing"),
        ];
        let diagnostics = DeleteResources::new(Arc::clone(&client))
            .execute(ResourceKind::Project, targets)
            .await
            .unwrap();

        assert_eq!(
            client.deleted_ids(),
            vec!["Projects-12".to_string(), "Projects-45".to_string()]
        );
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].subject, "Website");
        assert_eq!(diagnostics[1].subject, "Billing");
    }

    #[tokio::test]
    async fn empty_sequence_is_a_no_op() {
        let client = Arc::new(MockClient::new());
        let diagnostics = DeleteResources::new(Arc::clone(&client))
            .execute(ResourceKind::Project, Vec::new())
            .await
            .unwrap();

        assert!(diagnostics.is_empty());
        assert!(client.deleted_ids().is_empty());
    }

    #[tokio::test]
    async fn driver_preserves_order_for_any_action() {
        let visited = std::sync::Mutex::new(Vec::new());
        let diagnostics = apply_to_each(vec!["a", "b", "c"], |item| {
            let visited = &visited;
            async move {
                visited.lock().unwrap().push(item);
                Ok(OperationWarning::info(item, "visited"))
            }
        })
        .await
        .unwrap();

        assert_eq!(*visited.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(diagnostics.len(), 3);
    }
}
