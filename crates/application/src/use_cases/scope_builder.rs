//! Scope builder
//!
//! Attaches environment, machine and role restrictions to a variable.
//! Environment and machine names are resolved to remote identifiers
//! through the locator; roles are literal strings (roles are not a
//! fetchable resource kind). A dimension whose name list resolves to
//! nothing is omitted from the scope entirely rather than stored as a
//! vacuous restriction.

use capstan_domain::{ResourceKind, ScopeDimension, ScopeValue, Variable};

use crate::ports::{ResourceClient, TransportError};
use crate::use_cases::locator::Locator;

/// Name lists to restrict a variable with, as given on the command
/// line. Empty lists leave the corresponding dimension untouched.
#[derive(Debug, Clone, Default)]
pub struct ScopeSpec {
    /// Environment names to resolve.
    pub environments: Vec<String>,
    /// Machine names to resolve.
    pub machines: Vec<String>,
    /// Target roles, taken literally.
    pub roles: Vec<String>,
}

impl ScopeSpec {
    /// Whether no dimension is requested at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty() && self.machines.is_empty() && self.roles.is_empty()
    }
}

/// A variable with its scope applied, plus the names that resolved to
/// no resource (surfaced so commands can warn).
#[derive(Debug, Clone)]
pub struct ScopedVariable {
    /// The variable with scope entries attached.
    pub variable: Variable,
    /// Per-dimension names that matched nothing.
    pub unresolved: Vec<(ScopeDimension, String)>,
}

/// Builds variable scopes from name lists.
pub struct ScopeBuilder<'a, C> {
    locator: &'a Locator<C>,
}

impl<'a, C: ResourceClient> ScopeBuilder<'a, C> {
    /// Creates a scope builder over a locator.
    pub const fn new(locator: &'a Locator<C>) -> Self {
        Self { locator }
    }

    /// Applies the requested restrictions to the variable.
    ///
    /// Identifiers are deduplicated per dimension and dimension
    /// processing order does not affect the result (the scope is a
    /// map, not positional). Given the same inputs the operation is
    /// idempotent: each requested dimension is replaced wholesale.
    ///
    /// # Errors
    /// Propagates transport failures from name resolution unchanged.
    pub async fn build(
        &self,
        mut variable: Variable,
        spec: &ScopeSpec,
    ) -> Result<ScopedVariable, TransportError> {
        let mut unresolved = Vec::new();

        for (dimension, kind, names) in [
            (
                ScopeDimension::Environment,
                ResourceKind::Environment,
                &spec.environments,
            ),
            (ScopeDimension::Machine, ResourceKind::Machine, &spec.machines),
        ] {
            if names.is_empty() {
                continue;
            }
            let resolved = self.locator.find_by_names(kind, names).await?;
            unresolved.extend(
                resolved
                    .unresolved
                    .into_iter()
                    .map(|name| (dimension.clone(), name)),
            );
            let ids = ScopeValue::from_ids(resolved.resources.into_iter().map(|r| r.id));
            variable.scope.set(dimension, ids);
        }

        if !spec.roles.is_empty() {
            let roles = ScopeValue::from_ids(spec.roles.iter().cloned());
            variable.scope.set(ScopeDimension::Role, roles);
        }

        Ok(ScopedVariable {
            variable,
            unresolved,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockClient;
    use capstan_domain::Resource;
    use pretty_assertions::assert_eq;

    fn seeded_client() -> MockClient {
        let client = MockClient::new();
        client.seed(
            ResourceKind::Environment,
            vec![
                Resource::new("Environments-1", "Production"),
                Resource::new("Environments-2", "Staging"),
            ],
        );
        client.seed(
            ResourceKind::Machine,
            vec![Resource::new("Machines-1", "web-01")],
        );
        client
    }

    #[tokio::test]
    async fn resolves_each_dimension_to_identifiers() {
        let locator = Locator::new(seeded_client());
        let builder = ScopeBuilder::new(&locator);

        let spec = ScopeSpec {
            environments: vec!["Production".to_string(), "Staging".to_string()],
            machines: vec!["web-01".to_string()],
            roles: vec!["web-server".to_string()],
        };
        let scoped = builder
            .build(Variable::new("LogLevel", "debug"), &spec)
            .await
            .unwrap();

        let scope = &scoped.variable.scope;
        assert_eq!(
            scope.get(&ScopeDimension::Environment),
            Some(&ScopeValue::from_ids(["Environments-1", "Environments-2"]))
        );
        assert_eq!(
            scope.get(&ScopeDimension::Machine),
            Some(&ScopeValue::from_ids(["Machines-1"]))
        );
        assert_eq!(
            scope.get(&ScopeDimension::Role),
            Some(&ScopeValue::from_ids(["web-server"]))
        );
        assert!(scoped.unresolved.is_empty());
    }

    #[tokio::test]
    async fn unmatched_name_lists_omit_the_dimension() {
        let locator = Locator::new(seeded_client());
        let builder = ScopeBuilder::new(&locator);

        let spec = ScopeSpec {
            environments: vec!["NoSuchEnvironment".to_string()],
            ..ScopeSpec::default()
        };
        let scoped = builder
            .build(Variable::new("LogLevel", "debug"), &spec)
            .await
            .unwrap();

        // No vacuous empty-set entry: the dimension is absent entirely.
        assert!(scoped.variable.scope.is_global());
        assert_eq!(
            scoped.unresolved,
            vec![(
                ScopeDimension::Environment,
                "NoSuchEnvironment".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn empty_spec_leaves_scope_untouched() {
        let locator = Locator::new(seeded_client());
        let builder = ScopeBuilder::new(&locator);

        let scoped = builder
            .build(Variable::new("LogLevel", "debug"), &ScopeSpec::default())
            .await
            .unwrap();
        assert!(scoped.variable.scope.is_global());
    }

    #[tokio::test]
    async fn duplicate_names_produce_deduplicated_identifiers() {
        let locator = Locator::new(seeded_client());
        let builder = ScopeBuilder::new(&locator);

        let spec = ScopeSpec {
            environments: vec!["Production".to_string(), "production".to_string()],
            ..ScopeSpec::default()
        };
        let scoped = builder
            .build(Variable::new("LogLevel", "debug"), &spec)
            .await
            .unwrap();

        assert_eq!(
            scoped.variable.scope.get(&ScopeDimension::Environment),
            Some(&ScopeValue::from_ids(["Environments-1"]))
        );
    }

    #[tokio::test]
    async fn building_twice_with_same_inputs_is_idempotent() {
        let locator = Locator::new(seeded_client());
        let builder = ScopeBuilder::new(&locator);

        let spec = ScopeSpec {
            environments: vec!["Production".to_string()],
            roles: vec!["web-server".to_string()],
            ..ScopeSpec::default()
        };
        let once = builder
            .build(Variable::new("LogLevel", "debug"), &spec)
            .await
            .unwrap();
        let twice = builder.build(once.variable.clone(), &spec).await.unwrap();

        assert_eq!(once.variable, twice.variable);
    }
}
