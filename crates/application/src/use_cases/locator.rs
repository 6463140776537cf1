//! Resource locator
//!
//! Resolves names and identifiers into remote resource handles.
//! Name matching is case-insensitive exact; duplicate display names
//! resolve per [`capstan_domain::ON_DUPLICATE`] (first match in server
//! response order). Multi-name lookups are lenient: a name that
//! matches nothing yields no entry rather than failing the call,
//! and the unmatched names are reported alongside the matches so
//! callers can warn.

use std::sync::Arc;

use tracing::warn;

use capstan_domain::{Resource, ResourceKind};

use crate::cache::ResourceCache;
use crate::ports::{ResourceClient, TransportError};

/// Errors from single-target lookups.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// No resource of the kind carries the requested name.
    #[error("no {kind} named '{name}'")]
    NameNotFound {
        /// Kind searched.
        kind: ResourceKind,
        /// The name that matched nothing.
        name: String,
    },

    /// No resource of the kind carries the requested identifier.
    #[error("no {kind} with id '{id}'")]
    IdNotFound {
        /// Kind searched.
        kind: ResourceKind,
        /// The identifier that matched nothing.
        id: String,
    },

    /// The transport collaborator failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Outcome of a lenient multi-name lookup.
///
/// Carries both the resolved resources and the input names that failed
/// to resolve, so calling layers can choose to warn instead of losing
/// data silently. Resolved order follows input-name order.
#[derive(Debug, Clone)]
pub struct ResolvedNames {
    /// Matches, in input-name order.
    pub resources: Vec<Resource>,
    /// Input names that matched nothing.
    pub unresolved: Vec<String>,
}

impl ResolvedNames {
    /// Whether every input name found a match.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Outcome of filtering projects by project-group names.
#[derive(Debug, Clone)]
pub struct GroupFiltered {
    /// Projects whose owning group matched one of the requested names.
    pub projects: Vec<Resource>,
    /// Group names that resolved to no group. They contribute no
    /// matches; a fully misspelled filter yields an empty result, not
    /// an error.
    pub unresolved_groups: Vec<String>,
}

/// Removes any resource whose name case-insensitively equals one of the
/// excluded names. Applied after name and group filtering.
#[must_use]
pub fn exclude_by_name(resources: Vec<Resource>, excluded: &[String]) -> Vec<Resource> {
    if excluded.is_empty() {
        return resources;
    }
    resources
        .into_iter()
        .filter(|resource| !excluded.iter().any(|name| resource.name_matches(name)))
        .collect()
}

/// Resolves names and identifiers into remote resource handles.
pub struct Locator<C> {
    client: C,
    cache: Option<Arc<ResourceCache>>,
}

impl<C: ResourceClient> Locator<C> {
    /// Creates a locator that always re-fetches collections.
    pub const fn new(client: C) -> Self {
        Self {
            client,
            cache: None,
        }
    }

    /// Creates a locator that opts into the process-wide cache for
    /// full-collection reads.
    pub const fn with_cache(client: C, cache: Arc<ResourceCache>) -> Self {
        Self {
            client,
            cache: Some(cache),
        }
    }

    /// The full collection for a kind, served from cache when this
    /// locator opted in and a live entry exists.
    ///
    /// # Errors
    /// Propagates transport failures unchanged.
    pub async fn collection(&self, kind: ResourceKind) -> Result<Vec<Resource>, TransportError> {
        match &self.cache {
            Some(cache) => {
                cache
                    .get_or_fetch(kind, || self.client.find_all(kind))
                    .await
            }
            None => self.client.find_all(kind).await,
        }
    }

    /// Finds the resource carrying a name, case-insensitively.
    ///
    /// # Errors
    /// Returns [`LocateError::NameNotFound`] when nothing matches;
    /// duplicates resolve to the first match in server response order.
    pub async fn find_by_name(
        &self,
        kind: ResourceKind,
        name: &str,
    ) -> Result<Resource, LocateError> {
        let collection = self.collection(kind).await?;
        collection
            .into_iter()
            .find(|resource| resource.name_matches(name))
            .ok_or_else(|| LocateError::NameNotFound {
                kind,
                name: name.to_string(),
            })
    }

    /// Resolves each name independently against one collection fetch.
    ///
    /// Lenient: names that match nothing are dropped from the resolved
    /// sequence and listed in the result instead. Callers requiring
    /// strictness check [`ResolvedNames::is_complete`].
    ///
    /// # Errors
    /// Propagates transport failures unchanged.
    pub async fn find_by_names(
        &self,
        kind: ResourceKind,
        names: &[String],
    ) -> Result<ResolvedNames, TransportError> {
        let collection = self.collection(kind).await?;
        let mut resources = Vec::with_capacity(names.len());
        let mut unresolved = Vec::new();

        for name in names {
            match collection.iter().find(|r| r.name_matches(name)) {
                Some(found) => resources.push(found.clone()),
                None => {
                    warn!(kind = %kind, name = %name, "name resolved to no resource");
                    unresolved.push(name.clone());
                }
            }
        }

        Ok(ResolvedNames {
            resources,
            unresolved,
        })
    }

    /// Finds one resource by its stable identifier.
    ///
    /// # Errors
    /// Returns [`LocateError::IdNotFound`] when the server reports the
    /// identifier as definitively absent.
    pub async fn find_by_id(&self, kind: ResourceKind, id: &str) -> Result<Resource, LocateError> {
        match self.client.get(kind, id).await {
            Ok(resource) => Ok(resource),
            Err(TransportError::NotFound { kind, id }) => Err(LocateError::IdNotFound { kind, id }),
            Err(other) => Err(LocateError::Transport(other)),
        }
    }

    /// Restricts a project sequence to those owned by any of the named
    /// project groups.
    ///
    /// Group names are resolved against the project-group collection;
    /// names that resolve to no group contribute no matches (reported,
    /// not raised). Input project order is preserved.
    ///
    /// # Errors
    /// Propagates transport failures from the group lookup unchanged.
    pub async fn filter_by_group(
        &self,
        projects: Vec<Resource>,
        group_names: &[String],
    ) -> Result<GroupFiltered, TransportError> {
        let resolved = self
            .find_by_names(ResourceKind::ProjectGroup, group_names)
            .await?;
        let group_ids: Vec<&str> = resolved.resources.iter().map(|g| g.id.as_str()).collect();

        let projects = projects
            .into_iter()
            .filter(|project| {
                project
                    .project_group_id
                    .as_deref()
                    .is_some_and(|owner| group_ids.contains(&owner))
            })
            .collect();

        Ok(GroupFiltered {
            projects,
            unresolved_groups: resolved.unresolved,
        })
    }
}
