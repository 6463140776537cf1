//! Remote resource handles.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Categories of remote entity the server exposes as collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// A deployment project.
    Project,
    /// A grouping of projects.
    ProjectGroup,
    /// A deployment environment.
    Environment,
    /// A deployment target machine.
    Machine,
    /// A library variable set shared across projects.
    LibraryVariableSet,
}

impl ResourceKind {
    /// The server-side collection segment for this kind.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::ProjectGroup => "projectgroups",
            Self::Environment => "environments",
            Self::Machine => "machines",
            Self::LibraryVariableSet => "libraryvariablesets",
        }
    }

    /// Human-readable singular name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::ProjectGroup => "project group",
            Self::Environment => "environment",
            Self::Machine => "machine",
            Self::LibraryVariableSet => "library variable set",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project" | "projects" => Ok(Self::Project),
            "projectgroup" | "projectgroups" | "project-group" => Ok(Self::ProjectGroup),
            "environment" | "environments" => Ok(Self::Environment),
            "machine" | "machines" => Ok(Self::Machine),
            "libraryvariableset" | "libraryvariablesets" | "library-variable-set" => {
                Ok(Self::LibraryVariableSet)
            }
            other => Err(DomainError::UnknownResourceKind(other.to_string())),
        }
    }
}

/// A remote entity with a stable identifier, a display name and
/// hyperlink-style relations to its sub-resources.
///
/// Identity is `id`; `name` is not guaranteed unique across the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Server-assigned stable identifier (e.g. `Projects-12`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hyperlink relations to sub-resources, keyed by relation name
    /// (e.g. a project's `Variables` link).
    #[serde(default)]
    pub links: HashMap<String, String>,
    /// Owning project group. Only populated for projects.
    #[serde(default)]
    pub project_group_id: Option<String>,
}

impl Resource {
    /// Creates a resource handle with no links.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            links: HashMap::new(),
            project_group_id: None,
        }
    }

    /// Adds a hyperlink relation.
    #[must_use]
    pub fn with_link(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.links.insert(rel.into(), href.into());
        self
    }

    /// Sets the owning project group.
    #[must_use]
    pub fn in_group(mut self, group_id: impl Into<String>) -> Self {
        self.project_group_id = Some(group_id.into());
        self
    }

    /// Looks up a hyperlink relation by name.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }

    /// Case-insensitive exact comparison against a candidate name.
    #[must_use]
    pub fn name_matches(&self, candidate: &str) -> bool {
        self.name.to_lowercase() == candidate.to_lowercase()
    }
}
