//! Variable types.

use serde::{Deserialize, Serialize};

use crate::scope::Scope;

/// Placeholder printed in place of a sensitive value.
pub const MASKED_VALUE: &str = "********";

/// A single variable in a variable set.
///
/// Names are not unique within a set; the same name may appear several
/// times with different scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name.
    pub name: String,

    /// The variable value. Absent values are legal.
    #[serde(default)]
    pub value: Option<String>,

    /// If true, the value is a secret and must never be echoed.
    #[serde(default)]
    pub sensitive: bool,

    /// Where the value applies. An empty scope applies everywhere.
    #[serde(default)]
    pub scope: Scope,
}

impl Variable {
    /// Creates a plain, globally scoped variable.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            sensitive: false,
            scope: Scope::new(),
        }
    }

    /// Creates a sensitive variable whose value is treated as a secret.
    #[must_use]
    pub fn sensitive(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            sensitive: true,
            scope: Scope::new(),
        }
    }

    /// Attaches a scope.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Case-insensitive exact comparison against a candidate name.
    #[must_use]
    pub fn name_matches(&self, candidate: &str) -> bool {
        self.name.to_lowercase() == candidate.to_lowercase()
    }

    /// The value as safe for display: sensitive values are masked,
    /// absent values render empty.
    #[must_use]
    pub fn display_value(&self) -> &str {
        if self.sensitive {
            MASKED_VALUE
        } else {
            self.value.as_deref().unwrap_or_default()
        }
    }
}
