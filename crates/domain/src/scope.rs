//! Variable scope types.
//!
//! A scope narrows where a variable's value applies. Scope keys are
//! dimensions (environment, machine, role); each value is a deduplicated
//! set of remote identifiers. A dimension that is absent from the map
//! means the variable applies everywhere along that dimension.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A dimension a variable value can be restricted along.
///
/// The server may attach dimensions this client does not manage; those
/// round-trip through [`ScopeDimension::Other`] so a fetch-modify-commit
/// cycle never drops them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopeDimension {
    /// Restrict to specific environments.
    Environment,
    /// Restrict to specific machines.
    Machine,
    /// Restrict to specific target roles.
    Role,
    /// A dimension this client does not manage, preserved verbatim.
    Other(String),
}

impl ScopeDimension {
    /// The wire name of this dimension.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Environment => "Environment",
            Self::Machine => "Machine",
            Self::Role => "Role",
            Self::Other(name) => name,
        }
    }

    /// Maps a wire name onto a dimension, case-insensitively for the
    /// managed dimensions.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("environment") {
            Self::Environment
        } else if name.eq_ignore_ascii_case("machine") {
            Self::Machine
        } else if name.eq_ignore_ascii_case("role") {
            Self::Role
        } else {
            Self::Other(name.to_string())
        }
    }
}

impl fmt::Display for ScopeDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ScopeDimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScopeDimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// A deduplicated collection of remote identifiers for one scope
/// dimension.
///
/// Insertion order is preserved for display, but two values holding the
/// same identifiers compare equal regardless of the order they were
/// built in.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ScopeValue {
    ids: Vec<String>,
}

impl ScopeValue {
    /// Creates an empty value.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Builds a value from identifiers, dropping duplicates and keeping
    /// the first occurrence of each.
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut value = Self::new();
        for id in ids {
            value.insert(id);
        }
        value
    }

    /// Inserts an identifier. Returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Whether the identifier is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the value holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates identifiers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl PartialEq for ScopeValue {
    fn eq(&self, other: &Self) -> bool {
        if self.ids.len() != other.ids.len() {
            return false;
        }
        let mut left: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        let mut right: Vec<&str> = other.ids.iter().map(String::as_str).collect();
        left.sort_unstable();
        right.sort_unstable();
        left == right
    }
}

impl From<Vec<String>> for ScopeValue {
    fn from(ids: Vec<String>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<ScopeValue> for Vec<String> {
    fn from(value: ScopeValue) -> Self {
        value.ids
    }
}

/// The scope map attached to a variable.
///
/// An empty map means global applicability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope {
    entries: BTreeMap<ScopeDimension, ScopeValue>,
}

impl Scope {
    /// Creates an unrestricted (global) scope.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Sets one dimension's identifier set.
    ///
    /// An empty set removes the entry instead: a vacuous restriction
    /// differs in meaning from "applies everywhere", so it is never
    /// stored.
    pub fn set(&mut self, dimension: ScopeDimension, value: ScopeValue) {
        if value.is_empty() {
            self.entries.remove(&dimension);
        } else {
            self.entries.insert(dimension, value);
        }
    }

    /// The identifier set for a dimension, if the scope restricts it.
    #[must_use]
    pub fn get(&self, dimension: &ScopeDimension) -> Option<&ScopeValue> {
        self.entries.get(dimension)
    }

    /// Whether the scope restricts the given dimension.
    #[must_use]
    pub fn restricts(&self, dimension: &ScopeDimension) -> bool {
        self.entries.contains_key(dimension)
    }

    /// Whether the scope applies everywhere (no restrictions).
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of restricted dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the scope has no entries. Alias of [`Scope::is_global`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates restricted dimensions and their identifier sets.
    pub fn iter(&self) -> impl Iterator<Item = (&ScopeDimension, &ScopeValue)> {
        self.entries.iter()
    }
}
