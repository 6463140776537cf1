//! Variable set: the owned collection of variables behind a project or
//! library variable set.

use serde::{Deserialize, Serialize};

use crate::variable::Variable;

/// An owned collection of variables.
///
/// Local mutations (add/remove) are staged in memory and invisible to
/// the server until the whole set is committed back as one modify call;
/// there is no partial commit of a subset of variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSet {
    /// Identifier of the variable-set document itself.
    pub id: String,
    /// Identifier of the owning project or library variable set.
    pub owner_id: String,
    /// The variables, in server order.
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl VariableSet {
    /// Creates an empty set for an owner.
    #[must_use]
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            variables: Vec::new(),
        }
    }

    /// Whether any variable carries the given name (case-insensitive).
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v.name_matches(name))
    }

    /// The first variable matching the name, in collection order.
    ///
    /// Duplicate names are legal; lookup follows
    /// [`crate::policy::ON_DUPLICATE`].
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name_matches(name))
    }

    /// Stages a variable into the set.
    pub fn add(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    /// Removes the first variable matching the name, returning it.
    ///
    /// Returns `None` when no variable matched; the set is unchanged.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Variable> {
        let position = self.variables.iter().position(|v| v.name_matches(name))?;
        Some(self.variables.remove(position))
    }

    /// Number of variables in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the set holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates variable names in collection order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set_with(names: &[&str]) -> VariableSet {
        let mut set = VariableSet::new("variableset-Projects-1", "Projects-1");
        for name in names {
            set.add(Variable::new(*name, "value"));
        }
        set
    }

    #[test]
    fn contains_name_is_case_insensitive() {
        let set = set_with(&["DbPassword"]);
        assert!(set.contains_name("dbpassword"));
        assert!(!set.contains_name("DbUser"));
    }

    #[test]
    fn remove_takes_the_first_match_only() {
        let mut set = set_with(&["LogLevel", "LogLevel"]);
        let removed = set.remove_by_name("loglevel");
        assert!(removed.is_some());
        assert_eq!(set.len(), 1);
        assert!(set.contains_name("LogLevel"));
    }

    #[test]
    fn remove_of_absent_name_leaves_the_set_unchanged() {
        let mut set = set_with(&["A", "B"]);
        assert!(set.remove_by_name("C").is_none());
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn find_by_name_returns_first_in_collection_order() {
        let mut set = VariableSet::new("variableset-Projects-1", "Projects-1");
        set.add(Variable::new("Port", "8080"));
        set.add(Variable::new("Port", "9090"));

        let found = set.find_by_name("port").map(|v| v.value.clone());
        assert_eq!(found.flatten().as_deref(), Some("8080"));
    }
}
