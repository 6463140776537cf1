//! Application use cases (business logic orchestration).

mod add_variable;
mod batch;
mod copy_variables;
mod get_variables;
mod locator;
mod remove_variable;
mod scope_builder;

#[cfg(test)]
pub(crate) mod test_support;

pub use add_variable::AddVariable;
pub use batch::{DeleteResources, apply_to_each};
pub use copy_variables::{CopyOutcome, CopyVariables, CopyVariablesError, copy_into};
pub use get_variables::{GetVariables, VariableSetError};
pub use locator::{GroupFiltered, LocateError, Locator, ResolvedNames, exclude_by_name};
pub use remove_variable::{RemovalState, RemoveVariable};
pub use scope_builder::{ScopeBuilder, ScopeSpec, ScopedVariable};
