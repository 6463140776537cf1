//! Wire payload types
//!
//! The server speaks PascalCase JSON; these types mirror its payloads
//! and convert to and from the domain model. Unmanaged scope
//! dimensions survive the round trip via the domain scope's
//! catch-all dimension.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use capstan_domain::{Resource, Scope, Variable, VariableSet};

/// A resource envelope as the server returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ResourceDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub links: HashMap<String, String>,
    #[serde(default)]
    pub project_group_id: Option<String>,
}

impl From<ResourceDto> for Resource {
    fn from(dto: ResourceDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            links: dto.links,
            project_group_id: dto.project_group_id,
        }
    }
}

/// A variable as carried inside a variable-set payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct VariableDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub is_sensitive: bool,
    #[serde(default)]
    pub scope: Scope,
}

impl From<VariableDto> for Variable {
    fn from(dto: VariableDto) -> Self {
        Self {
            name: dto.name,
            value: dto.value,
            sensitive: dto.is_sensitive,
            scope: dto.scope,
        }
    }
}

impl From<&Variable> for VariableDto {
    fn from(variable: &Variable) -> Self {
        Self {
            name: variable.name.clone(),
            value: variable.value.clone(),
            is_sensitive: variable.sensitive,
            scope: variable.scope.clone(),
        }
    }
}

/// A variable-set document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct VariableSetDto {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub variables: Vec<VariableDto>,
}

impl From<VariableSetDto> for VariableSet {
    fn from(dto: VariableSetDto) -> Self {
        Self {
            id: dto.id,
            owner_id: dto.owner_id,
            variables: dto.variables.into_iter().map(Variable::from).collect(),
        }
    }
}

impl From<&VariableSet> for VariableSetDto {
    fn from(set: &VariableSet) -> Self {
        Self {
            id: set.id.clone(),
            owner_id: set.owner_id.clone(),
            variables: set.variables.iter().map(VariableDto::from).collect(),
        }
    }
}
