//! Per-verb command handlers.
//!
//! Thin mappings from parsed arguments onto application use cases.
//! Results print to stdout; per-item warnings go to stderr. Sensitive
//! values are masked by the domain display helper and never echoed.

use std::error::Error;
use std::sync::Arc;

use capstan_application::use_cases::{
    AddVariable, CopyVariables, DeleteResources, GetVariables, Locator, RemovalState,
    RemoveVariable, ScopeBuilder, ScopeSpec, exclude_by_name,
};
use capstan_application::{OperationWarning, ResourceCache, Session};
use capstan_domain::{Resource, ResourceKind, Variable, VariableSet};
use capstan_infrastructure::RestResourceClient;

use crate::cli::OwnerArgs;

type Client = Arc<RestResourceClient>;
type CommandResult = Result<(), Box<dyn Error>>;

/// Wiring shared by every verb: the session handle and the
/// process-wide collection cache.
pub struct Context {
    session: Session<Client>,
    cache: Arc<ResourceCache>,
}

impl Context {
    /// Builds the command context.
    pub const fn new(session: Session<Client>, cache: Arc<ResourceCache>) -> Self {
        Self { session, cache }
    }

    fn client(&self) -> Result<Client, Box<dyn Error>> {
        Ok(Arc::clone(self.session.client()?))
    }

    /// A locator opted into the collection cache, for commands that
    /// enumerate expensive collections.
    fn cached_locator(&self) -> Result<Locator<Client>, Box<dyn Error>> {
        Ok(Locator::with_cache(
            self.client()?,
            Arc::clone(&self.cache),
        ))
    }

    /// A locator on the default always-re-fetch path.
    fn locator(&self) -> Result<Locator<Client>, Box<dyn Error>> {
        Ok(Locator::new(self.client()?))
    }
}

impl OwnerArgs {
    fn kind_and_name(&self) -> (ResourceKind, &str) {
        match (&self.project, &self.library) {
            (Some(name), _) => (ResourceKind::Project, name),
            (_, Some(name)) => (ResourceKind::LibraryVariableSet, name),
            // clap's arg group guarantees one is present.
            (None, None) => unreachable!("owner group requires project or library"),
        }
    }
}

fn print_resources(resources: &[Resource]) {
    for resource in resources {
        println!("{} ({})", resource.name, resource.id);
    }
}

fn print_warnings(warnings: &[OperationWarning]) {
    for warning in warnings {
        if warning.is_actionable() {
            eprintln!("{warning}");
        } else {
            println!("{}: {}", warning.subject, warning.message);
        }
    }
}

fn print_variables(set: &VariableSet) {
    for variable in &set.variables {
        let scope = if variable.scope.is_global() {
            String::from("global")
        } else {
            variable
                .scope
                .iter()
                .map(|(dimension, ids)| {
                    format!("{dimension}={}", ids.iter().collect::<Vec<_>>().join(","))
                })
                .collect::<Vec<_>>()
                .join("; ")
        };
        println!(
            "{} = {} [{}]",
            variable.name,
            variable.display_value(),
            scope
        );
    }
}

fn warn_unresolved(names: &[String]) {
    for name in names {
        eprintln!("warning: '{name}' did not match any resource");
    }
}

/// Lists or fetches projects, with group and exclusion filtering.
pub async fn get_project(
    context: &Context,
    names: &[String],
    groups: &[String],
    excluded: &[String],
) -> CommandResult {
    let locator = context.cached_locator()?;

    let mut projects = if names.is_empty() {
        locator.collection(ResourceKind::Project).await?
    } else {
        let resolved = locator.find_by_names(ResourceKind::Project, names).await?;
        warn_unresolved(&resolved.unresolved);
        resolved.resources
    };

    if !groups.is_empty() {
        let filtered = locator.filter_by_group(projects, groups).await?;
        for group in &filtered.unresolved_groups {
            eprintln!("warning: project group '{group}' does not exist");
        }
        projects = filtered.projects;
    }

    let projects = exclude_by_name(projects, excluded);
    print_resources(&projects);
    Ok(())
}

/// Lists or fetches a plain resource collection by name.
pub async fn get_resources(context: &Context, kind: ResourceKind, names: &[String]) -> CommandResult {
    let locator = context.locator()?;
    let resources = if names.is_empty() {
        locator.collection(kind).await?
    } else {
        let resolved = locator.find_by_names(kind, names).await?;
        warn_unresolved(&resolved.unresolved);
        resolved.resources
    };
    print_resources(&resources);
    Ok(())
}

/// Prints the variables of a project or library variable set.
pub async fn get_variables(context: &Context, owner: &OwnerArgs) -> CommandResult {
    let (kind, name) = owner.kind_and_name();
    let use_case = GetVariables::new(context.locator()?, context.client()?);
    let set = use_case.execute(kind, name).await?;
    print_variables(&set);
    Ok(())
}

/// Adds a scoped variable to a project or library variable set.
#[allow(clippy::too_many_arguments)]
pub async fn add_variable(
    context: &Context,
    owner: &OwnerArgs,
    name: &str,
    value: &str,
    sensitive: bool,
    environments: Vec<String>,
    machines: Vec<String>,
    roles: Vec<String>,
) -> CommandResult {
    let (kind, owner_name) = owner.kind_and_name();
    let locator = context.locator()?;

    let variable = if sensitive {
        Variable::sensitive(name, value)
    } else {
        Variable::new(name, value)
    };
    let spec = ScopeSpec {
        environments,
        machines,
        roles,
    };
    let scoped = ScopeBuilder::new(&locator).build(variable, &spec).await?;
    for (dimension, unmatched) in &scoped.unresolved {
        eprintln!("warning: '{unmatched}' did not match any {dimension}");
    }

    let get = GetVariables::new(context.locator()?, context.client()?);
    let link = get.variables_link(kind, owner_name).await?;
    AddVariable::new(context.client()?)
        .execute(&link, scoped.variable)
        .await?;
    println!("added variable '{name}'");
    Ok(())
}

/// Removes the first variable matching a name.
pub async fn remove_variable(context: &Context, owner: &OwnerArgs, name: &str) -> CommandResult {
    let (kind, owner_name) = owner.kind_and_name();
    let get = GetVariables::new(context.locator()?, context.client()?);
    let link = get.variables_link(kind, owner_name).await?;

    match RemoveVariable::new(context.client()?).execute(&link, name).await? {
        RemovalState::Removed => println!("removed variable '{name}'"),
        RemovalState::NotFound => {
            eprintln!("warning: no variable named '{name}', nothing removed");
        }
        // Intermediate states never reach callers.
        RemovalState::Searching | RemovalState::Found => {}
    }
    Ok(())
}

/// Copies every variable of one collection into another.
pub async fn copy_variables(
    context: &Context,
    from_project: Option<&str>,
    from_library: Option<&str>,
    to_project: &str,
) -> CommandResult {
    let get = GetVariables::new(context.locator()?, context.client()?);

    let source_link = match (from_project, from_library) {
        (Some(name), _) => get.variables_link(ResourceKind::Project, name).await?,
        (_, Some(name)) => {
            get.variables_link(ResourceKind::LibraryVariableSet, name)
                .await?
        }
        (None, None) => unreachable!("clap requires a copy source"),
    };
    let target_link = get
        .variables_link(ResourceKind::Project, to_project)
        .await?;

    let outcome = CopyVariables::new(context.client()?)
        .execute(&source_link, &target_link)
        .await?;
    print_warnings(&outcome.warnings);
    println!("copied {} variable(s) into '{to_project}'", outcome.applied);
    Ok(())
}

/// Deletes projects by name, reporting each deletion in order.
pub async fn remove_project(context: &Context, names: &[String]) -> CommandResult {
    let locator = context.cached_locator()?;
    let resolved = locator.find_by_names(ResourceKind::Project, names).await?;
    warn_unresolved(&resolved.unresolved);

    let diagnostics = DeleteResources::new(context.client()?)
        .execute(ResourceKind::Project, resolved.resources)
        .await?;
    print_warnings(&diagnostics);
    Ok(())
}
