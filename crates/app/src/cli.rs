//! Command-line surface.
//!
//! Each verb is a thin mapping onto one application use case. Script
//! parameters arrive here; results go to stdout, warnings to stderr.

use clap::{Args, Parser, Subcommand};

/// Command surface for a deployment automation server.
#[derive(Debug, Parser)]
#[command(name = "capstan", version, about)]
pub struct Cli {
    /// The verb to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Selects the owner of a variable collection: a project or a library
/// variable set. Exactly one must be given.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct OwnerArgs {
    /// Project owning the variables.
    #[arg(long)]
    pub project: Option<String>,

    /// Library variable set owning the variables.
    #[arg(long)]
    pub library: Option<String>,
}

/// All verbs the surface exposes.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List projects, or fetch specific ones by name.
    GetProject {
        /// Project names; empty lists everything.
        names: Vec<String>,

        /// Keep only projects owned by these project groups.
        #[arg(long = "group")]
        groups: Vec<String>,

        /// Drop projects with these names from the result.
        #[arg(long = "exclude")]
        excluded: Vec<String>,
    },

    /// List environments, or fetch specific ones by name.
    GetEnvironment {
        /// Environment names; empty lists everything.
        names: Vec<String>,
    },

    /// List machines, or fetch specific ones by name.
    GetMachine {
        /// Machine names; empty lists everything.
        names: Vec<String>,
    },

    /// Print the variables of a project or library variable set.
    GetVariables {
        /// Whose variables to fetch.
        #[command(flatten)]
        owner: OwnerArgs,
    },

    /// Add a variable to a project or library variable set.
    AddVariable {
        /// Whose variables to change.
        #[command(flatten)]
        owner: OwnerArgs,

        /// Variable name.
        #[arg(long)]
        name: String,

        /// Variable value.
        #[arg(long)]
        value: String,

        /// Treat the value as a secret; it will never be echoed.
        #[arg(long)]
        sensitive: bool,

        /// Restrict to these environments.
        #[arg(long = "environment")]
        environments: Vec<String>,

        /// Restrict to these machines.
        #[arg(long = "machine")]
        machines: Vec<String>,

        /// Restrict to these target roles.
        #[arg(long = "role")]
        roles: Vec<String>,
    },

    /// Remove the first variable matching a name.
    RemoveVariable {
        /// Whose variables to change.
        #[command(flatten)]
        owner: OwnerArgs,

        /// Variable name to remove.
        #[arg(long)]
        name: String,
    },

    /// Copy every variable of one collection into another.
    CopyVariables {
        /// Source project.
        #[arg(long, group = "source")]
        from_project: Option<String>,

        /// Source library variable set.
        #[arg(long, group = "source", required_unless_present = "from_project")]
        from_library: Option<String>,

        /// Target project.
        #[arg(long)]
        to_project: String,
    },

    /// Delete projects by name.
    RemoveProject {
        /// Names of the projects to delete.
        #[arg(required = true)]
        names: Vec<String>,
    },
}
