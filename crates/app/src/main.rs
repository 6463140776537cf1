//! Capstan - Main Entry Point
//!
//! Establishes the server session from the environment or the stored
//! profile, wires the process-wide collection cache, and dispatches
//! the parsed verb to its command handler.

mod cli;
mod commands;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use capstan_application::{ResourceCache, Session};
use capstan_infrastructure::{ProfileRepository, RestResourceClient, SystemClock};

use cli::{Cli, Command};
use commands::Context;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Establish the session, if this process has connection settings.
    let session = match ProfileRepository::new().resolve().await? {
        Some(profile) => {
            tracing::debug!(server = %profile.server_url, "session established");
            Session::established(Arc::new(RestResourceClient::new(&profile)?))
        }
        None => {
            tracing::debug!("no connection settings found; commands will fail fast");
            Session::unestablished()
        }
    };
    let cache = Arc::new(ResourceCache::with_default_ttl(Arc::new(SystemClock::new())));
    let context = Context::new(session, cache);

    match cli.command {
        Command::GetProject {
            names,
            groups,
            excluded,
        } => commands::get_project(&context, &names, &groups, &excluded).await?,
        Command::GetEnvironment { names } => {
            commands::get_resources(&context, capstan_domain::ResourceKind::Environment, &names)
                .await?;
        }
        Command::GetMachine { names } => {
            commands::get_resources(&context, capstan_domain::ResourceKind::Machine, &names)
                .await?;
        }
        Command::GetVariables { owner } => commands::get_variables(&context, &owner).await?,
        Command::AddVariable {
            owner,
            name,
            value,
            sensitive,
            environments,
            machines,
            roles,
        } => {
            commands::add_variable(
                &context,
                &owner,
                &name,
                &value,
                sensitive,
                environments,
                machines,
                roles,
            )
            .await?;
        }
        Command::RemoveVariable { owner, name } => {
            commands::remove_variable(&context, &owner, &name).await?;
        }
        Command::CopyVariables {
            from_project,
            from_library,
            to_project,
        } => {
            commands::copy_variables(
                &context,
                from_project.as_deref(),
                from_library.as_deref(),
                &to_project,
            )
            .await?;
        }
        Command::RemoveProject { names } => commands::remove_project(&context, &names).await?,
    }

    Ok(())
}
