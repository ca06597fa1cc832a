//! CLI entry point: parses arguments, bootstraps tracing/config/schema, and
//! dispatches to the per-subcommand executors in [`crate::cli::commands`].

use clap::Parser;
use pald_config::PaldConfig;
use pald_schema::SchemaRegistry;
use std::sync::Arc;

use super::args::{BiasCommands, Cli, Commands, PrereqCommands};
use super::commands;

/// Parses `argv`, loads configuration, and dispatches to a command executor.
///
/// Returns `Err(code)` with the process exit code to use; `main` is
/// responsible for calling `std::process::exit`. All user-facing output
/// (including error messages) is printed here or in the executors.
pub async fn run() -> Result<(), i32> {
    pald_utils::logging::init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PaldConfig::from_file_and_env(path),
        None => PaldConfig::from_env(),
    };
    let config = config.map_err(|err| {
        eprintln!("error: invalid configuration: {err}");
        2
    })?;

    let schema_path = cli.schema_file.clone().unwrap_or_else(|| config.schema_file_path.as_std_path().to_path_buf());
    let registry = Arc::new(SchemaRegistry::new(schema_path, config.schema_cache_ttl));

    match cli.command {
        Commands::Extract { description, embodiment } => commands::execute_extract(&registry, &description, embodiment.as_deref()),
        Commands::Diff { description, embodiment } => commands::execute_diff(&registry, &description, &embodiment),
        Commands::Process {
            user_id,
            session_id,
            description,
            embodiment,
            defer_bias,
        } => commands::execute_process(&registry, config, user_id, session_id, description, embodiment, defer_bias),
        Commands::Prereq { action } => match action {
            PrereqCommands::RunAll => commands::execute_prereq_run_all().await,
            PrereqCommands::Operation { name } => commands::execute_prereq_operation(&name).await,
        },
        Commands::Bias { action } => match action {
            BiasCommands::Demo { jobs, limit } => commands::execute_bias_demo(&registry, jobs, limit),
        },
    }
}
