//! Command-line interface for `pald`.
//!
//! - `args`: clap argument/subcommand definitions
//! - `commands`: one executor function per subcommand
//! - `run`: parses arguments, bootstraps config/schema/tracing, dispatches

mod args;
mod commands;
mod run;

pub use run::run;
