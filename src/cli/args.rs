//! CLI argument definitions, using `clap`'s derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pald - PALD core analysis and orchestration subsystem
#[derive(Parser)]
#[command(name = "pald")]
#[command(about = "Schema-driven PALD extraction, diffing, bias scheduling, and prerequisite validation")]
#[command(long_about = r#"
pald is a thin CLI over the pald-* library family, exercising the pipeline
end-to-end for manual inspection and smoke testing:

  # Extract a light record from a description
  pald extract "A friendly female teacher wearing a blue dress"

  # Diff a description against an embodiment caption
  pald diff --embodiment "A teacher" "A friendly teacher wearing a blue dress"

  # Run the full extract-diff-bias-persist pipeline
  pald process --session-id demo-1 "A friendly teacher" --embodiment "A teacher"

  # Validate prerequisites for a named operation
  pald prereq operation chat

  # Demonstrate priority-ordered bias job batch processing
  pald bias demo

Configuration is loaded from a TOML file (see --config) with environment
variable overrides layered on top, matching pald-config's documented keys.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to a PaldConfig TOML file (defaults to built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the PALD schema JSON file
    #[arg(long, global = true)]
    pub schema_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a light record and compressed prompt from free text
    Extract {
        /// Free-text description
        description: String,

        /// Optional embodiment/image caption, concatenated with the description
        #[arg(long)]
        embodiment: Option<String>,
    },

    /// Diff a description record against an embodiment record
    Diff {
        /// Free-text description
        description: String,

        /// Free-text embodiment caption
        #[arg(long)]
        embodiment: String,
    },

    /// Run the full extract-diff-bias-persist pipeline
    Process {
        /// User identifier, pseudonymised before persistence
        #[arg(long, default_value = "demo-user")]
        user_id: String,

        /// Session identifier
        #[arg(long)]
        session_id: String,

        /// Free-text description
        description: String,

        /// Optional embodiment/image caption
        #[arg(long)]
        embodiment: Option<String>,

        /// Defer bias analysis to the job queue regardless of configuration
        #[arg(long)]
        defer_bias: bool,
    },

    /// Prerequisite validation
    Prereq {
        #[command(subcommand)]
        action: PrereqCommands,
    },

    /// Bias job manager demonstrations
    Bias {
        #[command(subcommand)]
        action: BiasCommands,
    },
}

#[derive(Subcommand)]
pub enum PrereqCommands {
    /// Run all registered checkers
    RunAll,

    /// Validate prerequisites for a named operation (registration, chat,
    /// image_generation, system_startup)
    Operation {
        /// Operation name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum BiasCommands {
    /// Enqueue sample jobs at varying priorities and process a bounded batch,
    /// demonstrating the `(priority desc, created_at asc)` pickup order
    Demo {
        /// Number of sample jobs to enqueue
        #[arg(long, default_value_t = 3)]
        jobs: usize,

        /// Batch size passed to `process_batch`
        #[arg(long, default_value_t = 2)]
        limit: usize,
    },
}
