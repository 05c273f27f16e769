mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pubflow",
    about = "Derive publication workflow stages from issue checklists and sync them as labels",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from pubflow.yaml or .git/)
    #[arg(long, global = true, env = "PUBFLOW_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default pubflow.yaml for a repository
    Init {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
    },

    /// Resolve a stage from an issue body without touching GitHub
    Resolve {
        /// Read the body from a file instead of stdin
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Override the configured scan mode (any_checked | consecutive_prefix)
        #[arg(long)]
        mode: Option<String>,
    },

    /// Fetch issues and sync their stage labels
    Sync {
        /// Issue numbers to sync
        #[arg(required = true)]
        issues: Vec<u64>,

        /// Compute and print changes without writing labels
        #[arg(long)]
        dry_run: bool,

        /// GitHub API token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Show the stage ladder and its thresholds
    Stages,

    /// Inspect and validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Sync { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { owner, repo } => cmd::init::run(&root, &owner, &repo),
        Commands::Resolve { body_file, mode } => {
            cmd::resolve::run(&root, body_file.as_deref(), mode.as_deref(), cli.json)
        }
        Commands::Sync {
            issues,
            dry_run,
            token,
        } => cmd::sync::run(&root, &issues, dry_run, &token, cli.json),
        Commands::Stages => cmd::stages::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
