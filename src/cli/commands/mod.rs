//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod assets;
mod config_cmd;
mod serve;
mod simulate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions, Settings};
use crate::simulation::SimulationPacing;

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Single-page personal portfolio server")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind: port, host, or host:port (default: 127.0.0.1:8501)
        bind: Option<String>,
    },

    /// Fetch every animation asset once and report its status
    Assets,

    /// Print the resolved configuration as TOML
    Config,

    /// Run a simulated demo in the terminal
    Simulate {
        /// resume_download, dashboard_load or model_training
        kind: String,
        /// Multiplier applied to every pause (0 runs instantly)
        #[arg(long)]
        time_scale: Option<f64>,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let (mut settings, config) = load_settings_with_options(options).await?;

    if let Some(ref path) = config.source_path {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Assets => assets::cmd_assets(&settings).await,
        Commands::Config => config_cmd::cmd_config_show(&settings),
        Commands::Simulate { kind, time_scale } => {
            apply_time_scale(&mut settings, time_scale);
            simulate::cmd_simulate(&settings, &kind).await
        }
    }
}

/// Apply `--time-scale`, bounded the same way as the config value.
fn apply_time_scale(settings: &mut Settings, time_scale: Option<f64>) {
    if let Some(scale) = time_scale {
        settings.pacing.time_scale = SimulationPacing::clamp_time_scale(scale);
    }
}
