use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "intervalo", version, about = "Intervalo interval-workout timer")]
struct Cli {
    /// Config file (defaults to ~/.config/intervalo/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workout in the terminal
    Run(commands::run::RunArgs),
    /// Show the phases a workout would go through
    Plan(commands::plan::PlanArgs),
    /// Step a setting the way the +/- buttons do
    Adjust(commands::adjust::AdjustArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, config_path.as_deref()),
        Commands::Plan(args) => commands::plan::run(args, config_path.as_deref()),
        Commands::Adjust(args) => commands::adjust::run(args, config_path.as_deref()),
        Commands::Config { action } => commands::config::run(action, config_path.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
