use std::path::Path;

use clap::Subcommand;
use intervalo_core::Config;

use super::{config_path, load_config, CommandResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "workout.work_secs", "cues.short")
        key: String,
    },
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(action: ConfigAction, explicit: Option<&Path>) -> CommandResult {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(explicit)?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::Show => {
            let config = load_config(explicit)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", config_path(explicit)?.display());
        }
        ConfigAction::Init { force } => {
            let path = config_path(explicit)?;
            if path.exists() && !force {
                return Err(format!("{} already exists (use --force)", path.display()).into());
            }
            Config::default().save_to(&path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
