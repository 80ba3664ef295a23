pub mod adjust;
pub mod config;
pub mod plan;
pub mod run;

use std::path::{Path, PathBuf};

use clap::Args;
use intervalo_core::timer::{MAX_PHASE_SECS, MAX_SETS};
use intervalo_core::{Config, Settings};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// `--config` if given, the default location otherwise.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::default_path()?),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(Config::load_from(&config_path(explicit)?)?)
}

/// Workout settings flags; anything left out comes from the config file.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Number of sets
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_SETS)))]
    pub sets: Option<u32>,
    /// Work phase length in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=MAX_PHASE_SECS))]
    pub work: Option<u64>,
    /// Rest phase length in seconds (0 for no rest)
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=MAX_PHASE_SECS))]
    pub rest: Option<u64>,
    /// Countdown before the first set, in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=MAX_PHASE_SECS))]
    pub get_ready: Option<u64>,
}

impl SettingsArgs {
    pub fn apply(&self, base: Settings) -> Settings {
        Settings {
            get_ready_secs: self.get_ready.unwrap_or(base.get_ready_secs),
            work_secs: self.work.unwrap_or(base.work_secs),
            rest_secs: self.rest.unwrap_or(base.rest_secs),
            sets: self.sets.unwrap_or(base.sets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_only_what_is_given() {
        let args = SettingsArgs {
            sets: Some(4),
            rest: Some(0),
            ..SettingsArgs::default()
        };
        let settings = args.apply(Settings::default());
        assert_eq!(settings.sets, 4);
        assert_eq!(settings.rest_secs, 0);
        assert_eq!(settings.work_secs, Settings::default().work_secs);
        assert_eq!(settings.get_ready_secs, Settings::default().get_ready_secs);
    }

    #[derive(clap::Parser)]
    struct Harness {
        #[command(flatten)]
        settings: SettingsArgs,
    }

    #[test]
    fn phase_flags_stop_at_an_hour() {
        use clap::Parser;

        let ok = Harness::try_parse_from(["t", "--work", "3599", "--rest", "0"]).unwrap();
        assert_eq!(ok.settings.work, Some(MAX_PHASE_SECS));

        for flag in ["--work", "--rest", "--get-ready"] {
            assert!(Harness::try_parse_from(["t", flag, "3600"]).is_err(), "{flag}");
            assert!(
                Harness::try_parse_from(["t", flag, "18446744073709551615"]).is_err(),
                "{flag}"
            );
        }
        assert!(Harness::try_parse_from(["t", "--sets", "100"]).is_err());
        assert!(Harness::try_parse_from(["t", "--sets", "0"]).is_ok());
    }
}
