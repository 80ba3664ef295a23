use std::path::Path;

use clap::Args;
use intervalo_core::{format_clock, Phase};
use serde::Serialize;

use super::{load_config, CommandResult, SettingsArgs};

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PlannedPhase {
    phase: Phase,
    duration_secs: u64,
}

#[derive(Serialize)]
struct Plan {
    phases: Vec<PlannedPhase>,
    total_secs: u64,
}

pub fn run(args: PlanArgs, config_path: Option<&Path>) -> CommandResult {
    let config = load_config(config_path)?;
    let settings = args.settings.apply(config.workout);
    settings.validate()?;

    let phases = settings.phase_plan();
    if args.json {
        let plan = Plan {
            phases: phases
                .iter()
                .map(|(phase, d)| PlannedPhase {
                    phase: *phase,
                    duration_secs: d.as_secs(),
                })
                .collect(),
            total_secs: settings.total_duration().as_secs(),
        };
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for (i, (phase, d)) in phases.iter().enumerate() {
        println!(
            "{:>3}. {:<9} {:>6}  {}",
            i + 1,
            format!("{phase:?}"),
            format_clock(*d),
            config.palette.color_for(*phase)
        );
    }
    println!("total {}", format_clock(settings.total_duration()));
    Ok(())
}
