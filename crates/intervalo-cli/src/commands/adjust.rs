use std::path::Path;

use clap::{Args, ValueEnum};
use intervalo_core::{SettingField, WorkoutEngine};

use super::{load_config, CommandResult};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Field {
    Work,
    Rest,
    Sets,
}

impl From<Field> for SettingField {
    fn from(field: Field) -> Self {
        match field {
            Field::Work => SettingField::Work,
            Field::Rest => SettingField::Rest,
            Field::Sets => SettingField::Sets,
        }
    }
}

#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// Setting to step
    #[arg(long, value_enum)]
    pub field: Field,
    /// Step to apply (negative to decrease)
    #[arg(long, allow_negative_numbers = true)]
    pub delta: i64,
    /// Starting value (defaults to the configured one)
    #[arg(long)]
    pub from: Option<u64>,
}

pub fn run(args: AdjustArgs, config_path: Option<&Path>) -> CommandResult {
    let mut draft = load_config(config_path)?.workout;
    let field = SettingField::from(args.field);
    if let Some(from) = args.from {
        match field {
            SettingField::Work => draft.work_secs = from,
            SettingField::Rest => draft.rest_secs = from,
            SettingField::Sets => draft.sets = u32::try_from(from).unwrap_or(u32::MAX),
        }
    }

    let mut engine = WorkoutEngine::new(draft);
    let value = engine.adjust_setting(field, args.delta);
    println!("{value}");
    Ok(())
}
