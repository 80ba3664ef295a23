use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use clap::Args;
use intervalo_core::{
    format_clock, Config, CueBank, CueKind, PhasePalette, Settings, Snapshot, WorkoutEngine,
    WorkoutEvent,
};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::{load_config, CommandResult, SettingsArgs};

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
    /// Poll period in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// Index of the short cue to use
    #[arg(long)]
    pub short_cue: Option<usize>,
    /// Index of the long cue to use
    #[arg(long)]
    pub long_cue: Option<usize>,
    /// Print one JSON line per poll that fired events
    #[arg(long)]
    pub json: bool,
}

/// One line of `--json` output.
#[derive(Serialize)]
struct RunRecord<'a> {
    at: DateTime<Utc>,
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    color: &'a str,
    cues: Vec<&'a str>,
}

/// Turns snapshots into terminal output.
struct Reporter {
    json: bool,
    cues: CueBank,
    palette: PhasePalette,
    last_second: Option<u64>,
}

impl Reporter {
    fn report(&mut self, snap: &Snapshot) -> CommandResult {
        let mut out = std::io::stdout().lock();
        if self.json {
            if snap.has_events() {
                let record = RunRecord {
                    at: Utc::now(),
                    snapshot: snap,
                    color: self.palette.color_for(snap.phase),
                    cues: snap
                        .events
                        .iter()
                        .filter_map(|e| self.cues.for_event(e))
                        .collect(),
                };
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            }
            return Ok(());
        }

        for event in &snap.events {
            match event {
                WorkoutEvent::ShortCue | WorkoutEvent::LongCue => {
                    let name = self.cues.for_event(event).unwrap_or("cue");
                    writeln!(out, "\x07[{name}]")?;
                }
                WorkoutEvent::PhaseChanged { phase } => {
                    writeln!(
                        out,
                        "== {:?} ({}) sets left: {}",
                        phase,
                        self.palette.color_for(*phase),
                        snap.sets_remaining
                    )?;
                }
                WorkoutEvent::WorkoutDone => writeln!(out, "== Done")?,
            }
        }
        let second = snap.seconds_left();
        if !snap.is_done() && !snap.paused && self.last_second != Some(second) {
            writeln!(out, "{:?} {}", snap.phase, snap.clock_text())?;
        }
        self.last_second = Some(second);
        out.flush()?;
        Ok(())
    }
}

pub fn run(args: RunArgs, config_path: Option<&Path>) -> CommandResult {
    let config = load_config(config_path)?;
    let settings = args.settings.apply(config.workout);
    let tick = Duration::from_millis(args.tick_ms.unwrap_or(config.driver.tick_ms).max(1));

    let mut cues = config.cues.clone();
    if let Some(index) = args.short_cue {
        cues.select(CueKind::Short, index)?;
    }
    if let Some(index) = args.long_cue {
        cues.select(CueKind::Long, index)?;
    }

    let reporter = Reporter {
        json: args.json,
        cues,
        palette: config.palette.clone(),
        last_second: None,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(drive(&config, settings, tick, reporter));
    // A pending stdin read would otherwise hold the process open.
    runtime.shutdown_background();
    result
}

async fn drive(
    config: &Config,
    settings: Settings,
    tick: Duration,
    mut reporter: Reporter,
) -> CommandResult {
    let mut engine = WorkoutEngine::new(config.workout);
    engine.start(settings, Instant::now())?;
    let started_at = Utc::now();
    if !reporter.json {
        println!(
            "{} set(s), work {}, rest {}; total {}. Commands: p pause, r resume, q quit",
            settings.sets,
            format_clock(settings.work()),
            format_clock(settings.rest()),
            format_clock(settings.total_duration()),
        );
    }

    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snap = engine.poll(Instant::now());
                reporter.report(&snap)?;
                if snap.is_done() {
                    let took = Utc::now() - started_at;
                    info!(seconds = took.num_seconds(), "workout finished");
                    if !reporter.json {
                        println!("Finished in {}", format_clock(took.to_std().unwrap_or_default()));
                    }
                    return Ok(());
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(command) => {
                        let now = Instant::now();
                        match command.trim() {
                            "p" => { engine.pause(now); }
                            "r" => { engine.resume(now); }
                            "" if engine.is_paused() => { engine.resume(now); }
                            "" => { engine.pause(now); }
                            "q" => {
                                engine.stop();
                                return Ok(());
                            }
                            other => tracing::warn!(command = other, "unknown command"),
                        }
                        if !reporter.json && engine.is_paused() {
                            println!("paused at {}", engine.snapshot(now).clock_text());
                        }
                    }
                    None => stdin_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                engine.stop();
                return Err("interrupted".into());
            }
        }
    }
}
