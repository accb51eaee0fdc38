pub mod autopilot;

use serde::Serialize;

use snakez_core::error::ConfigError;
use snakez_core::game_trait::{FrameSimulation, MatchReport};
use snakez_core::input::FrameInputs;
use snakez_swamp::SwampArena;
use snakez_swamp::config::SwampConfig;
use snakez_swamp::events::SimEvent;

/// Nominal frame duration at 60 Hz.
pub const FRAME: std::time::Duration = std::time::Duration::from_micros(16_667);

/// Headless run parameters.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub frames: u64,
    pub seed: u64,
    pub config: SwampConfig,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 3600,
            seed: 42,
            config: SwampConfig::default(),
        }
    }
}

/// Hook counts observed during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventTally {
    pub waves_started: u32,
    pub multiwaves: u32,
    pub defeats: u32,
    pub deaths: u32,
}

/// What the runner prints when a run finishes.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub seed: u64,
    pub frames: u64,
    pub game_over: bool,
    pub events: EventTally,
    pub report: MatchReport,
}

fn observe(tally: &mut EventTally, event: &SimEvent) {
    match event {
        SimEvent::WaveStarted {
            wave,
            spawned,
            multiwave,
        } => {
            tally.waves_started += 1;
            if *multiwave {
                tally.multiwaves += 1;
            }
            tracing::info!(wave, spawned, multiwave, "Wave started");
        },
        SimEvent::AdversaryDefeated { kind, by_slot } => {
            tally.defeats += 1;
            tracing::debug!(%kind, by_slot, "Adversary defeated");
        },
        SimEvent::CombatantDied { slot } => {
            tally.deaths += 1;
            tracing::info!(slot, "Combatant died");
        },
        SimEvent::GameOver { score, wave } => {
            tracing::info!(score, wave, "Game over");
        },
        SimEvent::ScoreChanged { score } => {
            tracing::trace!(score, "Score changed");
        },
    }
}

/// Run one seeded match under the autopilot until game over or `frames` elapse.
pub fn run(opts: RunOptions) -> Result<RunOutcome, ConfigError> {
    let mut arena = SwampArena::new(opts.config, opts.seed)?;
    let mut tally = EventTally::default();
    let mut frame = 0;

    while frame < opts.frames && !arena.is_match_over() {
        let inputs = FrameInputs::new(
            arena
                .combatants()
                .iter()
                .map(|c| autopilot::steer(frame, c, arena.adversaries()))
                .collect(),
        );
        for event in arena.update(FRAME, &inputs) {
            observe(&mut tally, &event);
        }
        frame += 1;
    }

    Ok(RunOutcome {
        seed: opts.seed,
        frames: frame,
        game_over: arena.is_match_over(),
        events: tally,
        report: arena.report(),
    })
}
