pub mod adversary;
pub mod combatant;
pub mod config;
pub mod events;
pub mod particles;
pub mod physics;
pub mod platform;
pub mod scoring;
pub mod waves;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use snakez_core::error::ConfigError;
use snakez_core::frame_simulation_boilerplate;
use snakez_core::game_trait::{FrameSimulation, MatchReport, SimMetadata};
use snakez_core::input::FrameInputs;
use snakez_core::schedule::{MonotonicClock, ScheduleQueue};

use adversary::Adversary;
use combatant::Combatant;
use config::SwampConfig;
use events::{ScheduledEvent, SimEvent, TickLog};
use particles::{Particle, ParticleSystem};
use physics::World;
use platform::{Platform, generate_platforms};
use scoring::Scoreboard;
use waves::{SpawnedWave, WaveScheduler};

/// Serializable simulation state, read by the render collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwampState {
    pub frame: u64,
    pub combatants: Vec<Combatant>,
    pub adversaries: Vec<Adversary>,
    pub platforms: Vec<Platform>,
    pub particles: ParticleSystem,
    pub waves: WaveScheduler,
    pub scoreboard: Scoreboard,
    pub match_over: bool,
}

/// The swamp arena: owns every entity, the RNG, the clock and pending timers.
pub struct SwampArena {
    config: SwampConfig,
    rng: StdRng,
    state: SwampState,
    clock: MonotonicClock,
    schedule: ScheduleQueue<ScheduledEvent>,
    /// Events raised outside `update` (the opening wave), returned by the next frame.
    pending: Vec<SimEvent>,
    paused: bool,
}

impl SwampArena {
    /// Validate `config` and start a match seeded with `seed`.
    pub fn new(config: SwampConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let particles = ParticleSystem::new(&config.particles);
        let mut arena = Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            state: SwampState {
                frame: 0,
                combatants: Vec::new(),
                adversaries: Vec::new(),
                platforms: Vec::new(),
                particles,
                waves: WaveScheduler::new(),
                scoreboard: Scoreboard::default(),
                match_over: false,
            },
            clock: MonotonicClock::new(),
            schedule: ScheduleQueue::new(),
            pending: Vec::new(),
            paused: false,
        };
        arena.start_match();
        Ok(arena)
    }

    fn start_match(&mut self) {
        let roster = &self.config.roster;
        self.state.combatants = (0..roster.combatants as usize)
            .map(|slot| {
                let x = roster.spawn_x + slot as f32 * roster.spawn_spacing;
                Combatant::spawn(slot, x, roster.spawn_y, &self.config.combatant)
            })
            .collect();
        self.state.platforms =
            generate_platforms(&mut self.rng, &self.config.platforms, &self.config.arena);
        self.state.adversaries.clear();
        self.state.particles.clear();
        self.state.scoreboard.clear();
        self.state.frame = 0;
        self.state.match_over = false;

        let opening = self.state.waves.begin(&mut self.rng, &self.config);
        let started = self.accept_wave(opening);
        self.pending.push(started);
        tracing::info!(
            combatants = self.state.combatants.len(),
            platforms = self.state.platforms.len(),
            "Match started"
        );
    }

    fn accept_wave(&mut self, spawned: SpawnedWave) -> SimEvent {
        let event = SimEvent::WaveStarted {
            wave: spawned.wave,
            spawned: spawned.adversaries.len() as u32,
            multiwave: spawned.multiwave,
        };
        self.state.adversaries.extend(spawned.adversaries);
        event
    }

    pub fn config(&self) -> &SwampConfig {
        &self.config
    }

    /// Current state, for rendering or inspection.
    pub fn snapshot(&self) -> &SwampState {
        &self.state
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.state.combatants
    }

    pub fn adversaries(&self) -> &[Adversary] {
        &self.state.adversaries
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.state.platforms
    }

    pub fn particles(&self) -> &[Particle] {
        self.state.particles.active()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.state.scoreboard
    }

    pub fn wave(&self) -> u32 {
        self.state.waves.wave
    }

    /// Simulated time elapsed since the match started.
    pub fn elapsed(&self) -> Duration {
        self.clock.now()
    }

    /// When the pending wave advance fires, if one is scheduled.
    pub fn next_advance(&self) -> Option<Duration> {
        self.schedule.next_due()
    }

    fn run_scheduled(&mut self, events: &mut Vec<SimEvent>) {
        for scheduled in self.schedule.drain_due(self.clock.now()) {
            match scheduled {
                ScheduledEvent::AdvanceWave => {
                    let spawned = self.state.waves.advance(&mut self.rng, &self.config);
                    let started = self.accept_wave(spawned);
                    events.push(started);
                },
            }
        }
    }

    fn step_entities(&mut self, inputs: &FrameInputs, log: &mut TickLog) {
        let SwampState {
            combatants,
            adversaries,
            platforms,
            scoreboard,
            ..
        } = &mut self.state;
        let world = World {
            platforms: platforms.as_slice(),
            config: &self.config,
        };

        for combatant in combatants.iter_mut() {
            let input = inputs.get(combatant.slot);
            combatant.update(&input, adversaries, &world, scoreboard, log);
        }
        for adversary in adversaries.iter_mut() {
            adversary.update(combatants, &world, &mut self.rng, log);
        }
        adversaries.retain(|a| a.alive);
    }
}

impl FrameSimulation for SwampArena {
    type Event = SimEvent;

    fn metadata(&self) -> SimMetadata {
        SimMetadata {
            name: "Snakez Swamp".to_string(),
            description: "Roll and whip your way through endless waves of frogs".to_string(),
            min_combatants: 1,
            max_combatants: config::MAX_COMBATANTS,
        }
    }

    fn reset(&mut self) {
        self.schedule.clear();
        self.clock = MonotonicClock::new();
        self.pending.clear();
        self.paused = false;
        self.start_match();
    }

    fn update(&mut self, dt: Duration, inputs: &FrameInputs) -> Vec<SimEvent> {
        if self.paused || self.state.match_over {
            return Vec::new();
        }

        self.clock.advance(dt);
        let mut events = std::mem::take(&mut self.pending);
        self.run_scheduled(&mut events);

        self.state.frame += 1;
        let score_before = self.state.scoreboard.score();
        let mut log = TickLog::default();
        self.step_entities(inputs, &mut log);

        let all_dead = self.state.combatants.iter().all(|c| c.dead);
        if all_dead {
            self.state.match_over = true;
            self.schedule.clear();
        }
        if self
            .state
            .waves
            .check_completion(self.state.adversaries.len(), self.state.match_over)
        {
            let delay = Duration::from_millis(self.config.waves.advance_delay_ms);
            self.schedule
                .schedule_after(self.clock.now(), delay, ScheduledEvent::AdvanceWave);
        }

        for platform in &mut self.state.platforms {
            platform.update(&self.config.platforms);
        }

        for effect in log.effects.drain(..) {
            self.state.particles.emit(&mut self.rng, effect);
        }
        self.state.particles.update();

        events.append(&mut log.events);
        let score = self.state.scoreboard.score();
        if score != score_before {
            events.push(SimEvent::ScoreChanged { score });
        }
        if all_dead {
            let wave = self.state.waves.wave;
            tracing::info!(score, wave, "Game over");
            events.push(SimEvent::GameOver { score, wave });
        }
        events
    }

    frame_simulation_boilerplate!(state_type: SwampState);

    fn report(&self) -> MatchReport {
        let wave = self.state.waves.wave;
        MatchReport {
            score: self.state.scoreboard.score(),
            wave,
            waves_completed: wave.saturating_sub(1),
            defeated: self.state.scoreboard.defeated_counts(),
        }
    }
}
