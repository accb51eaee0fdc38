use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::adversary::{Adversary, AdversaryKind, AdversaryStats};
use crate::config::{MultiwaveConfig, SwampConfig, WaveConfig};

/// Spawn count for `wave`: table entry, else linear fallback, always clamped.
pub fn spawn_count(cfg: &WaveConfig, wave: u32) -> u32 {
    let listed = wave
        .checked_sub(1)
        .and_then(|i| cfg.counts.get(i as usize))
        .copied();
    let count = listed.unwrap_or_else(|| {
        cfg.fallback_base
            .saturating_add(cfg.fallback_increment.saturating_mul(wave))
    });
    count.min(cfg.max_per_wave)
}

/// Pick a kind for one spawn in `wave`.
///
/// Starts from the first table row. Each later row that is unlocked and passes
/// its own roll replaces the pick, so the last passing row wins.
pub fn roll_kind(rng: &mut impl Rng, kinds: &[AdversaryStats], wave: u32) -> AdversaryKind {
    let Some((first, rest)) = kinds.split_first() else {
        return AdversaryKind::Small;
    };
    let mut pick = first.kind;
    for row in rest {
        if wave > row.unlock_after_wave && rng.random::<f64>() < row.spawn_chance {
            pick = row.kind;
        }
    }
    pick
}

/// A batch of freshly spawned adversaries.
#[derive(Debug, Clone)]
pub struct SpawnedWave {
    pub wave: u32,
    pub adversaries: Vec<Adversary>,
    pub multiwave: bool,
}

/// Wave progression state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveScheduler {
    pub wave: u32,
    /// An advance is pending. Blocks further completion checks.
    pub transitioning: bool,
    pub multiwave_triggered: bool,
    pub in_multiwave: bool,
}

impl Default for WaveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveScheduler {
    pub fn new() -> Self {
        Self {
            wave: 1,
            transitioning: false,
            multiwave_triggered: false,
            in_multiwave: false,
        }
    }

    /// Spawn the opening batch. A burst starting at wave 1 replaces it.
    pub fn begin(&mut self, rng: &mut impl Rng, cfg: &SwampConfig) -> SpawnedWave {
        *self = Self::new();
        match cfg.waves.multiwave {
            Some(mw) if mw.start_wave == 1 => self.burst(rng, cfg, mw),
            _ => self.single(rng, cfg),
        }
    }

    /// Returns true exactly once per cleared batch: the caller schedules the advance.
    pub fn check_completion(&mut self, active: usize, match_over: bool) -> bool {
        if active > 0 || self.transitioning || match_over {
            return false;
        }
        self.transitioning = true;
        tracing::debug!(wave = self.wave, "Wave cleared, advance pending");
        true
    }

    /// Fire a pending advance and spawn the next batch.
    pub fn advance(&mut self, rng: &mut impl Rng, cfg: &SwampConfig) -> SpawnedWave {
        let spawned = if self.in_multiwave {
            self.in_multiwave = false;
            match cfg.waves.multiwave {
                Some(mw) => self.wave = mw.start_wave.saturating_add(mw.span),
                None => self.wave = self.wave.saturating_add(1),
            }
            tracing::debug!(wave = self.wave, "Multiwave cleared, resuming single waves");
            self.single(rng, cfg)
        } else {
            let upcoming = self.wave.saturating_add(1);
            match cfg.waves.multiwave {
                Some(mw) if !self.multiwave_triggered && upcoming == mw.start_wave => {
                    self.burst(rng, cfg, mw)
                },
                _ => {
                    self.wave = upcoming;
                    self.single(rng, cfg)
                },
            }
        };
        self.transitioning = false;
        spawned
    }

    fn single(&mut self, rng: &mut impl Rng, cfg: &SwampConfig) -> SpawnedWave {
        let count = spawn_count(&cfg.waves, self.wave);
        let adversaries = spawn_batch(rng, cfg, self.wave, count);
        tracing::info!(wave = self.wave, count, "Wave started");
        SpawnedWave {
            wave: self.wave,
            adversaries,
            multiwave: false,
        }
    }

    fn burst(&mut self, rng: &mut impl Rng, cfg: &SwampConfig, mw: MultiwaveConfig) -> SpawnedWave {
        self.wave = mw.start_wave;
        self.in_multiwave = true;
        self.multiwave_triggered = true;
        let mut adversaries = Vec::new();
        for wave in mw.start_wave..mw.start_wave.saturating_add(mw.span) {
            let count = spawn_count(&cfg.waves, wave);
            adversaries.extend(spawn_batch(rng, cfg, wave, count));
        }
        tracing::info!(
            wave = self.wave,
            span = mw.span,
            count = adversaries.len(),
            "Multiwave started"
        );
        SpawnedWave {
            wave: self.wave,
            adversaries,
            multiwave: true,
        }
    }
}

/// Spawn `count` adversaries for `wave` at random x along the spawn line.
pub fn spawn_batch(rng: &mut impl Rng, cfg: &SwampConfig, wave: u32, count: u32) -> Vec<Adversary> {
    let adv = &cfg.adversaries;
    let span = cfg.arena.width - 2.0 * adv.spawn_margin;
    let mut batch = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let x = rng.random::<f32>() * span + adv.spawn_margin;
        let kind = roll_kind(rng, &adv.kinds, wave);
        if let Some(stats) = adv.stats(kind) {
            batch.push(Adversary::spawn(stats, x, adv.spawn_y, rng, adv));
        }
    }
    batch
}
