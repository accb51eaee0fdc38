use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ParticleConfig;

/// Color tag the render collaborator maps to a palette entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    #[default]
    Splash,
    Spark,
    Swamp,
    Blood,
}

/// A short-lived visual particle. Never affects gameplay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: ParticleColor,
    /// Ticks left.
    pub life: i32,
    pub max_life: i32,
}

impl Particle {
    fn reset(&mut self, params: &ParticleParams) {
        self.x = params.x;
        self.y = params.y;
        self.vx = params.vx;
        self.vy = params.vy;
        self.color = params.color;
        self.life = params.life;
        self.max_life = params.life;
    }

    pub fn update(&mut self, gravity: f32) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += gravity;
        self.life -= 1;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0
    }

    /// Remaining life fraction, for fading.
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0 {
            0.0
        } else {
            (self.life as f32 / self.max_life as f32).clamp(0.0, 1.0)
        }
    }
}

/// Spawn parameters for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleParams {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: ParticleColor,
    pub life: i32,
}

/// Bounded free list of released particles.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    free: Vec<Particle>,
    capacity: usize,
    allocated: usize,
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
            allocated: 0,
        }
    }

    /// Reuse a pooled particle if one is free, otherwise allocate.
    pub fn acquire(&mut self, params: &ParticleParams) -> Particle {
        let mut particle = match self.free.pop() {
            Some(p) => p,
            None => {
                self.allocated += 1;
                Particle::default()
            },
        };
        particle.reset(params);
        particle
    }

    /// Return a particle for reuse. Discarded when the pool is full.
    pub fn release(&mut self, particle: Particle) -> bool {
        if self.free.len() < self.capacity {
            self.free.push(particle);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Particles allocated fresh over the pool's lifetime.
    pub fn allocated(&self) -> usize {
        self.allocated
    }
}

/// Visual effect requested by gameplay code, emitted after the entity loops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Combatant jumped out of the water.
    Splash { x: f32, y: f32 },
    /// A combatant attack landed.
    Hit { x: f32, y: f32 },
    AdversaryDeath { x: f32, y: f32 },
    CombatantDeath { x: f32, y: f32 },
}

/// Active particles plus their pool, capped globally across all effects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    active: Vec<Particle>,
    #[serde(skip)]
    pool: ParticlePool,
    max_active: usize,
    gravity: f32,
}

impl ParticleSystem {
    pub fn new(cfg: &ParticleConfig) -> Self {
        Self {
            active: Vec::new(),
            pool: ParticlePool::with_capacity(cfg.pool_size),
            max_active: cfg.max_active,
            gravity: cfg.gravity,
        }
    }

    pub fn active(&self) -> &[Particle] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// How many of `desired` particles may still be created right now.
    pub fn budget(&self, desired: usize) -> usize {
        desired.min(self.max_active.saturating_sub(self.active.len()))
    }

    fn spawn(&mut self, params: ParticleParams) {
        let particle = self.pool.acquire(&params);
        self.active.push(particle);
    }

    /// Emit the particles for one effect. Returns how many were created.
    pub fn emit(&mut self, rng: &mut impl Rng, effect: Effect) -> usize {
        match effect {
            Effect::Splash { x, y } => self.ring(rng, x, y, 8, 2.0..5.0, -2.0, ParticleColor::Splash, 30),
            Effect::Hit { x, y } => self.ring(rng, x, y, 12, 3.0..7.0, 0.0, ParticleColor::Spark, 20),
            Effect::AdversaryDeath { x, y } => {
                let allowed = self.budget(20);
                for _ in 0..allowed {
                    let angle = rng.random::<f32>() * TAU;
                    let speed = rng.random_range(2.0..7.0f32);
                    self.spawn(ParticleParams {
                        x,
                        y,
                        vx: angle.cos() * speed,
                        vy: angle.sin() * speed,
                        color: ParticleColor::Swamp,
                        life: 40,
                    });
                }
                allowed
            },
            Effect::CombatantDeath { x, y } => {
                let allowed = self.budget(30);
                for i in 0..allowed {
                    let angle = rng.random::<f32>() * TAU;
                    let speed = rng.random_range(3.0..11.0f32);
                    let color = if i % 2 == 0 {
                        ParticleColor::Blood
                    } else {
                        ParticleColor::Spark
                    };
                    self.spawn(ParticleParams {
                        x,
                        y,
                        vx: angle.cos() * speed,
                        vy: angle.sin() * speed,
                        color,
                        life: 60,
                    });
                }
                allowed
            },
        }
    }

    /// Evenly spaced burst; spacing is by the requested count even when capped.
    #[allow(clippy::too_many_arguments)]
    fn ring(
        &mut self,
        rng: &mut impl Rng,
        x: f32,
        y: f32,
        desired: usize,
        speed: std::ops::Range<f32>,
        lift: f32,
        color: ParticleColor,
        life: i32,
    ) -> usize {
        let allowed = self.budget(desired);
        for i in 0..allowed {
            let angle = TAU * i as f32 / desired as f32;
            let s = rng.random_range(speed.clone());
            self.spawn(ParticleParams {
                x,
                y,
                vx: angle.cos() * s,
                vy: angle.sin() * s + lift,
                color,
                life,
            });
        }
        allowed
    }

    /// Step every particle, then compact expired ones back into the pool.
    pub fn update(&mut self) {
        for particle in &mut self.active {
            particle.update(self.gravity);
        }
        let pool = &mut self.pool;
        self.active.retain_mut(|p| {
            if p.is_expired() {
                pool.release(std::mem::take(p));
                false
            } else {
                true
            }
        });
    }

    /// Drop every active particle, keeping what fits in the pool.
    pub fn clear(&mut self) {
        for particle in self.active.drain(..) {
            self.pool.release(particle);
        }
    }
}
