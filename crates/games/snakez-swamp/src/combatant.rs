use serde::{Deserialize, Serialize};

use snakez_core::input::CombatantInput;

use crate::adversary::Adversary;
use crate::config::CombatantConfig;
use crate::events::{SimEvent, TickLog};
use crate::particles::Effect;
use crate::physics::{Body, World};
use crate::scoring::{Scoreboard, hit_points};

/// Combatant action state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantState {
    #[default]
    Idle,
    /// Invulnerable dash that damages everything it touches, every tick.
    Rolling,
    /// Tongue whip: one burst of damage on activation, then a recovery window.
    Whipping,
}

/// A player-controlled snake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub slot: usize,
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub state: CombatantState,
    /// -1 left, +1 right.
    pub facing: f32,
    pub combo: u32,
    pub combo_timer: u32,
    pub roll_timer: u32,
    pub roll_cooldown: u32,
    pub whip_timer: u32,
    pub whip_cooldown: u32,
    pub invulnerable: u32,
    pub dead: bool,
}

fn tick_down(timer: &mut u32) {
    *timer = timer.saturating_sub(1);
}

impl Combatant {
    pub fn spawn(slot: usize, x: f32, y: f32, cfg: &CombatantConfig) -> Self {
        Self {
            slot,
            body: Body::new(x, y, cfg.width, cfg.height),
            health: cfg.max_health,
            max_health: cfg.max_health,
            state: CombatantState::Idle,
            facing: 1.0,
            combo: 0,
            combo_timer: 0,
            roll_timer: 0,
            roll_cooldown: 0,
            whip_timer: 0,
            whip_cooldown: 0,
            invulnerable: 0,
            dead: false,
        }
    }

    /// Apply incoming damage. Returns true if this call killed the combatant.
    pub fn take_damage(&mut self, damage: i32, cfg: &CombatantConfig, log: &mut TickLog) -> bool {
        if self.dead || self.invulnerable > 0 {
            return false;
        }
        self.health -= damage;
        self.invulnerable = cfg.hit_invulnerability_ticks;
        if self.health <= 0 {
            self.health = 0;
            self.dead = true;
            let (x, y) = self.body.center();
            log.effect(Effect::CombatantDeath { x, y });
            log.event(SimEvent::CombatantDied { slot: self.slot });
            tracing::info!(slot = self.slot, "Combatant died");
            return true;
        }
        false
    }

    /// One tick: physics, timers, state handler, then attack activation.
    pub fn update(
        &mut self,
        input: &CombatantInput,
        adversaries: &mut [Adversary],
        world: &World<'_>,
        score: &mut Scoreboard,
        log: &mut TickLog,
    ) {
        if self.dead {
            return;
        }
        let cfg = &world.config.combatant;

        world.step(&mut self.body);

        tick_down(&mut self.roll_timer);
        tick_down(&mut self.roll_cooldown);
        tick_down(&mut self.whip_timer);
        tick_down(&mut self.whip_cooldown);
        tick_down(&mut self.invulnerable);
        if self.combo_timer > 0 {
            self.combo_timer -= 1;
        } else {
            self.combo = 0;
        }

        match self.state {
            CombatantState::Rolling => self.handle_roll(adversaries, cfg, score, log),
            CombatantState::Whipping => self.handle_whip(cfg),
            CombatantState::Idle => self.handle_idle(input, world, log),
        }

        if self.state == CombatantState::Idle {
            if input.roll && self.roll_cooldown == 0 {
                self.start_roll(cfg);
            } else if input.whip && self.whip_cooldown == 0 {
                self.start_whip(adversaries, cfg, score, log);
            }
        }
    }

    fn handle_idle(&mut self, input: &CombatantInput, world: &World<'_>, log: &mut TickLog) {
        let cfg = &world.config.combatant;
        let body = &mut self.body;

        if input.x != 0.0 {
            let speed = if body.in_water {
                cfg.speed * cfg.water_speed_factor
            } else {
                cfg.speed
            };
            body.vx = input.x * speed;
            self.facing = if input.x > 0.0 { 1.0 } else { -1.0 };
        }

        if input.wants_up() && body.on_ground {
            body.vy = if body.in_water { -cfg.water_jump } else { -cfg.jump };
            body.on_ground = false;
            if body.in_water {
                log.effect(Effect::Splash {
                    x: body.x + body.width / 2.0,
                    y: body.bottom(),
                });
            }
        }

        if input.wants_down() {
            body.try_drop_through(world.platforms, &world.config.physics);
        }

        if body.in_water && !body.on_ground {
            body.vy = body.vy.min(world.config.physics.sink_speed);
        }
    }

    fn handle_roll(
        &mut self,
        adversaries: &mut [Adversary],
        cfg: &CombatantConfig,
        score: &mut Scoreboard,
        log: &mut TickLog,
    ) {
        if self.roll_timer == 0 {
            self.state = CombatantState::Idle;
            self.body.resize(cfg.width, cfg.height);
            self.roll_cooldown = cfg.roll.cooldown_ticks;
            return;
        }
        for target in adversaries.iter_mut() {
            if target.alive && self.body.overlaps(&target.body) {
                self.hit(target, cfg.roll.damage, cfg, score, log);
            }
        }
        self.body.resize(cfg.roll.width, cfg.roll.height);
    }

    fn handle_whip(&mut self, cfg: &CombatantConfig) {
        if self.whip_timer == 0 {
            self.state = CombatantState::Idle;
            self.body.resize(cfg.width, cfg.height);
            return;
        }
        self.body.resize(cfg.whip.width, cfg.whip.height);
    }

    fn start_roll(&mut self, cfg: &CombatantConfig) {
        self.state = CombatantState::Rolling;
        self.roll_timer = cfg.roll.duration_ticks;
        self.body.vx = self.facing * cfg.roll.speed;
        self.invulnerable = cfg.roll.invulnerability_ticks;
        tracing::trace!(slot = self.slot, "Roll started");
    }

    fn start_whip(
        &mut self,
        adversaries: &mut [Adversary],
        cfg: &CombatantConfig,
        score: &mut Scoreboard,
        log: &mut TickLog,
    ) {
        self.state = CombatantState::Whipping;
        self.whip_timer = cfg.whip.duration_ticks;
        self.whip_cooldown = cfg.whip.cooldown_ticks;
        for target in adversaries.iter_mut() {
            if target.alive && self.in_whip_range(&target.body, cfg) {
                self.hit(target, cfg.whip.damage, cfg, score, log);
            }
        }
    }

    /// Within whip range and strictly on the facing side.
    pub fn in_whip_range(&self, target: &Body, cfg: &CombatantConfig) -> bool {
        let dx = target.x - self.body.x;
        let facing_target = (dx > 0.0 && self.facing > 0.0) || (dx < 0.0 && self.facing < 0.0);
        facing_target && self.body.distance_to(target) < cfg.whip.range
    }

    fn hit(
        &mut self,
        target: &mut Adversary,
        damage: i32,
        cfg: &CombatantConfig,
        score: &mut Scoreboard,
        log: &mut TickLog,
    ) {
        let killed = target.take_damage(damage);
        target.body.vx = self.facing * cfg.knockback_x;
        target.body.vy = -cfg.knockback_y;

        self.combo += 1;
        self.combo_timer = cfg.combo_timeout_ticks();
        score.add(hit_points(damage, self.combo));

        let (x, y) = target.body.center();
        log.effect(Effect::Hit { x, y });

        if killed {
            score.record_defeat(target.kind, target.score_value);
            log.effect(Effect::AdversaryDeath { x, y });
            log.event(SimEvent::AdversaryDefeated {
                kind: target.kind,
                by_slot: self.slot,
            });
            tracing::debug!(slot = self.slot, kind = %target.kind, "Adversary defeated");
        }
    }
}
