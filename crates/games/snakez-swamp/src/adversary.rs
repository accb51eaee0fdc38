use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::config::AdversaryConfig;
use crate::events::TickLog;
use crate::physics::{Body, World};

/// Frog variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdversaryKind {
    Small,
    Medium,
    PoisonDart,
    Large,
}

impl AdversaryKind {
    /// Weakest to strongest.
    pub const ALL: [AdversaryKind; 4] = [
        AdversaryKind::Small,
        AdversaryKind::Medium,
        AdversaryKind::PoisonDart,
        AdversaryKind::Large,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdversaryKind::Small => "small",
            AdversaryKind::Medium => "medium",
            AdversaryKind::PoisonDart => "poison_dart",
            AdversaryKind::Large => "large",
        }
    }

    /// Built-in stat row for this kind.
    pub fn default_stats(self) -> AdversaryStats {
        let (width, health, jump_power, attack_damage, score, unlock_after_wave, spawn_chance) =
            match self {
                AdversaryKind::Small => (30.0, 20, 8.0, 3, 10, 0, 1.0),
                AdversaryKind::Medium => (40.0, 40, 12.0, 6, 25, 2, 0.3),
                AdversaryKind::PoisonDart => (25.0, 15, 14.0, 10, 35, 3, 0.2),
                AdversaryKind::Large => (60.0, 80, 10.0, 12, 50, 5, 0.1),
            };
        AdversaryStats {
            kind: self,
            width,
            height: width,
            health,
            jump_power,
            attack_damage,
            score,
            unlock_after_wave,
            spawn_chance,
        }
    }
}

impl std::fmt::Display for AdversaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the kind table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdversaryStats {
    pub kind: AdversaryKind,
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub jump_power: f32,
    pub attack_damage: i32,
    /// Points credited on defeat.
    pub score: u64,
    /// Kind may only be rolled once the wave number exceeds this.
    pub unlock_after_wave: u32,
    pub spawn_chance: f64,
}

/// A frog: hops toward the nearest living combatant and bites at close range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adversary {
    pub body: Body,
    pub kind: AdversaryKind,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    /// -1 left, +1 right.
    pub facing: f32,
    pub jump_timer: u32,
    pub jump_cooldown: f32,
    pub attack_timer: u32,
    pub jump_power: f32,
    pub attack_damage: i32,
    pub score_value: u64,
}

fn roll_jump_cooldown(rng: &mut impl Rng, cfg: &AdversaryConfig) -> f32 {
    rng.random::<f32>() * cfg.jump_cooldown_spread + cfg.jump_cooldown_min
}

impl Adversary {
    pub fn spawn(
        stats: &AdversaryStats,
        x: f32,
        y: f32,
        rng: &mut impl Rng,
        cfg: &AdversaryConfig,
    ) -> Self {
        Self {
            body: Body::new(x, y, stats.width, stats.height),
            kind: stats.kind,
            health: stats.health,
            max_health: stats.health,
            alive: true,
            facing: 1.0,
            jump_timer: 0,
            jump_cooldown: roll_jump_cooldown(rng, cfg),
            attack_timer: 0,
            jump_power: stats.jump_power,
            attack_damage: stats.attack_damage,
            score_value: stats.score,
        }
    }

    /// Apply damage. Returns true only for the hit that kills.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= damage;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Index of the nearest living combatant by top-left distance.
    pub fn nearest_target(&self, combatants: &[Combatant]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, c) in combatants.iter().enumerate() {
            if c.dead {
                continue;
            }
            let dist = self.body.distance_to(&c.body);
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        best
    }

    /// One AI tick: physics, timers, hop toward the target, bite when close.
    pub fn update(
        &mut self,
        combatants: &mut [Combatant],
        world: &World<'_>,
        rng: &mut impl Rng,
        log: &mut TickLog,
    ) {
        if !self.alive {
            return;
        }
        world.step(&mut self.body);

        self.jump_timer = self.jump_timer.saturating_add(1);
        self.attack_timer = self.attack_timer.saturating_add(1);

        let cfg = &world.config.adversaries;
        let Some((target, dist)) = self.nearest_target(combatants) else {
            return;
        };

        if self.body.on_ground && self.jump_timer as f32 > self.jump_cooldown {
            let dx = combatants[target].body.x - self.body.x;
            self.facing = if dx > 0.0 { 1.0 } else { -1.0 };
            self.body.vx = self.facing * (rng.random::<f32>() * cfg.hop_speed_spread + cfg.hop_speed_min);
            self.body.vy = -self.jump_power;
            self.jump_timer = 0;
            self.jump_cooldown = roll_jump_cooldown(rng, cfg);
        }

        if self.attack_timer > cfg.attack_interval_ticks && dist < cfg.melee_radius {
            combatants[target].take_damage(self.attack_damage, &world.config.combatant, log);
            self.attack_timer = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwampConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn frog(kind: AdversaryKind, x: f32, y: f32) -> Adversary {
        let cfg = AdversaryConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        Adversary::spawn(&kind.default_stats(), x, y, &mut rng, &cfg)
    }

    fn snake_at(slot: usize, x: f32, y: f32) -> Combatant {
        Combatant::spawn(slot, x, y, &SwampConfig::default().combatant)
    }

    #[test]
    fn stat_table_matches_kinds() {
        let rows: Vec<_> = AdversaryKind::ALL.iter().map(|k| k.default_stats()).collect();
        let health: Vec<_> = rows.iter().map(|r| r.health).collect();
        assert_eq!(health, vec![20, 40, 15, 80]);
        let bites: Vec<_> = rows.iter().map(|r| r.attack_damage).collect();
        assert_eq!(bites, vec![3, 6, 10, 12]);
        let points: Vec<_> = rows.iter().map(|r| r.score).collect();
        assert_eq!(points, vec![10, 25, 35, 50]);
        assert_eq!(rows[2].width, 25.0);
        assert_eq!(rows[3].height, 60.0);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&AdversaryKind::PoisonDart).unwrap();
        assert_eq!(json, "\"poison_dart\"");
        assert_eq!(AdversaryKind::PoisonDart.to_string(), "poison_dart");
    }

    #[test]
    fn spawn_rolls_cooldown_in_range() {
        let cfg = AdversaryConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let a = Adversary::spawn(&AdversaryKind::Small.default_stats(), 0.0, 0.0, &mut rng, &cfg);
            assert!((40.0..100.0).contains(&a.jump_cooldown));
        }
    }

    #[test]
    fn death_is_reported_once() {
        let mut a = frog(AdversaryKind::Small, 0.0, 0.0);
        assert!(!a.take_damage(10));
        assert!(a.take_damage(25));
        assert!(!a.alive);
        assert!(!a.take_damage(25), "a dead frog cannot die again");
    }

    #[test]
    fn targets_nearest_living_combatant() {
        let a = frog(AdversaryKind::Small, 500.0, 300.0);
        let mut snakes = vec![snake_at(0, 100.0, 300.0), snake_at(1, 600.0, 300.0)];
        assert_eq!(a.nearest_target(&snakes).map(|(i, _)| i), Some(1));
        snakes[1].dead = true;
        assert_eq!(a.nearest_target(&snakes).map(|(i, _)| i), Some(0));
        snakes[0].dead = true;
        assert!(a.nearest_target(&snakes).is_none());
    }

    #[test]
    fn grounded_frog_hops_toward_target() {
        let cfg = SwampConfig::default();
        let world = World {
            platforms: &[],
            config: &cfg,
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut log = TickLog::default();
        // Gravity pushes it past the water floor, which grounds it.
        let mut a = frog(AdversaryKind::Medium, 600.0, cfg.arena.floor_y() - 40.0);
        a.jump_timer = 200;
        let mut snakes = vec![snake_at(0, 100.0, 100.0)];
        a.update(&mut snakes, &world, &mut rng, &mut log);
        assert_eq!(a.facing, -1.0);
        assert!(a.body.vx <= -2.0 && a.body.vx >= -5.0);
        assert_eq!(a.body.vy, -12.0);
        assert_eq!(a.jump_timer, 0);
        assert!((40.0..100.0).contains(&a.jump_cooldown));
    }

    #[test]
    fn frog_with_no_target_idles() {
        let cfg = SwampConfig::default();
        let world = World {
            platforms: &[],
            config: &cfg,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut log = TickLog::default();
        let mut a = frog(AdversaryKind::Small, 600.0, cfg.arena.floor_y() - 30.0);
        a.jump_timer = 500;
        let mut snakes = vec![snake_at(0, 600.0, 300.0)];
        snakes[0].dead = true;
        a.update(&mut snakes, &world, &mut rng, &mut log);
        assert!(a.body.on_ground);
        assert_eq!(a.body.vy, 0.0);
        assert_eq!(a.jump_timer, 501);
    }

    #[test]
    fn idle_timers_saturate() {
        let cfg = SwampConfig::default();
        let world = World {
            platforms: &[],
            config: &cfg,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut log = TickLog::default();
        let mut a = frog(AdversaryKind::Small, 600.0, cfg.arena.floor_y() - 30.0);
        a.jump_timer = u32::MAX;
        a.attack_timer = u32::MAX;
        let mut snakes: Vec<Combatant> = Vec::new();
        a.update(&mut snakes, &world, &mut rng, &mut log);
        assert_eq!(a.jump_timer, u32::MAX);
        assert_eq!(a.attack_timer, u32::MAX);
    }

    #[test]
    fn bite_needs_interval_and_range() {
        let cfg = SwampConfig::default();
        let world = World {
            platforms: &[],
            config: &cfg,
        };
        let mut rng = StdRng::seed_from_u64(4);
        let mut log = TickLog::default();
        let floor = cfg.arena.floor_y();
        let mut a = frog(AdversaryKind::Large, 600.0, floor - 60.0);
        a.jump_cooldown = 10_000.0;
        let mut snakes = vec![snake_at(0, 600.0, floor - 60.0)];

        a.attack_timer = 89;
        a.update(&mut snakes, &world, &mut rng, &mut log);
        // Timer is now 90: not strictly greater yet.
        assert_eq!(snakes[0].health, 100);

        a.update(&mut snakes, &world, &mut rng, &mut log);
        assert_eq!(snakes[0].health, 88);
        assert_eq!(a.attack_timer, 0);
    }

    #[test]
    fn distant_frog_does_not_bite() {
        let cfg = SwampConfig::default();
        let world = World {
            platforms: &[],
            config: &cfg,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut log = TickLog::default();
        let floor = cfg.arena.floor_y();
        let mut a = frog(AdversaryKind::Small, 600.0, floor - 30.0);
        a.jump_cooldown = 10_000.0;
        a.attack_timer = 500;
        let mut snakes = vec![snake_at(0, 200.0, floor - 40.0)];
        a.update(&mut snakes, &world, &mut rng, &mut log);
        assert_eq!(snakes[0].health, 100);
        assert_eq!(a.attack_timer, 501);
    }

    #[test]
    fn dead_frog_does_not_update() {
        let cfg = SwampConfig::default();
        let world = World {
            platforms: &[],
            config: &cfg,
        };
        let mut rng = StdRng::seed_from_u64(6);
        let mut log = TickLog::default();
        let mut a = frog(AdversaryKind::Small, 600.0, 100.0);
        a.alive = false;
        let before = a.clone();
        a.update(&mut [], &world, &mut rng, &mut log);
        assert_eq!(a, before);
    }
}
