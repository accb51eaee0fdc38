use serde::{Deserialize, Serialize};

use snakez_core::error::{ConfigError, ensure};

use crate::adversary::{AdversaryKind, AdversaryStats};

/// Play-field geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Y of the water surface. Bodies whose bottom is below it are submerged.
    pub water_level: f32,
    /// Depth below the surface of the hard water floor.
    pub floor_depth: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            water_level: 450.0,
            floor_depth: 50.0,
        }
    }
}

impl ArenaConfig {
    /// Y of the hard water floor.
    pub fn floor_y(&self) -> f32 {
        self.water_level + self.floor_depth
    }
}

/// Integration constants, all per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub air_friction: f32,
    pub water_friction: f32,
    /// Maximum descent speed of a submerged, airborne combatant.
    pub sink_speed: f32,
    /// Snap band above a platform top.
    pub snap_above: f32,
    /// Snap band below a platform top.
    pub snap_below: f32,
    /// Max distance between feet and platform top to start a drop-through.
    pub drop_band: f32,
    /// Drop-through stays set while feet are above `platform.y + drop_release_band`.
    pub drop_release_band: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            air_friction: 0.85,
            water_friction: 0.5,
            sink_speed: 2.0,
            snap_above: 5.0,
            snap_below: 15.0,
            drop_band: 5.0,
            drop_release_band: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    pub duration_ticks: u32,
    /// Starts when the roll ends.
    pub cooldown_ticks: u32,
    pub speed: f32,
    pub invulnerability_ticks: u32,
    pub damage: i32,
    pub width: f32,
    pub height: f32,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            duration_ticks: 30,
            cooldown_ticks: 15,
            speed: 15.0,
            invulnerability_ticks: 30,
            damage: 25,
            width: 40.0,
            height: 40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WhipConfig {
    pub duration_ticks: u32,
    /// Starts when the whip is activated.
    pub cooldown_ticks: u32,
    pub damage: i32,
    pub range: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for WhipConfig {
    fn default() -> Self {
        Self {
            duration_ticks: 20,
            cooldown_ticks: 60,
            damage: 30,
            range: 100.0,
            width: 70.0,
            height: 35.0,
        }
    }
}

/// Player snake tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantConfig {
    pub width: f32,
    pub height: f32,
    pub max_health: i32,
    pub speed: f32,
    /// Speed multiplier while submerged.
    pub water_speed_factor: f32,
    pub jump: f32,
    pub water_jump: f32,
    pub combo_timeout_ms: f32,
    /// Frame length the tick counters were tuned for.
    pub frame_ms: f32,
    pub hit_invulnerability_ticks: u32,
    pub knockback_x: f32,
    pub knockback_y: f32,
    pub roll: RollConfig,
    pub whip: WhipConfig,
}

impl Default for CombatantConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 40.0,
            max_health: 100,
            speed: 5.0,
            water_speed_factor: 0.5,
            jump: 12.0,
            water_jump: 6.0,
            combo_timeout_ms: 2000.0,
            frame_ms: 16.67,
            hit_invulnerability_ticks: 60,
            knockback_x: 12.0,
            knockback_y: 8.0,
            roll: RollConfig::default(),
            whip: WhipConfig::default(),
        }
    }
}

impl CombatantConfig {
    /// Combo timeout converted to ticks, rounded up.
    pub fn combo_timeout_ticks(&self) -> u32 {
        (self.combo_timeout_ms / self.frame_ms).ceil() as u32
    }
}

/// Frog AI tuning and the per-kind stat table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdversaryConfig {
    /// Ordered weakest to strongest. The first row is the default spawn kind.
    pub kinds: Vec<AdversaryStats>,
    pub melee_radius: f32,
    /// Attack timer must exceed this before a frog can bite again.
    pub attack_interval_ticks: u32,
    pub jump_cooldown_min: f32,
    pub jump_cooldown_spread: f32,
    pub hop_speed_min: f32,
    pub hop_speed_spread: f32,
    pub spawn_y: f32,
    pub spawn_margin: f32,
}

impl Default for AdversaryConfig {
    fn default() -> Self {
        Self {
            kinds: AdversaryKind::ALL.iter().map(|k| k.default_stats()).collect(),
            melee_radius: 35.0,
            attack_interval_ticks: 90,
            jump_cooldown_min: 40.0,
            jump_cooldown_spread: 60.0,
            hop_speed_min: 2.0,
            hop_speed_spread: 3.0,
            spawn_y: 100.0,
            spawn_margin: 50.0,
        }
    }
}

impl AdversaryConfig {
    pub fn stats(&self, kind: AdversaryKind) -> Option<&AdversaryStats> {
        self.kinds.iter().find(|s| s.kind == kind)
    }
}

/// Most waves a single burst may fold together.
pub const MAX_MULTIWAVE_SPAN: u32 = 10;

/// Burst mode: several waves released as one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiwaveConfig {
    /// First wave folded into the burst.
    pub start_wave: u32,
    /// Number of waves released at once.
    pub span: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Spawn counts for waves 1..=counts.len().
    pub counts: Vec<u32>,
    pub fallback_base: u32,
    pub fallback_increment: u32,
    pub max_per_wave: u32,
    /// Wall-clock pause between a clear and the next batch.
    pub advance_delay_ms: u64,
    pub multiwave: Option<MultiwaveConfig>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            counts: vec![5, 100, 150, 200, 250, 300, 400, 500, 750, 1000],
            fallback_base: 1000,
            fallback_increment: 250,
            max_per_wave: 2000,
            advance_delay_ms: 2000,
            multiwave: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Most released particles kept for reuse.
    pub pool_size: usize,
    /// Most particles alive at once across all effects.
    pub max_active: usize,
    pub gravity: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            pool_size: 500,
            max_active: 2000,
            gravity: 0.3,
        }
    }
}

/// Lily pad layout and bobbing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub count: u32,
    pub first_x: f32,
    pub spacing: f32,
    pub x_jitter: f32,
    /// Pads sit this far above the water surface before jitter.
    pub rise: f32,
    pub y_jitter: f32,
    pub min_width: f32,
    pub width_jitter: f32,
    pub height: f32,
    pub bob_speed: f32,
    pub bob_amplitude: f32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            count: 8,
            first_x: 100.0,
            spacing: 140.0,
            x_jitter: 40.0,
            rise: 20.0,
            y_jitter: 30.0,
            min_width: 80.0,
            width_jitter: 30.0,
            height: 25.0,
            bob_speed: 0.02,
            bob_amplitude: 0.15,
        }
    }
}

/// Largest supported roster: single player or co-op.
pub const MAX_COMBATANTS: u8 = 2;

/// Match roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// 1 for single player, 2 for co-op.
    pub combatants: u8,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub spawn_spacing: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            combatants: 2,
            spawn_x: 100.0,
            spawn_y: 300.0,
            spawn_spacing: 100.0,
        }
    }
}

/// Top-level swamp configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwampConfig {
    pub arena: ArenaConfig,
    pub physics: PhysicsConfig,
    pub combatant: CombatantConfig,
    pub adversaries: AdversaryConfig,
    pub waves: WaveConfig,
    pub particles: ParticleConfig,
    pub platforms: PlatformConfig,
    #[serde(rename = "match")]
    pub roster: MatchConfig,
}

impl SwampConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("SNAKEZ_SWAMP_CONFIG")
            .unwrap_or_else(|_| "config/swamp.toml".to_string());
        match Self::from_path(&path) {
            Ok(cfg) => cfg,
            Err(ConfigError::Io { .. }) => SwampConfig::default(),
            Err(e) => {
                tracing::warn!("Failed to load {path}: {e}, using defaults");
                SwampConfig::default()
            },
        }
    }

    /// Read and validate a TOML config file.
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: SwampConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.arena;
        ensure(a.width > 0.0, "arena.width", "must be positive")?;
        ensure(a.floor_depth >= 0.0, "arena.floor_depth", "must not be negative")?;

        let p = &self.physics;
        ensure(p.gravity > 0.0, "physics.gravity", "must be positive")?;
        ensure(
            p.air_friction > 0.0 && p.air_friction <= 1.0,
            "physics.air_friction",
            "must be in (0, 1]",
        )?;
        ensure(
            p.water_friction > 0.0 && p.water_friction <= 1.0,
            "physics.water_friction",
            "must be in (0, 1]",
        )?;
        ensure(
            p.drop_release_band >= p.drop_band,
            "physics.drop_release_band",
            "must be at least physics.drop_band",
        )?;

        let c = &self.combatant;
        ensure(c.max_health > 0, "combatant.max_health", "must be positive")?;
        ensure(c.frame_ms > 0.0, "combatant.frame_ms", "must be positive")?;
        ensure(
            c.combo_timeout_ms > 0.0,
            "combatant.combo_timeout_ms",
            "must be positive",
        )?;
        ensure(
            c.roll.duration_ticks > 0,
            "combatant.roll.duration_ticks",
            "must be positive",
        )?;
        ensure(
            c.roll.cooldown_ticks > 0,
            "combatant.roll.cooldown_ticks",
            "must be positive",
        )?;
        ensure(
            c.whip.duration_ticks > 0,
            "combatant.whip.duration_ticks",
            "must be positive",
        )?;
        ensure(
            c.whip.cooldown_ticks > 0,
            "combatant.whip.cooldown_ticks",
            "must be positive",
        )?;

        let adv = &self.adversaries;
        ensure(!adv.kinds.is_empty(), "adversaries.kinds", "must not be empty")?;
        for (i, row) in adv.kinds.iter().enumerate() {
            ensure(
                !adv.kinds[..i].iter().any(|r| r.kind == row.kind),
                "adversaries.kinds",
                "each kind may appear only once",
            )?;
            ensure(row.health > 0, "adversaries.kinds.health", "must be positive")?;
            ensure(
                (0.0..=1.0).contains(&row.spawn_chance),
                "adversaries.kinds.spawn_chance",
                "must be in [0, 1]",
            )?;
        }
        ensure(
            adv.attack_interval_ticks > 0,
            "adversaries.attack_interval_ticks",
            "must be positive",
        )?;
        ensure(
            adv.jump_cooldown_min > 0.0,
            "adversaries.jump_cooldown_min",
            "must be positive",
        )?;
        ensure(
            adv.jump_cooldown_spread >= 0.0,
            "adversaries.jump_cooldown_spread",
            "must not be negative",
        )?;
        ensure(
            a.width > 2.0 * adv.spawn_margin,
            "adversaries.spawn_margin",
            "must leave room to spawn inside the arena",
        )?;

        let w = &self.waves;
        ensure(!w.counts.is_empty(), "waves.counts", "must not be empty")?;
        ensure(w.max_per_wave > 0, "waves.max_per_wave", "must be positive")?;
        if let Some(mw) = w.multiwave {
            ensure(mw.start_wave > 0, "waves.multiwave.start_wave", "must be positive")?;
            ensure(mw.span >= 2, "waves.multiwave.span", "must cover at least 2 waves")?;
            ensure(
                mw.span <= MAX_MULTIWAVE_SPAN,
                "waves.multiwave.span",
                "must not exceed 10 waves",
            )?;
            ensure(
                mw.start_wave.checked_add(mw.span).is_some(),
                "waves.multiwave.start_wave",
                "burst must end below the last representable wave",
            )?;
        }

        ensure(
            self.particles.max_active > 0,
            "particles.max_active",
            "must be positive",
        )?;

        ensure(
            (1..=MAX_COMBATANTS).contains(&self.roster.combatants),
            "match.combatants",
            "must be 1 or 2",
        )?;
        Ok(())
    }
}
