use serde::{Deserialize, Serialize};

use crate::config::{ArenaConfig, PhysicsConfig, SwampConfig};
use crate::platform::Platform;

/// Read-only surroundings shared by every entity update in a frame.
#[derive(Debug, Clone, Copy)]
pub struct World<'a> {
    pub platforms: &'a [Platform],
    pub config: &'a SwampConfig,
}

impl World<'_> {
    /// Run the physics step for `body` against this world.
    pub fn step(&self, body: &mut Body) -> Support {
        step_body(body, self.platforms, &self.config.arena, &self.config.physics)
    }
}

/// Surface a body ended the step on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Support {
    /// Resting on the platform at this index.
    Platform(usize),
    /// Resting on the hard water floor.
    WaterFloor,
    Airborne,
}

/// Shared physics component for every simulated body.
///
/// Coordinates are screen-space: `y` grows downward, `(x, y)` is the top-left
/// corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    pub in_water: bool,
    pub dropping_through: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
            on_ground: false,
            in_water: false,
            dropping_through: false,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict AABB intersection.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Distance between top-left corners.
    pub fn distance_to(&self, other: &Body) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Resize the hitbox in place, keeping the top-left corner.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Whether feet are within `band` of the top of a horizontally overlapping pad.
    pub fn standing_on_any(&self, platforms: &[Platform], band: f32) -> bool {
        platforms
            .iter()
            .any(|pad| pad.overlaps_span(self.x, self.width) && (self.bottom() - pad.y).abs() < band)
    }

    /// Start a drop-through if grounded on a pad, above water and not already dropping.
    /// Returns whether the flag was set by this call.
    pub fn try_drop_through(&mut self, platforms: &[Platform], physics: &PhysicsConfig) -> bool {
        if !self.on_ground || self.in_water || self.dropping_through {
            return false;
        }
        if self.standing_on_any(platforms, physics.drop_band) {
            self.dropping_through = true;
            tracing::trace!(x = self.x, y = self.y, "Drop-through started");
            return true;
        }
        false
    }
}

/// Index of the first platform the body snaps onto, in iteration order.
fn find_landing(body: &Body, platforms: &[Platform], physics: &PhysicsConfig) -> Option<usize> {
    if body.vy < 0.0 || body.dropping_through {
        return None;
    }
    let bottom = body.bottom();
    platforms.iter().position(|pad| {
        pad.overlaps_span(body.x, body.width)
            && bottom >= pad.y - physics.snap_above
            && bottom <= pad.y + physics.snap_below
    })
}

/// Advance one body by one tick: gravity, integration, bounds, platform
/// contact, drop-through release, water floor, submersion and friction.
pub fn step_body(
    body: &mut Body,
    platforms: &[Platform],
    arena: &ArenaConfig,
    physics: &PhysicsConfig,
) -> Support {
    if !body.on_ground {
        body.vy += physics.gravity;
    }

    body.x += body.vx;
    body.y += body.vy;

    // Clamp, not bounce.
    if body.x < 0.0 {
        body.x = 0.0;
    }
    if body.x + body.width > arena.width {
        body.x = arena.width - body.width;
    }

    body.on_ground = false;
    let mut support = Support::Airborne;
    if let Some(i) = find_landing(body, platforms, physics) {
        body.y = platforms[i].y - body.height;
        body.vy = 0.0;
        body.on_ground = true;
        support = Support::Platform(i);
    }

    if body.dropping_through {
        let bottom = body.bottom();
        let still_over = platforms.iter().any(|pad| {
            pad.overlaps_span(body.x, body.width) && bottom <= pad.y + physics.drop_release_band
        });
        if !still_over {
            body.dropping_through = false;
        }
    }

    // Inclusive so a body resting on the floor stays grounded.
    let floor = arena.floor_y();
    if body.bottom() >= floor {
        body.y = floor - body.height;
        body.vy = 0.0;
        body.on_ground = true;
        support = Support::WaterFloor;
    }

    let on_platform = matches!(support, Support::Platform(_));
    body.in_water = !on_platform && body.bottom() > arena.water_level;

    let friction = if body.in_water {
        physics.water_friction
    } else {
        physics.air_friction
    };
    body.vx *= friction;

    support
}
