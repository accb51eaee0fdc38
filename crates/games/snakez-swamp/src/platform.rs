use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ArenaConfig, PlatformConfig};

/// A bobbing lily pad. Bodies may stand on its top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Bob phase in radians.
    pub phase: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            phase: 0.0,
        }
    }

    /// Advance the bob phase and drift the pad vertically.
    pub fn update(&mut self, cfg: &PlatformConfig) {
        self.phase += cfg.bob_speed;
        self.y += self.phase.sin() * cfg.bob_amplitude;
    }

    /// Whether the horizontal span `[x, x + width)` overlaps this pad.
    pub fn overlaps_span(&self, x: f32, width: f32) -> bool {
        x < self.x + self.width && x + width > self.x
    }
}

/// Lay out `cfg.count` pads left to right just above the water surface.
pub fn generate_platforms(
    rng: &mut impl Rng,
    cfg: &PlatformConfig,
    arena: &ArenaConfig,
) -> Vec<Platform> {
    (0..cfg.count)
        .map(|i| {
            let x = cfg.first_x + i as f32 * cfg.spacing + rng.random::<f32>() * cfg.x_jitter;
            let y = arena.water_level - cfg.rise + rng.random::<f32>() * cfg.y_jitter;
            let width = cfg.min_width + rng.random::<f32>() * cfg.width_jitter;
            let mut pad = Platform::new(x, y, width, cfg.height);
            pad.phase = rng.random::<f32>() * std::f32::consts::TAU;
            pad
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn layout_is_seed_reproducible() {
        let cfg = PlatformConfig::default();
        let arena = ArenaConfig::default();
        let a = generate_platforms(&mut StdRng::seed_from_u64(7), &cfg, &arena);
        let b = generate_platforms(&mut StdRng::seed_from_u64(7), &cfg, &arena);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn layout_stays_in_bands() {
        let cfg = PlatformConfig::default();
        let arena = ArenaConfig::default();
        let pads = generate_platforms(&mut StdRng::seed_from_u64(3), &cfg, &arena);
        for (i, pad) in pads.iter().enumerate() {
            let base_x = cfg.first_x + i as f32 * cfg.spacing;
            assert!(pad.x >= base_x && pad.x <= base_x + cfg.x_jitter);
            assert!(pad.y >= arena.water_level - cfg.rise);
            assert!(pad.y <= arena.water_level - cfg.rise + cfg.y_jitter);
            assert!(pad.width >= cfg.min_width && pad.width <= cfg.min_width + cfg.width_jitter);
            assert!((0.0..=std::f32::consts::TAU).contains(&pad.phase));
        }
    }

    #[test]
    fn bobbing_advances_phase_and_moves_y() {
        let cfg = PlatformConfig::default();
        let mut pad = Platform::new(0.0, 440.0, 80.0, 25.0);
        pad.phase = 1.0;
        pad.update(&cfg);
        assert!((pad.phase - 1.02).abs() < 1e-6);
        let expected = 440.0 + 1.02f32.sin() * 0.15;
        assert!((pad.y - expected).abs() < 1e-4);
    }

    #[test]
    fn bob_amplitude_is_small() {
        let cfg = PlatformConfig::default();
        let mut pad = Platform::new(0.0, 440.0, 80.0, 25.0);
        for _ in 0..1000 {
            pad.update(&cfg);
            assert!((pad.y - 440.0).abs() < 20.0);
        }
    }

    #[test]
    fn span_overlap_is_strict() {
        let pad = Platform::new(100.0, 440.0, 80.0, 25.0);
        assert!(pad.overlaps_span(60.0, 50.0));
        assert!(!pad.overlaps_span(50.0, 50.0));
        assert!(!pad.overlaps_span(180.0, 10.0));
    }
}
