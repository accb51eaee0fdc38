use serde::{Deserialize, Serialize};

/// Per-frame input for one combatant, as sampled by the input collaborator.
///
/// Axes are normalized to `[-1, 1]`; `y < 0` means up. The collaborator is
/// untrusted, so the simulation only ever consumes [`CombatantInput::sanitized`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatantInput {
    pub x: f32,
    pub y: f32,
    pub roll: bool,
    pub whip: bool,
}

impl CombatantInput {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Copy with both axes clamped into range; non-finite values become 0.
    pub fn sanitized(self) -> Self {
        Self {
            x: clamp_axis(self.x),
            y: clamp_axis(self.y),
            ..self
        }
    }

    pub fn wants_up(&self) -> bool {
        self.y < 0.0
    }

    pub fn wants_down(&self) -> bool {
        self.y > 0.0
    }
}

/// Clamp a raw axis value into `[-1, 1]` (NaN and infinities map to 0).
pub fn clamp_axis(v: f32) -> f32 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Inputs for every combatant slot in a single frame. Missing slots read as idle.
#[derive(Debug, Clone, Default)]
pub struct FrameInputs {
    pub slots: Vec<CombatantInput>,
}

impl FrameInputs {
    pub fn new(slots: Vec<CombatantInput>) -> Self {
        Self { slots }
    }

    pub fn single(input: CombatantInput) -> Self {
        Self {
            slots: vec![input],
        }
    }

    /// Sanitized input for `slot`.
    pub fn get(&self, slot: usize) -> CombatantInput {
        self.slots
            .get(slot)
            .copied()
            .unwrap_or_default()
            .sanitized()
    }
}
