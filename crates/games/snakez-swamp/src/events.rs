use serde::{Deserialize, Serialize};

use crate::adversary::AdversaryKind;
use crate::particles::Effect;

/// Hooks for audio and UI, returned from each frame update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A batch of adversaries entered the arena.
    WaveStarted {
        wave: u32,
        spawned: u32,
        multiwave: bool,
    },
    /// Score moved during the frame. Emitted at most once per frame.
    ScoreChanged { score: u64 },
    AdversaryDefeated { kind: AdversaryKind, by_slot: usize },
    CombatantDied { slot: usize },
    /// Every combatant is dead. Terminal.
    GameOver { score: u64, wave: u32 },
}

/// Scheduled wall-clock work, drained at frame boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    AdvanceWave,
}

/// Side effects collected while entities update.
///
/// Entity code never touches the particle system or the event stream
/// directly; the arena flushes this log after the entity loops.
#[derive(Debug, Default)]
pub struct TickLog {
    pub events: Vec<SimEvent>,
    pub effects: Vec<Effect>,
}

impl TickLog {
    pub fn event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}
