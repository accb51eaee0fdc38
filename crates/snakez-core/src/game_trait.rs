use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::input::FrameInputs;

/// Core trait implemented by every Snakez simulation.
///
/// The driver owns the frame loop, input sampling, rendering and audio;
/// the simulation only advances its own state and reports hook events.
pub trait FrameSimulation {
    /// Discrete notifications for the audio/UI collaborators.
    type Event;

    /// Simulation metadata for menus and logs.
    fn metadata(&self) -> SimMetadata;

    /// Discard the current match and start a fresh one from the same config.
    fn reset(&mut self);

    /// Advance one frame. `dt` is the wall-clock time since the previous
    /// frame; it drives scheduled delays, while physics steps once per call.
    fn update(&mut self, dt: Duration, inputs: &FrameInputs) -> Vec<Self::Event>;

    /// Serialize the state the render collaborator reads each frame.
    fn serialize_state(&self) -> Vec<u8>;

    /// Nominal frame rate the simulation constants were tuned for.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Suspend the update pass. Rendering continues from the last state.
    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    /// Whether the match has ended (every combatant down).
    fn is_match_over(&self) -> bool;

    /// Cumulative results for the reporting collaborator.
    fn report(&self) -> MatchReport;
}

/// Simulation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimMetadata {
    pub name: String,
    pub description: String,
    pub min_combatants: u8,
    pub max_combatants: u8,
}

/// End-of-match summary consumed by reporting/persistence collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: u64,
    /// Wave the match was on when it ended.
    pub wave: u32,
    pub waves_completed: u32,
    /// Defeated adversaries by kind label.
    pub defeated: BTreeMap<String, u32>,
}

impl MatchReport {
    pub fn total_defeated(&self) -> u32 {
        self.defeated.values().sum()
    }
}

/// Generates the `FrameSimulation` methods shared by every simulation:
/// `serialize_state`, `pause`, `resume`, `is_paused`, `is_match_over`.
///
/// Requires the implementing struct to have `state: $StateType` and `paused: bool`
/// fields, and `$StateType` to have a `match_over: bool` field. The implementing
/// crate must depend on `rmp-serde` and `tracing`.
#[macro_export]
macro_rules! frame_simulation_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            match rmp_serde::to_vec(&self.state) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize {}", stringify!($StateType));
                    Vec::new()
                },
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn is_match_over(&self) -> bool {
            self.state.match_over
        }
    };
}
