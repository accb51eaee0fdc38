pub mod error;
pub mod game_trait;
pub mod input;
pub mod schedule;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::time::Duration;

    use crate::game_trait::FrameSimulation;
    use crate::input::{CombatantInput, FrameInputs};

    /// Nominal frame duration at 60 Hz.
    pub const FRAME: Duration = Duration::from_micros(16_667);

    /// Inputs holding `n` idle combatant slots.
    pub fn idle_inputs(n: usize) -> FrameInputs {
        FrameInputs::new(vec![CombatantInput::default(); n])
    }

    /// Run N frames with idle inputs, returning all accumulated events.
    pub fn run_frames<G: FrameSimulation + ?Sized>(game: &mut G, n: usize) -> Vec<G::Event> {
        let empty = FrameInputs::default();
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(FRAME, &empty));
        }
        all_events
    }

    /// Run frames with the same input until `done` holds or `max` frames pass.
    /// Returns the number of frames run.
    pub fn run_until<G: FrameSimulation + ?Sized>(
        game: &mut G,
        inputs: &FrameInputs,
        max: usize,
        mut done: impl FnMut(&G) -> bool,
    ) -> usize {
        for frame in 0..max {
            if done(game) {
                return frame;
            }
            game.update(FRAME, inputs);
        }
        max
    }

    // ================================================================
    // Simulation Contract Tests
    // ================================================================
    // Every FrameSimulation implementation calls these from its own
    // #[cfg(test)] module with a freshly constructed instance.

    /// serialize_state() must return non-empty bytes for a fresh match.
    pub fn contract_fresh_state_serializes<G: FrameSimulation + ?Sized>(game: &G) {
        assert!(
            !game.serialize_state().is_empty(),
            "serialize_state() must return non-empty bytes after construction"
        );
    }

    /// update() must change the serialized state.
    pub fn contract_update_changes_state<G: FrameSimulation + ?Sized>(game: &mut G) {
        let before = game.serialize_state();
        run_frames(game, 5);
        let after = game.serialize_state();
        assert_ne!(before, after, "update() must advance simulation state");
    }

    /// pause() must freeze state, resume() must unfreeze it.
    pub fn contract_pause_stops_updates<G: FrameSimulation + ?Sized>(game: &mut G) {
        game.pause();
        assert!(game.is_paused());
        let before = game.serialize_state();
        let events = run_frames(game, 10);
        assert!(events.is_empty(), "No events may fire while paused");
        assert_eq!(
            before,
            game.serialize_state(),
            "State must not change while paused"
        );

        game.resume();
        run_frames(game, 5);
        assert_ne!(
            before,
            game.serialize_state(),
            "State must change after resume"
        );
    }

    /// reset() must zero the report and reopen the match.
    pub fn contract_reset_starts_fresh<G: FrameSimulation + ?Sized>(game: &mut G) {
        run_frames(game, 30);
        game.reset();
        let report = game.report();
        assert_eq!(report.score, 0, "reset must clear the score");
        assert_eq!(report.total_defeated(), 0, "reset must clear the ledger");
        assert_eq!(report.wave, 1, "reset must restart at wave 1");
        assert!(!game.is_match_over());
    }
}
