use snakez_core::input::CombatantInput;
use snakez_swamp::adversary::Adversary;
use snakez_swamp::combatant::{Combatant, CombatantState};

/// Horizontal gap the autopilot tries to keep from its target.
const PREFERRED_GAP: f32 = 60.0;

/// Whip when the target is this close (just inside the whip range).
const WHIP_REACH: f32 = 90.0;

/// Roll through anything closer than this.
const ROLL_REACH: f32 = 35.0;

/// Hop out of the water every this many frames while submerged.
const SURFACE_EVERY: u64 = 45;

/// Generate an input for `combatant` from the visible adversaries.
///
/// Walks toward the nearest frog, whips it when in reach and rolls through
/// frogs that get too close. Dead combatants get an idle input.
pub fn steer(frame: u64, combatant: &Combatant, adversaries: &[Adversary]) -> CombatantInput {
    if combatant.dead {
        return CombatantInput::default();
    }

    let me = &combatant.body;
    let mut input = CombatantInput::default();

    if me.in_water && me.on_ground && frame % SURFACE_EVERY == 0 {
        input.y = -1.0;
    }

    let Some(target) = adversaries
        .iter()
        .filter(|a| a.alive)
        .min_by(|a, b| me.distance_to(&a.body).total_cmp(&me.distance_to(&b.body)))
    else {
        return input;
    };

    let dx = target.body.x - me.x;
    let dist = me.distance_to(&target.body);
    if dx.abs() > PREFERRED_GAP {
        input.x = dx.signum();
    } else if dx != 0.0 && dx.signum() != combatant.facing {
        // Turn to face without closing in.
        input.x = dx.signum() * 0.1;
    }

    if combatant.state == CombatantState::Idle {
        if dist < ROLL_REACH && combatant.roll_cooldown == 0 {
            input.roll = true;
        } else if dist < WHIP_REACH && combatant.whip_cooldown == 0 {
            input.whip = true;
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use snakez_swamp::adversary::AdversaryKind;
    use snakez_swamp::config::SwampConfig;

    fn snake(x: f32, y: f32) -> Combatant {
        Combatant::spawn(0, x, y, &SwampConfig::default().combatant)
    }

    fn frog(x: f32, y: f32) -> Adversary {
        let cfg = SwampConfig::default();
        let stats = AdversaryKind::Small.default_stats();
        let mut a = Adversary {
            body: snakez_swamp::physics::Body::new(x, y, stats.width, stats.height),
            kind: stats.kind,
            health: stats.health,
            max_health: stats.health,
            alive: true,
            facing: 1.0,
            jump_timer: 0,
            jump_cooldown: cfg.adversaries.jump_cooldown_min,
            attack_timer: 0,
            jump_power: stats.jump_power,
            attack_damage: stats.attack_damage,
            score_value: stats.score,
        };
        a.body.on_ground = true;
        a
    }

    #[test]
    fn walks_toward_distant_frog() {
        let input = steer(1, &snake(100.0, 300.0), &[frog(600.0, 300.0)]);
        assert_eq!(input.x, 1.0);
        assert!(!input.whip && !input.roll);
    }

    #[test]
    fn whips_in_reach() {
        let input = steer(1, &snake(100.0, 300.0), &[frog(170.0, 300.0)]);
        assert!(input.whip);
    }

    #[test]
    fn rolls_when_crowded() {
        let input = steer(1, &snake(100.0, 300.0), &[frog(110.0, 300.0)]);
        assert!(input.roll);
        assert!(!input.whip);
    }

    #[test]
    fn turns_to_face_a_close_frog_behind() {
        let input = steer(1, &snake(300.0, 300.0), &[frog(260.0, 300.0)]);
        assert!(input.x < 0.0 && input.x > -1.0);
    }

    #[test]
    fn dead_or_alone_is_idle() {
        let mut dead = snake(100.0, 300.0);
        dead.dead = true;
        assert_eq!(steer(1, &dead, &[frog(110.0, 300.0)]), CombatantInput::default());
        assert_eq!(steer(1, &snake(100.0, 300.0), &[]), CombatantInput::default());
    }
}
