//! Headless runs: the autopilot drives full matches through the public API.

use snakez_runner::{RunOptions, run};
use snakez_swamp::config::{MultiwaveConfig, SwampConfig};

#[test]
fn short_run_reports_opening_wave() {
    let outcome = run(RunOptions {
        frames: 30,
        seed: 1,
        config: SwampConfig::default(),
    })
    .unwrap();
    assert_eq!(outcome.frames, 30);
    assert_eq!(outcome.events.waves_started, 1);
    assert_eq!(outcome.report.wave, 1);
    assert_eq!(outcome.report.waves_completed, 0);
}

#[test]
fn same_seed_same_outcome() {
    let opts = RunOptions {
        frames: 600,
        seed: 99,
        config: SwampConfig::default(),
    };
    let a = run(opts.clone()).unwrap();
    let b = run(opts).unwrap();
    assert_eq!(a.report, b.report);
    assert_eq!(a.events, b.events);
    assert_eq!(a.frames, b.frames);
}

#[test]
fn report_ledger_matches_defeat_hooks() {
    let mut config = SwampConfig::default();
    config.roster.combatants = 1;
    let outcome = run(RunOptions {
        frames: 1800,
        seed: 5,
        config,
    })
    .unwrap();
    assert_eq!(outcome.report.total_defeated(), outcome.events.defeats);
    assert!(outcome.frames <= 1800);
    if outcome.game_over {
        assert_eq!(outcome.events.deaths, 1);
    }
}

#[test]
fn opening_multiwave_is_reported() {
    let mut config = SwampConfig::default();
    config.waves.multiwave = Some(MultiwaveConfig {
        start_wave: 1,
        span: 2,
    });
    let outcome = run(RunOptions {
        frames: 5,
        seed: 3,
        config,
    })
    .unwrap();
    assert_eq!(outcome.events.multiwaves, 1);
}

#[test]
fn invalid_config_fails_fast() {
    let mut config = SwampConfig::default();
    config.particles.max_active = 0;
    let err = run(RunOptions {
        frames: 10,
        seed: 0,
        config,
    })
    .unwrap_err();
    assert_eq!(err.field(), Some("particles.max_active"));
}
