//! Property-based tests for the timer engine.
//!
//! These quantify over configurations: every property here must hold for
//! any positive set of durations and cycle thresholds.

use pomotick_core::{Event, Phase, TimerConfig, TimerEngine};
use proptest::prelude::*;

fn arb_config() -> impl Strategy<Value = TimerConfig> {
    (1u64..=90, 1u64..=30, 1u64..=45, 1u32..=6, any::<bool>()).prop_map(
        |(work, short, long, cycles, enabled)| TimerConfig {
            work_min: work,
            short_break_min: short,
            long_break_min: long,
            cycles_until_long_break: cycles,
            long_break_enabled: enabled,
        },
    )
}

/// Tick the engine until the current countdown phase completes.
fn run_out(engine: &mut TimerEngine) -> Vec<Event> {
    let mut events = Vec::new();
    while engine.is_counting_down() {
        events.extend(engine.tick());
    }
    events
}

proptest! {
    // Full minute countdowns multiply out quickly; keep case counts modest.
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn start_from_idle_sets_work_duration(config in arb_config()) {
        let mut engine = TimerEngine::new(config.clone());
        engine.start();
        prop_assert_eq!(engine.phase(), Phase::Work);
        prop_assert_eq!(engine.remaining_secs(), config.work_min * 60);
    }

    #[test]
    fn pause_resume_loses_no_time(config in arb_config(), ticks in 1u64..120) {
        let mut engine = TimerEngine::new(config);
        engine.start();
        for _ in 0..ticks.min(engine.remaining_secs().saturating_sub(1)) {
            engine.tick();
        }
        let phase = engine.phase();
        let remaining = engine.remaining_secs();

        engine.pause();
        prop_assert_eq!(engine.phase(), Phase::Paused);
        engine.start();
        prop_assert_eq!(engine.phase(), phase);
        prop_assert_eq!(engine.remaining_secs(), remaining);
    }

    #[test]
    fn reset_restores_initial_state(config in arb_config(), ticks in 0u64..90) {
        let mut engine = TimerEngine::new(config.clone());
        engine.start();
        for _ in 0..ticks {
            engine.tick();
        }
        engine.reset();
        prop_assert_eq!(engine.phase(), Phase::Idle);
        prop_assert_eq!(engine.completed_cycles(), 0);
        prop_assert_eq!(engine.remaining_secs(), config.work_min * 60);
    }

    #[test]
    fn ticks_decrease_by_exactly_one(config in arb_config()) {
        let mut engine = TimerEngine::new(config);
        engine.start();
        let mut previous = engine.remaining_secs();
        let events = run_out(&mut engine);
        for event in &events {
            if let Event::Tick { remaining_secs, .. } = event {
                prop_assert_eq!(*remaining_secs, previous - 1);
                previous = *remaining_secs;
            }
        }
        prop_assert_eq!(previous, 0);
    }

    #[test]
    fn completion_precedes_waiting_state_change(config in arb_config()) {
        let mut engine = TimerEngine::new(config);
        engine.start();
        let events = run_out(&mut engine);

        let completed_at = events
            .iter()
            .position(|e| matches!(e, Event::Completed { .. }));
        let waiting_at = events.iter().position(
            |e| matches!(e, Event::PhaseChanged { phase: Phase::Waiting, .. }),
        );
        prop_assert!(completed_at.is_some());
        prop_assert!(waiting_at.is_some());
        prop_assert!(completed_at < waiting_at);

        let completions = events
            .iter()
            .filter(|e| matches!(e, Event::Completed { .. }))
            .count();
        prop_assert_eq!(completions, 1);
    }

    #[test]
    fn long_break_exactly_at_threshold(config in arb_config()) {
        prop_assume!(config.long_break_enabled);
        let mut engine = TimerEngine::new(config.clone());
        engine.start();

        for cycle in 1..=config.cycles_until_long_break {
            run_out(&mut engine);
            engine.advance();
            if cycle < config.cycles_until_long_break {
                prop_assert_eq!(engine.phase(), Phase::Break);
                run_out(&mut engine);
                engine.advance();
                prop_assert_eq!(engine.phase(), Phase::Work);
            }
        }
        prop_assert_eq!(engine.phase(), Phase::LongBreak);
        prop_assert_eq!(engine.remaining_secs(), config.long_break_min * 60);
        prop_assert_eq!(engine.completed_cycles(), 0);
    }

    #[test]
    fn disabled_long_break_never_appears(config in arb_config()) {
        let config = TimerConfig { long_break_enabled: false, ..config };
        let mut engine = TimerEngine::new(config.clone());
        engine.start();

        for _ in 0..(config.cycles_until_long_break * 2 + 1) {
            run_out(&mut engine);
            engine.advance();
            prop_assert_ne!(engine.phase(), Phase::LongBreak);
            prop_assert!(engine.completed_cycles() <= config.cycles_until_long_break);
        }
    }
}

#[test]
fn two_cycle_scenario_reaches_long_break_at_120_secs() {
    // The reference scenario: work=1, break=1, long=2, threshold=2.
    let config = TimerConfig {
        work_min: 1,
        short_break_min: 1,
        long_break_min: 2,
        cycles_until_long_break: 2,
        long_break_enabled: true,
    };
    let mut engine = TimerEngine::new(config);
    engine.start();

    run_out(&mut engine);
    engine.advance();
    assert_eq!(engine.phase(), Phase::Break);

    run_out(&mut engine);
    engine.advance();
    assert_eq!(engine.phase(), Phase::Work);

    run_out(&mut engine);
    engine.advance();
    assert_eq!(engine.phase(), Phase::LongBreak);
    assert_eq!(engine.remaining_secs(), 120);
    assert_eq!(engine.completed_cycles(), 0);
}
