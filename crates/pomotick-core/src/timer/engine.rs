//! Timer engine implementation.
//!
//! The timer engine is a seconds-counting state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once
//! per elapsed second while `is_counting_down()` is true.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Work -> Waiting -> (Break | LongBreak) -> Waiting -> Work -> ...
//!          |         ^
//!          v         |
//!        Paused -----+-- reset() from anywhere -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerConfig::default());
//! dispatch(engine.start());
//! // Once per second:
//! dispatch(engine.tick());
//! ```
//!
//! Every command returns the events it produced, in emission order. Within
//! one batch a `Completed` event always precedes the `PhaseChanged` that
//! follows it, and the whole batch is visible to the caller before control
//! continues - the ordering the display layer relies on.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::TimerConfig;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Work,
    Break,
    LongBreak,
    Paused,
    /// Countdown hit zero; the next phase starts only on `advance()`.
    Waiting,
}

impl Phase {
    /// True for the phases in which the countdown is running.
    pub fn is_counting(self) -> bool {
        matches!(self, Phase::Work | Phase::Break | Phase::LongBreak)
    }
}

/// Read-only view of the engine for display layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_secs: u64,
    /// Full duration of the current (or interrupted) phase.
    pub total_secs: u64,
    pub completed_cycles: u32,
    /// 0.0 .. 1.0 progress within the current phase.
    pub progress: f64,
}

/// Core timer engine.
///
/// Owns all timing state; the one-second cadence is supplied externally.
/// Invalid-state calls are no-ops that return an empty event batch, never
/// errors - callers gate their controls by the current phase.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    phase: Phase,
    /// Seconds left in the current phase countdown.
    remaining_secs: u64,
    /// Work phases finished normally since the last long break or reset.
    completed_cycles: u32,
    /// The active phase that was interrupted by `pause()` or that just ran
    /// out. `Some` iff phase is `Paused` or `Waiting`. Stored explicitly -
    /// inferring it back from remaining-time thresholds is ambiguous when
    /// durations coincide.
    prior_phase: Option<Phase>,
}

impl TimerEngine {
    /// Create a new engine in `Idle`, pre-seeded with the work duration so
    /// displays show the full countdown before the first start.
    pub fn new(config: TimerConfig) -> Self {
        let remaining_secs = config.work_secs();
        Self {
            config,
            phase: Phase::Idle,
            remaining_secs,
            completed_cycles: 0,
            prior_phase: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// True while a countdown phase is active - the driver only needs to
    /// deliver ticks while this holds. `tick()` in any other phase is a
    /// no-op, so a stale tick after a phase exit has no effect.
    pub fn is_counting_down(&self) -> bool {
        self.phase.is_counting()
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.current_total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.current_total_secs(),
            completed_cycles: self.completed_cycles,
            progress: self.progress(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin from `Idle`, or resume the interrupted phase from `Paused`.
    /// No-op in every other phase.
    pub fn start(&mut self) -> Vec<Event> {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Work;
                self.remaining_secs = self.config.work_secs();
            }
            Phase::Paused => {
                self.phase = self.prior_phase.take().unwrap_or(Phase::Work);
            }
            _ => return Vec::new(),
        }
        vec![Event::PhaseChanged {
            phase: self.phase,
            at: Utc::now(),
        }]
    }

    /// Interrupt the running countdown, remembering which phase to resume.
    /// No-op outside the counting phases.
    pub fn pause(&mut self) -> Vec<Event> {
        if !self.phase.is_counting() {
            return Vec::new();
        }
        self.prior_phase = Some(self.phase);
        self.phase = Phase::Paused;
        vec![Event::PhaseChanged {
            phase: Phase::Paused,
            at: Utc::now(),
        }]
    }

    /// Return to `Idle` from any phase, clearing the cycle counter. The
    /// trailing `Tick` carries the full work duration so displays repaint.
    pub fn reset(&mut self) -> Vec<Event> {
        self.phase = Phase::Idle;
        self.remaining_secs = self.config.work_secs();
        self.completed_cycles = 0;
        self.prior_phase = None;
        vec![
            Event::PhaseChanged {
                phase: Phase::Idle,
                at: Utc::now(),
            },
            Event::Tick {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            },
        ]
    }

    /// Proceed from `Waiting` into the next phase. No-op otherwise.
    ///
    /// A finished work phase increments the cycle counter; once it reaches
    /// the configured threshold (and long breaks are enabled) a long break
    /// is granted and the counter resets. A finished break of either kind
    /// leads back to work.
    pub fn advance(&mut self) -> Vec<Event> {
        if self.phase != Phase::Waiting {
            return Vec::new();
        }
        let finished = self.prior_phase.take().unwrap_or(Phase::Work);
        let next = match finished {
            Phase::Work => {
                self.completed_cycles += 1;
                if self.config.long_break_enabled
                    && self.completed_cycles >= self.config.cycles_until_long_break
                {
                    self.completed_cycles = 0;
                    self.remaining_secs = self.config.long_break_secs();
                    Phase::LongBreak
                } else {
                    // Keep the counter within bounds when long breaks are off.
                    self.completed_cycles = self
                        .completed_cycles
                        .min(self.config.cycles_until_long_break);
                    self.remaining_secs = self.config.short_break_secs();
                    Phase::Break
                }
            }
            _ => {
                self.remaining_secs = self.config.work_secs();
                Phase::Work
            }
        };
        self.phase = next;
        vec![Event::PhaseChanged {
            phase: next,
            at: Utc::now(),
        }]
    }

    /// Debug aid: force the running countdown to zero. The completion
    /// transition itself happens on the next `tick()`, never synchronously,
    /// so event ordering stays identical to a natural run-out.
    pub fn skip_to_end(&mut self) -> Vec<Event> {
        if !self.phase.is_counting() {
            return Vec::new();
        }
        self.remaining_secs = 0;
        vec![Event::Tick {
            remaining_secs: 0,
            at: Utc::now(),
        }]
    }

    /// Call once per elapsed second while `is_counting_down()`.
    ///
    /// Decrements and emits a `Tick`; at zero the phase completes, emitting
    /// `Completed` then `PhaseChanged(Waiting)`. When the countdown was
    /// already forced to zero by `skip_to_end()` the decrement and its
    /// `Tick` are skipped, so a given second is never announced twice.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.phase.is_counting() {
            return Vec::new();
        }
        let mut events = Vec::new();
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            events.push(Event::Tick {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }
        if self.remaining_secs == 0 {
            let finished = self.phase;
            self.prior_phase = Some(finished);
            self.phase = Phase::Waiting;
            events.push(Event::Completed {
                finished,
                at: Utc::now(),
            });
            events.push(Event::PhaseChanged {
                phase: Phase::Waiting,
                at: Utc::now(),
            });
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Full duration of the current phase; for `Paused`/`Waiting` the
    /// interrupted phase, for `Idle` the upcoming work phase.
    fn current_total_secs(&self) -> u64 {
        let phase = match self.phase {
            Phase::Paused | Phase::Waiting => self.prior_phase.unwrap_or(Phase::Work),
            Phase::Idle => Phase::Work,
            counting => counting,
        };
        match phase {
            Phase::Break => self.config.short_break_secs(),
            Phase::LongBreak => self.config.long_break_secs(),
            _ => self.config.work_secs(),
        }
    }
}
