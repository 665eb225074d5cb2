//! The interactive timer session.
//!
//! Owns one [`TimerEngine`] for the lifetime of the run, supplies its
//! one-second cadence, and renders the events it hands back: ticks as
//! `MM:SS` lines, completions as a terminal bell, and the waiting phase as
//! an Enter prompt (unless auto-advance is on).

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::Args;
use pomotick_core::{Config, Event, Phase, TimerEngine};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Args)]
pub struct RunArgs {
    /// Work duration in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    work: Option<u32>,
    /// Short break duration in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    short_break: Option<u32>,
    /// Long break duration in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    long_break: Option<u32>,
    /// Work phases before a long break
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    cycles: Option<u32>,
    /// Disable long breaks for this session
    #[arg(long)]
    no_long_break: bool,
    /// Continue into the next phase without waiting for Enter
    #[arg(long)]
    auto_advance: bool,
    /// Stop after this many completed work phases
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pomodoros: Option<u32>,
    /// Cut each phase short after its first tick (debug aid)
    #[arg(long, hide = true)]
    fast_forward: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    for key in config.sanitize() {
        tracing::warn!(key, "non-positive config value replaced with its default");
    }

    if let Some(v) = args.work {
        config.schedule.work_minutes = v;
    }
    if let Some(v) = args.short_break {
        config.schedule.short_break_minutes = v;
    }
    if let Some(v) = args.long_break {
        config.schedule.long_break_minutes = v;
    }
    if let Some(v) = args.cycles {
        config.schedule.cycles_until_long_break = v;
    }
    if args.no_long_break {
        config.schedule.long_break_enabled = false;
    }

    let mut session = Session {
        engine: TimerEngine::new(config.timer_config()),
        auto_advance: args.auto_advance || config.ui.auto_advance,
        bell: config.ui.bell,
        pomodoro_limit: args.pomodoros,
        fast_forward: args.fast_forward,
        completed_pomodoros: 0,
        display_phase: Phase::Idle,
    };
    session.run()
}

/// Terminal frontend for one engine instance.
struct Session {
    engine: TimerEngine,
    auto_advance: bool,
    bell: bool,
    pomodoro_limit: Option<u32>,
    fast_forward: bool,
    completed_pomodoros: u32,
    /// Phase the tick lines are labeled with; trails the engine by the
    /// in-flight event batch.
    display_phase: Phase,
}

impl Session {
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let events = self.engine.start();
        self.handle_batch(&events);

        loop {
            thread::sleep(TICK_INTERVAL);
            let events = self.engine.tick();
            self.handle_batch(&events);

            if self.limit_reached() {
                println!("session complete: {} pomodoro(s)", self.completed_pomodoros);
                return Ok(());
            }

            if self.engine.phase() == Phase::Waiting {
                if !self.auto_advance {
                    wait_for_enter()?;
                }
                let events = self.engine.advance();
                self.handle_batch(&events);
            }

            if self.fast_forward && self.engine.is_counting_down() {
                let events = self.engine.skip_to_end();
                self.handle_batch(&events);
            }
        }
    }

    fn limit_reached(&self) -> bool {
        self.pomodoro_limit
            .is_some_and(|limit| self.completed_pomodoros >= limit)
    }

    fn handle_batch(&mut self, events: &[Event]) {
        for event in events {
            self.handle(event);
        }
    }

    fn handle(&mut self, event: &Event) {
        match event {
            Event::Tick { remaining_secs, .. } => {
                let snap = self.engine.snapshot();
                println!(
                    "{:<12}{}  {:>3.0}%",
                    phase_label(self.display_phase),
                    format_clock(*remaining_secs),
                    snap.progress * 100.0,
                );
            }
            Event::Completed { finished, .. } => {
                if self.bell {
                    print!("\x07");
                    let _ = io::stdout().flush();
                }
                println!("{} finished", phase_label(*finished));
                tracing::info!(phase = phase_label(*finished), "phase completed");
                if *finished == Phase::Work {
                    self.completed_pomodoros += 1;
                }
            }
            Event::PhaseChanged { phase, .. } => {
                self.display_phase = *phase;
                tracing::debug!(phase = phase_label(*phase), "phase changed");
            }
        }
    }
}

fn wait_for_enter() -> io::Result<()> {
    print!("press Enter for the next phase...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Work => "work",
        Phase::Break => "break",
        Phase::LongBreak => "long break",
        Phase::Paused => "paused",
        Phase::Waiting => "waiting",
    }
}

fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(61 * 60 + 5), "61:05");
    }

    #[test]
    fn labels_cover_every_phase() {
        assert_eq!(phase_label(Phase::Work), "work");
        assert_eq!(phase_label(Phase::LongBreak), "long break");
        assert_eq!(phase_label(Phase::Waiting), "waiting");
    }
}
