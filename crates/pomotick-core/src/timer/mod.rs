mod config;
mod engine;

pub use config::TimerConfig;
pub use engine::{Phase, TimerEngine, TimerSnapshot};
