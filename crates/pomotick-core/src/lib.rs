//! # Pomotick Core Library
//!
//! This library provides the core logic for the Pomotick Pomodoro timer.
//! The CLI binary is a thin terminal frontend over this crate: it owns one
//! engine instance, supplies the one-second cadence, and renders the events
//! the engine hands back.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a synchronous state machine that requires the caller
//!   to invoke `tick()` once per elapsed second
//! - **Events**: every operation returns the typed events it produced, in
//!   emission order; the caller dispatches them to whatever display it has
//! - **Storage**: TOML-based configuration with validation at the loader
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Event`]: Typed notification stream (tick, phase change, completion)
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use storage::Config;
pub use timer::{Phase, TimerConfig, TimerEngine, TimerSnapshot};
