// src/app_core/mod.rs
pub mod display_engine;

pub use display_engine::{DigitDisplayEngine, EngineState, StopHandle, TickOutcome};
