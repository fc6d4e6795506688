// src/tasks/mod.rs
pub mod clock_task;

pub use clock_task::run_clock;
