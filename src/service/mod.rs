// src/service/mod.rs
pub mod time_service;

pub use time_service::{ClockSnapshot, RenderFingerprint, TimeService};
