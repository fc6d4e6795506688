// src/driver/mod.rs
pub mod rng;
pub mod time_source;

pub use rng::{Lcg, RandomIndex};
pub use time_source::{FixedTimeSource, SystemTimeSource, TimeSource};
