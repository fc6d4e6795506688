//! 图片数字时钟
//!
//! 用逐字符的图片拼出日期、时间、星期和“距离明年还剩”倒计时，每秒刷新一次，
//! 显示内容不变时跳过重绘。

pub mod app_core;
pub mod common;
pub mod driver;
pub mod render;
pub mod service;
pub mod tasks;

pub use app_core::{DigitDisplayEngine, EngineState, StopHandle, TickOutcome};
pub use common::{AppError, ClockConfig, Result};
