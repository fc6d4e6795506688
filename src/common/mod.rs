// src/common/mod.rs

/// 公共模块定义
///
/// 本模块定义了数字时钟的配置与错误类型
pub mod config;
pub mod error;

pub use config::ClockConfig;
pub use error::{AppError, Result};
