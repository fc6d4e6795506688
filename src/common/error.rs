// src/common/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Display element not found: {0}")]
    ElementNotFound(String),

    #[error("Time service error")]
    TimeError,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Character has no sprite mapping: {0:?}")]
    InvalidCharacter(char),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<jiff::Error> for AppError {
    fn from(e: jiff::Error) -> Self {
        log::error!("Calendar arithmetic failed: {}", e);
        AppError::TimeError
    }
}

pub type Result<T> = core::result::Result<T, AppError>;
