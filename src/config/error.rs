// src/config/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("シナリオが不正です: {0}")]
    InvalidScenario(String),
}
