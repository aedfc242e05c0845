// src/simulation/error.rs

use thiserror::Error;

use crate::config::error::ConfigError;
use crate::models::error::ModelError;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("ファイル入出力に失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAMLの読み込みに失敗しました: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("シナリオが不正です: {0}")]
    InvalidScenario(String),
}
