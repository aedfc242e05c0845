// src/models/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("パラメータ `{name}` が不正です: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("速度 {velocity} m/s ではスリップ率を計算できません。")]
    StandstillSlip { velocity: f64 },
}
