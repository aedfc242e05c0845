// src/simulation/mod.rs

pub mod csv;
pub mod error;
pub mod framework;
pub mod load_parameters;

use crate::models::VehicleState;

/// 1サンプル分の入力
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlInput {
    pub time: f64,     // 時刻 (s)
    pub throttle: f64, // スロットル開度
    pub incline: f64,  // 勾配角 (rad)
}

/// 1サンプル分の記録
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub throttle: f64,
    pub incline: f64,
    pub state: VehicleState,
}

/// 走行結果の要約
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub samples: usize,
    pub final_time: f64,       // 最終時刻 (s)
    pub distance: f64,         // 走行距離 (m)
    pub final_velocity: f64,   // 最終速度 (m/s)
    pub peak_velocity: f64,    // 最大速度 (m/s)
    pub peak_engine_speed: f64, // 最大エンジン角速度 (rad/s)
}
