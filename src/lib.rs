// src/lib.rs

//! 縦方向（1次元）の車両ダイナミクスシミュレータ
//!
//! スロットルと道路勾配の時系列から、車両の位置・速度・エンジン回転数を
//! 固定刻みの半陰的オイラー法で計算する。

pub mod config;
pub mod math;
pub mod models;
pub mod simulation;

pub use config::{ConfigError, Scenario, VehicleParameters};
pub use models::{ModelError, VehicleModel, VehicleState};
pub use simulation::error::SimulationError;
