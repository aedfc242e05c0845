// src/config/parameters.rs

use serde::Deserialize;

use crate::models::error::ModelError;

/// 車両の物理パラメータ
///
/// YAMLで一部のフィールドだけを指定した場合、残りは既定値になる。
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct VehicleParameters {
    pub a0: f64,                 // エンジントルク係数 (N·m)
    pub a1: f64,                 // エンジントルク係数 (N·m·s/rad)
    pub a2: f64,                 // エンジントルク係数 (N·m·s²/rad²)、負も可
    pub gear_ratio: f64,         // ギア比 (エンジン→車輪)
    pub wheel_radius: f64,       // 有効タイヤ半径 (m)
    pub inertia: f64,            // エンジン・駆動系慣性 (kg·m²)
    pub mass: f64,               // 車両質量 (kg)
    pub gravity: f64,            // 重力加速度 (m/s²)
    pub aero_drag: f64,          // 空気抵抗係数 (N·s²/m²)
    pub rolling_resistance: f64, // 転がり抵抗係数 (N·s/m)
    pub tire_stiffness: f64,     // タイヤ縦剛性 (N)
    pub max_tire_force: f64,     // タイヤ力の飽和値 (N)
    pub sample_time: f64,        // 積分刻み (s)
}

impl Default for VehicleParameters {
    fn default() -> Self {
        VehicleParameters {
            a0: 400.0,
            a1: 0.1,
            a2: -0.0002,
            gear_ratio: 0.35,
            wheel_radius: 0.3,
            inertia: 10.0,
            mass: 2000.0,
            gravity: 9.81,
            aero_drag: 1.36,
            rolling_resistance: 0.01,
            tire_stiffness: 10000.0,
            max_tire_force: 10000.0,
            sample_time: 0.01,
        }
    }
}

impl VehicleParameters {
    /// パラメータの妥当性を確認する
    ///
    /// a2 以外はすべて有限かつ正でなければならない。a2 は有限であればよい。
    pub fn validate(&self) -> Result<(), ModelError> {
        let positive = [
            ("a0", self.a0),
            ("a1", self.a1),
            ("gear_ratio", self.gear_ratio),
            ("wheel_radius", self.wheel_radius),
            ("inertia", self.inertia),
            ("mass", self.mass),
            ("gravity", self.gravity),
            ("aero_drag", self.aero_drag),
            ("rolling_resistance", self.rolling_resistance),
            ("tire_stiffness", self.tire_stiffness),
            ("max_tire_force", self.max_tire_force),
            ("sample_time", self.sample_time),
        ];

        if let Some(&(name, value)) = positive
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(ModelError::InvalidParameter { name, value });
        }

        if !self.a2.is_finite() {
            return Err(ModelError::InvalidParameter {
                name: "a2",
                value: self.a2,
            });
        }

        Ok(())
    }
}
