// src/config/scenario.rs

use serde::Deserialize;

use crate::config::error::ConfigError;

/// 時間の関数として与える入力プロファイル
///
/// `points` は `[時刻 (s), 値]` の組で、時刻は狭義単調増加でなければならない。
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Profile {
    /// 常に一定値
    Constant { value: f64 },
    /// 区分線形補間。範囲外は端の値で保持する。
    Linear { points: Vec<[f64; 2]> },
    /// 区分一定。t 以前で最後の点の値を使う。
    Step { points: Vec<[f64; 2]> },
}

impl Profile {
    /// 時刻 `t` における値を返す。点が1つもない場合は `None`。
    pub fn value_at(&self, t: f64) -> Option<f64> {
        match self {
            Profile::Constant { value } => Some(*value),
            Profile::Linear { points } => linear_value(points, t),
            Profile::Step { points } => step_value(points, t),
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let points = match self {
            Profile::Constant { value } => {
                if !value.is_finite() {
                    return Err(ConfigError::InvalidScenario(format!(
                        "{} の値が有限ではありません",
                        name
                    )));
                }
                return Ok(());
            }
            Profile::Linear { points } | Profile::Step { points } => points,
        };

        if points.is_empty() {
            return Err(ConfigError::InvalidScenario(format!(
                "{} の点がありません",
                name
            )));
        }
        if points.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidScenario(format!(
                "{} に有限でない値があります",
                name
            )));
        }
        if points.windows(2).any(|w| w[1][0] <= w[0][0]) {
            return Err(ConfigError::InvalidScenario(format!(
                "{} の時刻が単調増加ではありません",
                name
            )));
        }
        Ok(())
    }
}

fn linear_value(points: &[[f64; 2]], t: f64) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    if t <= first[0] {
        return Some(first[1]);
    }
    if t >= last[0] {
        return Some(last[1]);
    }
    let value = points
        .windows(2)
        .find(|w| t < w[1][0])
        .map(|w| {
            let [t0, v0] = w[0];
            let [t1, v1] = w[1];
            v0 + (v1 - v0) * (t - t0) / (t1 - t0)
        })
        .unwrap_or(last[1]);
    Some(value)
}

fn step_value(points: &[[f64; 2]], t: f64) -> Option<f64> {
    points
        .iter()
        .take_while(|p| p[0] <= t)
        .last()
        .or_else(|| points.first())
        .map(|p| p[1])
}

/// 勾配の単位
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InclineUnit {
    /// 角度 (rad)
    #[default]
    Radians,
    /// 勾配比 (高さ/距離)。atan でラジアンに変換する。
    Slope,
}

/// 道路勾配のプロファイル
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InclineProfile {
    #[serde(default)]
    pub unit: InclineUnit,
    pub profile: Profile,
}

impl InclineProfile {
    /// 時刻 `t` における勾配角 (rad)。点が1つもない場合は `None`。
    pub fn angle_at(&self, t: f64) -> Option<f64> {
        let value = self.profile.value_at(t)?;
        let angle = match self.unit {
            InclineUnit::Radians => value,
            InclineUnit::Slope => value.atan(),
        };
        Some(angle)
    }
}

/// 状態を記録するタイミング
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordPoint {
    /// `step` を呼ぶ直前の状態を記録する
    #[default]
    PreStep,
    /// `step` を呼んだ直後の状態を記録する
    PostStep,
}

/// シミュレーションシナリオ
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Scenario {
    pub time_end: f64, // 終了時刻 (s)
    #[serde(default)]
    pub record: RecordPoint,
    pub throttle: Profile,
    pub incline: InclineProfile,
}

impl Scenario {
    /// 坂道登坂のデモシナリオ (20 s)
    ///
    /// スロットルは 0–5 s で 0.2→0.5、15 s まで 0.5 を保持し、20 s で 0 まで下げる。
    /// 勾配は 6.5 s まで 1/20、それ以降 1/10。
    pub fn ramp_climb() -> Self {
        Scenario {
            time_end: 20.0,
            record: RecordPoint::PreStep,
            throttle: Profile::Linear {
                points: vec![[0.0, 0.2], [5.0, 0.5], [15.0, 0.5], [20.0, 0.0]],
            },
            incline: InclineProfile {
                unit: InclineUnit::Slope,
                profile: Profile::Step {
                    points: vec![[0.0, 1.0 / 20.0], [6.5, 1.0 / 10.0]],
                },
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_end.is_finite() || self.time_end <= 0.0 {
            return Err(ConfigError::InvalidScenario(format!(
                "time_end が不正です: {}",
                self.time_end
            )));
        }
        self.throttle.validate("throttle")?;
        self.incline.profile.validate("incline")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(-1.0, 0.2)]
    #[case(0.0, 0.2)]
    #[case(2.5, 0.35)]
    #[case(5.0, 0.5)]
    #[case(10.0, 0.5)]
    #[case(17.5, 0.25)]
    #[case(20.0, 0.0)]
    #[case(25.0, 0.0)]
    fn test_linear_profile(#[case] t: f64, #[case] expected: f64) {
        let scenario = Scenario::ramp_climb();
        assert_relative_eq!(scenario.throttle.value_at(t).unwrap(), expected, epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.0, 0.05)]
    #[case(6.49, 0.05)]
    #[case(6.5, 0.1)]
    #[case(19.0, 0.1)]
    fn test_step_profile(#[case] t: f64, #[case] slope: f64) {
        let scenario = Scenario::ramp_climb();
        assert_relative_eq!(scenario.incline.angle_at(t).unwrap(), slope.atan(), epsilon = 1e-12);
    }

    #[test]
    fn test_step_profile_before_first_point() {
        let profile = Profile::Step {
            points: vec![[1.0, 3.0], [2.0, 4.0]],
        };
        assert_eq!(profile.value_at(0.0), Some(3.0));
        assert_eq!(profile.value_at(1.5), Some(3.0));
        assert_eq!(profile.value_at(2.0), Some(4.0));
    }

    /// 点が空のプロファイルは値を持たない。
    /// 0.0 などの代替値を返さずに `None` になることを確認する。
    #[test]
    fn test_empty_profile_has_no_value() {
        let linear = Profile::Linear { points: vec![] };
        let step = Profile::Step { points: vec![] };
        assert_eq!(linear.value_at(1.0), None);
        assert_eq!(step.value_at(1.0), None);

        let incline = InclineProfile {
            unit: InclineUnit::Slope,
            profile: Profile::Step { points: vec![] },
        };
        assert_eq!(incline.angle_at(0.0), None);
    }

    #[test]
    fn test_radians_unit_passes_through() {
        let incline = InclineProfile {
            unit: InclineUnit::Radians,
            profile: Profile::Constant { value: -0.2 },
        };
        assert_eq!(incline.angle_at(3.0), Some(-0.2));
    }

    #[test]
    fn test_ramp_climb_is_valid() {
        assert!(Scenario::ramp_climb().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unsorted_points() {
        let mut scenario = Scenario::ramp_climb();
        scenario.throttle = Profile::Linear {
            points: vec![[0.0, 0.1], [5.0, 0.2], [5.0, 0.3]],
        };
        assert!(matches!(
            scenario.validate(),
            Err(ConfigError::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_points_and_bad_time_end() {
        let mut scenario = Scenario::ramp_climb();
        scenario.incline.profile = Profile::Step { points: vec![] };
        assert!(scenario.validate().is_err());

        let mut scenario = Scenario::ramp_climb();
        scenario.time_end = 0.0;
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_deserialize_scenario_yaml() {
        let yaml = r#"
time_end: 10.0
record: post_step
throttle:
  kind: linear
  points: [[0.0, 0.1], [10.0, 0.6]]
incline:
  unit: slope
  profile:
    kind: constant
    value: 0.05
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.time_end, 10.0);
        assert_eq!(scenario.record, RecordPoint::PostStep);
        assert_relative_eq!(scenario.throttle.value_at(5.0).unwrap(), 0.35, epsilon = 1e-12);
        assert_relative_eq!(scenario.incline.angle_at(1.0).unwrap(), 0.05f64.atan(), epsilon = 1e-12);
    }

    #[test]
    fn test_deserialize_defaults() {
        let yaml = r#"
time_end: 1.0
throttle: { kind: constant, value: 0.3 }
incline:
  profile: { kind: constant, value: 0.0 }
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.record, RecordPoint::PreStep);
        assert_eq!(scenario.incline.unit, InclineUnit::Radians);
    }
}
