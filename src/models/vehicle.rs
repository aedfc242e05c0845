// src/models/vehicle.rs

use tracing::warn;

use crate::config::parameters::VehicleParameters;
use crate::math::euler_step;
use crate::models::error::ModelError;

/// 車両の状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub x: f64,       // 位置 (m)
    pub v: f64,       // 速度 (m/s)
    pub a: f64,       // 加速度 (m/s²)
    pub w_e: f64,     // エンジン角速度 (rad/s)
    pub w_e_dot: f64, // エンジン角加速度 (rad/s²)
}

impl Default for VehicleState {
    /// 初期状態: x=0, v=5, a=0, ω_e=100, ω̇_e=0
    fn default() -> Self {
        VehicleState {
            x: 0.0,
            v: 5.0,
            a: 0.0,
            w_e: 100.0,
            w_e_dot: 0.0,
        }
    }
}

/// 勾配による重力成分を計算する純粋関数
///
/// # 引数
/// - `params`: 車両パラメータ
/// - `incline`: 道路勾配角（rad、符号付き）
///
/// # 戻り値
/// - 重力による負荷力 (N)
pub fn gravity_force(params: &VehicleParameters, incline: f64) -> f64 {
    params.mass * params.gravity * incline.sin()
}

/// 空気抵抗力を計算する純粋関数 (F_aero = c_a·v²)
pub fn aero_drag_force(params: &VehicleParameters, velocity: f64) -> f64 {
    params.aero_drag * velocity * velocity
}

/// 転がり抵抗を計算する純粋関数 (R_x = c_r1·v)
///
/// 前進のみを想定しているため絶対値は取らない。
pub fn rolling_resistance_force(params: &VehicleParameters, velocity: f64) -> f64 {
    params.rolling_resistance * velocity
}

/// 走行抵抗の合計を計算する純粋関数
///
/// # 引数
/// - `params`: 車両パラメータ
/// - `velocity`: 現在の速度 (m/s)
/// - `incline`: 道路勾配角 (rad)
///
/// # 戻り値
/// - F_load = F_g + F_aero + R_x (N)
pub fn load_force(params: &VehicleParameters, velocity: f64, incline: f64) -> f64 {
    let f_g = gravity_force(params, incline);
    let f_aero = aero_drag_force(params, velocity);
    let r_x = rolling_resistance_force(params, velocity);
    f_g + f_aero + r_x
}

/// 縦スリップ率を計算する純粋関数
///
/// v = 0 のときは浮動小数点の除算結果（±∞ または NaN）をそのまま返す。
///
/// # 引数
/// - `params`: 車両パラメータ
/// - `engine_speed`: エンジン角速度 (rad/s)
/// - `velocity`: 車速 (m/s)
///
/// # 戻り値
/// - s = (GR·ω_e·r_e − v) / v
pub fn slip_ratio(params: &VehicleParameters, engine_speed: f64, velocity: f64) -> f64 {
    let wheel_speed = params.gear_ratio * engine_speed * params.wheel_radius;
    (wheel_speed - velocity) / velocity
}

/// タイヤ縦力を計算する純粋関数
///
/// |s| < 1 なら c·s、それ以外（NaN を含む）は常に +F_max を返す。
/// 負側の飽和も +F_max になる点に注意。
pub fn tire_force(params: &VehicleParameters, slip: f64) -> f64 {
    if slip.abs() < 1.0 {
        params.tire_stiffness * slip
    } else {
        params.max_tire_force
    }
}

/// エンジントルクを計算する純粋関数
///
/// # 引数
/// - `params`: 車両パラメータ
/// - `throttle`: スロットル開度（通常は [0, 1]、範囲外もそのまま計算する）
/// - `engine_speed`: エンジン角速度 (rad/s)
///
/// # 戻り値
/// - T_e = throttle·(a0 + a1·ω_e + a2·ω_e²) (N·m)
pub fn engine_torque(params: &VehicleParameters, throttle: f64, engine_speed: f64) -> f64 {
    throttle * (params.a0 + params.a1 * engine_speed + params.a2 * engine_speed * engine_speed)
}

/// 縦方向の車両モデル
///
/// パラメータは生成時に固定され、状態は `step` によってのみ更新される。
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleModel {
    params: VehicleParameters,
    state: VehicleState,
}

impl Default for VehicleModel {
    fn default() -> Self {
        VehicleModel {
            params: VehicleParameters::default(),
            state: VehicleState::default(),
        }
    }
}

impl VehicleModel {
    /// パラメータを検証してモデルを生成する。状態は初期値になる。
    pub fn new(params: VehicleParameters) -> Result<Self, ModelError> {
        Self::with_state(params, VehicleState::default())
    }

    /// 任意の状態からモデルを生成する
    pub fn with_state(params: VehicleParameters, state: VehicleState) -> Result<Self, ModelError> {
        params.validate()?;
        Ok(VehicleModel { params, state })
    }

    pub fn parameters(&self) -> &VehicleParameters {
        &self.params
    }

    pub fn state(&self) -> VehicleState {
        self.state
    }

    pub fn position(&self) -> f64 {
        self.state.x
    }

    pub fn velocity(&self) -> f64 {
        self.state.v
    }

    pub fn acceleration(&self) -> f64 {
        self.state.a
    }

    pub fn engine_speed(&self) -> f64 {
        self.state.w_e
    }

    pub fn engine_acceleration(&self) -> f64 {
        self.state.w_e_dot
    }

    /// 状態を初期値に戻す。パラメータは変更しない。
    pub fn reset(&mut self) {
        self.state = VehicleState::default();
    }

    /// 1サンプル時間だけ状態を進める
    ///
    /// 位置・速度・エンジン角速度は前ステップで求めた微分値で更新し、
    /// 新しい微分値は次のステップで使う。負荷力・タイヤ力・トルクは
    /// すべて更新前の状態から計算する。この順序を変えると軌跡が変わる。
    ///
    /// 入力の範囲チェックは行わない。v = 0 ではスリップ率が非有限になり、
    /// タイヤ力は飽和側 (+F_max) になる。
    ///
    /// # 引数
    /// - `throttle`: スロットル開度 [0, 1]
    /// - `incline`: 道路勾配角 (rad)
    pub fn step(&mut self, throttle: f64, incline: f64) {
        let p = &self.params;
        let dt = p.sample_time;
        let s = &mut self.state;

        let f_load = load_force(p, s.v, incline);

        let slip = slip_ratio(p, s.w_e, s.v);
        if !slip.is_finite() {
            warn!(velocity = s.v, slip, "slip ratio is not finite, tire force saturates");
        }
        let f_x = tire_force(p, slip);

        s.x = euler_step(s.x, s.v, dt);
        s.v = euler_step(s.v, s.a, dt);

        let t_e = engine_torque(p, throttle, s.w_e);
        s.w_e = euler_step(s.w_e, s.w_e_dot, dt);

        s.w_e_dot = (t_e - p.gear_ratio * p.wheel_radius * f_load) / p.inertia;
        s.a = (f_x - f_load) / p.mass;
    }

    /// 停止状態でのスリップ率計算をエラーとして扱う `step`
    ///
    /// スリップ率が有限でない場合は状態を変更せずに
    /// `ModelError::StandstillSlip` を返す。
    pub fn checked_step(&mut self, throttle: f64, incline: f64) -> Result<(), ModelError> {
        let slip = slip_ratio(&self.params, self.state.w_e, self.state.v);
        if self.state.v == 0.0 || !slip.is_finite() {
            return Err(ModelError::StandstillSlip {
                velocity: self.state.v,
            });
        }
        self.step(throttle, incline);
        Ok(())
    }
}
