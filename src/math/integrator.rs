// src/math/integrator.rs

/// 固定刻みのオイラー法による1ステップ積分
///
/// 車両モデルでは、前ステップの終わりに求めた微分値を渡すことで
/// 半陰的オイラー法（微分値を1ステップ遅れで適用する方式）として使う。
///
/// # 引数
/// - `current_y`: 現在のyの値
/// - `derivative`: 適用する微分値 dy/dt
/// - `dt`: 時間ステップ（秒）
///
/// # 戻り値
/// - 次のyの値
pub fn euler_step(current_y: f64, derivative: f64, dt: f64) -> f64 {
    current_y + derivative * dt
}
