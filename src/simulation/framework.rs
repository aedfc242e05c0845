// src/simulation/framework.rs

use tracing::{debug, info, warn};

use crate::config::parameters::VehicleParameters;
use crate::config::scenario::{RecordPoint, Scenario};
use crate::models::VehicleModel;
use crate::simulation::error::SimulationError;
use crate::simulation::{ControlInput, RunSummary, Sample};

/// 車両モデルの初期化
pub fn initialize_model(params: VehicleParameters) -> Result<VehicleModel, SimulationError> {
    let model = VehicleModel::new(params)?;
    info!(
        sample_time = model.parameters().sample_time,
        mass = model.parameters().mass,
        "vehicle model initialized"
    );
    Ok(model)
}

/// 1回の走行で扱えるサンプル数の上限
pub const MAX_SAMPLES: u32 = u32::MAX;

/// シナリオから入力列を作る
///
/// サンプル i の時刻は t_i = i·sample_time、サンプル数は time_end / sample_time を丸めた値。
/// サンプル数が `MAX_SAMPLES` を超える場合はエラーになる。
///
/// # 引数
/// - `scenario`: シミュレーションシナリオ
/// - `sample_time`: サンプル時間 (s)
///
/// # 戻り値
/// - 時刻順の入力列
pub fn build_inputs(
    scenario: &Scenario,
    sample_time: f64,
) -> Result<Vec<ControlInput>, SimulationError> {
    scenario.validate()?;
    if !sample_time.is_finite() || sample_time <= 0.0 {
        return Err(SimulationError::InvalidScenario(format!(
            "sample_time が不正です: {}",
            sample_time
        )));
    }

    let count = (scenario.time_end / sample_time).round();
    if !count.is_finite() || count > MAX_SAMPLES as f64 {
        return Err(SimulationError::InvalidScenario(format!(
            "サンプル数が多すぎます: time_end = {}, sample_time = {}",
            scenario.time_end, sample_time
        )));
    }

    (0..count as usize)
        .map(|i| {
            let time = i as f64 * sample_time;
            let throttle = scenario.throttle.value_at(time);
            let incline = scenario.incline.angle_at(time);
            match (throttle, incline) {
                (Some(throttle), Some(incline)) => Ok(ControlInput {
                    time,
                    throttle,
                    incline,
                }),
                _ => Err(SimulationError::InvalidScenario(format!(
                    "時刻 {} の入力値がありません",
                    time
                ))),
            }
        })
        .collect()
}

/// 入力列でモデルを駆動する
///
/// 走行前にモデルを初期状態に戻し、入力ごとに `step` を1回呼ぶ。
/// `record` で `step` の前後どちらの状態を記録するかを選ぶ。
pub fn run(model: &mut VehicleModel, inputs: &[ControlInput], record: RecordPoint) -> Vec<Sample> {
    model.reset();

    let mut warned = false;
    let mut samples = Vec::with_capacity(inputs.len());
    for input in inputs {
        let before = model.state();
        model.step(input.throttle, input.incline);
        let after = model.state();

        let state = match record {
            RecordPoint::PreStep => before,
            RecordPoint::PostStep => after,
        };
        if !warned && !(after.x.is_finite() && after.v.is_finite() && after.w_e.is_finite()) {
            warn!(time = input.time, "state is no longer finite");
            warned = true;
        }

        samples.push(Sample {
            time: input.time,
            throttle: input.throttle,
            incline: input.incline,
            state,
        });
    }

    debug!(samples = samples.len(), "run finished");
    samples
}

/// シナリオを1回実行する
pub fn run_scenario(
    model: &mut VehicleModel,
    scenario: &Scenario,
) -> Result<Vec<Sample>, SimulationError> {
    let inputs = build_inputs(scenario, model.parameters().sample_time)?;
    info!(
        samples = inputs.len(),
        time_end = scenario.time_end,
        "running scenario"
    );
    Ok(run(model, &inputs, scenario.record))
}

/// 記録から走行結果の要約を作る。記録が空なら `None`。
pub fn summarize(samples: &[Sample]) -> Option<RunSummary> {
    let first = samples.first()?;
    let last = samples.last()?;

    let peak_velocity = samples
        .iter()
        .map(|s| s.state.v)
        .fold(f64::NEG_INFINITY, f64::max);
    let peak_engine_speed = samples
        .iter()
        .map(|s| s.state.w_e)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(RunSummary {
        samples: samples.len(),
        final_time: last.time,
        distance: last.state.x - first.state.x,
        final_velocity: last.state.v,
        peak_velocity,
        peak_engine_speed,
    })
}
