// src/main.rs

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, Level};

use vehsim::config::{Scenario, VehicleParameters};
use vehsim::simulation::csv::{setup_output, write_positions, write_trajectory};
use vehsim::simulation::framework::{initialize_model, run_scenario, summarize};
use vehsim::simulation::load_parameters::{load_scenario, load_vehicle_parameters};

/// 縦方向の車両ダイナミクスシミュレータ
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 車両パラメータのYAML（省略時は既定値）
    #[arg(long)]
    params: Option<PathBuf>,

    /// シナリオのYAML（省略時は坂道登坂のデモ）
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// 時刻と位置の出力先
    #[arg(short, long, default_value = "output/position.txt")]
    output: PathBuf,

    /// 全状態CSVの出力先
    #[arg(long)]
    trajectory: Option<PathBuf>,

    /// 位置出力の小数点以下の桁数
    #[arg(long, default_value_t = 6)]
    precision: usize,

    /// 詳細なログを出す
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {}", e);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    // 設定とシナリオの読み込み
    let params = match &args.params {
        Some(path) => load_vehicle_parameters(path)?,
        None => VehicleParameters::default(),
    };
    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => Scenario::ramp_climb(),
    };

    // シミュレーションの実行
    let mut model = initialize_model(params)?;
    let samples = run_scenario(&mut model, &scenario)?;

    if let Some(summary) = summarize(&samples) {
        info!(
            samples = summary.samples,
            final_time = summary.final_time,
            distance = summary.distance,
            final_velocity = summary.final_velocity,
            peak_velocity = summary.peak_velocity,
            peak_engine_speed = summary.peak_engine_speed,
            "simulation finished"
        );
    }

    // 出力
    let mut writer = setup_output(&args.output)?;
    write_positions(&mut writer, &samples, args.precision)?;
    info!("Wrote positions to {}", args.output.display());

    if let Some(path) = &args.trajectory {
        let mut writer = setup_output(path)?;
        write_trajectory(&mut writer, &samples)?;
        info!("Wrote trajectory to {}", path.display());
    }

    Ok(())
}
