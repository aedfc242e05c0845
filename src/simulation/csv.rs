// src/simulation/csv.rs

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::simulation::error::SimulationError;
use crate::simulation::Sample;

/// 出力ファイルの作成（親ディレクトリがなければ作る）
pub fn setup_output(path: impl AsRef<Path>) -> Result<BufWriter<File>, SimulationError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let output_file = File::create(path)?;
    Ok(BufWriter::new(output_file))
}

/// 位置出力の1行を作成する (`"{t}, {x}"`、固定小数点)
pub fn format_position_row(time: f64, position: f64, precision: usize) -> String {
    format!("{:.*}, {:.*}\n", precision, time, precision, position)
}

/// 時刻と位置の2列を書き込む。ヘッダーは書かない。
pub fn write_positions<W: Write>(
    writer: &mut W,
    samples: &[Sample],
    precision: usize,
) -> Result<(), std::io::Error> {
    for sample in samples {
        let row = format_position_row(sample.time, sample.state.x, precision);
        writer.write_all(row.as_bytes())?;
    }
    writer.flush()
}

/// 全状態CSVのヘッダーの書き込み
pub fn write_trajectory_header<W: Write>(writer: &mut W) -> Result<(), std::io::Error> {
    writer.write_all(
        b"time(s),throttle,incline(rad),x(m),v(m/s),a(m/s^2),w_e(rad/s),w_e_dot(rad/s^2)\n",
    )
}

/// 全状態CSV行の作成
pub fn create_trajectory_row(sample: &Sample) -> String {
    let s = &sample.state;
    format!(
        "{},{},{},{},{},{},{},{}\n",
        sample.time, sample.throttle, sample.incline, s.x, s.v, s.a, s.w_e, s.w_e_dot
    )
}

/// 全状態CSVの書き込み
pub fn write_trajectory<W: Write>(writer: &mut W, samples: &[Sample]) -> Result<(), std::io::Error> {
    write_trajectory_header(writer)?;
    for sample in samples {
        writer.write_all(create_trajectory_row(sample).as_bytes())?;
    }
    writer.flush()
}
