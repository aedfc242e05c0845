// src/simulation/load_parameters.rs

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml::from_reader;
use tracing::info;

use crate::config::{parameters::VehicleParameters, scenario::Scenario};
use crate::simulation::error::SimulationError;

/// YAMLファイルを読み込む共通関数
pub fn parse_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SimulationError> {
    let file = File::open(path.as_ref())?;
    let data: T = from_reader(file)?;
    Ok(data)
}

/// 車両パラメータの読み込み
pub fn load_vehicle_parameters(
    path: impl AsRef<Path>,
) -> Result<VehicleParameters, SimulationError> {
    let path = path.as_ref();
    info!("Loading vehicle parameters from {}", path.display());
    let params: VehicleParameters = parse_yaml(path)?;
    params.validate()?;
    Ok(params)
}

/// シナリオの読み込み
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, SimulationError> {
    let path = path.as_ref();
    info!("Loading scenario from {}", path.display());
    let scenario: Scenario = parse_yaml(path)?;
    scenario.validate()?;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_vehicle_parameters() {
        let file = yaml_file("mass: 1800.0\ngear_ratio: 0.4\n");
        let params = load_vehicle_parameters(file.path()).unwrap();
        assert_eq!(params.mass, 1800.0);
        assert_eq!(params.gear_ratio, 0.4);
        assert_eq!(params.inertia, 10.0);
    }

    #[test]
    fn test_load_vehicle_parameters_rejects_invalid_values() {
        let file = yaml_file("inertia: 0.0\n");
        match load_vehicle_parameters(file.path()) {
            Err(SimulationError::Model(ModelError::InvalidParameter { name, .. })) => {
                assert_eq!(name, "inertia")
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_load_scenario() {
        let file = yaml_file(
            "time_end: 5.0\nthrottle:\n  kind: constant\n  value: 0.2\nincline:\n  unit: slope\n  profile:\n    kind: step\n    points: [[0.0, 0.05], [2.0, 0.1]]\n",
        );
        let scenario = load_scenario(file.path()).unwrap();
        assert_eq!(scenario.time_end, 5.0);
        assert_eq!(scenario.throttle.value_at(1.0), Some(0.2));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_scenario("does/not/exist.yaml");
        assert!(matches!(result, Err(SimulationError::Io(_))));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let file = yaml_file("time_end: [not a number\n");
        assert!(matches!(
            load_scenario(file.path()),
            Err(SimulationError::Yaml(_))
        ));
    }
}
