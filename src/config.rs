//! TOML scenario files describing batches of shots to compare.
//!
//! ```toml
//! [defaults]
//! time_step = 0.005
//! atmosphere = "isa"
//!
//! [[shot]]
//! shape = "sphere"
//! speed = 40.0
//! angle = 35.0
//! mass = 0.145
//! area = 0.0042
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::atmosphere::AtmosphereModel;
use crate::error::SimulationError;
use crate::params::SimulationParameters;
use crate::shape::{resolve_drag_coefficient, ShapeError};

/// Errors that can occur while loading a scenario file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("shot {index}: {source}")]
    DragCoefficient {
        index: usize,
        #[source]
        source: ShapeError,
    },
    #[error("shot {index}: {source}")]
    InvalidShot {
        index: usize,
        #[source]
        source: SimulationError,
    },
    #[error("scenario contains no [[shot]] entries")]
    Empty,
}

/// One shot as written in a scenario file; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShotConfig {
    pub shape: Option<String>,
    pub speed: Option<f64>,
    pub angle: Option<f64>,
    pub mass: Option<f64>,
    pub drag_coefficient: Option<f64>,
    pub area: Option<f64>,
    pub time_step: Option<f64>,
    pub height: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub atmosphere: Option<AtmosphereModel>,
}

impl ShotConfig {
    /// Fill unset fields from `defaults`
    pub fn merged_over(&self, defaults: &ShotConfig) -> ShotConfig {
        ShotConfig {
            shape: self.shape.clone().or_else(|| defaults.shape.clone()),
            speed: self.speed.or(defaults.speed),
            angle: self.angle.or(defaults.angle),
            mass: self.mass.or(defaults.mass),
            drag_coefficient: self.drag_coefficient.or(defaults.drag_coefficient),
            area: self.area.or(defaults.area),
            time_step: self.time_step.or(defaults.time_step),
            height: self.height.or(defaults.height),
            wind_speed: self.wind_speed.or(defaults.wind_speed),
            wind_direction: self.wind_direction.or(defaults.wind_direction),
            atmosphere: self.atmosphere.or(defaults.atmosphere),
        }
    }

    /// Resolve into validated simulation parameters, falling back to built-in
    /// defaults for anything still unset.
    pub fn to_parameters(&self, index: usize) -> Result<SimulationParameters, ConfigError> {
        let base = SimulationParameters::default();
        let shape = self.shape.clone().unwrap_or(base.shape);

        let drag_coefficient = resolve_drag_coefficient(&shape, self.drag_coefficient)
            .map_err(|source| ConfigError::DragCoefficient { index, source })?;

        let params = SimulationParameters {
            initial_speed: self.speed.unwrap_or(base.initial_speed),
            launch_angle: self.angle.unwrap_or(base.launch_angle),
            mass: self.mass.unwrap_or(base.mass),
            drag_coefficient,
            reference_area: self.area.unwrap_or(base.reference_area),
            time_step: self.time_step.unwrap_or(base.time_step),
            initial_height: self.height.unwrap_or(base.initial_height),
            wind_speed: self.wind_speed.unwrap_or(base.wind_speed),
            wind_direction: self.wind_direction.unwrap_or(base.wind_direction),
            atmosphere: self.atmosphere.unwrap_or(base.atmosphere),
            shape,
        };
        params
            .validate()
            .map_err(|source| ConfigError::InvalidShot { index, source })?;

        Ok(params)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    #[serde(default)]
    defaults: ShotConfig,
    #[serde(default, rename = "shot")]
    shots: Vec<ShotConfig>,
}

/// Parse scenario TOML into one parameter set per `[[shot]]`, in file order
pub fn parse_scenario(contents: &str) -> Result<Vec<SimulationParameters>, ConfigError> {
    let file: ScenarioFile = toml::from_str(contents)?;
    if file.shots.is_empty() {
        return Err(ConfigError::Empty);
    }

    file.shots
        .iter()
        .enumerate()
        .map(|(i, shot)| shot.merged_over(&file.defaults).to_parameters(i + 1))
        .collect()
}

/// Load a scenario file from disk
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Vec<SimulationParameters>, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_scenario(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let shots = parse_scenario(
            r#"
            [defaults]
            time_step = 0.005
            atmosphere = "isa"
            mass = 0.2

            [[shot]]
            shape = "sphere"
            speed = 40.0
            angle = 35.0

            [[shot]]
            shape = "cube"
            speed = 40.0
            mass = 0.5
            atmosphere = "const1290"
            "#,
        )
        .unwrap();

        assert_eq!(shots.len(), 2);
        assert_eq!(shots[0].time_step, 0.005);
        assert_eq!(shots[0].atmosphere, AtmosphereModel::Isa);
        assert_eq!(shots[0].mass, 0.2);
        assert_eq!(shots[0].drag_coefficient, 0.47);

        assert_eq!(shots[1].mass, 0.5);
        assert_eq!(shots[1].drag_coefficient, 1.05);
        assert_eq!(shots[1].atmosphere, AtmosphereModel::Const1290);
        assert_eq!(shots[1].launch_angle, 45.0);
    }

    #[test]
    fn test_custom_shape_needs_coefficient() {
        let err = parse_scenario(
            r#"
            [[shot]]
            shape = "custom"
            speed = 10.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DragCoefficient {
                index: 1,
                source: ShapeError::MissingCustomCoefficient
            }
        ));

        let shots = parse_scenario(
            r#"
            [[shot]]
            shape = "custom"
            drag_coefficient = 0.3
            "#,
        )
        .unwrap();
        assert_eq!(shots[0].drag_coefficient, 0.3);
        assert_eq!(shots[0].shape, "custom");
    }

    #[test]
    fn test_invalid_shot_reports_index() {
        let err = parse_scenario(
            r#"
            [[shot]]
            speed = 10.0

            [[shot]]
            time_step = 0.0
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::InvalidShot { index, source } => {
                assert_eq!(index, 2);
                assert!(matches!(
                    source,
                    SimulationError::InvalidParameter { field: "time_step", .. }
                ));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_scenario(
            r#"
            [[shot]]
            velocity = 10.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_empty_scenario() {
        assert!(matches!(parse_scenario(""), Err(ConfigError::Empty)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_scenario("/nonexistent/scenario.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
