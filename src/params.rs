//! Simulation input parameters and their canonical fingerprint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::atmosphere::AtmosphereModel;
use crate::error::SimulationError;

/// Inputs for a single trajectory computation.
///
/// All quantities are SI; angles are given in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub initial_speed: f64,       // m/s, > 0
    pub launch_angle: f64,        // degrees above horizontal
    pub mass: f64,                // kg, > 0
    pub drag_coefficient: f64,    // dimensionless, >= 0
    pub reference_area: f64,      // m², > 0
    pub time_step: f64,           // seconds, > 0
    pub initial_height: f64,      // meters, >= 0
    pub wind_speed: f64,          // m/s
    pub wind_direction: f64,      // degrees, 0 = headwind along the line of fire
    pub atmosphere: AtmosphereModel,
    pub shape: String,            // display-only label
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_speed: 50.0,
            launch_angle: 45.0,
            mass: 1.0,
            drag_coefficient: 0.47,
            reference_area: 0.01,
            time_step: 0.01,
            initial_height: 0.0,
            wind_speed: 0.0,
            wind_direction: 0.0,
            atmosphere: AtmosphereModel::default(),
            shape: "sphere".to_string(),
        }
    }
}

impl SimulationParameters {
    /// Check every field before any integration work is attempted.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let finite_fields = [
            ("initial_speed", self.initial_speed),
            ("launch_angle", self.launch_angle),
            ("mass", self.mass),
            ("drag_coefficient", self.drag_coefficient),
            ("reference_area", self.reference_area),
            ("time_step", self.time_step),
            ("initial_height", self.initial_height),
            ("wind_speed", self.wind_speed),
            ("wind_direction", self.wind_direction),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(SimulationError::invalid(field, format!("{} is not a finite number", value)));
            }
        }

        let positive_fields = [
            ("initial_speed", self.initial_speed),
            ("mass", self.mass),
            ("reference_area", self.reference_area),
            ("time_step", self.time_step),
        ];
        for (field, value) in positive_fields {
            if value <= 0.0 {
                return Err(SimulationError::invalid(field, format!("must be > 0, got {}", value)));
            }
        }

        if self.drag_coefficient < 0.0 {
            return Err(SimulationError::invalid(
                "drag_coefficient",
                format!("must be >= 0, got {}", self.drag_coefficient),
            ));
        }
        if self.initial_height < 0.0 {
            return Err(SimulationError::invalid(
                "initial_height",
                format!("must be >= 0, got {}", self.initial_height),
            ));
        }

        Ok(())
    }

    /// Canonical encoding of the physically relevant fields.
    ///
    /// The shape label is display-only and does not participate.
    pub fn fingerprint(&self) -> Fingerprint {
        let fields = [
            canonical(self.time_step),
            canonical(self.drag_coefficient),
            self.atmosphere.as_str().to_string(),
            canonical(self.wind_speed),
            canonical(self.wind_direction),
            canonical(self.initial_speed),
            canonical(self.launch_angle),
            canonical(self.mass),
            canonical(self.reference_area),
            canonical(self.initial_height),
        ];
        Fingerprint(fields.join("|"))
    }
}

// Shortest round-trip representation; folds -0.0 into 0.0
fn canonical(value: f64) -> String {
    format!("{}", value + 0.0)
}

/// Deterministic identity of a parameter set, used to detect repeat runs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(SimulationParameters::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_time_step() {
        for dt in [0.0, -0.01] {
            let params = SimulationParameters { time_step: dt, ..Default::default() };
            match params.validate() {
                Err(SimulationError::InvalidParameter { field, .. }) => assert_eq!(field, "time_step"),
                other => panic!("expected time_step rejection, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_rejects_nan_and_infinite_fields() {
        let nan_step = SimulationParameters { time_step: f64::NAN, ..Default::default() };
        assert!(nan_step.validate().is_err());

        let inf_wind = SimulationParameters { wind_speed: f64::INFINITY, ..Default::default() };
        match inf_wind.validate() {
            Err(SimulationError::InvalidParameter { field, .. }) => assert_eq!(field, "wind_speed"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_positive_physical_fields() {
        let cases = [
            SimulationParameters { initial_speed: 0.0, ..Default::default() },
            SimulationParameters { mass: -1.0, ..Default::default() },
            SimulationParameters { reference_area: 0.0, ..Default::default() },
            SimulationParameters { drag_coefficient: -0.1, ..Default::default() },
            SimulationParameters { initial_height: -2.0, ..Default::default() },
        ];
        for params in cases {
            assert!(params.validate().is_err(), "{:?} should be rejected", params);
        }
    }

    #[test]
    fn test_zero_drag_and_negative_angle_allowed() {
        let params = SimulationParameters {
            drag_coefficient: 0.0,
            launch_angle: -10.0,
            wind_speed: -3.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = SimulationParameters::default();
        let b = SimulationParameters::default();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_field_order() {
        let params = SimulationParameters {
            initial_speed: 20.0,
            launch_angle: 45.0,
            mass: 0.5,
            drag_coefficient: 0.47,
            reference_area: 0.002,
            time_step: 0.01,
            initial_height: 1.5,
            wind_speed: 3.0,
            wind_direction: 90.0,
            atmosphere: AtmosphereModel::Isa,
            shape: "sphere".to_string(),
        };
        assert_eq!(
            params.fingerprint().as_str(),
            "0.01|0.47|isa|3|90|20|45|0.5|0.002|1.5"
        );
    }

    #[test]
    fn test_fingerprint_changes_with_every_field() {
        let base = SimulationParameters::default();
        let variants = [
            SimulationParameters { time_step: 0.02, ..base.clone() },
            SimulationParameters { drag_coefficient: 0.5, ..base.clone() },
            SimulationParameters { atmosphere: AtmosphereModel::Isa, ..base.clone() },
            SimulationParameters { wind_speed: 1.0, ..base.clone() },
            SimulationParameters { wind_direction: 180.0, ..base.clone() },
            SimulationParameters { initial_speed: 51.0, ..base.clone() },
            SimulationParameters { launch_angle: 30.0, ..base.clone() },
            SimulationParameters { mass: 2.0, ..base.clone() },
            SimulationParameters { reference_area: 0.02, ..base.clone() },
            SimulationParameters { initial_height: 10.0, ..base.clone() },
        ];
        for variant in &variants {
            assert_ne!(variant.fingerprint(), base.fingerprint(), "{:?}", variant);
        }
    }

    #[test]
    fn test_fingerprint_ignores_shape_label() {
        let base = SimulationParameters::default();
        let relabelled = SimulationParameters { shape: "cannonball".to_string(), ..base.clone() };
        assert_eq!(base.fingerprint(), relabelled.fingerprint());
    }

    #[test]
    fn test_fingerprint_folds_negative_zero() {
        let positive = SimulationParameters { wind_direction: 0.0, ..Default::default() };
        let negative = SimulationParameters { wind_direction: -0.0, ..Default::default() };
        assert_eq!(positive.fingerprint(), negative.fingerprint());
    }
}
