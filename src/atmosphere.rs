//! Air density models.
//!
//! Three selectable models are supported: two constant-density atmospheres and a
//! two-branch approximation of the International Standard Atmosphere (ISA).
//! Density lookups are pure and total: every real altitude maps to a finite,
//! non-negative density for every model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    AIR_DENSITY_COLD, AIR_DENSITY_SEA_LEVEL, ISA_DENSITY_EXPONENT, ISA_LAPSE_RATE,
    ISA_SEA_LEVEL_TEMP_K, ISA_STRATOSPHERE_DECAY, ISA_TROPOPAUSE_DENSITY, ISA_TROPOPAUSE_M,
};

/// Atmosphere density model selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AtmosphereModel {
    /// Constant 1.225 kg/m³ at every altitude
    #[default]
    #[serde(rename = "const1225", alias = "constant-1.225")]
    Const1225,
    /// Constant 1.29 kg/m³ at every altitude
    #[serde(rename = "const1290", alias = "constant-1.29")]
    Const1290,
    /// Troposphere lapse-rate model below 11 km, exponential decay above
    #[serde(rename = "isa", alias = "ISA")]
    Isa,
}

impl AtmosphereModel {
    pub const ALL: [AtmosphereModel; 3] = [
        AtmosphereModel::Const1225,
        AtmosphereModel::Const1290,
        AtmosphereModel::Isa,
    ];

    /// Short identifier used on the command line, in config files and in fingerprints
    pub fn as_str(&self) -> &'static str {
        match self {
            AtmosphereModel::Const1225 => "const1225",
            AtmosphereModel::Const1290 => "const1290",
            AtmosphereModel::Isa => "isa",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AtmosphereModel::Const1225 => "constant 1.225 kg/m³",
            AtmosphereModel::Const1290 => "constant 1.29 kg/m³",
            AtmosphereModel::Isa => "standard atmosphere (troposphere + stratosphere)",
        }
    }

    /// Air density at `altitude_m` under this model
    #[inline]
    pub fn density(&self, altitude_m: f64) -> f64 {
        density(altitude_m, *self)
    }
}

impl fmt::Display for AtmosphereModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an atmosphere model name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown atmosphere model '{0}' (expected const1225, const1290 or isa)")]
pub struct UnknownAtmosphereModel(pub String);

impl FromStr for AtmosphereModel {
    type Err = UnknownAtmosphereModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "const1225" | "constant-1.225" | "1.225" => Ok(AtmosphereModel::Const1225),
            "const1290" | "constant-1.29" | "1.29" => Ok(AtmosphereModel::Const1290),
            "isa" => Ok(AtmosphereModel::Isa),
            other => Err(UnknownAtmosphereModel(other.to_string())),
        }
    }
}

/// Air density in kg/m³ at the given altitude.
///
/// # Arguments
/// * `altitude_m` - Altitude above ground in meters; negative values are
///   treated as ground level by the ISA model and ignored by the constant ones
/// * `model` - Density model to evaluate
pub fn density(altitude_m: f64, model: AtmosphereModel) -> f64 {
    match model {
        AtmosphereModel::Const1225 => AIR_DENSITY_SEA_LEVEL,
        AtmosphereModel::Const1290 => AIR_DENSITY_COLD,
        AtmosphereModel::Isa => isa_density(altitude_m),
    }
}

/// Two-branch standard atmosphere density.
///
/// The branches are not solved as a boundary-value problem, so they meet at
/// the tropopause only to within about 0.01%.
fn isa_density(altitude_m: f64) -> f64 {
    let altitude = altitude_m.max(0.0);

    if altitude <= ISA_TROPOPAUSE_M {
        let temperature = ISA_SEA_LEVEL_TEMP_K - ISA_LAPSE_RATE * altitude;
        AIR_DENSITY_SEA_LEVEL * (temperature / ISA_SEA_LEVEL_TEMP_K).powf(ISA_DENSITY_EXPONENT)
    } else {
        ISA_TROPOPAUSE_DENSITY * (-ISA_STRATOSPHERE_DECAY * (altitude - ISA_TROPOPAUSE_M)).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_models_are_exact() {
        assert_eq!(density(0.0, AtmosphereModel::Const1225), 1.225);
        assert_eq!(density(0.0, AtmosphereModel::Const1290), 1.29);

        // Altitude has no effect on the constant models
        assert_eq!(density(25_000.0, AtmosphereModel::Const1225), 1.225);
        assert_eq!(density(-300.0, AtmosphereModel::Const1290), 1.29);
    }

    #[test]
    fn test_isa_sea_level() {
        let rho = density(0.0, AtmosphereModel::Isa);
        assert!((rho - 1.225).abs() < 1e-12);
    }

    #[test]
    fn test_isa_negative_altitude_clamped() {
        assert_eq!(
            density(-500.0, AtmosphereModel::Isa),
            density(0.0, AtmosphereModel::Isa)
        );
    }

    #[test]
    fn test_isa_monotonic_troposphere() {
        let mut previous = density(0.0, AtmosphereModel::Isa);
        for step in 1..=110 {
            let rho = density(step as f64 * 100.0, AtmosphereModel::Isa);
            assert!(rho < previous, "density should fall at {} m", step * 100);
            previous = rho;
        }
    }

    #[test]
    fn test_isa_monotonic_stratosphere() {
        let mut previous = density(11_000.5, AtmosphereModel::Isa);
        for step in 1..=100 {
            let rho = density(11_000.5 + step as f64 * 500.0, AtmosphereModel::Isa);
            assert!(rho < previous);
            previous = rho;
        }
    }

    #[test]
    fn test_isa_branches_agree_at_tropopause() {
        let troposphere = density(ISA_TROPOPAUSE_M, AtmosphereModel::Isa);
        let relative = (troposphere - ISA_TROPOPAUSE_DENSITY).abs() / ISA_TROPOPAUSE_DENSITY;
        assert!(relative < 1e-3, "relative mismatch {}", relative);

        let just_above = density(ISA_TROPOPAUSE_M + 1e-6, AtmosphereModel::Isa);
        assert!((just_above - troposphere).abs() / troposphere < 1e-3);
    }

    #[test]
    fn test_isa_is_total() {
        for altitude in [f64::MIN, -1.0, 0.0, 5_000.0, 11_000.0, 1.0e6, f64::MAX] {
            let rho = density(altitude, AtmosphereModel::Isa);
            assert!(rho.is_finite());
            assert!(rho >= 0.0);
        }
    }

    #[test]
    fn test_model_from_str() {
        assert_eq!("isa".parse::<AtmosphereModel>(), Ok(AtmosphereModel::Isa));
        assert_eq!("ISA".parse::<AtmosphereModel>(), Ok(AtmosphereModel::Isa));
        assert_eq!("const1225".parse::<AtmosphereModel>(), Ok(AtmosphereModel::Const1225));
        assert_eq!("constant-1.29".parse::<AtmosphereModel>(), Ok(AtmosphereModel::Const1290));
        assert_eq!(
            "Mars".parse::<AtmosphereModel>(),
            Err(UnknownAtmosphereModel("mars".to_string()))
        );
        assert!("".parse::<AtmosphereModel>().is_err());
    }

    #[test]
    fn test_model_display_round_trips() {
        for model in AtmosphereModel::ALL {
            assert_eq!(model.to_string().parse::<AtmosphereModel>(), Ok(model));
        }
    }
}
