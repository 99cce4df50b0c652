//! Drag coefficient presets for common body shapes

use thiserror::Error;

/// Shape labels with a tabulated drag coefficient (subsonic, Re ~ 10^4 - 10^5)
pub const SHAPE_PRESETS: &[(&str, f64)] = &[
    ("sphere", 0.47),
    ("half-sphere", 0.42),
    ("cone", 0.50),
    ("cube", 1.05),
    ("angled-cube", 0.80),
    ("long-cylinder", 0.82),
    ("short-cylinder", 1.15),
    ("streamlined-body", 0.04),
    ("streamlined-half-body", 0.09),
    ("vacuum", 0.0),
];

/// Label for shapes whose coefficient must be supplied explicitly
pub const CUSTOM_SHAPE: &str = "custom";

fn normalize(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Look up the preset drag coefficient for a shape label
pub fn preset_drag_coefficient(label: &str) -> Option<f64> {
    let key = normalize(label);
    SHAPE_PRESETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, cd)| *cd)
}

/// Reasons a drag coefficient cannot be resolved for a shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("drag coefficient must be a finite number > 0, got {value}")]
    InvalidCoefficient { value: f64 },
    #[error("shape 'custom' requires an explicit drag coefficient")]
    MissingCustomCoefficient,
    #[error("unknown shape '{label}' and no drag coefficient given")]
    UnknownShape { label: String },
}

/// Resolve the drag coefficient for a shot.
///
/// An explicit coefficient wins over the preset and must be a finite,
/// positive number. Without one, the shape label must name a preset;
/// `vacuum` is the preset for drag-free runs.
pub fn resolve_drag_coefficient(label: &str, explicit: Option<f64>) -> Result<f64, ShapeError> {
    match explicit {
        Some(cd) if cd.is_finite() && cd > 0.0 => Ok(cd),
        Some(cd) => Err(ShapeError::InvalidCoefficient { value: cd }),
        None => preset_drag_coefficient(label).ok_or_else(|| {
            if normalize(label) == CUSTOM_SHAPE {
                ShapeError::MissingCustomCoefficient
            } else {
                ShapeError::UnknownShape { label: label.to_string() }
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup() {
        assert_eq!(preset_drag_coefficient("sphere"), Some(0.47));
        assert_eq!(preset_drag_coefficient("cube"), Some(1.05));
        assert_eq!(preset_drag_coefficient("streamlined-body"), Some(0.04));
        assert_eq!(preset_drag_coefficient("frisbee"), None);
    }

    #[test]
    fn test_preset_lookup_normalizes_label() {
        assert_eq!(preset_drag_coefficient("Half Sphere"), Some(0.42));
        assert_eq!(preset_drag_coefficient("LONG_CYLINDER"), Some(0.82));
        assert_eq!(preset_drag_coefficient("  angled - cube "), Some(0.80));
    }

    #[test]
    fn test_explicit_coefficient_overrides_preset() {
        assert_eq!(resolve_drag_coefficient("sphere", Some(0.3)), Ok(0.3));
        assert_eq!(resolve_drag_coefficient("custom", Some(1.3)), Ok(1.3));
    }

    #[test]
    fn test_custom_requires_coefficient() {
        assert_eq!(
            resolve_drag_coefficient("custom", None),
            Err(ShapeError::MissingCustomCoefficient)
        );
        assert!(matches!(
            resolve_drag_coefficient("blob", None),
            Err(ShapeError::UnknownShape { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_explicit_coefficient() {
        assert!(resolve_drag_coefficient("sphere", Some(f64::NAN)).is_err());
        assert!(resolve_drag_coefficient("sphere", Some(-1.0)).is_err());
        assert!(resolve_drag_coefficient("sphere", Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_custom_coefficient_must_be_positive() {
        assert_eq!(
            resolve_drag_coefficient("custom", Some(0.0)),
            Err(ShapeError::InvalidCoefficient { value: 0.0 })
        );
        assert!(resolve_drag_coefficient("custom", Some(-0.5)).is_err());
    }

    #[test]
    fn test_vacuum_preset_is_drag_free() {
        assert_eq!(resolve_drag_coefficient("vacuum", None), Ok(0.0));
    }
}
