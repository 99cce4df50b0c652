//! Error types for integration and result storage.

use thiserror::Error;

use crate::params::Fingerprint;

/// Failures raised before or during trajectory integration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A parameter failed validation; no integration work was done
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: String,
    },

    /// The caller raised the cancellation flag mid-flight
    #[error("integration cancelled after {steps} steps")]
    Cancelled { steps: u64 },
}

impl SimulationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

/// Reasons a trajectory is turned away by the result store.
///
/// Both variants leave the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("an identical simulation is already stored ({fingerprint})")]
    Duplicate { fingerprint: Fingerprint },

    #[error("result store is full ({capacity} trajectories); clear it to add more")]
    CapacityExceeded { capacity: usize },
}

impl StoreError {
    /// Machine-readable rejection reason: `"duplicate"` or `"capacity"`
    pub fn reason(&self) -> &'static str {
        match self {
            StoreError::Duplicate { .. } => "duplicate",
            StoreError::CapacityExceeded { .. } => "capacity",
        }
    }
}
