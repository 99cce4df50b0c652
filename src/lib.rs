//! # Projectile Lab
//!
//! Point-mass trajectory integration under gravity, quadratic drag and
//! horizontal wind, with selectable atmosphere density models and a bounded,
//! deduplicated store for comparing computed trajectories.

// Re-export the main types and functions
pub use atmosphere::{density, AtmosphereModel, UnknownAtmosphereModel};
pub use config::{load_scenario, parse_scenario, ConfigError, ShotConfig};
pub use error::{SimulationError, StoreError};
pub use params::{Fingerprint, SimulationParameters};
pub use result_store::{Color, ResultStore};
pub use shape::{preset_drag_coefficient, resolve_drag_coefficient, ShapeError, SHAPE_PRESETS};
pub use trajectory_sampling::{Playback, PlaybackFrame, PlotExtent};
pub use trajectory_solver::{integrate, Termination, Trajectory, TrajectoryPoint, TrajectorySolver};

// Module declarations
pub mod atmosphere;
pub mod config;
pub mod constants;
mod error;
mod params;
pub mod result_store;
pub mod shape;
pub mod trajectory_sampling;
mod trajectory_solver;
