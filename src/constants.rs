//! Physical and engine constants used throughout the crate

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Sea-level air density used by the default constant model (kg/m³)
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225;

/// Cold-air constant density (kg/m³), roughly 0°C at sea level
pub const AIR_DENSITY_COLD: f64 = 1.29;

// Standard atmosphere coefficients

/// Sea-level standard temperature (K)
pub const ISA_SEA_LEVEL_TEMP_K: f64 = 288.15;

/// Troposphere temperature lapse rate (K/m)
pub const ISA_LAPSE_RATE: f64 = 0.0065;

/// Exponent of the troposphere density ratio, g/(R·L) - 1
pub const ISA_DENSITY_EXPONENT: f64 = 4.2561;

/// Upper bound of the troposphere branch (m)
pub const ISA_TROPOPAUSE_M: f64 = 11_000.0;

/// Density at the tropopause used as the stratosphere reference (kg/m³)
pub const ISA_TROPOPAUSE_DENSITY: f64 = 0.3639;

/// Inverse scale height of the isothermal stratosphere (1/m)
pub const ISA_STRATOSPHERE_DECAY: f64 = 0.0001576;

// Integration limits

/// Hard cap on raw integration steps for one trajectory
///
/// A trajectory that reaches this count without crossing the ground is
/// reported as truncated rather than landed.
pub const MAX_INTEGRATION_STEPS: u64 = 20_000_000;

/// Every step up to and including this index is kept in the point sequence
pub const FULL_RESOLUTION_STEPS: u64 = 50_000;

/// Divisor controlling how fast the retention interval grows past
/// `FULL_RESOLUTION_STEPS`: a point is kept when `step % (step / N) == 0`
pub const RETENTION_INTERVAL_DIVISOR: u64 = 5_000;

// Result store

/// Maximum number of trajectories retained for comparison
pub const STORE_CAPACITY: usize = 20;

/// Display palette, assigned round-robin in insertion order
pub const PALETTE: [&str; 8] = [
    "#e6194b", // red
    "#3cb44b", // green
    "#4363d8", // blue
    "#f58231", // orange
    "#911eb4", // purple
    "#42d4f4", // cyan
    "#f032e6", // magenta
    "#bfef45", // lime
];

// Presentation helpers

/// Approximate number of frames a full playback should take
pub const PLAYBACK_TARGET_FRAMES: usize = 300;

/// Horizontal headroom added when auto-scaling plot axes
pub const PLOT_MARGIN_X: f64 = 0.05;

/// Vertical headroom added when auto-scaling plot axes
pub const PLOT_MARGIN_Y: f64 = 0.12;

