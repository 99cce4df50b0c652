use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::atmosphere::density;
use crate::constants::{G_ACCEL_MPS2, MAX_INTEGRATION_STEPS};
use crate::error::SimulationError;
use crate::params::SimulationParameters;
use crate::result_store::Color;
use crate::trajectory_sampling::should_retain;

/// Ground-relative position sample in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
}

impl TrajectoryPoint {
    fn from_vector(position: &Vector2<f64>) -> Self {
        Self { x: position.x, y: position.y }
    }
}

/// Why the integration loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Crossed the ground; the last point sits at exactly y = 0
    Landed,
    /// Ran out of steps while still airborne
    StepCapReached,
}

/// A computed flight path with its summary statistics
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    pub params: SimulationParameters,
    pub points: Vec<TrajectoryPoint>,
    pub range: f64,           // meters, x of the final point
    pub max_height: f64,      // meters, peak over every raw step
    pub final_speed: f64,     // m/s at termination
    pub time_of_flight: f64,  // seconds
    pub step_count: u64,      // raw integration steps executed
    pub termination: Termination,
    pub color: Option<Color>, // assigned by the result store
}

impl Trajectory {
    /// True when the step cap stopped the flight before it reached the ground
    pub fn is_truncated(&self) -> bool {
        self.termination == Termination::StepCapReached
    }

    pub fn launch_point(&self) -> TrajectoryPoint {
        self.points[0]
    }

    pub fn final_point(&self) -> TrajectoryPoint {
        self.points[self.points.len() - 1]
    }

    /// Retained point closest to the apex
    pub fn peak_point(&self) -> TrajectoryPoint {
        self.points
            .iter()
            .copied()
            .fold(self.points[0], |best, p| if p.y > best.y { p } else { best })
    }
}

/// Compute a trajectory with the default step cap.
pub fn integrate(params: &SimulationParameters) -> Result<Trajectory, SimulationError> {
    TrajectorySolver::new(params.clone()).solve()
}

/// Fixed-step semi-implicit Euler integrator for a point mass under gravity,
/// quadratic drag relative to a horizontal wind, and altitude-dependent density
pub struct TrajectorySolver {
    params: SimulationParameters,
    step_cap: u64,
}

impl TrajectorySolver {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            params,
            step_cap: MAX_INTEGRATION_STEPS,
        }
    }

    pub fn set_step_cap(&mut self, cap: u64) {
        self.step_cap = cap;
    }

    pub fn step_cap(&self) -> u64 {
        self.step_cap
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn solve(&self) -> Result<Trajectory, SimulationError> {
        self.run(None)
    }

    /// Like [`solve`](Self::solve), but checks `cancel` once per step and
    /// bails out with [`SimulationError::Cancelled`] when it is set.
    pub fn solve_with_cancel(&self, cancel: &AtomicBool) -> Result<Trajectory, SimulationError> {
        self.run(Some(cancel))
    }

    fn run(&self, cancel: Option<&AtomicBool>) -> Result<Trajectory, SimulationError> {
        self.params.validate()?;

        let p = &self.params;
        let dt = p.time_step;
        let angle_rad = p.launch_angle.to_radians();
        let wind_direction_rad = p.wind_direction.to_radians();

        // Horizontal wind only; 0° blows straight against the line of fire
        let wind = Vector2::new(-p.wind_speed * wind_direction_rad.cos(), 0.0);
        let drag_scale = 0.5 * p.drag_coefficient * p.reference_area / p.mass;
        let gravity = Vector2::new(0.0, -G_ACCEL_MPS2);

        let mut position = Vector2::new(0.0, p.initial_height);
        let mut velocity = Vector2::new(
            p.initial_speed * angle_rad.cos(),
            p.initial_speed * angle_rad.sin(),
        );

        let mut points = vec![TrajectoryPoint::from_vector(&position)];
        let mut max_height = position.y;
        let mut steps: u64 = 0;
        let mut time_of_flight = 0.0;
        let mut termination = Termination::StepCapReached;

        debug!(
            "integrating v0={} m/s angle={}° dt={} s atmosphere={}",
            p.initial_speed, p.launch_angle, dt, p.atmosphere
        );

        // Main integration loop
        while position.y >= 0.0 && steps < self.step_cap {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(SimulationError::Cancelled { steps });
                }
            }

            let k = drag_scale * density(position.y, p.atmosphere);
            let relative = velocity - wind;
            let airspeed = relative.norm();

            let mut acceleration = gravity;
            if airspeed > 0.0 {
                acceleration -= relative * (k * airspeed);
            }

            // Velocity first, then position from the updated velocity
            velocity += acceleration * dt;
            let previous = position;
            position += velocity * dt;
            steps += 1;

            if position.y > max_height {
                max_height = position.y;
            }

            if position.y < 0.0 {
                // `previous` is the last raw step, not the last retained point;
                // they differ once retention thins out past the first 50,000 steps.
                let frac = previous.y / (previous.y - position.y);
                position = Vector2::new(previous.x + frac * (position.x - previous.x), 0.0);
                time_of_flight = ((steps - 1) as f64 + frac) * dt;
                termination = Termination::Landed;
                points.push(TrajectoryPoint::from_vector(&position));
                break;
            }

            if should_retain(steps) {
                points.push(TrajectoryPoint::from_vector(&position));
            }
        }

        if termination == Termination::StepCapReached {
            time_of_flight = steps as f64 * dt;
            let last = TrajectoryPoint::from_vector(&position);
            if points.last() != Some(&last) {
                points.push(last);
            }
            warn!(
                "trajectory hit the {} step cap at x={:.2} m, y={:.2} m without landing",
                self.step_cap, position.x, position.y
            );
        }

        let trajectory = Trajectory {
            params: self.params.clone(),
            range: position.x,
            max_height,
            final_speed: velocity.norm(),
            time_of_flight,
            step_count: steps,
            termination,
            points,
            color: None,
        };

        debug!(
            "finished after {} steps ({} points kept): range={:.3} m, peak={:.3} m",
            trajectory.step_count,
            trajectory.points.len(),
            trajectory.range,
            trajectory.max_height
        );

        Ok(trajectory)
    }
}
