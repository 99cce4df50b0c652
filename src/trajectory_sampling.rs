//! Point retention, playback and plot scaling over computed trajectories.
//!
//! Nothing here touches the integrator state: the integrator asks
//! [`should_retain`] which raw steps to keep, and everything else works on the
//! finished, immutable point sequence.

use serde::Serialize;

use crate::constants::{
    FULL_RESOLUTION_STEPS, PLAYBACK_TARGET_FRAMES, PLOT_MARGIN_X, PLOT_MARGIN_Y,
    RETENTION_INTERVAL_DIVISOR,
};
use crate::trajectory_solver::{Trajectory, TrajectoryPoint};

/// Whether the point produced by raw step `step` (1-based) is kept.
///
/// Every step is kept up to `FULL_RESOLUTION_STEPS`; past that the interval
/// between kept steps is `step / RETENTION_INTERVAL_DIVISOR`, so the stored
/// point count grows only logarithmically with flight length.
#[inline]
pub fn should_retain(step: u64) -> bool {
    if step <= FULL_RESOLUTION_STEPS {
        return true;
    }
    let interval = step / RETENTION_INTERVAL_DIVISOR;
    step % interval == 0
}

/// One frame of progressive display
#[derive(Debug, Clone, Copy)]
pub struct PlaybackFrame<'a> {
    /// Index of the newest visible point
    pub index: usize,
    pub point: TrajectoryPoint,
    /// Every point from launch up to and including `index`
    pub visible: &'a [TrajectoryPoint],
}

/// Pull-based iterator revealing a trajectory a stride at a time.
///
/// The caller owns the clock: each `next()` is one frame, and the last frame
/// always shows the final point.
#[derive(Debug, Clone)]
pub struct Playback<'a> {
    points: &'a [TrajectoryPoint],
    stride: usize,
    next_index: usize,
    finished: bool,
}

impl<'a> Playback<'a> {
    pub fn new(points: &'a [TrajectoryPoint]) -> Self {
        Self {
            points,
            stride: playback_stride(points.len()),
            next_index: 0,
            finished: points.is_empty(),
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl<'a> Iterator for Playback<'a> {
    type Item = PlaybackFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let last = self.points.len() - 1;
        let index = self.next_index.min(last);
        if index == last {
            self.finished = true;
        }
        self.next_index = index + self.stride;

        Some(PlaybackFrame {
            index,
            point: self.points[index],
            visible: &self.points[..=index],
        })
    }
}

/// Frame stride for a sequence of `point_count` points
pub fn playback_stride(point_count: usize) -> usize {
    (point_count / PLAYBACK_TARGET_FRAMES).max(1)
}

impl Trajectory {
    pub fn playback(&self) -> Playback<'_> {
        Playback::new(&self.points)
    }
}

/// Axis extents covering a set of trajectories, with headroom
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotExtent {
    pub max_x: f64,
    pub max_y: f64,
}

impl PlotExtent {
    /// Largest x and y over all points, padded by 5% and 12%.
    ///
    /// Falls back to 1 m on an axis with no positive extent so callers can
    /// always divide by the result.
    pub fn from_trajectories<'a, I>(trajectories: I) -> Self
    where
        I: IntoIterator<Item = &'a Trajectory>,
    {
        let (max_x, max_y) = trajectories
            .into_iter()
            .flat_map(|t| t.points.iter())
            .fold((0.0_f64, 0.0_f64), |(mx, my), p| (mx.max(p.x), my.max(p.y)));

        Self {
            max_x: if max_x > 0.0 { max_x * (1.0 + PLOT_MARGIN_X) } else { 1.0 },
            max_y: if max_y > 0.0 { max_y * (1.0 + PLOT_MARGIN_Y) } else { 1.0 },
        }
    }
}
