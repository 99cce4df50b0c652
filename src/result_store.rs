//! Bounded, deduplicated collection of computed trajectories.

use std::collections::HashSet;
use std::fmt;

use log::{debug, info};
use serde::Serialize;

use crate::constants::{PALETTE, STORE_CAPACITY};
use crate::error::StoreError;
use crate::params::Fingerprint;
use crate::trajectory_solver::Trajectory;

/// Display color taken from the fixed palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    /// Palette entry for the `n`-th accepted trajectory
    pub fn for_index(n: usize) -> Self {
        Color(PALETTE[n % PALETTE.len()])
    }

    pub fn hex(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Insertion-ordered store of at most `STORE_CAPACITY` trajectories, each with
/// a unique parameter fingerprint.
///
/// Colors are handed out round-robin from the palette at insertion time and
/// never change afterwards. Callers sharing a store across threads must wrap
/// it in a lock; the duplicate check and the insert are not atomic otherwise.
#[derive(Debug, Default)]
pub struct ResultStore {
    entries: Vec<Trajectory>,
    fingerprints: HashSet<Fingerprint>,
    colors_assigned: usize,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a trajectory, returning its assigned color.
    ///
    /// Rejections happen before any mutation: the store is unchanged on error.
    pub fn insert(&mut self, mut trajectory: Trajectory) -> Result<Color, StoreError> {
        let fingerprint = trajectory.params.fingerprint();

        if self.fingerprints.contains(&fingerprint) {
            return Err(StoreError::Duplicate { fingerprint });
        }
        if self.entries.len() >= STORE_CAPACITY {
            return Err(StoreError::CapacityExceeded { capacity: STORE_CAPACITY });
        }

        let color = Color::for_index(self.colors_assigned);
        self.colors_assigned += 1;
        trajectory.color = Some(color);

        debug!(
            "stored trajectory #{} ({}) as {}",
            self.entries.len() + 1,
            fingerprint,
            color
        );
        self.entries.push(trajectory);
        self.fingerprints.insert(fingerprint);

        Ok(color)
    }

    /// Drop every entry and restart color assignment from the first palette entry
    pub fn clear(&mut self) {
        info!("clearing {} stored trajectories", self.entries.len());
        self.entries.clear();
        self.fingerprints.clear();
        self.colors_assigned = 0;
    }

    /// Stored trajectories in insertion order
    pub fn list(&self) -> &[Trajectory] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trajectory> {
        self.entries.iter()
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        STORE_CAPACITY
    }
}

impl<'a> IntoIterator for &'a ResultStore {
    type Item = &'a Trajectory;
    type IntoIter = std::slice::Iter<'a, Trajectory>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
