//! Collision primitives
//!
//! Circle-vs-circle for shells against targets and the turret, axis-aligned
//! rectangles for bombs against the cannon footprint, and the two-pass
//! removal used by the collision phase of a tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::SimError;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    /// Rectangle from its top-left corner and size
    pub fn new(top_left: DVec2, size: DVec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    /// Bounding box of a circle
    pub fn around_circle(center: DVec2, radius: f64) -> Self {
        let half = DVec2::splat(radius);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Two circles touch or overlap (distance between centers <= sum of radii)
#[inline]
pub fn circles_overlap(a: DVec2, a_radius: f64, b: DVec2, b_radius: f64) -> bool {
    crate::distance(a, b) <= a_radius + b_radius
}

/// Remove the given indices from `items`
///
/// Indices may arrive in any order and may repeat; they are sorted and
/// deduplicated, then removed from the highest down so earlier removals
/// never shift later ones. Returns the number of items removed.
pub fn remove_indices<T>(items: &mut Vec<T>, mut indices: Vec<usize>) -> Result<usize, SimError> {
    indices.sort_unstable();
    indices.dedup();

    if let Some(&last) = indices.last() {
        if last >= items.len() {
            return Err(SimError::RemovalOutOfRange {
                index: last,
                len: items.len(),
            });
        }
    }

    for &i in indices.iter().rev() {
        items.remove(i);
    }
    Ok(indices.len())
}
