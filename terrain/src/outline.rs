// src/outline.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coords::Vec2;

/// Closed polygon suitable for a 2D physics shape.
///
/// The last point connects back to the first; the closing edge is implicit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionOutline {
    pub points: Vec<Vec2>,
}

impl CollisionOutline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Polygon edges including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let closing = self.points.last().zip(self.points.first()).map(|(a, b)| (*a, *b));
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing.filter(|_| self.points.len() > 2))
    }
}
