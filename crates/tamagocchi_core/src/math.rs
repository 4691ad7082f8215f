//! Planar geometry helpers.
//!
//! The game engine reports positions as floating point map coordinates and
//! accepts headings as whole degrees, so everything here works in `f64` and
//! converts at the protocol boundary.

use serde::{Deserialize, Serialize};

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt for comparisons).
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Heading from `self` towards `other`, in radians.
    #[must_use]
    pub fn orient_towards(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// The point reached by travelling `distance` along heading `angle_rad`.
    #[must_use]
    pub fn offset(self, angle_rad: f64, distance: f64) -> Self {
        Self {
            x: self.x + angle_rad.cos() * distance,
            y: self.y + angle_rad.sin() * distance,
        }
    }

    /// The point on the segment towards `target` that lies `standoff` away from it.
    ///
    /// Returns `self` when already within `standoff`.
    #[must_use]
    pub fn approach_point(self, target: Self, standoff: f64) -> Self {
        let distance = self.distance_to(target);
        if distance <= standoff {
            return self;
        }
        self.offset(self.orient_towards(target), distance - standoff)
    }
}

/// Convert a heading in radians to whole degrees in `[0, 360)`.
#[must_use]
pub fn angle_rad_to_deg_clipped(angle_rad: f64) -> i32 {
    let unclipped = angle_rad.to_degrees().round() as i64;
    (((unclipped % 360) + 360) % 360) as i32
}

/// Predicted end position of a thrust: start + (cos θ, sin θ) × magnitude.
#[must_use]
pub fn thrust_destination(start: Position, angle_deg: i32, magnitude: i32) -> Position {
    start.offset(f64::from(angle_deg).to_radians(), f64::from(magnitude))
}

/// Whether the segment `start..end` passes within `radius + fudge` of `center`.
///
/// Degenerate segments test the start point alone.
#[must_use]
pub fn segment_circle_intersect(
    start: Position,
    end: Position,
    center: Position,
    radius: f64,
    fudge: f64,
) -> bool {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    let a = dx * dx + dy * dy;
    if a == 0.0 {
        return start.distance_to(center) <= radius + fudge;
    }

    // Parameter of the closest approach along the segment, clamped to its end.
    let b = -2.0
        * (start.x * start.x - start.x * end.x - start.x * center.x + end.x * center.x
            + start.y * start.y
            - start.y * end.y
            - start.y * center.y
            + end.y * center.y);
    let t = (-b / (2.0 * a)).min(1.0);
    if t < 0.0 {
        return false;
    }

    let closest = Position::new(start.x + dx * t, start.y + dy * t);
    closest.distance_to(center) <= radius + fudge
}
