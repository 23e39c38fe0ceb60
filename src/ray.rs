//! Ray representation for primary and shadow rays.
//!
//! A ray is defined as r(t) = origin + t * direction, a semi-infinite line
//! in scene space used for intersection testing.

use glam::Vec3A;

/// Location in scene space.
pub type Point = Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Primary rays start at the eye, shadow rays start at a hit point and aim at
/// the light. Both use the same structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Point,

    /// Direction vector of the ray.
    ///
    /// Never normalized. Shadow rays keep the full hit-to-light displacement
    /// and primary rays keep the raw image-plane offset, so intersection code
    /// must not assume unit length.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Point, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Ray from `from` aimed at `to`, with direction `to - from`.
    pub fn towards(from: Point, to: Point) -> Self {
        Self::new(from, to - from)
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Point {
        self.origin + t * self.direction
    }
}
