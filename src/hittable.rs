//! Ray-object intersection interface.
//!
//! Defines the Hittable trait for geometric primitives and HitRecord for
//! the data produced by a successful intersection.

use glam::Vec3A;

use crate::interval::Interval;
use crate::ray::{Point, Ray};

/// Ray-object intersection information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Point,
    /// Outward surface normal at the intersection point
    pub normal: Vec3A,
    /// Ray parameter of the intersection point
    pub t: f32,
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) since rows are rendered in parallel
/// against a shared scene.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection with a parameter inside `ray_t`.
    ///
    /// Returns the hit on success, `None` when the ray misses.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;
}
