//! Scene container, nearest-hit traversal, and shadow testing.
//!
//! The scene is an ordered list of spheres scanned linearly. It is built once
//! and only read during rendering, so it can be shared across render threads
//! without locking.

use crate::error::SceneError;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::ray::{Point, Ray};
use crate::shading::Color;
use crate::sphere::Sphere;

/// Closest intersection found by [`Scene::closest_hit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    /// Index of the hit sphere in scene order.
    pub index: usize,
    /// Intersection data.
    pub record: HitRecord,
    /// Euclidean distance from the eye to the hit point.
    pub distance: f32,
}

/// Ordered collection of spheres.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    objects: Vec<Sphere>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference scene: one red sphere of radius 1 centered at (0, 0, -5).
    pub fn reference() -> Self {
        Self {
            objects: vec![Sphere::REFERENCE],
        }
    }

    /// Add an already validated sphere to the end of the scene.
    pub fn add(&mut self, sphere: Sphere) {
        self.objects.push(sphere);
    }

    /// Validate and add a sphere.
    pub fn add_sphere(&mut self, center: Point, radius: f32, color: Color) -> Result<(), SceneError> {
        self.add(Sphere::new(center, radius, color)?);
        Ok(())
    }

    /// Spheres in scene order.
    pub fn objects(&self) -> &[Sphere] {
        &self.objects
    }

    /// Sphere at `index`, as returned in [`SceneHit::index`].
    pub fn get(&self, index: usize) -> Option<&Sphere> {
        self.objects.get(index)
    }

    /// Number of spheres.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the scene holds no spheres.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Find the hit nearest to `eye` among all spheres the ray intersects.
    ///
    /// Distance is measured from `eye`, not from the ray origin. On exact
    /// distance ties the sphere earlier in scene order wins.
    pub fn closest_hit(&self, r: &Ray, eye: Point) -> Option<SceneHit> {
        let mut closest: Option<SceneHit> = None;

        for (index, object) in self.objects.iter().enumerate() {
            if let Some(record) = object.hit(r, Interval::POSITIVE) {
                let distance = eye.distance(record.p);
                if closest.map_or(true, |best| distance < best.distance) {
                    closest = Some(SceneHit { index, record, distance });
                }
            }
        }

        closest
    }

    /// Whether any sphere blocks the path from `point` towards `light`.
    ///
    /// Casts an unnormalized shadow ray and stops at the first sphere it
    /// intersects. Occluders beyond the light still count.
    pub fn is_occluded(&self, point: Point, light: Point) -> bool {
        let shadow_ray = Ray::towards(point, light);
        self.objects
            .iter()
            .any(|object| object.hit(&shadow_ray, Interval::POSITIVE).is_some())
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
