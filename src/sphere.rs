//! Sphere primitive for ray tracing.
//!
//! Ray-sphere intersection using the full quadratic `a*t² + b*t + c = 0`
//! with `a = |d|²`, so unnormalized directions are handled exactly.

use glam::Vec3A;

use crate::error::SceneError;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::ray::{Point, Ray};
use crate::shading::Color;

/// Sphere primitive defined by center, radius, and flat color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f32,
    color: Color,
}

impl Sphere {
    /// Red sphere of radius 1 centered at (0, 0, -5).
    pub const REFERENCE: Sphere = Sphere {
        center: Vec3A::new(0.0, 0.0, -5.0),
        radius: 1.0,
        color: Vec3A::new(1.0, 0.0, 0.0),
    };

    /// Create a new sphere.
    ///
    /// Rejects non-positive or non-finite radii, which would make the normal
    /// computation divide by zero, along with non-finite centers and
    /// negative or non-finite color channels.
    pub fn new(center: Point, radius: f32, color: Color) -> Result<Self, SceneError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius { radius });
        }
        if !center.is_finite() {
            return Err(SceneError::InvalidCenter {
                x: center.x,
                y: center.y,
                z: center.z,
            });
        }
        if !color.is_finite() || color.min_element() < 0.0 {
            return Err(SceneError::InvalidColor {
                r: color.x,
                g: color.y,
                b: color.z,
            });
        }
        Ok(Self { center, radius, color })
    }

    /// Center point of the sphere in world coordinates.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius of the sphere, always > 0.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Flat surface color.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Hittable for Sphere {
    /// Only the near root is considered. A ray starting inside the sphere has
    /// a negative near root and reports no hit even though the far root is
    /// in front of it.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Vector from sphere center to ray origin
        let oc: Vec3A = r.origin - self.center;

        let a = r.direction.length_squared();
        debug_assert!(a > 0.0, "ray direction must be non-zero");
        let b = 2.0 * oc.dot(r.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if !ray_t.surrounds(t) {
            return None;
        }

        let p = r.at(t);
        let normal = (p - self.center) / self.radius;
        Some(HitRecord { p, normal, t })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn red_sphere() -> Sphere {
        Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, Color::new(1.0, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn ray_at_center_hits_near_surface() {
        let s = red_sphere();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = s.hit(&r, Interval::POSITIVE).expect("ray aimed at center must hit");
        assert!((rec.t - 4.0).abs() < EPS);
        assert!((rec.p - Vec3A::new(0.0, 0.0, -4.0)).length() < EPS);
        assert!((rec.normal - Vec3A::new(0.0, 0.0, 1.0)).length() < EPS);
    }

    #[test]
    fn direction_length_does_not_move_hit_point() {
        let s = red_sphere();
        let unit = s
            .hit(&Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0)), Interval::POSITIVE)
            .unwrap();
        let long = s
            .hit(&Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -8.0)), Interval::POSITIVE)
            .unwrap();
        assert!((unit.p - long.p).length() < EPS);
        assert!((long.t - 0.5).abs() < EPS);
    }

    #[test]
    fn ray_passing_beside_sphere_misses() {
        let s = red_sphere();
        // Offset by 1.01 in x: just outside the silhouette.
        let r = Ray::new(Vec3A::new(1.01, 0.0, 0.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(s.hit(&r, Interval::POSITIVE).is_none());
    }

    #[test]
    fn ray_pointing_away_misses() {
        let s = red_sphere();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0));
        assert!(s.hit(&r, Interval::POSITIVE).is_none());
    }

    #[test]
    fn ray_from_inside_reports_no_hit() {
        let s = red_sphere();
        let r = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(s.hit(&r, Interval::POSITIVE).is_none());
    }

    #[test]
    fn normal_is_unit_and_hit_lies_on_surface() {
        let s = Sphere::new(Vec3A::new(0.5, -0.25, -6.0), 1.75, Color::ONE).unwrap();
        for &(x, y) in &[(0.0, 0.0), (0.2, 0.1), (-0.1, 0.1), (0.3, -0.2)] {
            let r = Ray::new(Vec3A::ZERO, Vec3A::new(x, y, -1.0));
            let rec = s
                .hit(&r, Interval::POSITIVE)
                .unwrap_or_else(|| panic!("ray ({}, {}, -1) must hit", x, y));
            assert!(((rec.p - s.center()).length() - s.radius()).abs() < EPS);
            assert!((rec.normal.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let center = Vec3A::new(0.0, 0.0, -5.0);
        assert_eq!(
            Sphere::new(center, 0.0, Color::ONE),
            Err(SceneError::InvalidRadius { radius: 0.0 })
        );
        assert_eq!(
            Sphere::new(center, -1.0, Color::ONE),
            Err(SceneError::InvalidRadius { radius: -1.0 })
        );
        assert!(Sphere::new(center, f32::NAN, Color::ONE).is_err());
    }

    #[test]
    fn bad_center_or_color_is_rejected() {
        assert!(matches!(
            Sphere::new(Vec3A::new(f32::INFINITY, 0.0, 0.0), 1.0, Color::ONE),
            Err(SceneError::InvalidCenter { .. })
        ));
        assert!(matches!(
            Sphere::new(Vec3A::ZERO, 1.0, Color::new(-0.5, 0.0, 0.0)),
            Err(SceneError::InvalidColor { .. })
        ));
    }
}
