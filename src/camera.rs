//! Camera for primary ray generation

use glam::Vec3A;

use crate::ray::{Point, Ray};

/// Pinhole camera looking down -Z through a unit-distance image plane.
///
/// The image plane spans [-0.5, 0.5) on both axes regardless of aspect
/// ratio, and row `j` grows towards +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Eye position, origin of every primary ray
    pub eye: Point,
}

impl Camera {
    /// Creates a camera at `eye` for an image of the given size.
    pub fn new(image_width: u32, image_height: u32, eye: Point) -> Self {
        Self {
            image_width,
            image_height,
            eye,
        }
    }

    /// Generate the primary ray through pixel (i, j).
    ///
    /// Direction is `((i - w/2) / w, (j - h/2) / h, -1)`, left unnormalized.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let width = self.image_width as f32;
        let height = self.image_height as f32;
        let direction = Vec3A::new(
            (i as f32 - width / 2.0) / width,
            (j as f32 - height / 2.0) / height,
            -1.0,
        );
        Ray::new(self.eye, direction)
    }
}
