//! Point light and per-pixel shading decision.

use glam::Vec3A;

use crate::ray::Point;
use crate::sphere::Sphere;

/// RGB color type using Vec3A for SIMD optimization.
///
/// Channels are nominally in [0, 1] but may exceed 1 after brightness
/// scaling; clamping happens at quantization.
pub type Color = Vec3A;

/// Color written for pixels whose primary ray hits nothing.
pub const BACKGROUND: Color = Color::ZERO;

/// Color written for pixels whose hit point cannot see the light.
pub const SHADOW: Color = Color::ZERO;

/// Single point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Light position in world coordinates.
    pub position: Point,
    /// Scalar applied to the object color of lit pixels.
    pub brightness: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3A::new(10.0, 10.0, 10.0),
            brightness: 1.0,
        }
    }
}

/// Outcome of shading one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shade {
    /// Primary ray hit nothing.
    Background,
    /// Primary ray hit an object whose hit point is occluded from the light.
    Shadowed,
    /// Primary ray hit an object with a clear path to the light.
    Lit(Color),
}

impl Shade {
    /// Final pixel color.
    pub fn color(self) -> Color {
        match self {
            Shade::Background => BACKGROUND,
            Shade::Shadowed => SHADOW,
            Shade::Lit(color) => color,
        }
    }
}

impl Light {
    /// Combine the nearest hit object and its shadow test into a pixel shade.
    ///
    /// Lit pixels get the object's flat color scaled by brightness, without
    /// clamping.
    pub fn shade(&self, hit: Option<&Sphere>, in_shadow: bool) -> Shade {
        match hit {
            None => Shade::Background,
            Some(_) if in_shadow => Shade::Shadowed,
            Some(object) => Shade::Lit(object.color() * self.brightness),
        }
    }
}
