//! Render pass: one primary ray per pixel, shadow test, flat shading.

use image::{ImageBuffer, Rgb};
use indicatif::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::ConfigError;
use crate::ray::Point;
use crate::scene::Scene;
use crate::shading::{Light, Shade};

/// Linear f32 RGB buffer, one entry per output pixel, indexed (x, y).
pub type PixelBuffer = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Largest accepted pixel count (16384 x 16384).
pub const MAX_PIXELS: u64 = 1 << 28;

/// Image size, eye position, and light for a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    width: u32,
    height: u32,
    eye: Point,
    light: Light,
}

impl Default for RenderConfig {
    /// 800x600, eye at the origin, light at (10, 10, 10) with brightness 1.
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            eye: Point::ZERO,
            light: Light::default(),
        }
    }
}

impl RenderConfig {
    /// Validated render configuration.
    pub fn new(width: u32, height: u32, eye: Point, light: Light) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 || u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        if !(light.brightness.is_finite() && light.brightness >= 0.0) {
            return Err(ConfigError::InvalidBrightness(light.brightness));
        }
        Ok(Self {
            width,
            height,
            eye,
            light,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Eye position.
    pub fn eye(&self) -> Point {
        self.eye
    }

    /// Scene light.
    pub fn light(&self) -> Light {
        self.light
    }

    /// Camera generating primary rays for this configuration.
    pub fn camera(&self) -> Camera {
        Camera::new(self.width, self.height, self.eye)
    }
}

/// Per-pass pixel classification counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Pixels whose hit point sees the light.
    pub lit: u64,
    /// Pixels whose hit point is occluded.
    pub shadowed: u64,
    /// Pixels whose primary ray missed every object.
    pub background: u64,
}

impl RenderStats {
    fn merge(self, other: Self) -> Self {
        Self {
            lit: self.lit + other.lit,
            shadowed: self.shadowed + other.shadowed,
            background: self.background + other.background,
        }
    }

    /// Total number of pixels counted.
    pub fn total(&self) -> u64 {
        self.lit + self.shadowed + self.background
    }
}

impl From<Shade> for RenderStats {
    fn from(shade: Shade) -> Self {
        let mut stats = Self::default();
        match shade {
            Shade::Lit(_) => stats.lit = 1,
            Shade::Shadowed => stats.shadowed = 1,
            Shade::Background => stats.background = 1,
        }
        stats
    }
}

/// Shade a single pixel: primary ray, nearest hit, shadow ray.
pub fn trace_pixel(scene: &Scene, config: &RenderConfig, camera: &Camera, i: u32, j: u32) -> Shade {
    let r = camera.get_ray(i, j);
    let light = config.light();

    let Some(hit) = scene.closest_hit(&r, config.eye()) else {
        return light.shade(None, false);
    };

    let in_shadow = scene.is_occluded(hit.record.p, light.position);
    light.shade(scene.get(hit.index), in_shadow)
}

/// Render the scene into a freshly allocated pixel buffer.
///
/// Pure in `scene` and `config`: repeated calls yield bit-identical buffers.
pub fn render(scene: &Scene, config: &RenderConfig) -> PixelBuffer {
    render_with_stats(scene, config, &ProgressBar::hidden()).0
}

/// Render while ticking `pb` once per pixel.
pub fn render_with_progress(scene: &Scene, config: &RenderConfig, pb: &ProgressBar) -> PixelBuffer {
    render_with_stats(scene, config, pb).0
}

/// Render and also return how many pixels were lit, shadowed, or background.
///
/// Pixels are processed in parallel. Each pixel is written by exactly one
/// task and the scene is only read.
pub fn render_with_stats(scene: &Scene, config: &RenderConfig, pb: &ProgressBar) -> (PixelBuffer, RenderStats) {
    let camera = config.camera();
    let mut image = PixelBuffer::new(config.width(), config.height());

    info!(
        "Rendering {}x{} with {} objects on {} threads...",
        config.width(),
        config.height(),
        scene.len(),
        rayon::current_num_threads()
    );
    let generation_start = std::time::Instant::now();
    pb.set_length(u64::from(config.width()) * u64::from(config.height()));

    let stats = image
        .enumerate_pixels_mut()
        .par_bridge()
        .map(|(i, j, pixel)| {
            let shade = trace_pixel(scene, config, &camera, i, j);
            *pixel = Rgb(shade.color().to_array());
            pb.inc(1);
            RenderStats::from(shade)
        })
        .reduce(RenderStats::default, RenderStats::merge);

    pb.finish();
    info!("Image generated in {:.2?}", generation_start.elapsed());
    debug!(
        "Pixels: {} lit, {} shadowed, {} background",
        stats.lit, stats.shadowed, stats.background
    );

    (image, stats)
}
