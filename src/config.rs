//! Scene description files and layered render settings.
//!
//! A scene file is TOML:
//!
//! ```toml
//! [camera]
//! width = 800
//! height = 600
//! eye = [0.0, 0.0, 0.0]
//!
//! [light]
//! position = [10.0, 10.0, 10.0]
//! brightness = 1.0
//!
//! [[spheres]]
//! center = [0.0, 0.0, -5.0]
//! radius = 1.0
//! color = [1.0, 0.0, 0.0]
//! ```
//!
//! Every section is optional. Settings resolve as command line first, then
//! the scene file, then the built-in defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::ray::Point;
use crate::render::RenderConfig;
use crate::scene::Scene;
use crate::shading::{Color, Light};
use crate::sphere::Sphere;

/// Parsed scene file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    /// Image size and eye position.
    #[serde(default)]
    pub camera: CameraSection,
    /// Point light.
    #[serde(default)]
    pub light: LightSection,
    /// Spheres in scene order.
    #[serde(default)]
    pub spheres: Vec<SphereSection>,
}

/// `[camera]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSection {
    /// Image width in pixels.
    pub width: Option<u32>,
    /// Image height in pixels.
    pub height: Option<u32>,
    /// Eye position.
    pub eye: Option<Point>,
}

/// `[light]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightSection {
    /// Light position.
    pub position: Option<Point>,
    /// Brightness scalar.
    pub brightness: Option<f32>,
}

/// One `[[spheres]]` entry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereSection {
    /// Sphere center.
    pub center: Point,
    /// Sphere radius, must be > 0.
    pub radius: f32,
    /// Flat RGB color.
    pub color: Color,
}

impl SceneFile {
    /// Parse a scene description from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build the scene, rejecting any degenerate sphere.
    pub fn scene(&self) -> Result<Scene, ConfigError> {
        let spheres = self
            .spheres
            .iter()
            .map(|s| Sphere::new(s.center, s.radius, s.color))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(spheres.into_iter().collect())
    }

    /// Render settings present in the file.
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.camera.width,
            height: self.camera.height,
            eye: self.camera.eye,
            light_position: self.light.position,
            brightness: self.light.brightness,
        }
    }
}

/// Partially specified render settings from one configuration layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderSettings {
    /// Image width in pixels.
    pub width: Option<u32>,
    /// Image height in pixels.
    pub height: Option<u32>,
    /// Eye position.
    pub eye: Option<Point>,
    /// Light position.
    pub light_position: Option<Point>,
    /// Light brightness.
    pub brightness: Option<f32>,
}

impl RenderSettings {
    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: RenderSettings) -> RenderSettings {
        RenderSettings {
            width: self.width.or(fallback.width),
            height: self.height.or(fallback.height),
            eye: self.eye.or(fallback.eye),
            light_position: self.light_position.or(fallback.light_position),
            brightness: self.brightness.or(fallback.brightness),
        }
    }

    /// Fill remaining gaps with defaults and validate.
    pub fn resolve(self) -> Result<RenderConfig, ConfigError> {
        let defaults = RenderConfig::default();
        let default_light = defaults.light();
        let light = Light {
            position: self.light_position.unwrap_or(default_light.position),
            brightness: self.brightness.unwrap_or(default_light.brightness),
        };
        RenderConfig::new(
            self.width.unwrap_or(defaults.width()),
            self.height.unwrap_or(defaults.height()),
            self.eye.unwrap_or(defaults.eye()),
            light,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use glam::Vec3A;

    use super::*;
    use crate::error::SceneError;

    const FULL: &str = r#"
        [camera]
        width = 320
        height = 240
        eye = [0.0, 1.0, 0.0]

        [light]
        position = [-5.0, 5.0, 0.0]
        brightness = 0.5

        [[spheres]]
        center = [0.0, 0.0, -5.0]
        radius = 1.0
        color = [1.0, 0.0, 0.0]

        [[spheres]]
        center = [2, 0, -6]
        radius = 0.5
        color = [0, 0, 1]
    "#;

    #[test]
    fn parses_full_scene_file() {
        let file = SceneFile::from_toml_str(FULL).unwrap();
        let scene = file.scene().unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(0), Some(&Sphere::REFERENCE));
        assert_eq!(scene.get(1).unwrap().center(), Vec3A::new(2.0, 0.0, -6.0));

        let config = file.settings().resolve().unwrap();
        assert_eq!((config.width(), config.height()), (320, 240));
        assert_eq!(config.eye(), Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(config.light().position, Vec3A::new(-5.0, 5.0, 0.0));
        assert_eq!(config.light().brightness, 0.5);
    }

    #[test]
    fn empty_file_resolves_to_defaults() {
        let file = SceneFile::from_toml_str("").unwrap();
        assert!(file.scene().unwrap().is_empty());
        assert_eq!(file.settings().resolve().unwrap(), RenderConfig::default());
    }

    #[test]
    fn command_line_layer_wins_over_file() {
        let file = SceneFile::from_toml_str(FULL).unwrap();
        let cli = RenderSettings {
            width: Some(100),
            brightness: Some(2.0),
            ..RenderSettings::default()
        };
        let config = cli.or(file.settings()).resolve().unwrap();
        assert_eq!(config.width(), 100);
        assert_eq!(config.height(), 240);
        assert_eq!(config.light().brightness, 2.0);
    }

    #[test]
    fn zero_radius_in_file_is_rejected() {
        let file = SceneFile::from_toml_str(
            "[[spheres]]\ncenter = [0.0, 0.0, -5.0]\nradius = 0.0\ncolor = [1.0, 1.0, 1.0]\n",
        )
        .unwrap();
        assert!(matches!(
            file.scene(),
            Err(ConfigError::Scene(SceneError::InvalidRadius { .. }))
        ));
    }

    #[test]
    fn unknown_keys_and_bad_types_fail_to_parse() {
        assert!(matches!(
            SceneFile::from_toml_str("[camera]\nzoom = 2.0\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SceneFile::from_toml_str("[camera]\nwidth = \"wide\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();
        assert_eq!(SceneFile::load(file.path()).unwrap().spheres.len(), 2);

        let missing = file.path().with_extension("missing");
        assert!(matches!(SceneFile::load(&missing), Err(ConfigError::Io { .. })));
    }
}
