//! Error types for scene construction, configuration loading, and image output.
//!
//! Geometric outcomes (a ray missing every sphere, a point lying in shadow) are
//! not errors and never show up here.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed scene geometry, rejected when the scene is built.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    /// Sphere radius must be finite and strictly positive.
    #[error("sphere radius must be finite and > 0, got {radius}")]
    InvalidRadius {
        /// The rejected radius.
        radius: f32,
    },

    /// Sphere center must have finite coordinates.
    #[error("sphere center must be finite, got ({x}, {y}, {z})")]
    InvalidCenter {
        /// X coordinate of the rejected center.
        x: f32,
        /// Y coordinate of the rejected center.
        y: f32,
        /// Z coordinate of the rejected center.
        z: f32,
    },

    /// Color channels must be finite and non-negative.
    #[error("sphere color channels must be finite and >= 0, got ({r}, {g}, {b})")]
    InvalidColor {
        /// Red channel.
        r: f32,
        /// Green channel.
        g: f32,
        /// Blue channel.
        b: f32,
    },
}

/// Invalid render settings or an unreadable scene file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The scene file could not be read.
    #[error("failed to read scene file {path}: {source}")]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The scene file is not valid TOML or does not match the expected layout.
    #[error("failed to parse scene file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Image dimensions must both be positive and within the pixel cap.
    #[error("image dimensions must be positive and at most 16384x16384 pixels in total, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Light brightness must be finite and non-negative.
    #[error("light brightness must be finite and >= 0, got {0}")]
    InvalidBrightness(f32),

    /// A sphere in the scene file was rejected.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Failure while handing the rendered buffer to a display or file target.
#[derive(Debug, Error)]
pub enum OutputError {
    /// PNG encoding or file write failed.
    #[error("failed to save image: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding or file write failed.
    #[error("failed to save EXR image: {0}")]
    Exr(#[from] exr::error::Error),

    /// Connection to the TEV viewer failed.
    #[error("failed to talk to TEV at {address}: {source}")]
    Tev {
        /// Address that was contacted.
        address: String,
        /// Underlying socket failure.
        #[source]
        source: std::io::Error,
    },

    /// Output path has an extension we cannot encode.
    #[error("unsupported file extension '{0}', only .png and .exr are supported")]
    UnsupportedExtension(String),
}
