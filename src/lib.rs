//! Umbra shadow-casting ray tracer
//!
//! Casts one primary ray per pixel into a scene of spheres, finds the nearest
//! hit, tests it against a single point light with a shadow ray, and shades
//! the pixel with the object's flat color or black. Rendering is a pure
//! function of a [`scene::Scene`] and a [`render::RenderConfig`]; displaying
//! or saving the result lives in [`output`].

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ray;
pub mod interval;
pub mod hittable;
pub mod sphere;
pub mod scene;
pub mod camera;
pub mod shading;
pub mod render;
pub mod config;
pub mod output;
pub mod error;

pub use render::{render, PixelBuffer, RenderConfig};
pub use scene::Scene;
