//! # Output Module
//!
//! Hands a rendered [`PixelBuffer`] to something that can show or store it:
//! - Real-time visualization via TEV (The EXR Viewer)
//! - PNG file export with clamp-then-scale quantization
//! - EXR file export of the unquantized linear values
//!
//! ## Quantization
//!
//! Lit channels may exceed 1.0 when the light brightness is above 1. PNG
//! export clamps every channel to [0.0, 1.0] before scaling to [0, 255], so
//! overexposed values saturate instead of wrapping around. No gamma curve is
//! applied: the flat colors are written as-is.

use std::net::TcpStream;
use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{debug, info};
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

use crate::error::OutputError;
use crate::interval::Interval;
use crate::render::PixelBuffer;
use crate::shading::Color;

/// Default TCP port TEV listens on.
pub const TEV_DEFAULT_PORT: u16 = 14158;

const TEV_IMAGE_NAME: &str = "umbra_output";

/// Convert a linear color to 8-bit channels.
///
/// Each channel is clamped to [0, 1], multiplied by 255 and truncated.
/// NaN channels become 0.
pub fn quantize(color: Color) -> [u8; 3] {
    let unit = Interval::new(0.0, 1.0);
    color
        .to_array()
        .map(|channel| (unit.clamp(channel) * 255.0) as u8)
}

/// Quantize a whole buffer into an 8-bit RGB image.
pub fn to_rgb8(image: &PixelBuffer) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb(quantize(Color::from(pixel.0)))
    })
}

/// Save the buffer as an 8-bit PNG.
pub fn save_image_as_png(image: &PixelBuffer, output_path: &Path) -> Result<(), OutputError> {
    to_rgb8(image).save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save the buffer as an EXR with full f32 precision and no clamping.
pub fn save_image_as_exr(image: &PixelBuffer, output_path: &Path) -> Result<(), OutputError> {
    write_rgb_file(
        output_path,
        image.width() as usize,
        image.height() as usize,
        |x, y| {
            let pixel = image.get_pixel(x as u32, y as u32);
            (pixel[0], pixel[1], pixel[2])
        },
    )?;
    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}

/// Save the buffer, picking the encoder from the file extension.
pub fn save_image(image: &PixelBuffer, output_path: &Path) -> Result<(), OutputError> {
    let extension = output_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => save_image_as_png(image, output_path),
        "exr" => save_image_as_exr(image, output_path),
        _ => Err(OutputError::UnsupportedExtension(extension)),
    }
}

/// Append the default TEV port if the address has none.
pub fn tev_address_with_port(address: &str) -> String {
    if address.contains(':') {
        address.to_string()
    } else {
        format!("{}:{}", address, TEV_DEFAULT_PORT)
    }
}

/// Stream the buffer to a running TEV instance for display.
///
/// TEV wants planar channel data (RRR...GGG...BBB...), so the interleaved
/// buffer is split before sending.
pub fn send_image_to_tev(image: &PixelBuffer, tev_address: &str) -> Result<(), OutputError> {
    let address = tev_address_with_port(tev_address);
    let tev_err = |source: std::io::Error| OutputError::Tev {
        address: address.clone(),
        source,
    };

    debug!("Attempting to connect to TEV at {}", address);
    let stream = TcpStream::connect(&address).map_err(tev_err)?;
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }
    let mut client = TevClient::wrap(stream);

    let (width, height) = image.dimensions();
    client
        .send(PacketCreateImage {
            image_name: TEV_IMAGE_NAME,
            width,
            height,
            channel_names: &["R", "G", "B"],
            grab_focus: true,
        })
        .map_err(tev_err)?;

    let planar = planar_channels(image);
    let pixel_count = u64::from(width) * u64::from(height);
    let start_time = std::time::Instant::now();
    client
        .send(PacketUpdateImage {
            image_name: TEV_IMAGE_NAME,
            grab_focus: false,
            channel_names: &["R", "G", "B"],
            x: 0,
            y: 0,
            width,
            height,
            channel_offsets: &[0, pixel_count, 2 * pixel_count],
            channel_strides: &[1, 1, 1],
            data: &planar,
        })
        .map_err(tev_err)?;

    info!("Image sent to TEV at {} in {:.2?}", address, start_time.elapsed());
    Ok(())
}

fn planar_channels(image: &PixelBuffer) -> Vec<f32> {
    let mut data = Vec::with_capacity(image.as_raw().len());
    for channel in 0..3 {
        data.extend(image.pixels().map(|pixel| pixel[channel]));
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_clamps_instead_of_wrapping() {
        assert_eq!(quantize(Color::new(1.0, 0.0, 0.0)), [255, 0, 0]);
        assert_eq!(quantize(Color::new(2.5, -1.0, 0.5)), [255, 0, 127]);
        assert_eq!(quantize(Color::new(f32::NAN, 1.0, 0.0)), [0, 255, 0]);
    }

    #[test]
    fn planar_layout_groups_channels() {
        let mut image = PixelBuffer::new(2, 1);
        image.put_pixel(0, 0, Rgb([1.0, 2.0, 3.0]));
        image.put_pixel(1, 0, Rgb([4.0, 5.0, 6.0]));
        assert_eq!(planar_channels(&image), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn tev_address_gets_default_port() {
        assert_eq!(tev_address_with_port("localhost"), "localhost:14158");
        assert_eq!(tev_address_with_port("10.0.0.2:9000"), "10.0.0.2:9000");
    }

    #[test]
    fn png_roundtrip_and_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut image = PixelBuffer::new(4, 3);
        image.put_pixel(1, 2, Rgb([3.0, 1.0, 0.25]));

        let png = dir.path().join("out.png");
        save_image(&image, &png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(1, 2).0, [255, 255, 63]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);

        let bmp = dir.path().join("out.bmp");
        assert!(matches!(
            save_image(&image, &bmp),
            Err(OutputError::UnsupportedExtension(ext)) if ext == "bmp"
        ));
    }

    #[test]
    fn exr_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.exr");
        save_image(&PixelBuffer::new(2, 2), &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
