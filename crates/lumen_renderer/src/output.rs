//! Image sinks that receive rendered pixels.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use lumen_math::Color;

use crate::error::RenderError;

/// Destination for rendered pixels.
///
/// `write_pixel` may be called in any order; `write` is called once after
/// every pixel is in.
pub trait ImageSink {
    fn write_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Flush the finished raster.
    fn write(&mut self) -> Result<(), RenderError>;
}

/// In-memory raster of unclamped colors.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y). Writes outside the raster are dropped.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            log::warn!(
                "Pixel ({x}, {y}) outside {}x{} image, dropped",
                self.width,
                self.height
            );
            return;
        }
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to an 8-bit RGB image, clamping each channel to 0..=255.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(self.get(x, y).to_rgb8()))
    }
}

impl ImageSink for ImageBuffer {
    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }

    fn write(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Buffers pixels and saves them to an image file on [`ImageSink::write`].
///
/// The format follows the path extension (`.png`, `.jpg`, ...).
#[derive(Clone, Debug)]
pub struct ImageWriter {
    path: PathBuf,
    buffer: ImageBuffer,
}

impl ImageWriter {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            buffer: ImageBuffer::new(width, height),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }
}

impl ImageSink for ImageWriter {
    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.buffer.set(x, y, color);
    }

    fn write(&mut self) -> Result<(), RenderError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.buffer.to_rgb_image().save(&self.path)?;
        log::info!("Wrote {}", self.path.display());
        Ok(())
    }
}
