//! Output image
//!
//! RGBA `f32` pixels, row-major with row 0 at the bottom of the screen
//! (normalized y grows with the row index). Alpha is not clamped; the shader
//! accumulates into it.

use std::io::{BufRead, Seek, Write};
use std::path::Path;

use ::image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use ::image::{ImageFormat, ImageReader, Rgb, RgbImage};

use crate::error::Result;

/// A single RGBA pixel
pub type Pixel = [f32; 4];

/// Owned RGBA float image
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Zero-filled image of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in row-major order
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Flat `[r, g, b, a, r, g, b, a, ...]` view
    pub fn data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Pixel {
        let idx = self.index(x, y);
        &mut self.pixels[idx]
    }

    /// One row of pixels
    pub fn row_mut(&mut self, y: u32) -> &mut [Pixel] {
        let start = y as usize * self.width as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Fill every pixel with one color
    pub fn clear(&mut self, rgba: Pixel) {
        self.pixels.fill(rgba);
    }

    /// Copy with RGB clamped and rounded to 8 bits and alpha forced to 1,
    /// i.e. what survives a PPM round trip
    pub fn quantized(&self) -> Image {
        let pixels = self
            .pixels
            .iter()
            .map(|p| {
                [
                    quantize(p[0]) as f32 / 255.0,
                    quantize(p[1]) as f32 / 255.0,
                    quantize(p[2]) as f32 / 255.0,
                    1.0,
                ]
            })
            .collect();
        Image {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Largest per-channel difference, or `None` if the sizes differ
    pub fn max_abs_diff(&self, other: &Image) -> Option<f32> {
        if self.width != other.width || self.height != other.height {
            return None;
        }
        let diff = self
            .data()
            .iter()
            .zip(other.data())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        Some(diff)
    }

    /// True if sizes agree and every channel is within `tolerance`
    pub fn matches(&self, other: &Image, tolerance: f32) -> bool {
        self.max_abs_diff(other).is_some_and(|d| d <= tolerance)
    }

    /// 8-bit RGB copy with the last row first, the usual top-down layout
    pub fn to_rgb8(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixel(x, self.height - 1 - y);
            Rgb([quantize(p[0]), quantize(p[1]), quantize(p[2])])
        })
    }

    /// Inverse of `to_rgb8`; alpha is set to 1
    pub fn from_rgb8(rgb: &RgbImage) -> Image {
        let (width, height) = rgb.dimensions();
        let mut image = Image::new(width, height);
        for (x, y, px) in rgb.enumerate_pixels() {
            *image.pixel_mut(x, height - 1 - y) = [
                px[0] as f32 / 255.0,
                px[1] as f32 / 255.0,
                px[2] as f32 / 255.0,
                1.0,
            ];
        }
        image
    }

    /// Write a binary PPM (P6); the last row is written first
    pub fn write_ppm<W: Write>(&self, out: W) -> Result<()> {
        let encoder = PnmEncoder::new(out).with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary));
        self.to_rgb8().write_with_encoder(encoder)?;
        Ok(())
    }

    pub fn save_ppm(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_rgb8().save_with_format(path, ImageFormat::Pnm)?;
        log::debug!("Wrote {}x{} PPM to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Decode a PNM image (any of P1-P7) into an opaque float image
    pub fn read_ppm<R: BufRead + Seek>(input: R) -> Result<Image> {
        let decoded = ImageReader::with_format(input, ImageFormat::Pnm).decode()?;
        Ok(Self::from_rgb8(&decoded.to_rgb8()))
    }

    pub fn load_ppm(path: impl AsRef<Path>) -> Result<Image> {
        let mut reader = ImageReader::open(path)?;
        reader.set_format(ImageFormat::Pnm);
        Ok(Self::from_rgb8(&reader.decode()?.to_rgb8()))
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    (255.0 * v.clamp(0.0, 1.0)) as u8
}
