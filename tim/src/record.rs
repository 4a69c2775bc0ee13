use image::RgbaImage;

use crate::color::{AlphaPolicy, Color};
use crate::header::{Clut, BPP};

/// One fully decoded TIM record.
#[derive(Debug, Clone, PartialEq)]
pub struct TimImage {
    pub version: u8,
    pub bpp: BPP,
    pub clut: Option<Clut>,
    pub x: u16,
    pub y: u16,
    /// Width in 16-bit VRAM units, as stored.
    pub raw_width: u16,
    /// Width in pixels.
    pub width: u32,
    pub height: u32,
    /// Row-major, top to bottom.
    pub pixels: Vec<Color>,
}

impl TimImage {
    pub fn has_palette(&self) -> bool {
        self.clut.is_some()
    }

    pub fn palette(&self) -> Option<&[Color]> {
        self.clut.as_ref().map(|clut| clut.colors.as_slice())
    }

    /// Flat RGBA8 buffer of exactly `width * height` pixels.
    ///
    /// Pixels missing from `pixels` stay transparent black and surplus ones are
    /// dropped, which only happens for images decoded with
    /// [`PixelCount::LegacySquare`](crate::PixelCount::LegacySquare).
    pub fn to_rgba8(&self, policy: AlphaPolicy) -> Vec<u8> {
        let len = self.width as usize * self.height as usize;
        let mut data = vec![0u8; len * 4];

        for (out, color) in data.chunks_exact_mut(4).zip(self.pixels.iter()) {
            out.copy_from_slice(&color.to_rgba(policy).0);
        }

        data
    }

    pub fn to_rgba_image(&self, policy: AlphaPolicy) -> RgbaImage {
        let mut texture = RgbaImage::new(self.width, self.height);

        for (pixel, color) in texture.pixels_mut().zip(self.pixels.iter()) {
            *pixel = color.to_rgba(policy);
        }

        texture
    }
}
