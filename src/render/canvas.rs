use anyhow::{Context, Result};
use image::{imageops, DynamicImage, RgbaImage};
use std::path::Path;

use crate::templates::GlyphSet;

pub const INK: [u8; 4] = [0, 0, 0, 255];

/// Bitmaps a sheet is assembled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    Notehead,
    /// Notehead with the stem flipped below, for high notes.
    HighNotehead,
    Rest,
    Clef,
    TimeSignature,
}

/// Drawing surface for one page. Calls are applied in the order issued, so
/// later glyphs cover earlier ones.
pub trait Canvas {
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: [u8; 4]);

    /// Draw `glyph` with its top-left corner at (`x`, `y`).
    fn draw_glyph(&mut self, glyph: Glyph, x: i32, y: i32);

    /// Blend `color` through an 8-bit coverage mask of `width` x `height`.
    fn draw_mask(&mut self, mask: &[u8], width: usize, height: usize, x: i32, y: i32, color: [u8; 4]);

    fn save(&self, path: &Path) -> Result<()>;
}

/// Canvas backed by an RGBA raster, seeded from the staff template.
pub struct RasterCanvas<'a> {
    image: RgbaImage,
    glyphs: &'a GlyphSet,
}

impl<'a> RasterCanvas<'a> {
    pub fn new(template: &RgbaImage, glyphs: &'a GlyphSet) -> Self {
        Self {
            image: template.clone(),
            glyphs,
        }
    }

    #[cfg(test)]
    pub(crate) fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn blend(&mut self, x: i32, y: i32, color: [u8; 4], coverage: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i32 || y >= self.image.height() as i32 {
            return;
        }
        let a = coverage * (color[3] as f32 / 255.0);
        let inv_a = 1.0 - a;
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            px.0[c] = (color[c] as f32 * a + px.0[c] as f32 * inv_a) as u8;
        }
        px.0[3] = 255;
    }
}

impl Canvas for RasterCanvas<'_> {
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: [u8; 4]) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).round().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (from.0 + dx * t).round() as i32;
            let y = (from.1 + dy * t).round() as i32;
            self.blend(x, y, color, 1.0);
        }
    }

    fn draw_glyph(&mut self, glyph: Glyph, x: i32, y: i32) {
        imageops::overlay(&mut self.image, self.glyphs.get(glyph), x as i64, y as i64);
    }

    fn draw_mask(&mut self, mask: &[u8], width: usize, height: usize, x: i32, y: i32, color: [u8; 4]) {
        for gy in 0..height {
            for gx in 0..width {
                let alpha = mask[gy * width + gx];
                if alpha == 0 {
                    continue;
                }
                self.blend(x + gx as i32, y + gy as i32, color, alpha as f32 / 255.0);
            }
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        // JPEG has no alpha channel; sheets are opaque anyway.
        DynamicImage::ImageRgba8(self.image.clone())
            .to_rgb8()
            .save(path)
            .with_context(|| format!("Failed to save sheet: {}", path.display()))
    }
}

/// Solid-colour bitmap for placeholder glyphs.
#[cfg(test)]
pub(crate) fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, image::Rgba(color))
}
