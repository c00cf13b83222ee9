use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use std::path::Path;

use super::canvas::Canvas;

/// Rasterised single-line text, used for the sheet title.
pub struct TextOverlay {
    font: Font,
    font_size: f32,
}

impl TextOverlay {
    pub fn from_bytes(bytes: &[u8], font_size: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to parse font: {}", e))?;
        Ok(Self { font, font_size })
    }

    pub fn from_file(path: &Path, font_size: f32) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font: {}", path.display()))?;
        Self::from_bytes(&bytes, font_size)
            .with_context(|| format!("Failed to load font: {}", path.display()))
    }

    pub fn line_height(&self) -> u32 {
        self.font_size.ceil() as u32
    }

    /// Draw `text` onto `canvas` with its top-left corner at (`x`, `y`).
    pub fn composite(&self, canvas: &mut dyn Canvas, text: &str, x: i32, y: i32, color: [u8; 4]) {
        let mut cursor_x = x;
        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
            let glyph_y = y + self.font_size as i32 - metrics.height as i32 - metrics.ymin;
            if metrics.width > 0 && metrics.height > 0 {
                canvas.draw_mask(
                    &bitmap,
                    metrics.width,
                    metrics.height,
                    cursor_x + metrics.xmin,
                    glyph_y,
                    color,
                );
            }
            cursor_x += metrics.advance_width.round() as i32;
        }
    }

    /// Width of the rendered text in pixels.
    pub fn measure_width(&self, text: &str) -> u32 {
        let width: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, self.font_size).advance_width)
            .sum();
        width.ceil() as u32
    }
}
