//! Page assembly: staff furniture plus laid-out note glyphs.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use super::canvas::{Canvas, Glyph, RasterCanvas, INK};
use super::layout::{PageLayout, StaffLayout};
use super::text::TextOverlay;
use crate::config::StaffGeometry;
use crate::pitch::Pitch;
use crate::templates::StaffAssets;

/// Gap between the clef and the time signature on the opening ledger.
const TIME_SIGNATURE_GAP: i32 = 4;

pub struct SheetRenderer<'a> {
    geometry: &'a StaffGeometry,
    title: Option<(TextOverlay, String)>,
}

impl<'a> SheetRenderer<'a> {
    pub fn new(geometry: &'a StaffGeometry) -> Self {
        Self { geometry, title: None }
    }

    pub fn with_title(mut self, overlay: TextOverlay, title: impl Into<String>) -> Self {
        self.title = Some((overlay, title.into()));
        self
    }

    pub fn geometry(&self) -> &StaffGeometry {
        self.geometry
    }

    /// Bar lines between the measures of every ledger.
    pub fn draw_measure_lines(&self, canvas: &mut dyn Canvas) {
        let g = self.geometry;
        for row in 0..g.ledger_count {
            for j in 1..g.measures_per_ledger {
                let x = g.margin_width + g.reserved_space + g.measure_width() * j as f32;
                canvas.draw_line((x, g.ledger_top(row)), (x, g.ledger_bottom(row)), INK);
            }
        }
    }

    /// A clef at the head of every ledger, and the time signature after the
    /// clef on the opening ledger of the first page.
    pub fn draw_clefs(&self, canvas: &mut dyn Canvas, clef_width: u32, first_page: bool) {
        let g = self.geometry;
        let x = g.margin_width.round() as i32;
        for row in 0..g.ledger_count {
            canvas.draw_glyph(Glyph::Clef, x, g.ledger_top(row).round() as i32);
        }
        if first_page {
            let ts_x = x + clef_width as i32 + TIME_SIGNATURE_GAP;
            canvas.draw_glyph(Glyph::TimeSignature, ts_x, g.ledger_top(0).round() as i32);
        }
    }

    /// Title centred in the top margin.
    pub fn draw_title(&self, canvas: &mut dyn Canvas) {
        let Some((overlay, title)) = &self.title else {
            return;
        };
        let g = self.geometry;
        let width = overlay.measure_width(title) as i32;
        let x = ((g.canvas_width as i32 - width) / 2).max(0);
        let y = ((g.margin_height as i32 - overlay.line_height() as i32) / 2).max(0);
        overlay.composite(canvas, title, x, y, INK);
    }

    /// Draw one page. Note glyphs go down in sequence order, after the
    /// furniture.
    pub fn draw_page(&self, canvas: &mut dyn Canvas, page: &PageLayout, clef_width: u32) {
        let first_page = page.number == 1;
        self.draw_measure_lines(canvas);
        self.draw_clefs(canvas, clef_width, first_page);
        if first_page {
            self.draw_title(canvas);
        }
        for placement in &page.placements {
            canvas.draw_glyph(
                placement.glyph,
                placement.x.round() as i32,
                placement.y.round() as i32,
            );
        }
    }

    /// Lay out `notes`, draw every page onto a copy of the template and save
    /// them. Returns the written paths, first page first.
    pub fn render(
        &self,
        assets: &StaffAssets,
        notes: &[Pitch],
        output: &Path,
        max_pages: Option<usize>,
    ) -> Result<Vec<PathBuf>> {
        let pages = StaffLayout::new(self.geometry).layout(notes, max_pages)?;
        log::info!("Rendering {} note(s) onto {} page(s)", notes.len(), pages.len());

        let pb = ProgressBar::new(pages.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pages")?
                .progress_chars("=>-"),
        );

        let clef_width = assets.glyphs.clef.width();
        let mut written = Vec::with_capacity(pages.len());
        for page in &pages {
            let mut canvas = RasterCanvas::new(&assets.template, &assets.glyphs);
            self.draw_page(&mut canvas, page, clef_width);

            let path = page_path(output, page.number);
            canvas.save(&path)?;
            log::debug!("Wrote page {} to {}", page.number, path.display());
            written.push(path);
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(written)
    }
}

/// Output path of page `number`: the first page uses `output` itself, later
/// pages insert `-<number>` before the extension.
pub fn page_path(output: &Path, number: usize) -> PathBuf {
    if number <= 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string());
    let name = match output.extension() {
        Some(ext) => format!("{}-{}.{}", stem, number, ext.to_string_lossy()),
        None => format!("{}-{}", stem, number),
    };
    output.with_file_name(name)
}
