use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};

use super::manifest::StaffManifest;
use crate::render::Glyph;

/// Decoded glyph bitmaps.
pub struct GlyphSet {
    pub notehead: RgbaImage,
    pub high_notehead: RgbaImage,
    pub rest: RgbaImage,
    pub clef: RgbaImage,
    pub time_signature: RgbaImage,
}

impl GlyphSet {
    pub fn get(&self, glyph: Glyph) -> &RgbaImage {
        match glyph {
            Glyph::Notehead => &self.notehead,
            Glyph::HighNotehead => &self.high_notehead,
            Glyph::Rest => &self.rest,
            Glyph::Clef => &self.clef,
            Glyph::TimeSignature => &self.time_signature,
        }
    }
}

pub struct StaffAssets {
    pub manifest: StaffManifest,
    /// Blank staff page every sheet starts from. Read-only.
    pub template: RgbaImage,
    pub glyphs: GlyphSet,
}

impl StaffAssets {
    pub fn dimensions(&self) -> (u32, u32) {
        self.template.dimensions()
    }
}

/// Locate the bundled staff assets: next to the executable, then up the
/// target/ layout, then the crate's own `assets/staff`.
pub fn find_assets_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    if let Some(dir) = exe_dir {
        for ancestor in dir.ancestors().take(3) {
            let candidate = ancestor.join("assets").join("staff");
            if candidate.join("manifest.json").exists() {
                return candidate;
            }
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join("staff")
}

fn load_image(dir: &Path, relative: &str) -> Result<RgbaImage> {
    let path = dir.join(relative);
    let image = image::open(&path)
        .with_context(|| format!("Failed to load image asset: {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Load the manifest, template and every glyph from `dir`. Any missing or
/// undecodable file is an error.
pub fn load_assets(dir: &Path) -> Result<StaffAssets> {
    if !dir.exists() {
        anyhow::bail!("Staff asset directory not found: {}", dir.display());
    }

    let manifest_path = dir.join("manifest.json");
    let manifest_str = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read manifest: {}", manifest_path.display()))?;
    let manifest: StaffManifest = serde_json::from_str(&manifest_str)
        .with_context(|| format!("Failed to parse manifest: {}", manifest_path.display()))?;

    let template = load_image(dir, &manifest.template)?;
    let glyphs = GlyphSet {
        notehead: load_image(dir, &manifest.glyphs.notehead)?,
        high_notehead: load_image(dir, &manifest.glyphs.high_notehead)?,
        rest: load_image(dir, &manifest.glyphs.rest)?,
        clef: load_image(dir, &manifest.glyphs.clef)?,
        time_signature: load_image(dir, &manifest.glyphs.time_signature)?,
    };

    log::info!(
        "Loaded staff assets '{}' ({}x{}) from {}",
        manifest.name,
        template.width(),
        template.height(),
        dir.display()
    );
    if !manifest.description.is_empty() {
        log::debug!("{}: {}", manifest.name, manifest.description);
    }

    Ok(StaffAssets {
        manifest,
        template,
        glyphs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::solid;

    const MANIFEST: &str = r#"{
        "name": "test",
        "template": "template.png",
        "glyphs": {
            "notehead": "note.png",
            "high_notehead": "note_high.png",
            "rest": "rest.png",
            "clef": "clef.png",
            "time_signature": "time.png"
        }
    }"#;

    fn write_assets(dir: &Path, skip: Option<&str>) {
        std::fs::write(dir.join("manifest.json"), MANIFEST).unwrap();
        let files = [
            ("template.png", solid(20, 10, [255, 255, 255, 255])),
            ("note.png", solid(2, 4, [0, 0, 0, 255])),
            ("note_high.png", solid(2, 4, [0, 0, 0, 255])),
            ("rest.png", solid(2, 2, [0, 0, 0, 255])),
            ("clef.png", solid(3, 6, [0, 0, 0, 255])),
            ("time.png", solid(3, 3, [0, 0, 0, 255])),
        ];
        for (name, img) in files {
            if Some(name) != skip {
                img.save(dir.join(name)).unwrap();
            }
        }
    }

    #[test]
    fn loads_every_asset() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path(), None);
        let assets = load_assets(dir.path()).unwrap();
        assert_eq!(assets.dimensions(), (20, 10));
        assert_eq!(assets.glyphs.get(Glyph::Clef).dimensions(), (3, 6));
        assert_eq!(assets.manifest.name, "test");
    }

    #[test]
    fn missing_glyph_is_fatal_and_named() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path(), Some("rest.png"));
        let err = load_assets(dir.path()).err().unwrap();
        assert!(format!("{:#}", err).contains("rest.png"));
    }

    #[test]
    fn missing_directory_is_fatal() {
        assert!(load_assets(Path::new("/nonexistent/staff")).is_err());
    }

    #[test]
    fn bundled_assets_load() {
        let assets = load_assets(&find_assets_dir()).unwrap();
        let staff = crate::config::StaffGeometry::default();
        assert_eq!(assets.dimensions(), (staff.canvas_width, staff.canvas_height));
    }
}
