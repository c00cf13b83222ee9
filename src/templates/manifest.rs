use serde::Deserialize;

/// `manifest.json` of a staff asset directory. Paths are relative to the
/// directory holding the manifest.
#[derive(Debug, Deserialize)]
pub struct StaffManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub template: String,
    pub glyphs: GlyphPaths,
}

#[derive(Debug, Deserialize)]
pub struct GlyphPaths {
    pub notehead: String,
    pub high_notehead: String,
    pub rest: String,
    pub clef: String,
    pub time_signature: String,
}
