//! Staff template and glyph assets.

pub mod loader;
pub mod manifest;

pub use loader::{find_assets_dir, load_assets, GlyphSet, StaffAssets};
pub use manifest::StaffManifest;
