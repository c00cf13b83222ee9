pub mod canvas;
pub mod layout;
pub mod sheet;
pub mod text;

pub use canvas::{Canvas, Glyph, RasterCanvas};
pub use layout::{LayoutError, PageLayout, Placement, StaffLayout};
pub use sheet::{page_path, SheetRenderer};
pub use text::TextOverlay;
