//! End-to-end entry points: waveform to notes, notes to sheet pages.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::audio::{FrequencyTracker, TrackerError, Waveform};
use crate::config::validate_page_limit;
use crate::pitch::{quantize_all, NoteSequence, Pitch};
use crate::render::SheetRenderer;
use crate::templates::StaffAssets;

/// Outcome of a full conversion.
#[derive(Debug)]
pub struct Conversion {
    pub notes: NoteSequence,
    /// Written sheet pages, first page first.
    pub pages: Vec<PathBuf>,
}

/// One pitch (or rest) per beat of `waveform` at `bpm`.
pub fn transcribe(waveform: &Waveform, bpm: f64) -> Result<NoteSequence, TrackerError> {
    let tracker = FrequencyTracker::new(bpm)?;
    let frequencies = tracker.track(waveform)?;
    let notes = quantize_all(&frequencies);

    let rests = notes.iter().filter(|p| p.is_rest()).count();
    log::info!("Transcribed {} beat(s), {} rest(s)", notes.len(), rests);
    Ok(notes)
}

/// Transcribe `waveform` and render the sheet to `output`.
pub fn convert(
    waveform: &Waveform,
    bpm: f64,
    renderer: &SheetRenderer,
    assets: &StaffAssets,
    output: &Path,
    max_pages: Option<usize>,
) -> Result<Conversion> {
    validate_page_limit(max_pages)?;
    let geometry = renderer.geometry();
    let expected = (geometry.canvas_width, geometry.canvas_height);
    if assets.dimensions() != expected {
        log::warn!(
            "Template is {}x{} but the staff geometry expects {}x{}",
            assets.dimensions().0,
            assets.dimensions().1,
            expected.0,
            expected.1
        );
    }

    let notes = transcribe(waveform, bpm)?;
    let pages = renderer.render(assets, &notes, output, max_pages)?;
    Ok(Conversion { notes, pages })
}

/// Space-separated note names, e.g. `A4 rest C5`.
pub fn describe(notes: &[Pitch]) -> String {
    notes.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(" ")
}
