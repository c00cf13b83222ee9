use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub staff: StaffGeometry,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_bpm")]
    pub bpm: f64,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_title_size")]
    pub title_size: f32,
    #[serde(default)]
    pub max_pages: Option<usize>,
    #[serde(default)]
    pub font: Option<PathBuf>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { bpm: default_bpm() }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title_size: default_title_size(),
            max_pages: None,
            font: None,
        }
    }
}

fn default_bpm() -> f64 { 60.0 }
fn default_title_size() -> f32 { 28.0 }

/// Pixel geometry of the staff template, in template pixels.
///
/// Every ledger is a five-line staff of `ledger_height` pixels. The first
/// `reserved_space` pixels of each ledger hold the clef and time signature;
/// the rest is split into measures and beats.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StaffGeometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub ledger_width: f32,
    pub ledger_height: f32,
    pub ledger_padding: f32,
    pub ledger_count: usize,
    pub margin_height: f32,
    pub margin_width: f32,
    pub reserved_space: f32,
    pub measures_per_ledger: usize,
    pub beats_per_measure: usize,
    pub note_width: f32,
    pub note_height: f32,
    pub whole_step: f32,
    /// Pitch class index drawn at a ledger's top offset (F by default).
    pub reference_note: usize,
    /// Notes at or above this octave use the flipped-stem glyph.
    pub high_octave: u8,
}

impl Default for StaffGeometry {
    fn default() -> Self {
        Self {
            canvas_width: 685,
            canvas_height: 901,
            ledger_width: 625.0,
            ledger_height: 47.0,
            ledger_padding: 65.0,
            ledger_count: 8,
            margin_height: 35.0,
            margin_width: 30.0,
            reserved_space: 50.0,
            measures_per_ledger: 4,
            beats_per_measure: 4,
            note_width: 14.0,
            note_height: 38.0,
            whole_step: 11.0,
            reference_note: 5,
            high_octave: 5,
        }
    }
}

impl StaffGeometry {
    pub fn measure_width(&self) -> f32 {
        (self.ledger_width - self.reserved_space) / self.measures_per_ledger as f32
    }

    pub fn beat_space(&self) -> f32 {
        self.measure_width() / self.beats_per_measure as f32
    }

    pub fn half_step(&self) -> f32 {
        self.whole_step / 2.0
    }

    pub fn beats_per_ledger(&self) -> usize {
        self.measures_per_ledger * self.beats_per_measure
    }

    pub fn notes_per_page(&self) -> usize {
        self.beats_per_ledger() * self.ledger_count
    }

    /// Y of the top staff line of ledger `row`.
    pub fn ledger_top(&self, row: usize) -> f32 {
        self.margin_height + row as f32 * (self.ledger_height + self.ledger_padding)
    }

    pub fn ledger_bottom(&self, row: usize) -> f32 {
        self.ledger_top(row) + self.ledger_height
    }

    pub fn validate(&self) -> Result<()> {
        if self.ledger_count == 0 || self.measures_per_ledger == 0 || self.beats_per_measure == 0 {
            anyhow::bail!("staff geometry needs at least one ledger, measure and beat");
        }
        if self.reference_note > 11 {
            anyhow::bail!("reference_note must be a pitch class index (0-11), got {}", self.reference_note);
        }
        if self.beat_space() <= 0.0 {
            anyhow::bail!(
                "reserved_space ({}) leaves no room on a {}px ledger",
                self.reserved_space,
                self.ledger_width
            );
        }
        let bottom = self.ledger_bottom(self.ledger_count - 1);
        if bottom > self.canvas_height as f32 {
            anyhow::bail!("{} ledgers end at y={} below the {}px canvas", self.ledger_count, bottom, self.canvas_height);
        }
        Ok(())
    }
}

/// A page limit, when set, must allow at least one page.
pub fn validate_page_limit(max_pages: Option<usize>) -> Result<()> {
    if max_pages == Some(0) {
        anyhow::bail!("max_pages must be at least 1");
    }
    Ok(())
}

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Invalid config {}: {}", path.display(), err);
            None
        }
    }
}
