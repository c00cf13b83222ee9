//! staffwright - turn a monophonic recording into sheet music
//!
//! The pipeline slices a waveform into beat-length windows, estimates the
//! dominant frequency of each window, quantizes it to a note name and octave
//! and lays the resulting glyphs out on a staff template.

pub mod audio;
pub mod config;
pub mod pipeline;
pub mod pitch;
pub mod render;
pub mod templates;

pub use audio::decode::Waveform;
pub use config::{Config, StaffGeometry};
pub use pitch::{NoteSequence, Pitch, PitchClass};
