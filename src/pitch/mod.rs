//! Note naming and frequency quantization.

pub mod note;
pub mod quantize;

pub use note::{NoteSequence, Pitch, PitchClass, NOTES};
pub use quantize::{find_note, find_octave, quantize, quantize_all, PitchError};
