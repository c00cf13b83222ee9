//! Frequency to (pitch class, octave) classification.

use thiserror::Error;

use super::note::{NoteSequence, Pitch, PitchClass};

/// Highest octave the boundary table covers.
pub const MAX_OCTAVE: u8 = 8;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PitchError {
    #[error("{0} Hz is not a pitched frequency")]
    NoPitch(f64),

    #[error("{0:.2} Hz lies outside every octave")]
    OctaveUndetected(f64),

    #[error("{freq:.2} Hz matches no pitch class in octave {octave}")]
    PitchClassUndetected { freq: f64, octave: u8 },
}

/// Upper edge of each octave: B at octave 0 through B at octave 8.
pub fn octave_boundaries() -> [f64; MAX_OCTAVE as usize + 1] {
    let base = PitchClass::B.base_frequency();
    std::array::from_fn(|k| base * 2f64.powi(k as i32))
}

/// Octave of `freq`. Each octave runs from just above one B up to and
/// including the next, so every B reference pitch stays in its own octave.
pub fn find_octave(freq: f64) -> Result<u8, PitchError> {
    if !freq.is_finite() || freq <= 0.0 {
        return Err(PitchError::NoPitch(freq));
    }

    let bounds = octave_boundaries();
    if freq <= bounds[0] {
        return Ok(0);
    }
    bounds
        .windows(2)
        .position(|edge| edge[0] < freq && freq <= edge[1])
        .map(|k| k as u8 + 1)
        .ok_or(PitchError::OctaveUndetected(freq))
}

/// Nearest pitch class whose band at `octave` contains `freq`.
///
/// The band is `±2^octave` Hz around the reference, so it widens with the
/// octave and keeps a roughly constant width in semitones. Bands of
/// neighbouring classes overlap; an exact tie goes to the lower class.
fn match_class(freq: f64, octave: u8) -> Option<PitchClass> {
    let tolerance = 2f64.powi(octave as i32);
    let mut best: Option<(PitchClass, f64)> = None;

    for class in PitchClass::ALL {
        let distance = (freq - class.frequency(octave)).abs();
        if distance >= tolerance {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((class, distance));
        }
    }

    best.map(|(class, _)| class)
}

/// Classify `freq` as the nearest note.
///
/// B of the octave below is also a candidate: a B measured slightly sharp
/// crosses its octave edge but is still nearer to B than to the next C.
pub fn find_note(freq: f64) -> Result<Pitch, PitchError> {
    let octave = find_octave(freq)?;
    let mut best = match_class(freq, octave)
        .map(|class| (Pitch::note(class, octave), (freq - class.frequency(octave)).abs()));

    if let Some(lower) = octave.checked_sub(1) {
        let distance = (freq - PitchClass::B.frequency(lower)).abs();
        let tolerance = 2f64.powi(lower as i32);
        if distance < tolerance && best.map_or(true, |(_, d)| distance < d) {
            best = Some((Pitch::note(PitchClass::B, lower), distance));
        }
    }

    best.map(|(pitch, _)| pitch)
        .ok_or(PitchError::PitchClassUndetected { freq, octave })
}

/// Classify one tracked window; every failure becomes a rest.
pub fn quantize(frequency: Option<f64>) -> Pitch {
    let Some(freq) = frequency else {
        return Pitch::Rest;
    };
    match find_note(freq) {
        Ok(pitch) => pitch,
        Err(err) => {
            log::debug!("Treating window as rest: {}", err);
            Pitch::Rest
        }
    }
}

/// Classify every window, keeping beat order.
pub fn quantize_all(frequencies: &[Option<f64>]) -> NoteSequence {
    frequencies.iter().map(|&f| quantize(f)).collect()
}
