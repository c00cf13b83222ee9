use serde::Serialize;
use std::fmt;

/// Reference frequencies (Hz) of each pitch class at octave 0, C first.
pub const NOTES: [f64; 12] = [
    16.35, 17.32, 18.35, 19.45, 20.60, 21.83, 23.12, 24.50, 25.96, 27.50, 29.14, 30.87,
];

/// The twelve semitones of the chromatic scale, named with flats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PitchClass {
    C,
    Db,
    D,
    Eb,
    E,
    F,
    Gb,
    G,
    Ab,
    A,
    Bb,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Db,
        PitchClass::D,
        PitchClass::Eb,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Gb,
        PitchClass::G,
        PitchClass::Ab,
        PitchClass::A,
        PitchClass::Bb,
        PitchClass::B,
    ];

    /// Semitone index within the octave (C = 0, B = 11).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Reference frequency at octave 0.
    pub fn base_frequency(self) -> f64 {
        NOTES[self.index()]
    }

    /// Reference frequency at `octave`.
    pub fn frequency(self, octave: u8) -> f64 {
        self.base_frequency() * 2f64.powi(octave as i32)
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Db => "Db",
            PitchClass::D => "D",
            PitchClass::Eb => "Eb",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Gb => "Gb",
            PitchClass::G => "G",
            PitchClass::Ab => "Ab",
            PitchClass::A => "A",
            PitchClass::Bb => "Bb",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What one beat of the recording became.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pitch {
    Note { class: PitchClass, octave: u8 },
    Rest,
}

impl Pitch {
    pub fn note(class: PitchClass, octave: u8) -> Self {
        Pitch::Note { class, octave }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, Pitch::Rest)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pitch::Note { class, octave } => write!(f, "{}{}", class, octave),
            Pitch::Rest => f.write_str("rest"),
        }
    }
}

/// Pitches in beat order, rests included.
pub type NoteSequence = Vec<Pitch>;
