//! Pitch vocabulary: key spellings, octaves, and chromatic arithmetic.
//!
//! A `Key` is a named pitch spelling (C, C#, Db, ...) in either the major
//! or minor naming system; a `Pitch` is a key placed in an octave.  Backends
//! translate a `Pitch` into whatever concrete value they consume (CSound
//! octave.pitchclass literals, MIDI note numbers, FoxDot scale degrees).

use serde::{Deserialize, Serialize};

/// Semitones per octave in the Western chromatic system.
pub const STEPS_IN_OCTAVE: i32 = 12;

/// Lowest octave a `Pitch` may occupy.
pub const MIN_OCTAVE: i32 = 0;
/// Highest octave a `Pitch` may occupy.
pub const MAX_OCTAVE: i32 = 10;

/// The fifteen key spellings of the major system (enharmonic spellings
/// like C# and Db are distinct names sharing a pitch class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MajorKey {
    CFlat,
    C,
    CSharp,
    DFlat,
    D,
    EFlat,
    E,
    F,
    FSharp,
    GFlat,
    G,
    AFlat,
    A,
    BFlat,
    B,
}

impl MajorKey {
    /// Chromatic pitch class, 0 (C) through 11 (B).
    pub fn pitch_class(self) -> i32 {
        match self {
            MajorKey::CFlat => 11,
            MajorKey::C => 0,
            MajorKey::CSharp => 1,
            MajorKey::DFlat => 1,
            MajorKey::D => 2,
            MajorKey::EFlat => 3,
            MajorKey::E => 4,
            MajorKey::F => 5,
            MajorKey::FSharp => 6,
            MajorKey::GFlat => 6,
            MajorKey::G => 7,
            MajorKey::AFlat => 8,
            MajorKey::A => 9,
            MajorKey::BFlat => 10,
            MajorKey::B => 11,
        }
    }

    /// Conventional name, e.g. "C#" or "Db".
    pub fn name(self) -> &'static str {
        match self {
            MajorKey::CFlat => "Cb",
            MajorKey::C => "C",
            MajorKey::CSharp => "C#",
            MajorKey::DFlat => "Db",
            MajorKey::D => "D",
            MajorKey::EFlat => "Eb",
            MajorKey::E => "E",
            MajorKey::F => "F",
            MajorKey::FSharp => "F#",
            MajorKey::GFlat => "Gb",
            MajorKey::G => "G",
            MajorKey::AFlat => "Ab",
            MajorKey::A => "A",
            MajorKey::BFlat => "Bb",
            MajorKey::B => "B",
        }
    }
}

/// The fifteen key spellings of the minor system (lowercase by convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinorKey {
    AFlat,
    A,
    ASharp,
    BFlat,
    B,
    C,
    CSharp,
    D,
    DSharp,
    EFlat,
    E,
    ESharp,
    F,
    FSharp,
    G,
}

impl MinorKey {
    /// Chromatic pitch class, 0 (c) through 11 (b).
    pub fn pitch_class(self) -> i32 {
        match self {
            MinorKey::AFlat => 8,
            MinorKey::A => 9,
            MinorKey::ASharp => 10,
            MinorKey::BFlat => 10,
            MinorKey::B => 11,
            MinorKey::C => 0,
            MinorKey::CSharp => 1,
            MinorKey::D => 2,
            MinorKey::DSharp => 3,
            MinorKey::EFlat => 3,
            MinorKey::E => 4,
            MinorKey::ESharp => 5,
            MinorKey::F => 5,
            MinorKey::FSharp => 6,
            MinorKey::G => 7,
        }
    }

    /// Conventional name, e.g. "c#" or "eb".
    pub fn name(self) -> &'static str {
        match self {
            MinorKey::AFlat => "ab",
            MinorKey::A => "a",
            MinorKey::ASharp => "a#",
            MinorKey::BFlat => "bb",
            MinorKey::B => "b",
            MinorKey::C => "c",
            MinorKey::CSharp => "c#",
            MinorKey::D => "d",
            MinorKey::DSharp => "d#",
            MinorKey::EFlat => "eb",
            MinorKey::E => "e",
            MinorKey::ESharp => "e#",
            MinorKey::F => "f",
            MinorKey::FSharp => "f#",
            MinorKey::G => "g",
        }
    }
}

/// Canonical major spelling for each pitch class (used when rebuilding a
/// key after chromatic transposition — flats for the black keys above D,
/// sharps below, the common default spelling).
const MAJOR_FROM_PITCH_CLASS: [MajorKey; 12] = [
    MajorKey::C,
    MajorKey::CSharp,
    MajorKey::D,
    MajorKey::EFlat,
    MajorKey::E,
    MajorKey::F,
    MajorKey::FSharp,
    MajorKey::G,
    MajorKey::AFlat,
    MajorKey::A,
    MajorKey::BFlat,
    MajorKey::B,
];

/// Canonical minor spelling for each pitch class.
const MINOR_FROM_PITCH_CLASS: [MinorKey; 12] = [
    MinorKey::C,
    MinorKey::CSharp,
    MinorKey::D,
    MinorKey::EFlat,
    MinorKey::E,
    MinorKey::F,
    MinorKey::FSharp,
    MinorKey::G,
    MinorKey::AFlat,
    MinorKey::A,
    MinorKey::BFlat,
    MinorKey::B,
];

/// A key in either naming system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Major(MajorKey),
    Minor(MinorKey),
}

impl Key {
    /// Chromatic pitch class, 0..=11.
    pub fn pitch_class(self) -> i32 {
        match self {
            Key::Major(k) => k.pitch_class(),
            Key::Minor(k) => k.pitch_class(),
        }
    }

    /// Conventional name of the key spelling.
    pub fn name(self) -> &'static str {
        match self {
            Key::Major(k) => k.name(),
            Key::Minor(k) => k.name(),
        }
    }

    /// Whether this key is spelled in the minor system.
    pub fn is_minor(self) -> bool {
        matches!(self, Key::Minor(_))
    }

    /// Canonical key for a pitch class, preserving the naming system.
    pub fn from_pitch_class(pitch_class: i32, minor: bool) -> Key {
        let pc = pitch_class.rem_euclid(STEPS_IN_OCTAVE) as usize;
        if minor {
            Key::Minor(MINOR_FROM_PITCH_CLASS[pc])
        } else {
            Key::Major(MAJOR_FROM_PITCH_CLASS[pc])
        }
    }
}

/// A key placed in an octave.  Middle C is `(Key::Major(MajorKey::C), 4)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub key: Key,
    pub octave: i32,
}

impl Pitch {
    pub fn new(key: Key, octave: i32) -> Self {
        Self { key, octave }
    }

    /// Absolute chromatic position: `octave * 12 + pitch_class`.
    pub fn chromatic_position(self) -> i32 {
        self.octave * STEPS_IN_OCTAVE + self.key.pitch_class()
    }

    /// Transpose by `semitones`, preserving the naming system and
    /// rebuilding the spelling from the canonical per-pitch-class table.
    /// The result is clamped to the octave range 0..=10.
    pub fn transposed(self, semitones: i32) -> Pitch {
        let min = MIN_OCTAVE * STEPS_IN_OCTAVE;
        let max = MAX_OCTAVE * STEPS_IN_OCTAVE + (STEPS_IN_OCTAVE - 1);
        let position = (self.chromatic_position() + semitones).clamp(min, max);
        Pitch {
            key: Key::from_pitch_class(position.rem_euclid(STEPS_IN_OCTAVE), self.key.is_minor()),
            octave: position.div_euclid(STEPS_IN_OCTAVE),
        }
    }
}
