//! Scale and chord generation from semitone-interval tables.
//!
//! Just enough music theory to hydrate note sequences from a key: each
//! scale or chord kind is a fixed table of semitone offsets from the
//! root, and generation is chromatic arithmetic over [`Pitch`].

use serde::{Deserialize, Serialize};

use crate::meter::{Meter, NoteDur};
use crate::note::Note;
use crate::pitch::{Key, Pitch, STEPS_IN_OCTAVE};
use crate::sequence::NoteSequence;

/// Supported scale shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleKind {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    Chromatic,
    MajorPentatonic,
    MinorPentatonic,
}

impl ScaleKind {
    /// Semitone offsets from the root, one octave, root included.
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ScaleKind::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleKind::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleKind::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleKind::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            ScaleKind::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            ScaleKind::MajorPentatonic => &[0, 2, 4, 7, 9],
            ScaleKind::MinorPentatonic => &[0, 3, 5, 7, 10],
        }
    }

    /// Number of degrees in one octave of the scale.
    pub fn degree_count(self) -> usize {
        self.intervals().len()
    }
}

/// A scale rooted at a key in an octave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub key: Key,
    pub octave: i32,
    pub kind: ScaleKind,
}

impl Scale {
    pub fn new(key: Key, octave: i32, kind: ScaleKind) -> Self {
        Self { key, octave, kind }
    }

    /// One octave of pitches, root first, ascending.  Spellings come
    /// from the canonical per-pitch-class table, preserving the root's
    /// major/minor naming system.
    pub fn pitches(&self) -> Vec<Pitch> {
        let root = Pitch::new(self.key, self.octave).chromatic_position();
        let minor = self.key.is_minor();
        self.kind
            .intervals()
            .iter()
            .map(|&offset| {
                let position = root + offset;
                Pitch {
                    key: Key::from_pitch_class(position.rem_euclid(STEPS_IN_OCTAVE), minor),
                    octave: position.div_euclid(STEPS_IN_OCTAVE),
                }
            })
            .collect()
    }

    /// Hydrate a note sequence with one note per scale degree, placed
    /// end-to-end, each lasting `dur` under `meter`'s timing.
    pub fn note_sequence(
        &self,
        meter: &Meter,
        dur: NoteDur,
        amplitude: u32,
        instrument: u32,
    ) -> NoteSequence {
        let dur_secs = meter.duration_secs_for(dur);
        self.pitches()
            .into_iter()
            .enumerate()
            .map(|(i, pitch)| Note::new(instrument, i as f64 * dur_secs, dur_secs, amplitude, pitch))
            .collect()
    }
}

/// Supported chord qualities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordKind {
    MajorTriad,
    MinorTriad,
    AugmentedTriad,
    DiminishedTriad,
    MajorSeventh,
    MinorSeventh,
    DominantSeventh,
}

impl ChordKind {
    /// Semitone offsets from the root.
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ChordKind::MajorTriad => &[0, 4, 7],
            ChordKind::MinorTriad => &[0, 3, 7],
            ChordKind::AugmentedTriad => &[0, 4, 8],
            ChordKind::DiminishedTriad => &[0, 3, 6],
            ChordKind::MajorSeventh => &[0, 4, 7, 11],
            ChordKind::MinorSeventh => &[0, 3, 7, 10],
            ChordKind::DominantSeventh => &[0, 4, 7, 10],
        }
    }
}

/// A chord rooted at a key in an octave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub key: Key,
    pub octave: i32,
    pub kind: ChordKind,
}

impl Chord {
    pub fn new(key: Key, octave: i32, kind: ChordKind) -> Self {
        Self { key, octave, kind }
    }

    /// The chord tones, root first, ascending.
    pub fn pitches(&self) -> Vec<Pitch> {
        let root = Pitch::new(self.key, self.octave).chromatic_position();
        let minor = self.key.is_minor();
        self.kind
            .intervals()
            .iter()
            .map(|&offset| {
                let position = root + offset;
                Pitch {
                    key: Key::from_pitch_class(position.rem_euclid(STEPS_IN_OCTAVE), minor),
                    octave: position.div_euclid(STEPS_IN_OCTAVE),
                }
            })
            .collect()
    }

    /// Hydrate a note sequence with all chord tones sounding together at
    /// `start_secs` — overlapping notes, which the quantizer supports by
    /// measuring elapsed time as the latest end rather than a sum.
    pub fn note_sequence(
        &self,
        meter: &Meter,
        start_secs: f64,
        dur: NoteDur,
        amplitude: u32,
        instrument: u32,
    ) -> NoteSequence {
        let dur_secs = meter.duration_secs_for(dur);
        self.pitches()
            .into_iter()
            .map(|pitch| Note::new(instrument, start_secs, dur_secs, amplitude, pitch))
            .collect()
    }
}
