//! FoxDot/SuperCollider backend: maps the abstract note model onto the
//! keyword arguments a FoxDot player takes in a live-coding session —
//! a scale degree plus octave instead of an absolute pitch, a delay
//! instead of a start time, and a named scale.

use serde::{Deserialize, Serialize};

use crate::note::Note;
use crate::pitch::Pitch;
use crate::scale::ScaleKind;

/// FoxDot's name for a scale kind.
pub fn scale_name(kind: ScaleKind) -> &'static str {
    match kind {
        ScaleKind::Major => "major",
        ScaleKind::NaturalMinor => "minor",
        ScaleKind::HarmonicMinor => "harmonicMinor",
        ScaleKind::MelodicMinor => "melodicMinor",
        ScaleKind::Chromatic => "chromatic",
        ScaleKind::MajorPentatonic => "majorPentatonic",
        ScaleKind::MinorPentatonic => "minorPentatonic",
    }
}

/// Degree within `kind`'s scale for a pitch, if the pitch lies on the
/// scale: FoxDot addresses pitch as (degree, octave) against the
/// player's scale rather than chromatically.
pub fn scale_degree(pitch: &Pitch, kind: ScaleKind) -> Option<usize> {
    let pc = pitch.key.pitch_class();
    kind.intervals().iter().position(|&offset| offset == pc)
}

/// The player arguments for one note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerArgs {
    /// Scale degree (chromatic degree when the pitch is off-scale)
    pub degree: usize,
    pub octave: i32,
    /// Offset from the player's trigger time, seconds
    pub delay_secs: f64,
    pub dur_secs: f64,
    pub amp: u32,
    /// FoxDot scale name
    pub scale: &'static str,
}

/// Map a note onto FoxDot player arguments against `kind`'s scale.
/// Off-scale pitches fall back to the chromatic scale so the degree is
/// always addressable.
pub fn player_args(note: &Note, kind: ScaleKind) -> PlayerArgs {
    let (degree, scale) = match scale_degree(&note.pitch, kind) {
        Some(degree) => (degree, scale_name(kind)),
        None => (
            note.pitch.key.pitch_class() as usize,
            scale_name(ScaleKind::Chromatic),
        ),
    };
    PlayerArgs {
        degree,
        octave: note.pitch.octave,
        delay_secs: note.start_secs,
        dur_secs: note.dur_secs,
        amp: note.amplitude,
        scale,
    }
}
