//! composelib — music composition data-modeling and quantization library.
//!
//! Models musical notes, scales, chords, meters, and the performance
//! hierarchy (measure → section → track → song), and maps abstract
//! pitches to the concrete representations consumed by three audio
//! backends (CSound score text, MIDI events, FoxDot/SuperCollider
//! player arguments).  The heart of the crate is the meter's
//! quantization engine: proportional rescale-to-measure and
//! closest-beat snapping with deterministic tie-breaking.
//!
//! # Example
//! ```
//! use composelib::{Measure, Meter, Note, NoteDur};
//! use composelib::pitch::{Key, MajorKey, Pitch};
//!
//! // 4/4 at 240 QPM: the measure lasts exactly one second.
//! let meter = Meter::with_tempo(4, NoteDur::Quarter, 240.0, true).unwrap();
//! assert_eq!(meter.measure_dur_secs(), 1.0);
//! assert_eq!(meter.beat_start_times_secs(), &[0.0, 0.25, 0.5, 0.75]);
//!
//! let mut measure = Measure::new(meter);
//! for _ in 0..4 {
//!     let note = Note::new(1, 0.0, 0.25, 100, Pitch::new(Key::Major(MajorKey::C), 4));
//!     measure.add_note_on_beat(note, true).unwrap();
//! }
//! measure.quantize_to_beat().unwrap();
//! ```

pub mod backend;
pub mod measure;
pub mod meter;
pub mod note;
pub mod pitch;
pub mod scale;
pub mod section;
pub mod sequence;
pub mod song;
pub mod swing;
pub mod track;

pub use measure::{Measure, MeasureError};
pub use meter::{Meter, MeterError, NoteDur, NoteTime};
pub use note::{Note, TimedNote};
pub use scale::{Chord, ChordKind, Scale, ScaleKind};
pub use section::Section;
pub use sequence::NoteSequence;
pub use song::Song;
pub use swing::{Swing, SwingDirection, SwingJitterType};
pub use track::Track;

/// Serialize a song to a pretty-printed JSON string.
/// Useful for passing compositions across process boundaries.
pub fn song_to_json(song: &Song) -> serde_json::Result<String> {
    serde_json::to_string_pretty(song)
}

/// Parse a song from a JSON string previously produced by
/// [`song_to_json`].
pub fn song_from_json(json: &str) -> serde_json::Result<Song> {
    serde_json::from_str(json)
}
