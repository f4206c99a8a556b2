//! Abstract note model and the timed-note contract consumed by the
//! quantizer.
//!
//! The quantization algorithms in [`crate::meter`] never see a concrete
//! note type — they operate over anything implementing [`TimedNote`].
//! That keeps them usable by any of the backend note representations via
//! adapter, and makes the algorithms testable with bare stub structs.

use serde::{Deserialize, Serialize};

use crate::pitch::Pitch;

/// The minimal capability the quantizer needs from a note: a mutable
/// (start, duration) pair in seconds.
///
/// All quantize operations mutate these fields in place on a caller-owned
/// collection; they never add or remove elements.
pub trait TimedNote {
    /// Absolute start offset within the measure, in seconds.
    fn start(&self) -> f64;
    fn set_start(&mut self, start_secs: f64);
    /// Sounding duration in seconds.
    fn duration(&self) -> f64;
    fn set_duration(&mut self, dur_secs: f64);
}

/// A backend-independent note: when it plays, for how long, how loud,
/// and at what pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Backend instrument number (CSound instrument, MIDI program, ...)
    pub instrument: u32,
    /// Start offset within the owning measure, in seconds
    pub start_secs: f64,
    /// Duration in seconds
    pub dur_secs: f64,
    /// Amplitude; backends scale this (MIDI clamps to velocity 0..=127)
    pub amplitude: u32,
    /// Abstract pitch, mapped per backend
    pub pitch: Pitch,
    /// Optional display name
    pub name: Option<String>,
}

impl Note {
    pub fn new(instrument: u32, start_secs: f64, dur_secs: f64, amplitude: u32, pitch: Pitch) -> Self {
        Self {
            instrument,
            start_secs,
            dur_secs,
            amplitude,
            pitch,
            name: None,
        }
    }

    /// The moment this note stops sounding.
    pub fn end_time_secs(&self) -> f64 {
        self.start_secs + self.dur_secs
    }

    /// Move the pitch chromatically by `semitones`.
    pub fn transpose(&mut self, semitones: i32) {
        self.pitch = self.pitch.transposed(semitones);
    }
}

impl TimedNote for Note {
    fn start(&self) -> f64 {
        self.start_secs
    }

    fn set_start(&mut self, start_secs: f64) {
        self.start_secs = start_secs;
    }

    fn duration(&self) -> f64 {
        self.dur_secs
    }

    fn set_duration(&mut self, dur_secs: f64) {
        self.dur_secs = dur_secs;
    }
}
