//! A measure: one meter's worth of notes, kept sorted by start time.
//!
//! The measure owns a [`Meter`], an optional [`Swing`], and a
//! [`NoteSequence`], and layers musical conveniences over them: a beat
//! cursor for placing notes on successive beats, a start cursor for
//! packing notes end-to-end, and pass-throughs for quantization and
//! swing that re-establish the sorted-by-start invariant afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::meter::{Meter, MeterError};
use crate::note::Note;
use crate::sequence::NoteSequence;
use crate::swing::{Swing, SwingDirection, SwingJitterType};

/// Errors from measure-level note placement and modifier application.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Adding the note(s) would exceed one note per beat.
    #[error("measure already holds one note per beat ({beats_per_measure} beats)")]
    BeatCountExceeded { beats_per_measure: u32 },
    /// The note doesn't fit in the remaining measure duration.
    #[error(
        "note of {note_dur_secs}s starting at {next_note_start_secs}s overflows the measure \
         duration of {measure_dur_secs}s"
    )]
    MeasureFull {
        next_note_start_secs: f64,
        note_dur_secs: f64,
        measure_dur_secs: f64,
    },
    /// A swing operation was requested but no swing is configured.
    #[error("swing requested but none is configured on this measure")]
    SwingNotEnabled,
    #[error(transparent)]
    Meter(#[from] MeterError),
}

/// One measure of music under a fixed meter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    meter: Meter,
    /// Performance modifier, not score data; reconstructed rather than
    /// serialized.
    #[serde(skip)]
    swing: Option<Swing>,
    notes: NoteSequence,
    /// Beat cursor for `add_note_on_beat`
    #[serde(skip)]
    beat: usize,
    /// Start cursor for `add_note_on_start`
    #[serde(skip)]
    next_note_start_secs: f64,
}

impl PartialEq for Measure {
    // Swing holds PRNG state and is a performance modifier; equality is
    // over the musical content.
    fn eq(&self, other: &Self) -> bool {
        self.meter == other.meter && self.notes == other.notes
    }
}

impl Measure {
    pub fn new(meter: Meter) -> Self {
        Self {
            meter,
            swing: None,
            notes: NoteSequence::new(),
            beat: 0,
            next_note_start_secs: 0.0,
        }
    }

    pub fn with_swing(meter: Meter, swing: Swing) -> Self {
        let mut measure = Self::new(meter);
        measure.swing = Some(swing);
        measure
    }

    pub fn meter(&self) -> &Meter {
        &self.meter
    }

    pub fn swing(&self) -> Option<&Swing> {
        self.swing.as_ref()
    }

    pub fn set_swing(&mut self, swing: Swing) {
        self.swing = Some(swing);
    }

    pub fn notes(&self) -> &NoteSequence {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn is_quantizing(&self) -> bool {
        self.meter.is_quantizing()
    }

    /// Toggling quantizing is the only meter mutation a measure permits.
    pub fn set_quantizing(&mut self, quantizing: bool) {
        self.meter.set_quantizing(quantizing);
    }

    // ── Beat cursor ─────────────────────────────────────────────────

    pub fn current_beat(&self) -> usize {
        self.beat
    }

    pub fn reset_current_beat(&mut self) {
        self.beat = 0;
    }

    pub fn increment_beat(&mut self) {
        self.beat = (self.beat + 1).min(self.meter.beats_per_measure() as usize - 1);
    }

    pub fn decrement_beat(&mut self) {
        self.beat = self.beat.saturating_sub(1);
    }

    // ── Placing notes ───────────────────────────────────────────────

    /// Place `note` on the current beat.  With `increment_beat` the
    /// cursor advances afterwards, so repeated calls walk the beats.
    /// Fails once the measure holds one note per beat.
    pub fn add_note_on_beat(&mut self, mut note: Note, increment_beat: bool) -> Result<(), MeasureError> {
        if self.notes.len() + 1 > self.meter.beats_per_measure() as usize {
            return Err(MeasureError::BeatCountExceeded {
                beats_per_measure: self.meter.beats_per_measure(),
            });
        }

        note.start_secs = self.meter.beat_start_times_secs()[self.beat];
        self.notes.append(note);
        self.notes.sort_by_start();

        if increment_beat {
            self.increment_beat();
        }
        Ok(())
    }

    /// Place each note of `to_add` on successive beats, starting from
    /// the first beat.  Fails when the sequence holds more notes than
    /// the measure has beats.
    pub fn add_notes_on_beat(&mut self, to_add: NoteSequence) -> Result<(), MeasureError> {
        if to_add.len() > self.meter.beats_per_measure() as usize {
            return Err(MeasureError::BeatCountExceeded {
                beats_per_measure: self.meter.beats_per_measure(),
            });
        }

        let beat_times = self.meter.beat_start_times_secs().to_vec();
        for (i, mut note) in to_add.into_iter().enumerate() {
            note.start_secs = beat_times[i];
            self.notes.append(note);
        }
        self.notes.sort_by_start();
        Ok(())
    }

    /// Place `note` at the start cursor (immediately after the previous
    /// note placed this way).  With `increment_start` the cursor moves
    /// past the note's end.  Fails when the note would overflow the
    /// measure duration.
    pub fn add_note_on_start(&mut self, mut note: Note, increment_start: bool) -> Result<(), MeasureError> {
        if self.next_note_start_secs + note.dur_secs > self.meter.measure_dur_secs() {
            return Err(MeasureError::MeasureFull {
                next_note_start_secs: self.next_note_start_secs,
                note_dur_secs: note.dur_secs,
                measure_dur_secs: self.meter.measure_dur_secs(),
            });
        }

        note.start_secs = self.next_note_start_secs;
        let dur = note.dur_secs;
        self.notes.append(note);
        self.notes.sort_by_start();

        if increment_start {
            self.next_note_start_secs += dur;
        }
        Ok(())
    }

    /// Pack every note of `to_add` end-to-end from the start cursor.
    /// All-or-nothing: the whole batch is validated against the remaining
    /// measure duration before any note is appended.
    pub fn add_notes_on_start(&mut self, to_add: NoteSequence) -> Result<(), MeasureError> {
        let batch_dur_secs: f64 = to_add.iter().map(|n| n.dur_secs).sum();
        if self.next_note_start_secs + batch_dur_secs > self.meter.measure_dur_secs() {
            return Err(MeasureError::MeasureFull {
                next_note_start_secs: self.next_note_start_secs,
                note_dur_secs: batch_dur_secs,
                measure_dur_secs: self.meter.measure_dur_secs(),
            });
        }
        for note in to_add {
            self.add_note_on_start(note, true)?;
        }
        Ok(())
    }

    // ── Quantization and modifiers ──────────────────────────────────

    /// Proportionally rescale this measure's notes to fill the measure.
    /// See [`Meter::quantize`].
    pub fn quantize(&mut self) -> Result<(), MeasureError> {
        self.meter.quantize(self.notes.notes_mut())?;
        self.notes.sort_by_start();
        Ok(())
    }

    /// Rescale and snap each note onset to the closest beat.  See
    /// [`Meter::quantize_to_beat`].
    pub fn quantize_to_beat(&mut self) -> Result<(), MeasureError> {
        self.meter.quantize_to_beat(self.notes.notes_mut())?;
        self.notes.sort_by_start();
        Ok(())
    }

    /// Apply the configured swing jitter to every note onset.
    pub fn apply_swing(&mut self) -> Result<(), MeasureError> {
        let swing = self.swing.as_mut().ok_or(MeasureError::SwingNotEnabled)?;
        swing.apply(self.notes.notes_mut());
        self.notes.sort_by_start();
        Ok(())
    }

    /// Accentuate the metric phrasing: move the first note slightly
    /// later and the last slightly earlier, by the fixed swing range.
    /// With zero or one notes there is nothing to phrase.
    pub fn apply_phrasing(&mut self) -> Result<(), MeasureError> {
        let swing = self.swing.as_mut().ok_or(MeasureError::SwingNotEnabled)?;
        if self.notes.len() > 1 {
            let forward =
                swing.calculate_adjust_with(SwingDirection::Forward, SwingJitterType::Fixed);
            let reverse =
                swing.calculate_adjust_with(SwingDirection::Reverse, SwingJitterType::Fixed);
            let last = self.notes.len() - 1;
            if let Some(first_note) = self.notes.get_mut(0) {
                first_note.start_secs += forward;
            }
            if let Some(last_note) = self.notes.get_mut(last) {
                last_note.start_secs = (last_note.start_secs + reverse).max(0.0);
            }
            self.notes.sort_by_start();
        }
        Ok(())
    }

    // ── Bulk note attributes ────────────────────────────────────────

    pub fn transpose(&mut self, semitones: i32) {
        self.notes.transpose(semitones);
    }

    pub fn set_instrument(&mut self, instrument: u32) {
        self.notes.set_instrument(instrument);
    }

    pub fn set_amplitude(&mut self, amplitude: u32) {
        self.notes.set_amplitude(amplitude);
    }
}
