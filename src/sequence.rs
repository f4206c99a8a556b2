//! Ordered note collection — the unit the quantizer and the modifiers
//! operate over.

use serde::{Deserialize, Serialize};

use crate::note::Note;

/// An ordered, finite collection of notes.  The quantizer rewrites the
/// start/duration of existing elements but never adds or removes any;
/// list management stays here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteSequence {
    notes: Vec<Note>,
}

impl NoteSequence {
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn append(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn extend(&mut self, notes: impl IntoIterator<Item = Note>) {
        self.notes.extend(notes);
    }

    pub fn insert(&mut self, index: usize, note: Note) {
        self.notes.insert(index, note);
    }

    pub fn remove(&mut self, index: usize) -> Note {
        self.notes.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Note> {
        self.notes.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Note> {
        self.notes.iter_mut()
    }

    /// Borrow the notes as a slice — the shape the quantizer consumes.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Mutable slice view for in-place transforms (quantize, swing).
    pub fn notes_mut(&mut self) -> &mut [Note] {
        &mut self.notes
    }

    /// End time of the latest-ending note, or 0.0 when empty.  This is
    /// the collection's elapsed time; overlapping notes don't double-count.
    pub fn max_end_time_secs(&self) -> f64 {
        self.notes
            .iter()
            .map(Note::end_time_secs)
            .fold(0.0, f64::max)
    }

    /// Sort ascending by start time.  Containers that promise a sorted
    /// order call this after every mutation that can disturb it.
    pub fn sort_by_start(&mut self) {
        self.notes.sort_by(|a, b| {
            a.start_secs
                .partial_cmp(&b.start_secs)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Transpose every note chromatically by `semitones`.
    pub fn transpose(&mut self, semitones: i32) {
        for note in &mut self.notes {
            note.transpose(semitones);
        }
    }

    /// Set every note's instrument.
    pub fn set_instrument(&mut self, instrument: u32) {
        for note in &mut self.notes {
            note.instrument = instrument;
        }
    }

    /// Set every note's amplitude.
    pub fn set_amplitude(&mut self, amplitude: u32) {
        for note in &mut self.notes {
            note.amplitude = amplitude;
        }
    }
}

impl IntoIterator for NoteSequence {
    type Item = Note;
    type IntoIter = std::vec::IntoIter<Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.into_iter()
    }
}

impl<'a> IntoIterator for &'a NoteSequence {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

impl FromIterator<Note> for NoteSequence {
    fn from_iter<T: IntoIterator<Item = Note>>(iter: T) -> Self {
        Self {
            notes: iter.into_iter().collect(),
        }
    }
}
