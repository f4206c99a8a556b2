//! A track: one instrument's ordered measures across the whole piece.

use serde::{Deserialize, Serialize};

use crate::measure::{Measure, MeasureError};
use crate::section::Section;
use crate::swing::Swing;

/// An instrument's full sequence of measures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub instrument: u32,
    measures: Vec<Measure>,
}

impl Track {
    pub fn new(name: impl Into<String>, instrument: u32) -> Self {
        Self {
            name: name.into(),
            instrument,
            measures: Vec::new(),
        }
    }

    /// Build a track from a section's measures.
    pub fn from_section(name: impl Into<String>, instrument: u32, section: Section) -> Self {
        let mut track = Self::new(name, instrument);
        track.extend(section);
        track
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    pub fn append(&mut self, measure: Measure) {
        self.measures.push(measure);
    }

    pub fn extend(&mut self, measures: impl IntoIterator<Item = Measure>) {
        self.measures.extend(measures);
    }

    pub fn get(&self, index: usize) -> Option<&Measure> {
        self.measures.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Measure> {
        self.measures.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Measure> {
        self.measures.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Measure> {
        self.measures.iter_mut()
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    // ── Broadcast operations ────────────────────────────────────────

    pub fn quantize(&mut self) -> Result<(), MeasureError> {
        for measure in &mut self.measures {
            measure.quantize()?;
        }
        Ok(())
    }

    pub fn quantize_to_beat(&mut self) -> Result<(), MeasureError> {
        for measure in &mut self.measures {
            measure.quantize_to_beat()?;
        }
        Ok(())
    }

    pub fn set_swing(&mut self, swing: &Swing) {
        for measure in &mut self.measures {
            measure.set_swing(swing.clone());
        }
    }

    pub fn apply_swing(&mut self) -> Result<(), MeasureError> {
        for measure in &mut self.measures {
            measure.apply_swing()?;
        }
        Ok(())
    }

    pub fn transpose(&mut self, semitones: i32) {
        for measure in &mut self.measures {
            measure.transpose(semitones);
        }
    }

    /// Set the track instrument and push it down to every note.
    pub fn set_instrument(&mut self, instrument: u32) {
        self.instrument = instrument;
        for measure in &mut self.measures {
            measure.set_instrument(instrument);
        }
    }

    pub fn set_amplitude(&mut self, amplitude: u32) {
        for measure in &mut self.measures {
            measure.set_amplitude(amplitude);
        }
    }
}

impl IntoIterator for Track {
    type Item = Measure;
    type IntoIter = std::vec::IntoIter<Measure>;

    fn into_iter(self) -> Self::IntoIter {
        self.measures.into_iter()
    }
}
