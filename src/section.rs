//! A section: a named, ordered run of measures that are operated on as
//! one unit (a verse, a chorus, a bridge).

use serde::{Deserialize, Serialize};

use crate::measure::{Measure, MeasureError};
use crate::swing::Swing;

/// An ordered group of measures with broadcast operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: Option<String>,
    measures: Vec<Measure>,
}

impl Section {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            measures: Vec::new(),
        }
    }

    pub fn from_measures(name: Option<String>, measures: Vec<Measure>) -> Self {
        Self { name, measures }
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

    /// Quantize every measure.  Stops at the first failure.
    pub fn quantize(&mut self) -> Result<(), MeasureError> {
        for measure in &mut self.measures {
            measure.quantize()?;
        }
        Ok(())
    }

    /// Quantize-to-beat every measure.  Stops at the first failure.
    pub fn quantize_to_beat(&mut self) -> Result<(), MeasureError> {
        for measure in &mut self.measures {
            measure.quantize_to_beat()?;
        }
        Ok(())
    }

    /// Install a copy of `swing` on every measure.
    pub fn set_swing(&mut self, swing: &Swing) {
        for measure in &mut self.measures {
            measure.set_swing(swing.clone());
        }
    }

    /// Apply swing in every measure; every measure must have a swing
    /// configured (install one with [`Section::set_swing`]).
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

    pub fn set_instrument(&mut self, instrument: u32) {
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

impl IntoIterator for Section {
    type Item = Measure;
    type IntoIter = std::vec::IntoIter<Measure>;

    fn into_iter(self) -> Self::IntoIter {
        self.measures.into_iter()
    }
}
