//! A song: the final composition, an ordered collection of tracks.
//! Songs are what the backends consume — the CSound score renderer and
//! the MIDI event generator both walk `Song -> Track -> Measure -> Note`.

use serde::{Deserialize, Serialize};

use crate::measure::MeasureError;
use crate::swing::Swing;
use crate::track::Track;

/// A complete composition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: Option<String>,
    tracks: Vec<Track>,
}

impl Song {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            tracks: Vec::new(),
        }
    }

    pub fn from_tracks(name: Option<String>, tracks: Vec<Track>) -> Self {
        Self { name, tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Track> {
        self.tracks.iter_mut()
    }

    /// Find a track by name.
    pub fn track_by_name(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name == name)
    }

    pub fn track_by_name_mut(&mut self, name: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.name == name)
    }

    /// Total measure count across all tracks.
    pub fn measure_count(&self) -> usize {
        self.tracks.iter().map(Track::len).sum()
    }

    // ── Broadcast operations ────────────────────────────────────────

    pub fn quantize(&mut self) -> Result<(), MeasureError> {
        for track in &mut self.tracks {
            track.quantize()?;
        }
        Ok(())
    }

    pub fn quantize_to_beat(&mut self) -> Result<(), MeasureError> {
        for track in &mut self.tracks {
            track.quantize_to_beat()?;
        }
        Ok(())
    }

    pub fn set_swing(&mut self, swing: &Swing) {
        for track in &mut self.tracks {
            track.set_swing(swing);
        }
    }

    pub fn apply_swing(&mut self) -> Result<(), MeasureError> {
        for track in &mut self.tracks {
            track.apply_swing()?;
        }
        Ok(())
    }

    pub fn transpose(&mut self, semitones: i32) {
        for track in &mut self.tracks {
            track.transpose(semitones);
        }
    }
}

impl IntoIterator for Song {
    type Item = Track;
    type IntoIter = std::vec::IntoIter<Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.into_iter()
    }
}
