//! CSound backend: renders songs as CSound score (.sco) text.
//!
//! CSound spells pitch as an `octave.pitchclass` literal — middle C is
//! `4.01`, the B below it `3.12` — and plays notes with i-statements:
//! `i <instrument> <start> <duration> <amplitude> <pitch>`.

use crate::note::Note;
use crate::pitch::Pitch;
use crate::song::Song;

/// CSound pitch literal for a pitch: `octave.pitchclass`, where the
/// pitch class runs .01 (C) through .12 (B).
pub fn pitch_literal(pitch: &Pitch) -> f64 {
    let class = pitch.key.pitch_class() + 1;
    pitch.octave as f64 + class as f64 / 100.0
}

/// One i-statement for a note, with `offset_secs` added to the note's
/// start (the note's own start is measure-relative).
pub fn note_statement(note: &Note, offset_secs: f64) -> String {
    format!(
        "i {} {:.5} {:.5} {} {:.2}",
        note.instrument,
        offset_secs + note.start_secs,
        note.dur_secs,
        note.amplitude,
        pitch_literal(&note.pitch)
    )
}

/// Accumulates score lines and produces the final .sco text.
pub struct ScoreBuilder {
    lines: Vec<String>,
}

impl ScoreBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn comment(&mut self, text: &str) {
        self.lines.push(format!("; {text}"));
    }

    pub fn note(&mut self, note: &Note, offset_secs: f64) {
        self.lines.push(note_statement(note, offset_secs));
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl Default for ScoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a whole song as CSound score text.  Within each track,
/// measures play back-to-back: each measure's notes are offset by the
/// summed durations of the measures before it.
pub fn render_song(song: &Song) -> String {
    let mut builder = ScoreBuilder::new();
    if let Some(ref name) = song.name {
        builder.comment(name);
    }

    for track in song.iter() {
        builder.comment(&format!("track: {}", track.name));
        let mut offset_secs = 0.0;
        for measure in track.iter() {
            for note in measure.notes() {
                builder.note(note, offset_secs);
            }
            offset_secs += measure.meter().measure_dur_secs();
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Measure;
    use crate::meter::{Meter, NoteDur};
    use crate::pitch::{Key, MajorKey, MinorKey};
    use crate::track::Track;

    #[test]
    fn pitch_literals() {
        assert_eq!(pitch_literal(&Pitch::new(Key::Major(MajorKey::C), 4)), 4.01);
        assert_eq!(pitch_literal(&Pitch::new(Key::Major(MajorKey::B), 3)), 3.12);
        // Enharmonic spellings produce the same literal
        assert_eq!(
            pitch_literal(&Pitch::new(Key::Major(MajorKey::CSharp), 5)),
            pitch_literal(&Pitch::new(Key::Major(MajorKey::DFlat), 5))
        );
        assert_eq!(pitch_literal(&Pitch::new(Key::Minor(MinorKey::A), 2)), 2.10);
    }

    #[test]
    fn note_statement_format() {
        let note = Note::new(1, 0.5, 0.25, 100, Pitch::new(Key::Major(MajorKey::C), 4));
        assert_eq!(note_statement(&note, 0.0), "i 1 0.50000 0.25000 100 4.01");
        assert_eq!(note_statement(&note, 2.0), "i 1 2.50000 0.25000 100 4.01");
    }

    #[test]
    fn render_song_offsets_measures() {
        let meter = Meter::with_tempo(4, NoteDur::Quarter, 240.0, true).unwrap();
        let mut m1 = Measure::new(meter.clone());
        let mut m2 = Measure::new(meter);
        m1.add_note_on_beat(
            Note::new(1, 0.0, 0.25, 100, Pitch::new(Key::Major(MajorKey::C), 4)),
            false,
        )
        .unwrap();
        m2.add_note_on_beat(
            Note::new(1, 0.0, 0.25, 100, Pitch::new(Key::Major(MajorKey::E), 4)),
            false,
        )
        .unwrap();

        let mut track = Track::new("lead", 1);
        track.append(m1);
        track.append(m2);
        let song = Song::from_tracks(Some("test".to_string()), vec![track]);

        let sco = render_song(&song);
        assert!(sco.contains("; test"));
        assert!(sco.contains("; track: lead"));
        // First measure note at 0.0, second measure note offset by 1.0
        assert!(sco.contains("i 1 0.00000 0.25000 100 4.01"));
        assert!(sco.contains("i 1 1.00000 0.25000 100 4.05"));
    }
}
