//! MIDI backend: maps the abstract note model onto MIDI note numbers,
//! velocities, and General MIDI programs, and flattens a song into a
//! time-ordered event list.
//!
//! Writing Standard MIDI Files is out of scope here — the event list is
//! the hand-off format for whatever MIDI sink the caller drives.

use serde::{Deserialize, Serialize};

use crate::note::Note;
use crate::pitch::Pitch;
use crate::song::Song;

/// General MIDI program numbers for the instruments this library's
/// compositions commonly use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MidiInstrument {
    AcousticGrandPiano = 0,
    BrightAcousticPiano = 1,
    ElectricGrandPiano = 2,
    HonkyTonkPiano = 3,
    ElectricPiano1 = 4,
    ElectricPiano2 = 5,
    Harpsichord = 6,
    Clavinet = 7,
    Celesta = 8,
    Glockenspiel = 9,
    MusicBox = 10,
    Vibraphone = 11,
    Marimba = 12,
    Xylophone = 13,
    TubularBells = 14,
    DrawbarOrgan = 16,
    ChurchOrgan = 19,
    Accordion = 21,
    AcousticGuitarNylon = 24,
    AcousticGuitarSteel = 25,
    ElectricGuitarJazz = 26,
    ElectricGuitarClean = 27,
    OverdrivenGuitar = 29,
    DistortionGuitar = 30,
    AcousticBass = 32,
    ElectricBassFinger = 33,
    ElectricBassPick = 34,
    FretlessBass = 35,
    SlapBass1 = 36,
    SynthBass1 = 38,
    Violin = 40,
    Viola = 41,
    Cello = 42,
    Contrabass = 43,
    TremoloStrings = 44,
    PizzicatoStrings = 45,
    OrchestralHarp = 46,
    Timpani = 47,
    StringEnsemble1 = 48,
    SynthStrings1 = 50,
    ChoirAahs = 52,
    Trumpet = 56,
    Trombone = 57,
    Tuba = 58,
    FrenchHorn = 60,
    SopranoSax = 64,
    AltoSax = 65,
    TenorSax = 66,
    Oboe = 68,
    Clarinet = 71,
    Piccolo = 72,
    Flute = 73,
}

impl MidiInstrument {
    /// The raw program number.
    pub fn program(self) -> u8 {
        self as u8
    }
}

/// Highest MIDI data-byte value.
const MIDI_MAX: u32 = 127;

/// MIDI note number for a pitch; middle C (C4) is 60.  Clamped to the
/// valid 0..=127 range.
pub fn midi_pitch(pitch: &Pitch) -> u8 {
    let number = (pitch.octave + 1) * 12 + pitch.key.pitch_class();
    number.clamp(0, MIDI_MAX as i32) as u8
}

/// Velocity for an amplitude, clamped to 0..=127.
pub fn velocity(amplitude: u32) -> u8 {
    amplitude.min(MIDI_MAX) as u8
}

/// One sounding note, absolute-timed within the song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidiNoteEvent {
    pub channel: u8,
    pub program: u8,
    pub note: u8,
    pub velocity: u8,
    pub start_secs: f64,
    pub dur_secs: f64,
}

impl MidiNoteEvent {
    fn from_note(note: &Note, channel: u8, program: u8, offset_secs: f64) -> Self {
        Self {
            channel,
            program,
            note: midi_pitch(&note.pitch),
            velocity: velocity(note.amplitude),
            start_secs: offset_secs + note.start_secs,
            dur_secs: note.dur_secs,
        }
    }
}

/// Channel 9 is reserved for percussion in General MIDI.
const PERCUSSION_CHANNEL: u8 = 9;

/// Flatten a song into a time-sorted event list.  Each track gets its
/// own channel (skipping the percussion channel) and contributes its
/// instrument as the program; within a track, measures play
/// back-to-back.
pub fn events_for_song(song: &Song) -> Vec<MidiNoteEvent> {
    let mut events = Vec::new();

    let mut channel: u8 = 0;
    for track in song.iter() {
        if channel == PERCUSSION_CHANNEL {
            channel += 1;
        }
        let program = track.instrument.min(MIDI_MAX) as u8;

        let mut offset_secs = 0.0;
        for measure in track.iter() {
            for note in measure.notes() {
                events.push(MidiNoteEvent::from_note(note, channel, program, offset_secs));
            }
            offset_secs += measure.meter().measure_dur_secs();
        }

        channel = (channel + 1) % 16;
    }

    events.sort_by(|a, b| {
        a.start_secs
            .partial_cmp(&b.start_secs)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    events
}
