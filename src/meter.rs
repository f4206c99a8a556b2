//! Musical meter and the quantization engine.  This is the bridge between
//! abstract note durations (fractions of a whole note) and wall-clock
//! time — it answers "how long is a beat?" and "where do the beats fall?"
//! for one measure, and reconciles a note collection's declared timings
//! against that grid.
//!
//! Two quantization algorithms operate over any [`TimedNote`] collection:
//! - [`Meter::quantize`] proportionally rescales durations and start
//!   times so the collection fills exactly one measure.
//! - [`Meter::quantize_to_beat`] additionally snaps each start to the
//!   closest beat boundary, with a deterministic earlier-beat tie-break.
//!
//! Both mutate the caller's collection in place and never add or remove
//! elements.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::note::TimedNote;

/// Errors for meter construction and quantization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeterError {
    /// Construction argument outside its valid domain.
    #[error("invalid meter configuration: {reason}")]
    InvalidConfiguration { reason: String },
    /// The computed rescale adjustment exceeds the ±1.0 s sanity bound,
    /// which signals a likely unit mismatch between the note collection
    /// and the meter (e.g. beats where seconds were expected).
    #[error(
        "quantization adjustment of {adjustment} exceeds the maximum allowed magnitude of \
         {MAX_QUANTIZE_ADJUSTMENT_SECS}"
    )]
    QuantizationRange { adjustment: f64 },
}

/// Quantize refuses adjustments at or beyond this magnitude (seconds).
/// A fixed unit bound, deliberately not derived from the measure duration.
pub const MAX_QUANTIZE_ADJUSTMENT_SECS: f64 = 1.0;

// ═══════════════════════════════════════════════════════════════════════
// Note durations
// ═══════════════════════════════════════════════════════════════════════

/// The standard note-duration vocabulary, each a power-of-two fraction of
/// a whole note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteDur {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

/// Fraction of a whole note taken by a quarter note.
pub const QUARTER_NOTE_DUR: f64 = 0.25;

/// Name lookup table: canonical names plus the short aliases.  Multiple
/// names map to one duration, so this is a table rather than extra enum
/// variants.
const NOTE_DUR_NAMES: [(&str, NoteDur); 14] = [
    ("WHOLE", NoteDur::Whole),
    ("WHL", NoteDur::Whole),
    ("HALF", NoteDur::Half),
    ("HLF", NoteDur::Half),
    ("QUARTER", NoteDur::Quarter),
    ("QRTR", NoteDur::Quarter),
    ("EIGHTH", NoteDur::Eighth),
    ("EITH", NoteDur::Eighth),
    ("SIXTEENTH", NoteDur::Sixteenth),
    ("SXTNTH", NoteDur::Sixteenth),
    ("THIRTYSECOND", NoteDur::ThirtySecond),
    ("THRTYSCND", NoteDur::ThirtySecond),
    ("SIXTYFOURTH", NoteDur::SixtyFourth),
    ("SXTYFRTH", NoteDur::SixtyFourth),
];

impl NoteDur {
    /// Fraction of a whole note, in (0.0, 1.0].
    pub const fn fraction(self) -> f64 {
        match self {
            NoteDur::Whole => 1.0,
            NoteDur::Half => 0.5,
            NoteDur::Quarter => 0.25,
            NoteDur::Eighth => 0.125,
            NoteDur::Sixteenth => 0.0625,
            NoteDur::ThirtySecond => 0.03125,
            NoteDur::SixtyFourth => 0.015625,
        }
    }

    /// Look up a duration by canonical name or alias (case-insensitive),
    /// e.g. "QUARTER" or "QRTR".
    pub fn from_name(name: &str) -> Option<NoteDur> {
        NOTE_DUR_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, dur)| dur)
    }
}

/// A note time that is either a vocabulary duration or a raw fraction of
/// a whole note.  Lets [`Meter::duration_secs_for`] accept both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteTime {
    Dur(NoteDur),
    Fraction(f64),
}

impl NoteTime {
    fn fraction(self) -> f64 {
        match self {
            NoteTime::Dur(dur) => dur.fraction(),
            NoteTime::Fraction(f) => f,
        }
    }
}

impl From<NoteDur> for NoteTime {
    fn from(dur: NoteDur) -> Self {
        NoteTime::Dur(dur)
    }
}

impl From<f64> for NoteTime {
    fn from(fraction: f64) -> Self {
        NoteTime::Fraction(fraction)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Meter
// ═══════════════════════════════════════════════════════════════════════

/// Default tempo if none is specified, in quarter notes per minute.
pub const DEFAULT_TEMPO_QPM: f64 = 60.0;

const SECS_PER_MINUTE: f64 = 60.0;

/// A time signature plus tempo, with the real-time measure and beat
/// grid derived once at construction.
///
/// `beats_per_measure` is the numerator of the time signature and
/// `beat_note_dur` the denominator: 6/8 is `(6, NoteDur::Eighth)`.
/// The tempo, in quarter notes per minute, converts the unitless meter
/// into seconds.  All derived fields are immutable after construction;
/// the only permitted mutation is toggling the quantizing flag.  To
/// change the tempo or signature, construct a new `Meter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeterConfig", into = "MeterConfig")]
pub struct Meter {
    beats_per_measure: u32,
    beat_note_dur: NoteDur,
    tempo_qpm: f64,
    quantizing: bool,

    // Derived at construction
    quarter_note_dur_secs: f64,
    quarter_notes_per_beat_note: f64,
    note_dur_secs: f64,
    measure_dur_secs: f64,
    beat_start_times_secs: Vec<f64>,
}

/// Serialized form of a `Meter` — configuration only; the derived grid is
/// recomputed on deserialization so it can never disagree with the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MeterConfig {
    beats_per_measure: u32,
    beat_note_dur: NoteDur,
    tempo_qpm: f64,
    quantizing: bool,
}

impl From<Meter> for MeterConfig {
    fn from(meter: Meter) -> Self {
        Self {
            beats_per_measure: meter.beats_per_measure,
            beat_note_dur: meter.beat_note_dur,
            tempo_qpm: meter.tempo_qpm,
            quantizing: meter.quantizing,
        }
    }
}

impl TryFrom<MeterConfig> for Meter {
    type Error = MeterError;

    fn try_from(config: MeterConfig) -> Result<Self, MeterError> {
        Meter::with_tempo(
            config.beats_per_measure,
            config.beat_note_dur,
            config.tempo_qpm,
            config.quantizing,
        )
    }
}

impl Meter {
    /// Construct a meter at the default tempo of 60 QPM, quantizing on.
    pub fn new(beats_per_measure: u32, beat_note_dur: NoteDur) -> Result<Self, MeterError> {
        Self::with_tempo(beats_per_measure, beat_note_dur, DEFAULT_TEMPO_QPM, true)
    }

    /// Construct a meter with an explicit tempo in quarter notes per
    /// minute.  Fails with [`MeterError::InvalidConfiguration`] when
    /// `beats_per_measure` is zero or the tempo is not a positive finite
    /// number.
    pub fn with_tempo(
        beats_per_measure: u32,
        beat_note_dur: NoteDur,
        tempo_qpm: f64,
        quantizing: bool,
    ) -> Result<Self, MeterError> {
        if beats_per_measure == 0 {
            return Err(MeterError::InvalidConfiguration {
                reason: "beats_per_measure must be positive".to_string(),
            });
        }
        if !tempo_qpm.is_finite() || tempo_qpm <= 0.0 {
            return Err(MeterError::InvalidConfiguration {
                reason: format!("tempo_qpm must be a positive finite number, got {tempo_qpm}"),
            });
        }

        // Each beat is some multiple of a quarter note; the tempo gives the
        // wall-clock length of a quarter note, and everything else follows.
        let quarter_note_dur_secs = SECS_PER_MINUTE / tempo_qpm;
        let quarter_notes_per_beat_note = beat_note_dur.fraction() / QUARTER_NOTE_DUR;
        let note_dur_secs = quarter_notes_per_beat_note * quarter_note_dur_secs;
        let measure_dur_secs = note_dur_secs * beats_per_measure as f64;
        let beat_start_times_secs = (0..beats_per_measure)
            .map(|i| note_dur_secs * i as f64)
            .collect();

        Ok(Self {
            beats_per_measure,
            beat_note_dur,
            tempo_qpm,
            quantizing,
            quarter_note_dur_secs,
            quarter_notes_per_beat_note,
            note_dur_secs,
            measure_dur_secs,
            beat_start_times_secs,
        })
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Numerator of the time signature.
    pub fn beats_per_measure(&self) -> u32 {
        self.beats_per_measure
    }

    /// Denominator of the time signature, as a note duration.
    pub fn beat_note_dur(&self) -> NoteDur {
        self.beat_note_dur
    }

    /// Tempo in quarter notes per minute.
    pub fn tempo_qpm(&self) -> f64 {
        self.tempo_qpm
    }

    /// Wall-clock duration of one quarter note.
    pub fn quarter_note_dur_secs(&self) -> f64 {
        self.quarter_note_dur_secs
    }

    /// Ratio of the configured beat unit to a quarter note (0.5 in x/8
    /// meters, 1.0 in x/4, 2.0 in x/2).
    pub fn quarter_notes_per_beat_note(&self) -> f64 {
        self.quarter_notes_per_beat_note
    }

    /// Wall-clock duration of one beat.
    pub fn note_dur_secs(&self) -> f64 {
        self.note_dur_secs
    }

    /// Wall-clock duration of one full measure.
    pub fn measure_dur_secs(&self) -> f64 {
        self.measure_dur_secs
    }

    /// Ascending absolute start offsets of each beat within the measure.
    /// Always has exactly `beats_per_measure` entries.
    pub fn beat_start_times_secs(&self) -> &[f64] {
        &self.beat_start_times_secs
    }

    pub fn is_quantizing(&self) -> bool {
        self.quantizing
    }

    /// Toggle quantizing; when off, both quantize operations are no-ops.
    pub fn set_quantizing(&mut self, quantizing: bool) {
        self.quantizing = quantizing;
    }

    /// Convert an abstract note time (a `NoteDur` or a raw fraction of a
    /// whole note) into seconds under this meter's beat duration.
    pub fn duration_secs_for(&self, time: impl Into<NoteTime>) -> f64 {
        self.note_dur_secs * time.into().fraction()
    }

    // ── Quantization ────────────────────────────────────────────────

    /// Proportionally rescale all notes so the collection's total elapsed
    /// time equals the measure duration, preserving relative proportions.
    ///
    /// The collection's elapsed time is `max(start + duration)` — the end
    /// of the latest-ending note, so overlapping notes are supported.
    /// Each note's duration grows or shrinks in proportion to itself
    /// (`dur += dur * total_adjustment`) and its start shifts by the
    /// residual (`total_adjustment - dur_adjustment`), except that notes
    /// starting at (or rounding to) zero never move: the measure's first
    /// onset stays at the downbeat.
    ///
    /// No-op when quantizing is off, when the collection is empty, or
    /// when the elapsed time already matches the measure exactly.
    /// Fails with [`MeterError::QuantizationRange`] before mutating
    /// anything when `|total_adjustment| >= 1.0` seconds.
    pub fn quantize<N: TimedNote>(&self, notes: &mut [N]) -> Result<(), MeterError> {
        if !self.quantizing || notes.is_empty() {
            return Ok(());
        }

        let notes_dur = notes
            .iter()
            .map(|n| n.start() + n.duration())
            .fold(f64::NEG_INFINITY, f64::max);
        if notes_dur == self.measure_dur_secs {
            return Ok(());
        }

        // Negative when the notes run long, positive when they run short.
        let total_adjustment = self.measure_dur_secs - notes_dur;
        if total_adjustment.abs() >= MAX_QUANTIZE_ADJUSTMENT_SECS {
            return Err(MeterError::QuantizationRange {
                adjustment: total_adjustment,
            });
        }

        for note in notes.iter_mut() {
            // A whole note is 1.0 and fills the measure, so each note
            // absorbs the adjustment in proportion to its own duration.
            let dur_adjustment = note.duration() * total_adjustment;
            note.set_duration(note.duration() + dur_adjustment);
            // The start shifts by whatever the duration didn't absorb.
            let start_adjustment = total_adjustment - dur_adjustment;
            if round_to_tenth(note.start()) > 0.0 {
                note.set_start(note.start() + start_adjustment);
            }
        }
        Ok(())
    }

    /// Quantize (see [`Meter::quantize`]) and then snap every note's
    /// start to the closest beat boundary.
    ///
    /// Each start is located in the sentinel-augmented ascending sequence
    /// `beat_start_times ++ [measure_dur]` by lower-bound binary search,
    /// then snapped to whichever neighbor is nearer; an exact tie always
    /// resolves to the earlier beat.  Starts beyond the measure end clamp
    /// to the last beat.  O(log beats_per_measure) per note, which is the
    /// point of the binary search over a linear scan for fine-grained
    /// meters.  No-op when quantizing is off.
    pub fn quantize_to_beat<N: TimedNote>(&self, notes: &mut [N]) -> Result<(), MeterError> {
        if !self.quantizing {
            return Ok(());
        }
        // Scale the notes to the measure first so starts are in range.
        self.quantize(notes)?;

        for note in notes.iter_mut() {
            note.set_start(self.closest_beat_time(note.start()));
        }
        Ok(())
    }

    /// The beat boundary closest to `start_secs`, with ties resolving to
    /// the earlier beat and out-of-measure starts clamping to the last
    /// beat.  This is the per-note snap used by
    /// [`Meter::quantize_to_beat`]; exposed for callers that need the
    /// same timing base (e.g. swing application).
    pub fn closest_beat_time(&self, start_secs: f64) -> f64 {
        // The measure end acts as a sentinel so the last real beat has a
        // right neighbor to compare against.
        let last_index = self.beat_start_times_secs.len() - 1;
        let i = lower_bound(&self.beat_start_times_secs, start_secs);

        if i == 0 {
            return 0.0;
        }
        // lower_bound returned one past the real beats: start_secs is
        // above every beat, so the only candidates are the last beat and
        // the sentinel.
        let (prev, next) = if i > last_index {
            if start_secs > self.measure_dur_secs {
                // Beyond the sentinel entirely; clamp to the last beat.
                return self.beat_start_times_secs[last_index];
            }
            (self.beat_start_times_secs[last_index], self.measure_dur_secs)
        } else {
            (self.beat_start_times_secs[i - 1], self.beat_start_times_secs[i])
        };

        let prev_gap = start_secs - prev;
        let next_gap = next - start_secs;
        if prev_gap <= next_gap {
            prev
        } else {
            next
        }
    }
}

/// Leftmost index `i` such that `times[i] >= target` (bisect-left
/// semantics: ties land at the existing equal element, not after it).
fn lower_bound(times: &[f64], target: f64) -> usize {
    let mut lo = 0;
    let mut hi = times.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if times[mid] < target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Round to one decimal place — treats near-zero starts as zero when
/// deciding whether a note sits on the downbeat.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bare-bones TimedNote for exercising the quantizer without the
    /// full note model.
    #[derive(Debug, Clone, PartialEq)]
    struct Stub {
        start: f64,
        dur: f64,
    }

    impl Stub {
        fn new(start: f64, dur: f64) -> Self {
            Self { start, dur }
        }
    }

    impl TimedNote for Stub {
        fn start(&self) -> f64 {
            self.start
        }
        fn set_start(&mut self, start_secs: f64) {
            self.start = start_secs;
        }
        fn duration(&self) -> f64 {
            self.dur
        }
        fn set_duration(&mut self, dur_secs: f64) {
            self.dur = dur_secs;
        }
    }

    /// 4/4 at 240 QPM: quarter note lasts 0.25 s, measure lasts 1.0 s.
    fn four_four_240() -> Meter {
        Meter::with_tempo(4, NoteDur::Quarter, 240.0, true).unwrap()
    }

    #[test]
    fn note_dur_fractions_are_powers_of_two() {
        assert_eq!(NoteDur::Whole.fraction(), 1.0);
        assert_eq!(NoteDur::Half.fraction(), 0.5);
        assert_eq!(NoteDur::Quarter.fraction(), 0.25);
        assert_eq!(NoteDur::Eighth.fraction(), 0.125);
        assert_eq!(NoteDur::Sixteenth.fraction(), 0.0625);
        assert_eq!(NoteDur::ThirtySecond.fraction(), 0.03125);
        assert_eq!(NoteDur::SixtyFourth.fraction(), 0.015625);
    }

    #[test]
    fn note_dur_aliases_resolve() {
        assert_eq!(NoteDur::from_name("QUARTER"), Some(NoteDur::Quarter));
        assert_eq!(NoteDur::from_name("QRTR"), Some(NoteDur::Quarter));
        assert_eq!(NoteDur::from_name("whl"), Some(NoteDur::Whole));
        assert_eq!(NoteDur::from_name("SXTYFRTH"), Some(NoteDur::SixtyFourth));
        assert_eq!(NoteDur::from_name("dotted-half"), None);
    }

    #[test]
    fn derived_fields_four_four_at_240() {
        let meter = four_four_240();
        assert_eq!(meter.quarter_note_dur_secs(), 0.25);
        assert_eq!(meter.quarter_notes_per_beat_note(), 1.0);
        assert_eq!(meter.note_dur_secs(), 0.25);
        assert_eq!(meter.measure_dur_secs(), 1.0);
        assert_eq!(meter.beat_start_times_secs(), &[0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn derived_fields_six_eight() {
        let meter = Meter::with_tempo(6, NoteDur::Eighth, 120.0, true).unwrap();
        // Eighth-note beat is half a quarter note: 0.25 s at 120 QPM.
        assert_eq!(meter.quarter_notes_per_beat_note(), 0.5);
        assert_eq!(meter.note_dur_secs(), 0.25);
        assert_eq!(meter.measure_dur_secs(), 1.5);
        assert_eq!(meter.beat_start_times_secs().len(), 6);
        // Strictly ascending
        for w in meter.beat_start_times_secs().windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn invalid_configuration_rejected() {
        assert!(matches!(
            Meter::with_tempo(0, NoteDur::Quarter, 120.0, true),
            Err(MeterError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Meter::with_tempo(4, NoteDur::Quarter, 0.0, true),
            Err(MeterError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Meter::with_tempo(4, NoteDur::Quarter, -60.0, true),
            Err(MeterError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Meter::with_tempo(4, NoteDur::Quarter, f64::NAN, true),
            Err(MeterError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn default_tempo_is_sixty() {
        let meter = Meter::new(4, NoteDur::Quarter).unwrap();
        assert_eq!(meter.tempo_qpm(), 60.0);
        assert_eq!(meter.quarter_note_dur_secs(), 1.0);
        assert_eq!(meter.measure_dur_secs(), 4.0);
    }

    #[test]
    fn duration_secs_for_dur_and_fraction() {
        let meter = four_four_240();
        assert_eq!(meter.duration_secs_for(NoteDur::Whole), 0.25);
        assert_eq!(meter.duration_secs_for(NoteDur::Quarter), 0.0625);
        assert_eq!(meter.duration_secs_for(0.5), 0.125);
    }

    #[test]
    fn lower_bound_is_bisect_left() {
        let times = [0.0, 0.25, 0.5, 0.75, 1.0];
        assert_eq!(lower_bound(&times, -0.1), 0);
        assert_eq!(lower_bound(&times, 0.0), 0);
        assert_eq!(lower_bound(&times, 0.1), 1);
        // Ties land at the equal element's index, not after it
        assert_eq!(lower_bound(&times, 0.25), 1);
        assert_eq!(lower_bound(&times, 0.99), 4);
        assert_eq!(lower_bound(&times, 1.0), 4);
        assert_eq!(lower_bound(&times, 1.5), 5);
    }

    // ── quantize ────────────────────────────────────────────────────

    #[test]
    fn quantize_exact_match_is_identity() {
        let meter = four_four_240();
        let mut notes = vec![
            Stub::new(0.0, 0.25),
            Stub::new(0.25, 0.25),
            Stub::new(0.5, 0.25),
            Stub::new(0.75, 0.25),
        ];
        let before = notes.clone();
        meter.quantize(&mut notes).unwrap();
        assert_eq!(notes, before);
    }

    #[test]
    fn quantize_disabled_is_noop() {
        let meter = Meter::with_tempo(4, NoteDur::Quarter, 240.0, false).unwrap();
        let mut notes = vec![Stub::new(0.0, 0.5), Stub::new(0.9, 0.5)];
        let before = notes.clone();
        meter.quantize(&mut notes).unwrap();
        assert_eq!(notes, before);
        meter.quantize_to_beat(&mut notes).unwrap();
        assert_eq!(notes, before);
    }

    #[test]
    fn quantize_empty_collection_is_noop() {
        let meter = four_four_240();
        let mut notes: Vec<Stub> = Vec::new();
        meter.quantize(&mut notes).unwrap();
        meter.quantize_to_beat(&mut notes).unwrap();
    }

    #[test]
    fn quantize_shrinks_long_collection() {
        let meter = four_four_240();
        // Latest end at 1.25 s; total_adjustment = -0.25.
        let mut notes = vec![Stub::new(0.0, 0.25), Stub::new(0.75, 0.5)];
        meter.quantize(&mut notes).unwrap();

        // n0: dur 0.25 + (0.25 * -0.25) = 0.1875; start pinned at 0.
        assert_eq!(notes[0].start, 0.0);
        assert!((notes[0].dur - 0.1875).abs() < 1e-12);
        // n1: dur 0.5 + (0.5 * -0.25) = 0.375;
        //     start 0.75 + (-0.25 - (-0.125)) = 0.625.
        assert!((notes[1].dur - 0.375).abs() < 1e-12);
        assert!((notes[1].start - 0.625).abs() < 1e-12);
    }

    #[test]
    fn quantize_stretches_short_collection() {
        let meter = four_four_240();
        // Latest end at 0.5 s; total_adjustment = +0.5.
        let mut notes = vec![Stub::new(0.0, 0.25), Stub::new(0.25, 0.25)];
        meter.quantize(&mut notes).unwrap();

        assert_eq!(notes[0].start, 0.0);
        assert!((notes[0].dur - 0.375).abs() < 1e-12);
        // n1: dur_adj = 0.125, start_adj = 0.375, start = 0.625.
        assert!((notes[1].dur - 0.375).abs() < 1e-12);
        assert!((notes[1].start - 0.625).abs() < 1e-12);
    }

    #[test]
    fn quantize_uses_latest_end_not_sum_of_durations() {
        let meter = four_four_240();
        // Two fully overlapping notes both ending at exactly 1.0 s:
        // summed durations are 2.0 but the elapsed time is 1.0 — exact
        // match, so nothing moves.
        let mut notes = vec![Stub::new(0.0, 1.0), Stub::new(0.5, 0.5)];
        let before = notes.clone();
        meter.quantize(&mut notes).unwrap();
        assert_eq!(notes, before);
    }

    #[test]
    fn quantize_zero_start_invariant() {
        let meter = four_four_240();
        let mut notes = vec![Stub::new(0.0, 0.6), Stub::new(0.6, 0.6)];
        meter.quantize(&mut notes).unwrap();
        // Duration changed, start did not.
        assert_eq!(notes[0].start, 0.0);
        assert!(notes[0].dur != 0.6);
    }

    #[test]
    fn quantize_near_zero_start_treated_as_downbeat() {
        let meter = four_four_240();
        // 0.04 rounds to 0.0 at one decimal place, so the start is pinned.
        let mut notes = vec![Stub::new(0.04, 0.25), Stub::new(0.5, 0.6)];
        meter.quantize(&mut notes).unwrap();
        assert_eq!(notes[0].start, 0.04);
    }

    #[test]
    fn quantize_range_guard_raises_at_boundary() {
        let meter = four_four_240();
        // Four quarter notes doubled in place: starts and durations both
        // doubled, latest end at 2.0 s, adjustment exactly -1.0.
        let mut notes = vec![
            Stub::new(0.0, 0.5),
            Stub::new(0.5, 0.5),
            Stub::new(1.0, 0.5),
            Stub::new(1.5, 0.5),
        ];
        let before = notes.clone();
        let err = meter.quantize(&mut notes).unwrap_err();
        assert_eq!(err, MeterError::QuantizationRange { adjustment: -1.0 });
        // Bound is checked before any element is touched.
        assert_eq!(notes, before);
    }

    #[test]
    fn quantize_range_guard_allows_just_under_boundary() {
        let meter = four_four_240();
        let mut notes = vec![Stub::new(0.0, 1.99)];
        assert!(meter.quantize(&mut notes).is_ok());
    }

    // ── quantize_to_beat ────────────────────────────────────────────

    #[test]
    fn snap_scenario_from_known_grid() {
        let meter = four_four_240();
        // Ends at exactly 1.0 s so the quantize pass is an identity and
        // the snap distances are exactly as constructed.
        let mut notes = vec![
            Stub::new(0.05, 0.2),  // gaps 0.05 / 0.20 -> 0.0
            Stub::new(0.20, 0.3),  // gaps 0.20 / 0.05 -> 0.25
            Stub::new(0.5, 0.5),   // already on a beat
        ];
        meter.quantize_to_beat(&mut notes).unwrap();
        assert_eq!(notes[0].start, 0.0);
        assert_eq!(notes[1].start, 0.25);
        assert_eq!(notes[2].start, 0.5);
    }

    #[test]
    fn snap_tie_resolves_to_earlier_beat() {
        let meter = four_four_240();
        // 0.125 is exactly equidistant between 0.0 and 0.25.
        let mut notes = vec![Stub::new(0.125, 0.875)];
        meter.quantize_to_beat(&mut notes).unwrap();
        assert_eq!(notes[0].start, 0.0);

        // Same symmetry around every interior beat boundary.
        assert_eq!(meter.closest_beat_time(0.375), 0.25);
        assert_eq!(meter.closest_beat_time(0.625), 0.5);
    }

    #[test]
    fn snap_clamps_beyond_measure_to_last_beat() {
        let meter = four_four_240();
        assert_eq!(meter.closest_beat_time(1.2), 0.75);
        assert_eq!(meter.closest_beat_time(100.0), 0.75);
    }

    #[test]
    fn snap_at_or_below_first_beat_maps_to_zero() {
        let meter = four_four_240();
        assert_eq!(meter.closest_beat_time(0.0), 0.0);
        assert_eq!(meter.closest_beat_time(-0.3), 0.0);
    }

    #[test]
    fn snap_between_last_beat_and_measure_end() {
        let meter = four_four_240();
        // 0.8 is closer to 0.75 than to the measure-end sentinel.
        assert_eq!(meter.closest_beat_time(0.8), 0.75);
        // 0.95 is closer to the sentinel; the snap target is the measure
        // end itself, matching the sentinel-augmented search sequence.
        assert_eq!(meter.closest_beat_time(0.95), 1.0);
    }

    #[test]
    fn quantize_to_beat_rescales_then_snaps() {
        let meter = four_four_240();
        // Runs 0.2 s long; quantize pulls everything in, then each start
        // lands on a beat.
        let mut notes = vec![Stub::new(0.0, 0.3), Stub::new(0.6, 0.6)];
        meter.quantize_to_beat(&mut notes).unwrap();
        assert_eq!(notes[0].start, 0.0);
        let beats = meter.beat_start_times_secs();
        assert!(
            beats.contains(&notes[1].start) || notes[1].start == meter.measure_dur_secs(),
            "start {} not on the beat grid",
            notes[1].start
        );
    }

    #[test]
    fn meter_serde_round_trip_recomputes_grid() {
        let meter = four_four_240();
        let json = serde_json::to_string(&meter).unwrap();
        let back: Meter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meter);
        assert_eq!(back.beat_start_times_secs(), meter.beat_start_times_secs());
    }

    #[test]
    fn meter_serde_rejects_invalid_config() {
        let json = r#"{"beats_per_measure":0,"beat_note_dur":"Quarter","tempo_qpm":120.0,"quantizing":true}"#;
        assert!(serde_json::from_str::<Meter>(json).is_err());
    }
}
