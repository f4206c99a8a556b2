//! Swing modifier — shifts note onsets off the rigid beat grid by a
//! small jitter to humanize a quantized measure.
//!
//! The jitter amount is either fixed (always the full swing range) or
//! random (scaled by a PRNG draw), and the direction can push notes
//! later, earlier, or randomly either way.  The PRNG is seedable so a
//! given seed reproduces the same jitter stream.

use oorandom::Rand64;

use crate::note::TimedNote;

/// Which way swing shifts note starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingDirection {
    /// Push starts later
    Forward,
    /// Pull starts earlier
    Reverse,
    /// Randomly either way, per note
    Both,
}

/// How the per-note jitter amount is derived from the swing range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingJitterType {
    /// Always the full swing range
    Fixed,
    /// Uniformly random fraction of the swing range
    Random,
}

/// Default jitter range in seconds.
pub const DEFAULT_SWING_RANGE_SECS: f64 = 0.01;

/// A swing configuration plus its jitter PRNG.
#[derive(Debug)]
pub struct Swing {
    swing_on: bool,
    swing_range_secs: f64,
    direction: SwingDirection,
    jitter_type: SwingJitterType,
    seed: u128,
    rng: Rand64,
}

impl Default for Swing {
    fn default() -> Self {
        Self::new(
            false,
            DEFAULT_SWING_RANGE_SECS,
            SwingDirection::Both,
            SwingJitterType::Fixed,
        )
    }
}

impl Clone for Swing {
    // Rand64 doesn't implement Clone; the clone restarts the jitter
    // stream from the configured seed.
    fn clone(&self) -> Self {
        Self::with_seed(
            self.swing_on,
            self.swing_range_secs,
            self.direction,
            self.jitter_type,
            self.seed,
        )
    }
}

impl Swing {
    pub fn new(
        swing_on: bool,
        swing_range_secs: f64,
        direction: SwingDirection,
        jitter_type: SwingJitterType,
    ) -> Self {
        Self::with_seed(swing_on, swing_range_secs, direction, jitter_type, 0)
    }

    /// Construct with an explicit PRNG seed for reproducible jitter.
    pub fn with_seed(
        swing_on: bool,
        swing_range_secs: f64,
        direction: SwingDirection,
        jitter_type: SwingJitterType,
        seed: u128,
    ) -> Self {
        Self {
            swing_on,
            swing_range_secs,
            direction,
            jitter_type,
            seed,
            rng: Rand64::new(seed),
        }
    }

    pub fn is_swing_on(&self) -> bool {
        self.swing_on
    }

    pub fn set_swing_on(&mut self) -> &mut Self {
        self.swing_on = true;
        self
    }

    pub fn set_swing_off(&mut self) -> &mut Self {
        self.swing_on = false;
        self
    }

    pub fn swing_range_secs(&self) -> f64 {
        self.swing_range_secs
    }

    pub fn direction(&self) -> SwingDirection {
        self.direction
    }

    pub fn jitter_type(&self) -> SwingJitterType {
        self.jitter_type
    }

    /// Shift every note's start by a fresh jitter draw, clamping at the
    /// start of the measure.  No-op when swing is off.
    pub fn apply<N: TimedNote>(&mut self, notes: &mut [N]) {
        if !self.swing_on {
            return;
        }
        for note in notes.iter_mut() {
            let adjusted = note.start() + self.calculate_adjust();
            note.set_start(adjusted.max(0.0));
        }
    }

    /// One jitter draw using the configured direction and jitter type.
    pub fn calculate_adjust(&mut self) -> f64 {
        self.calculate_adjust_with(self.direction, self.jitter_type)
    }

    /// One jitter draw with explicit overrides — used by measure-level
    /// phrasing, which always wants a fixed forward/reverse pair
    /// regardless of how the swing itself is configured.
    pub fn calculate_adjust_with(
        &mut self,
        direction: SwingDirection,
        jitter_type: SwingJitterType,
    ) -> f64 {
        let mut adjust = self.swing_range_secs;
        if jitter_type == SwingJitterType::Random {
            adjust *= self.rng.rand_float();
        }
        match direction {
            SwingDirection::Forward => adjust,
            SwingDirection::Reverse => -adjust,
            SwingDirection::Both => {
                if self.rng.rand_u64() % 2 == 0 {
                    adjust
                } else {
                    -adjust
                }
            }
        }
    }
}
