//! Backend note representations: translate the abstract note model into
//! the concrete values each audio backend consumes.
//!
//! - [`csound`] — CSound score text (i-statements with
//!   octave.pitchclass pitch literals)
//! - [`midi`] — MIDI note numbers, velocities, and timed note events
//! - [`foxdot`] — FoxDot/SuperCollider live-coding player arguments
//!
//! All three are pure mappings; no audio or file I/O happens here.

pub mod csound;
pub mod foxdot;
pub mod midi;
