//! Shared state types for UI communication
//!
//! Static data is handed over once at startup; updates coming back from the
//! audio callback are fixed-size and allocation-free.

use plucked::{synth::Allocation, Tuning, MAX_STRINGS};

/// Static state captured before the stream starts (can allocate)
#[derive(Clone, Copy, Debug)]
pub struct UiStateInit {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Upper bound for the voices control
    pub max_voices: usize,
    pub allocation: Allocation,
    /// Tuning at zero pitch shift
    pub base_tuning: Tuning,
}

/// Dynamic state update sent from audio thread (allocation-free, Copy)
#[derive(Clone, Copy, Debug, Default)]
pub struct UiStateUpdate {
    /// Strings that currently hold a voice
    pub sounding: [bool; MAX_STRINGS],
    /// Number of resident voices
    pub voices: u8,
}
