#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Everything one string voice needs to know, merged from the global
/// parameters and that string's own frequency.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringParams {
    /// Fundamental in Hz
    pub frequency: f32,
    /// Loop filter tilt, 0.0 (dark) to 1.0 (bright)
    pub brightness: f32,
    /// Seconds to fall 60 dB
    pub decay: f32,
    /// Pick point as a fraction of string length
    pub position: f32,
}

/// Parameter snapshot broadcast from the control side to every voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParams {
    /// Polyphony budget for the pooled allocator
    pub voices: usize,
    pub brightness: f32,
    pub decay: f32,
    pub position: f32,
    pub tuning: Tuning,
}

impl SynthParams {
    /// Parameters for `string`, or `None` if the tuning has no such string.
    pub fn string(&self, string: usize) -> Option<StringParams> {
        self.tuning.get(string).map(|frequency| StringParams {
            frequency,
            brightness: self.brightness,
            decay: self.decay,
            position: self.position,
        })
    }
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            voices: 6,
            brightness: 0.5,
            decay: 3.0,
            position: 0.1,
            tuning: Tuning::default(),
        }
    }
}
