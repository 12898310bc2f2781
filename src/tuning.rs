//! Per-string frequency tables.
//!
//! A `Tuning` is a fixed-capacity array so it can travel inside a `Copy`
//! message to the audio thread without allocating.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result, MAX_STRINGS};

/// Standard guitar tuning as MIDI notes, low E to high E.
const GUITAR_NOTES: [u8; 6] = [40, 45, 50, 55, 59, 64];

/// A4 = 440 Hz = MIDI note 69
#[inline]
fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    freqs: [f32; MAX_STRINGS],
    len: usize,
}

impl Tuning {
    pub fn new(freqs: &[f32]) -> Result<Self> {
        if freqs.len() > MAX_STRINGS {
            return Err(Error::TooManyStrings {
                requested: freqs.len(),
                max: MAX_STRINGS,
            });
        }

        let mut tuning = Self {
            freqs: [0.0; MAX_STRINGS],
            len: freqs.len(),
        };
        tuning.freqs[..freqs.len()].copy_from_slice(freqs);
        Ok(tuning)
    }

    /// Six strings in standard tuning (E2 A2 D3 G3 B3 E4).
    pub fn guitar() -> Self {
        let mut tuning = Self {
            freqs: [0.0; MAX_STRINGS],
            len: GUITAR_NOTES.len(),
        };
        for (freq, &note) in tuning.freqs.iter_mut().zip(&GUITAR_NOTES) {
            *freq = midi_note_to_freq(note);
        }
        tuning
    }

    /// Guitar strings laid out on a common span: every string above the lowest
    /// is divided into two segments whose lengths add up to the lowest string.
    /// The left segment keeps the string's own pitch, the right one sounds
    /// `f * f0 / (f - f0)`.
    ///
    /// Gives 11 strings, ordered left then right per guitar string.
    pub fn split_guitar() -> Self {
        let base = midi_note_to_freq(GUITAR_NOTES[0]);
        let mut tuning = Self {
            freqs: [0.0; MAX_STRINGS],
            len: 0,
        };

        for (i, &note) in GUITAR_NOTES.iter().enumerate() {
            let freq = midi_note_to_freq(note);
            tuning.push(freq);
            if i > 0 {
                tuning.push(freq * base / (freq - base));
            }
        }
        tuning
    }

    /// Shift every string by `octaves` (may be fractional or negative).
    pub fn transposed(&self, octaves: f32) -> Self {
        let ratio = 2.0_f32.powf(octaves);
        let mut tuning = *self;
        for freq in tuning.freqs[..tuning.len].iter_mut() {
            *freq *= ratio;
        }
        tuning
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, string: usize) -> Option<f32> {
        self.as_slice().get(string).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.freqs[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.as_slice().iter().copied()
    }

    fn push(&mut self, freq: f32) {
        self.freqs[self.len] = freq;
        self.len += 1;
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::split_guitar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guitar_matches_standard_pitches() {
        let tuning = Tuning::guitar();
        assert_eq!(tuning.len(), 6);
        let expected = [82.41, 110.0, 146.83, 196.0, 246.94, 329.63];
        for (got, want) in tuning.iter().zip(expected) {
            assert!((got - want).abs() < 0.01, "expected {want}, got {got}");
        }
    }

    #[test]
    fn split_guitar_layout() {
        let tuning = Tuning::split_guitar();
        assert_eq!(tuning.len(), 11);

        let base = tuning.get(0).unwrap();
        // A string and its right-hand segment
        let a = tuning.get(1).unwrap();
        let a_right = tuning.get(2).unwrap();
        assert!((a - 110.0).abs() < 0.01);
        assert!((a_right - a * base / (a - base)).abs() < 1e-3);
        // segments are complementary lengths: 1/f scales with length
        assert!((base / a + base / a_right - 1.0).abs() < 1e-4);
    }

    #[test]
    fn transpose_octave_doubles() {
        let tuning = Tuning::guitar();
        let up = tuning.transposed(1.0);
        for (a, b) in tuning.iter().zip(up.iter()) {
            assert!((b - 2.0 * a).abs() < 1e-3);
        }
        assert_eq!(up.len(), tuning.len());
    }

    #[test]
    fn rejects_too_many_strings() {
        let freqs = vec![100.0; MAX_STRINGS + 1];
        assert_eq!(
            Tuning::new(&freqs),
            Err(Error::TooManyStrings {
                requested: MAX_STRINGS + 1,
                max: MAX_STRINGS
            })
        );
        assert_eq!(Tuning::new(&[]).map(|t| t.is_empty()), Ok(true));
    }

    #[test]
    fn get_past_end_is_none() {
        let tuning = Tuning::new(&[220.0, 330.0]).unwrap();
        assert_eq!(tuning.get(1), Some(330.0));
        assert_eq!(tuning.get(2), None);
    }
}
