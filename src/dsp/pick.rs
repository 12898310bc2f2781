use crate::{dsp::delay::DelayLine, MIN_FREQUENCY};

/// Shortest comb delay the delay line can realize without wrapping.
const MIN_COMB_LENGTH: f32 = 2.0;

/// Feed-forward comb `y = x - x[n - D]` with `D = sr * position / freq`.
///
/// Plucking at a fraction `p` of the string cancels every harmonic that has a
/// node there, so the notches land on multiples of `1 / p` of the fundamental.
///
/// The length is rounded to whole samples and never drops below two. Positions
/// that would round shorter (including `0.0`) therefore get a two-sample comb,
/// a gentle highpass on the excitation rather than cancelling it.
pub struct PickPositionFilter {
    sample_rate: f32,
    frequency: f32,
    position: f32,
    delay: DelayLine,
}

impl PickPositionFilter {
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            sample_rate,
            frequency: MIN_FREQUENCY,
            position: 0.0,
            delay: DelayLine::new(sample_rate / MIN_FREQUENCY),
        };
        filter.update_length();
        filter
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.update_length();
    }

    /// Pick position as a fraction of string length, `0.0..=1.0`.
    pub fn set_position(&mut self, position: f32) {
        self.position = position;
        self.update_length();
    }

    /// Comb delay currently in use, in whole samples.
    pub fn length(&self) -> f32 {
        self.comb_length()
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        self.delay.input(x);
        x - self.delay.output()
    }

    pub fn reset(&mut self) {
        self.delay.reset();
    }

    fn comb_length(&self) -> f32 {
        (self.sample_rate * self.position / self.frequency)
            .round()
            .max(MIN_COMB_LENGTH)
    }

    fn update_length(&mut self) {
        self.delay.set_length(self.comb_length());
    }
}
