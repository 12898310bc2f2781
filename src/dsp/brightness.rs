use std::f32::consts::PI;

use crate::MIN_FREQUENCY;

/// Level-dependent brightness: blends the raw string signal with a one-pole
/// lowpass of it.
///
/// With pluck level `l`, the output is `l * l^(1/3) * x + (1 - l) * lowpass(x)`.
/// Hard plucks keep more of the unfiltered (bright) signal, soft plucks lean on
/// the darker lowpass branch. The lowpass cutoff follows the string frequency.
pub struct DynamicBrightnessFilter {
    sample_rate: f32,
    omega: f32,
    level: f32,
    level_cbrt: f32,
    x1: f32,
    y1: f32,
}

impl DynamicBrightnessFilter {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            omega: PI * MIN_FREQUENCY / sample_rate,
            level: 1.0,
            level_cbrt: 1.0,
            x1: 0.0,
            y1: 0.0,
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.omega = PI * frequency / self.sample_rate;
    }

    /// Normalized pluck level, `0.0..=1.0`.
    pub fn set_level(&mut self, level: f32) {
        self.level = level;
        self.level_cbrt = level.cbrt();
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let lowpass =
            (self.omega * (x + self.x1) + (1.0 - self.omega) * self.y1) / (1.0 + self.omega);
        self.x1 = x;
        self.y1 = lowpass;

        self.level * self.level_cbrt * x + (1.0 - self.level) * lowpass
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }
}
