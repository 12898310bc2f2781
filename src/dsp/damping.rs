use crate::MIN_FREQUENCY;

/*
Loop Damping
============

The only element in the string loop that removes energy. Every trip around
the loop the signal goes through

    y[n] = rho * (h1 * x[n] + h0 * x[n-1] + h1 * x[n-2])

  h0 = (1 + brightness) / 2      centre tap
  h1 = (1 - brightness) / 4      outer taps

The taps sum to one, so DC passes with gain `rho`. Less brightness moves
weight to the outer taps and high partials lose more per trip than the
fundamental. The filter is symmetric, so its group delay is exactly one
sample; the string voice subtracts that from the loop length.

rho is chosen so a partial at the loop frequency falls 60 dB (x0.001) in
`decay` seconds: the loop runs `frequency` times per second, so after
`frequency * decay` trips

    rho^(frequency * decay) = 0.001   =>   rho = 0.001^(1 / (frequency * decay))
*/

pub struct DampingFilter {
    frequency: f32,
    decay: f32,
    brightness: f32,
    rho: f32,
    x1: f32,
    x2: f32,
}

impl DampingFilter {
    pub fn new() -> Self {
        let mut filter = Self {
            frequency: MIN_FREQUENCY,
            decay: 3.0,
            brightness: 0.5,
            rho: 0.0,
            x1: 0.0,
            x2: 0.0,
        };
        filter.update_rho();
        filter
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.update_rho();
    }

    /// Time in seconds for the loop to fall by 60 dB.
    pub fn set_decay(&mut self, decay: f32) {
        self.decay = decay;
        self.update_rho();
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness;
    }

    /// Loop gain applied on every pass.
    pub fn rho(&self) -> f32 {
        self.rho
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let h0 = (1.0 + self.brightness) * 0.5;
        let h1 = (1.0 - self.brightness) * 0.25;
        let y = self.rho * (h0 * self.x1 + h1 * (x + self.x2));
        self.x2 = self.x1;
        self.x1 = x;
        y
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
    }

    fn update_rho(&mut self) {
        self.rho = 0.001f32.powf(1.0 / (self.frequency * self.decay));
    }
}

impl Default for DampingFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rho_reaches_minus_60db_over_decay() {
        let mut filter = DampingFilter::new();
        filter.set_frequency(220.0);
        filter.set_decay(3.0);
        let total = filter.rho().powf(220.0 * 3.0);
        assert!((total - 0.001).abs() < 1e-5, "got {total}");
    }

    #[test]
    fn rho_grows_with_decay() {
        let mut filter = DampingFilter::new();
        filter.set_frequency(110.0);

        let mut last = 0.0;
        for decay in [0.1, 0.5, 1.0, 2.0, 5.0, 20.0] {
            filter.set_decay(decay);
            let rho = filter.rho();
            assert!(rho > last, "rho should increase: {rho} after {last}");
            assert!(rho < 1.0);
            last = rho;
        }
    }

    #[test]
    fn dc_gain_is_rho() {
        let mut filter = DampingFilter::new();
        filter.set_frequency(200.0);
        filter.set_decay(1.0);
        filter.set_brightness(0.2);

        let mut y = 0.0;
        for _ in 0..4 {
            y = filter.process(1.0);
        }
        assert!((y - filter.rho()).abs() < 1e-6);
    }

    #[test]
    fn darker_setting_damps_nyquist_more() {
        // alternating input sits at Nyquist
        let nyquist_gain = |brightness: f32| {
            let mut filter = DampingFilter::new();
            filter.set_frequency(200.0);
            filter.set_decay(1.0);
            filter.set_brightness(brightness);
            let mut y = 0.0;
            for n in 0..8 {
                y = filter.process(if n % 2 == 0 { 1.0 } else { -1.0 });
            }
            y.abs()
        };

        assert!(nyquist_gain(0.0) < 1e-6, "brightness 0 should null Nyquist");
        assert!(nyquist_gain(0.5) < nyquist_gain(1.0));
    }
}
