/*
Fractional Delay via First-Order Allpass
========================================

A delay line can only delay by whole samples. To tune a string continuously
we need the leftover fraction too. A first-order allpass has (nearly) flat
magnitude and a phase delay at low frequencies of approximately

    alpha = (1 - eta) / (1 + eta)      =>      eta = (1 - alpha) / (1 + alpha)

so picking eta from the wanted fraction gives us the missing sub-sample
delay without colouring the spectrum.

    y[n] = x[n-1] + eta * (x[n] - y[n-1])

alpha = 1 gives eta = 0, which collapses to a plain one-sample delay.
The delay line keeps alpha in [0.5, 1.5) where the approximation is good.
*/

#[derive(Debug, Clone, Default)]
pub struct Allpass {
    eta: f32,
    x1: f32,
    y1: f32,
}

impl Allpass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay this filter realizes, in samples.
    pub fn set_delay(&mut self, alpha: f32) {
        self.eta = (1.0 - alpha) / (1.0 + alpha);
    }

    pub fn eta(&self) -> f32 {
        self.eta
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let y = self.x1 + self.eta * (x - self.y1);
        self.x1 = x;
        self.y1 = y;
        y
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }
}
