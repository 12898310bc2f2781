use crate::dsp::allpass::Allpass;

/// Circular delay line with a power-of-two buffer and allpass-interpolated
/// fractional length.
///
/// Output lags input by one call: `output()` returns the sample computed
/// during the previous `input()`. With an integer length `L`, a sample passed
/// to `input()` shows up in `output()` exactly `L` calls later.
pub struct DelayLine {
    buffer: Vec<f32>,
    mask: usize,
    read_pos: usize,
    write_pos: usize,
    allpass: Allpass,
    out: f32,
}

impl DelayLine {
    /// Allocate a delay able to hold at least `max_length` samples.
    ///
    /// This is the only allocation; callers size it for the longest delay
    /// they will ever request.
    pub fn new(max_length: f32) -> Self {
        let mut len = 1usize;
        while (len as f32) < max_length {
            len *= 2;
        }

        Self {
            buffer: vec![0.0; len],
            mask: len - 1,
            read_pos: 0,
            write_pos: 0,
            allpass: Allpass::new(),
            out: 0.0,
        }
    }

    /// Set the delay in (possibly fractional) samples.
    ///
    /// The whole part picks the read pointer, the remainder goes to the
    /// allpass. A remainder below half a sample is pushed into the next
    /// sample so the allpass always works with a delay in `[0.5, 1.5)`.
    pub fn set_length(&mut self, length: f32) {
        let capacity = self.buffer.len() as f32;
        let read = (self.write_pos as f32 - length + 1.0).rem_euclid(capacity);
        let whole = read.floor();

        let mut alpha = 1.0 + whole - read;
        let mut read_pos = (whole as usize) & self.mask;
        if alpha < 0.5 {
            read_pos = (read_pos + 1) & self.mask;
            alpha += 1.0;
        }

        self.read_pos = read_pos;
        self.allpass.set_delay(alpha);
    }

    #[inline]
    pub fn input(&mut self, x: f32) {
        self.buffer[self.write_pos] = x;
        self.read_pos = (self.read_pos + 1) & self.mask;
        self.write_pos = (self.write_pos + 1) & self.mask;
        self.out = self.allpass.process(self.buffer[self.read_pos]);
    }

    #[inline]
    pub fn output(&self) -> f32 {
        self.out
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Current allpass coefficient; zero for integer lengths.
    pub fn eta(&self) -> f32 {
        self.allpass.eta()
    }

    /// Silence the buffer while keeping the configured length.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.allpass.reset();
        self.out = 0.0;
    }
}
