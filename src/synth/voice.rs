use crate::{
    dsp::{
        DampingFilter, DelayLine, DynamicBrightnessFilter, NoiseSource, PickPositionFilter,
    },
    synth::params::StringParams,
    MIN_FREQUENCY,
};

/// Share of the pluck amplitude used as the brightness filter's level.
const LEVEL_COEF: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,                     // Never plucked, or reset for reuse; renders silence
    Active { elapsed: u32 },  // Samples rendered since the last pluck
}

/// One Karplus-Strong string: a noise burst circulating through a delay line
/// with a damping lowpass in the loop.
///
/// ```text
///  noise ─► pick comb ─► (+) ─► delay ─┬─► brightness ─► out
///                         ▲            │
///                         └─ damping ◄─┘
/// ```
pub struct StringVoice {
    string: usize,
    sample_rate: f32,
    frequency: f32,
    /// Ring time in samples; past it the voice can be retired.
    duration: f32,
    amplitude: f32,
    state: VoiceState,
    delay: DelayLine,
    pick: PickPositionFilter,
    damping: DampingFilter,
    brightness: DynamicBrightnessFilter,
    noise: NoiseSource,
}

impl StringVoice {
    pub fn new(sample_rate: f32, noise: NoiseSource) -> Self {
        let mut delay = DelayLine::new(sample_rate / MIN_FREQUENCY);
        delay.set_length(sample_rate / MIN_FREQUENCY - 1.0);

        Self {
            string: 0,
            sample_rate,
            frequency: MIN_FREQUENCY,
            duration: 3.0 * sample_rate,
            amplitude: 0.0,
            state: VoiceState::Idle,
            delay,
            pick: PickPositionFilter::new(sample_rate),
            damping: DampingFilter::new(),
            brightness: DynamicBrightnessFilter::new(sample_rate),
            noise,
        }
    }

    /// Apply a full parameter set. Called between blocks, never mid-sample.
    pub fn set_params(&mut self, params: StringParams) {
        self.frequency = params.frequency;
        // the damping filter adds one sample to the loop
        self.delay.set_length(self.sample_rate / params.frequency - 1.0);
        self.pick.set_frequency(params.frequency);
        self.damping.set_frequency(params.frequency);
        self.brightness.set_frequency(params.frequency);

        self.duration = params.decay * self.sample_rate;
        self.damping.set_brightness(params.brightness);
        self.damping.set_decay(params.decay);
        self.pick.set_position(params.position);
    }

    /// Start a new excitation. A voice that is still ringing keeps its loop
    /// contents; the new burst is added on top.
    pub fn pluck(&mut self, amplitude: f32) {
        self.state = VoiceState::Active { elapsed: 0 };
        self.amplitude = amplitude;
        self.brightness.set_level(LEVEL_COEF * amplitude);
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        let elapsed = match &mut self.state {
            VoiceState::Idle => return 0.0,
            VoiceState::Active { elapsed } => {
                let current = *elapsed;
                *elapsed = current.saturating_add(1);
                current
            }
        };

        // noise burst lasting one period of the fundamental
        let mut x = if elapsed as f32 * self.frequency < self.sample_rate {
            self.amplitude * self.noise.next_sample()
        } else {
            0.0
        };
        x = self.pick.process(x);

        let y = self.delay.output();
        x += self.damping.process(y);
        self.delay.input(x);

        self.brightness.process(y)
    }

    /// Add this voice's output into `out`.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample += self.process();
        }
    }

    pub fn is_playing(&self) -> bool {
        match self.state {
            VoiceState::Idle => false,
            VoiceState::Active { elapsed } => elapsed as f32 <= self.duration,
        }
    }

    /// Bind the voice to a logical string.
    pub fn assign(&mut self, string: usize) {
        self.string = string;
    }

    /// Back to idle with empty buffers, ready to be handed to another string.
    pub fn reset(&mut self) {
        self.state = VoiceState::Idle;
        self.amplitude = 0.0;
        self.delay.reset();
        self.pick.reset();
        self.damping.reset();
        self.brightness.reset();
    }

    pub fn string(&self) -> usize {
        self.string
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    fn voice(frequency: f32, decay: f32) -> StringVoice {
        let mut voice = StringVoice::new(SAMPLE_RATE, NoiseSource::from_seed(1));
        voice.set_params(StringParams {
            frequency,
            brightness: 0.5,
            decay,
            position: 0.1,
        });
        voice
    }

    fn peak(buffer: &[f32]) -> f32 {
        buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn idle_voice_is_silent() {
        let mut voice = voice(220.0, 1.0);
        assert_eq!(voice.state(), VoiceState::Idle);
        assert!(!voice.is_playing());

        let mut buffer = vec![0.0; 256];
        voice.render(&mut buffer);
        assert!(buffer.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn plays_for_exactly_the_decay_time() {
        let mut voice = voice(220.0, 0.5);
        voice.pluck(1.0);

        let duration = (0.5 * SAMPLE_RATE) as usize;
        for n in 0..duration {
            assert!(voice.is_playing(), "stopped early at sample {n}");
            voice.process();
        }
        assert!(voice.is_playing());
        voice.process();
        assert!(!voice.is_playing());
    }

    #[test]
    fn rings_then_dies_away() {
        let mut voice = voice(220.0, 0.5);
        voice.pluck(1.0);

        let mut buffer = vec![0.0; (0.5 * SAMPLE_RATE) as usize];
        voice.render(&mut buffer);

        let head = peak(&buffer[..2000]);
        let tail = peak(&buffer[buffer.len() - 1000..]);
        assert!(head > 0.01, "expected an audible attack, got {head}");
        assert!(tail < 1e-3, "expected decay by the end, got {tail}");
        assert!(buffer.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn replucking_resets_elapsed_without_clearing_loop() {
        let mut voice = voice(330.0, 1.0);
        voice.pluck(1.0);
        for _ in 0..1000 {
            voice.process();
        }
        assert_eq!(voice.state(), VoiceState::Active { elapsed: 1000 });

        voice.pluck(0.0);
        assert_eq!(voice.state(), VoiceState::Active { elapsed: 0 });
        // silent pluck: only the old ringing is left in the loop
        let mut buffer = vec![0.0; 64];
        voice.render(&mut buffer);
        assert!(peak(&buffer) > 0.0);
    }

    #[test]
    fn reset_silences_a_ringing_voice() {
        let mut voice = voice(330.0, 2.0);
        voice.pluck(1.0);
        let mut buffer = vec![0.0; 512];
        voice.render(&mut buffer);

        voice.reset();
        assert_eq!(voice.state(), VoiceState::Idle);

        // plucking at zero amplitude after a reset must stay silent
        voice.pluck(0.0);
        let mut buffer = vec![0.0; 512];
        voice.render(&mut buffer);
        assert_eq!(peak(&buffer), 0.0);
    }

    #[test]
    fn harder_pluck_is_louder() {
        let mut soft = voice(196.0, 1.0);
        let mut hard = voice(196.0, 1.0);
        soft.pluck(0.2);
        hard.pluck(1.0);

        let mut a = vec![0.0; 4096];
        let mut b = vec![0.0; 4096];
        soft.render(&mut a);
        hard.render(&mut b);
        assert!(peak(&b) > 2.0 * peak(&a));
    }
}
