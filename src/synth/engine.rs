#[cfg(feature = "rtrb")]
use rtrb::{Consumer, RingBuffer};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "rtrb")]
use crate::synth::handle::SynthHandle;
use crate::{
    synth::{
        message::{MessageReceiver, NoMessages, SynthMessage},
        params::SynthParams,
        pool::{Allocation, VoicePool},
    },
    MAX_STRINGS, MAX_VOICES,
};

/// Construction-time settings. Nothing here changes while audio runs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Voices allocated up front. `SynthHandle` rejects a larger
    /// `SynthParams::voices`; `apply_params` clamps it.
    pub max_voices: usize,
    pub allocation: Allocation,
    /// Capacity of the control → audio message ring.
    pub queue_capacity: usize,
    /// Fixed noise seed for repeatable output.
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Voices to preallocate for the chosen allocation policy.
    fn voice_capacity(&self) -> usize {
        match self.allocation {
            Allocation::Pooled => self.max_voices.clamp(1, MAX_VOICES),
            Allocation::PerString => MAX_STRINGS,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            max_voices: 16,
            allocation: Allocation::Pooled,
            queue_capacity: 256,
            seed: None,
        }
    }
}

/// The audio-thread side of the synthesizer.
///
/// Owns every voice. Pending messages are applied at the start of each block,
/// then all resident voices are mixed into a mono buffer.
pub struct StringEngine<R: MessageReceiver = NoMessages> {
    pool: VoicePool,
    params: SynthParams,
    rx: R,
}

impl StringEngine<NoMessages> {
    /// Engine driven directly through `pluck` / `apply_params`.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_receiver(config, NoMessages)
    }
}

impl<R: MessageReceiver> StringEngine<R> {
    pub fn with_receiver(config: &EngineConfig, rx: R) -> Self {
        let mut pool = VoicePool::new(
            config.sample_rate,
            config.voice_capacity(),
            config.allocation,
            config.seed,
        );
        let params = SynthParams {
            voices: SynthParams::default().voices.min(pool.capacity()),
            ..SynthParams::default()
        };
        pool.apply_params(&params);

        Self { pool, params, rx }
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(msg) = self.rx.pop() {
            self.handle_message(msg);
        }

        out.fill(0.0);
        self.pool.render(out);
    }

    pub fn handle_message(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::Params(params) => self.apply_params(params),
            SynthMessage::Pluck { string, amplitude } => self.pluck(string, amplitude),
        }
    }

    pub fn apply_params(&mut self, params: SynthParams) {
        self.params = params;
        self.pool.apply_params(&self.params);
    }

    /// # Panics
    ///
    /// If `string` is beyond the current tuning.
    pub fn pluck(&mut self, string: usize, amplitude: f32) {
        self.pool.pluck(&self.params, string, amplitude);
    }

    pub fn params(&self) -> &SynthParams {
        &self.params
    }

    pub fn pool(&self) -> &VoicePool {
        &self.pool
    }
}

/// Build a connected control handle and audio engine.
///
/// The handle stays on the control thread; the engine moves into the audio
/// callback.
#[cfg(feature = "rtrb")]
pub fn channel(config: &EngineConfig) -> (SynthHandle, StringEngine<Consumer<SynthMessage>>) {
    let (tx, rx) = RingBuffer::<SynthMessage>::new(config.queue_capacity.max(1));
    let engine = StringEngine::with_receiver(config, rx);
    let handle = SynthHandle::new(
        tx,
        config.sample_rate,
        engine.pool().capacity(),
        *engine.params(),
    );
    (handle, engine)
}
