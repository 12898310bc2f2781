use log::{debug, warn};
use rtrb::Producer;

use crate::{
    synth::{message::SynthMessage, params::SynthParams},
    Error, Result, MIN_FREQUENCY,
};

/// Control-thread end of the engine channel.
///
/// Validates everything before it is queued, so the audio thread only ever
/// sees values it can render. Never blocks: a full queue is reported back.
pub struct SynthHandle {
    tx: Producer<SynthMessage>,
    sample_rate: f32,
    /// Voices the engine preallocated; `voices` may not exceed it.
    max_voices: usize,
    params: SynthParams,
}

impl SynthHandle {
    pub(crate) fn new(
        tx: Producer<SynthMessage>,
        sample_rate: f32,
        max_voices: usize,
        params: SynthParams,
    ) -> Self {
        Self {
            tx,
            sample_rate,
            max_voices,
            params,
        }
    }

    /// Last parameters accepted by `set_params`.
    pub fn params(&self) -> &SynthParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SynthParams) -> Result<()> {
        if let Err(err) = self.validate(&params) {
            warn!("rejected parameters: {err}");
            return Err(err);
        }

        self.send(SynthMessage::Params(params))?;
        debug!(
            "params: voices={} brightness={:.2} decay={:.2}s position={:.2} strings={}",
            params.voices,
            params.brightness,
            params.decay,
            params.position,
            params.tuning.len()
        );
        self.params = params;
        Ok(())
    }

    /// Pluck `string` at `amplitude` (clamped to `0.0..=1.0`).
    pub fn pluck(&mut self, string: usize, amplitude: f32) -> Result<()> {
        let strings = self.params.tuning.len();
        if string >= strings {
            warn!("pluck for string {string} ignored, tuning has {strings}");
            return Err(Error::StringOutOfRange { string, strings });
        }

        let amplitude = if amplitude.is_nan() {
            0.0
        } else {
            amplitude.clamp(0.0, 1.0)
        };
        self.send(SynthMessage::Pluck { string, amplitude })
    }

    /// Upper bound for `SynthParams::voices`.
    pub fn max_voices(&self) -> usize {
        self.max_voices
    }

    /// Free slots in the message queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }

    fn send(&mut self, msg: SynthMessage) -> Result<()> {
        self.tx.push(msg).map_err(|_| {
            warn!("message queue full, dropping {msg:?}");
            Error::QueueFull
        })
    }

    fn validate(&self, params: &SynthParams) -> Result<()> {
        fn check(name: &'static str, value: f32, ok: bool) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(Error::InvalidParameter { name, value })
            }
        }

        check(
            "voices",
            params.voices as f32,
            (1..=self.max_voices).contains(&params.voices),
        )?;
        check(
            "brightness",
            params.brightness,
            (0.0..=1.0).contains(&params.brightness),
        )?;
        check(
            "decay",
            params.decay,
            params.decay.is_finite() && params.decay > 0.0,
        )?;
        check(
            "position",
            params.position,
            (0.0..=1.0).contains(&params.position),
        )?;

        let max_frequency = self.sample_rate / 4.0;
        for freq in params.tuning.iter() {
            check(
                "frequency",
                freq,
                (MIN_FREQUENCY..=max_frequency).contains(&freq),
            )?;
        }
        Ok(())
    }
}
