#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::NoiseSource,
    synth::{params::SynthParams, voice::StringVoice},
};

/// How logical strings map onto voices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Allocation {
    /// At most `SynthParams::voices` voices, oldest-triggered stolen first.
    #[default]
    Pooled,
    /// One voice per string, never stolen. `SynthParams::voices` is ignored.
    PerString,
}

/// Bounded set of string voices ordered by recency of triggering.
///
/// All voices are allocated up front: `resident` holds the sounding ones,
/// oldest first, and `spare` holds the rest. Moving a voice between the two
/// never reallocates, so the pool is safe to drive from the audio thread.
pub struct VoicePool {
    allocation: Allocation,
    resident: Vec<StringVoice>,
    spare: Vec<StringVoice>,
    budget: usize,
}

impl VoicePool {
    /// `capacity` voices, seeded from `seed` when given so renders repeat.
    pub fn new(
        sample_rate: f32,
        capacity: usize,
        allocation: Allocation,
        seed: Option<u64>,
    ) -> Self {
        let capacity = capacity.max(1);
        let spare = (0..capacity)
            .map(|i| {
                let noise = match seed {
                    Some(seed) => NoiseSource::from_seed(seed.wrapping_add(i as u64)),
                    None => NoiseSource::new(),
                };
                StringVoice::new(sample_rate, noise)
            })
            .collect();

        Self {
            allocation,
            resident: Vec::with_capacity(capacity),
            spare,
            budget: capacity,
        }
    }

    /// Voices allowed to sound at once.
    pub fn limit(&self) -> usize {
        match self.allocation {
            Allocation::Pooled => self.budget,
            Allocation::PerString => self.capacity(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.resident.len() + self.spare.len()
    }

    /// Apply a parameter broadcast.
    ///
    /// A smaller budget drops the oldest-triggered voices first. Voices bound
    /// to strings the tuning no longer has are retired. Everything left gets
    /// the merged parameters for its string.
    pub fn apply_params(&mut self, params: &SynthParams) {
        self.budget = params.voices.clamp(1, self.capacity());
        self.trim_to(self.limit());

        let mut i = 0;
        while i < self.resident.len() {
            match params.string(self.resident[i].string()) {
                Some(string_params) => {
                    self.resident[i].set_params(string_params);
                    i += 1;
                }
                None => {
                    let voice = self.resident.remove(i);
                    self.spare.push(voice);
                }
            }
        }
    }

    /// Trigger `string`.
    ///
    /// A resident voice for the string is re-plucked in place and moved to
    /// the most-recent end. Otherwise a fresh voice is taken, stealing the
    /// oldest-triggered resident when the budget is used up. Stolen voices are
    /// cut off without a fade.
    ///
    /// # Panics
    ///
    /// If `string` is beyond the tuning in `params`; callers must only pluck
    /// strings that exist.
    pub fn pluck(&mut self, params: &SynthParams, string: usize, amplitude: f32) {
        let Some(string_params) = params.string(string) else {
            panic!(
                "pluck for string {string} but tuning has {} strings",
                params.tuning.len()
            );
        };

        if let Some(i) = self.resident.iter().position(|v| v.string() == string) {
            let mut voice = self.resident.remove(i);
            voice.pluck(amplitude);
            self.resident.push(voice);
            return;
        }

        self.trim_to(self.limit() - 1);
        let Some(mut voice) = self.spare.pop() else {
            return;
        };
        voice.reset();
        voice.assign(string);
        voice.set_params(string_params);
        voice.pluck(amplitude);
        self.resident.push(voice);
    }

    /// Mix every resident voice into `out`, then retire voices that have
    /// rung out.
    pub fn render(&mut self, out: &mut [f32]) {
        for voice in self.resident.iter_mut() {
            voice.render(out);
        }
        self.retire_finished();
    }

    /// Strings currently holding a voice, oldest-triggered first.
    pub fn strings(&self) -> impl Iterator<Item = usize> + '_ {
        self.resident.iter().map(|v| v.string())
    }

    pub fn contains(&self, string: usize) -> bool {
        self.resident.iter().any(|v| v.string() == string)
    }

    pub fn len(&self) -> usize {
        self.resident.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }

    fn trim_to(&mut self, len: usize) {
        while self.resident.len() > len {
            let voice = self.resident.remove(0);
            self.spare.push(voice);
        }
    }

    fn retire_finished(&mut self) {
        let mut i = 0;
        while i < self.resident.len() {
            if self.resident[i].is_playing() {
                i += 1;
            } else {
                let voice = self.resident.remove(i);
                self.spare.push(voice);
            }
        }
    }
}
