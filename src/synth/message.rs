#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::synth::params::SynthParams;

/// Control messages for the audio thread. Fixed-size and `Copy`, so sending
/// or dropping one never touches the allocator.
#[derive(Debug, Copy, Clone)]
pub enum SynthMessage {
    Params(SynthParams),
    Pluck { string: usize, amplitude: f32 },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// Receiver with nothing in it, for driving an engine directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMessages;

impl MessageReceiver for NoMessages {
    fn pop(&mut self) -> Option<SynthMessage> {
        None
    }
}
