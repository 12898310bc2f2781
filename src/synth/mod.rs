// Purpose: voice management, polyphony, control messages
// This layer sits above the dsp primitives and owns every string voice

pub mod engine;
#[cfg(feature = "rtrb")]
pub mod handle;
pub mod message;
pub mod params;
pub mod pool;
pub mod voice;

#[cfg(feature = "rtrb")]
pub use engine::channel;
#[cfg(feature = "rtrb")]
pub use handle::SynthHandle;
pub use message::{MessageReceiver, SynthMessage};
pub use params::{StringParams, SynthParams};
pub use pool::{Allocation, VoicePool};
pub use voice::{StringVoice, VoiceState};
