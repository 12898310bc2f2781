pub mod dsp;
pub mod error;
pub mod synth; // Voice management and polyphony
pub mod tuning;

pub use error::{Error, Result};
pub use synth::engine::{EngineConfig, StringEngine};
pub use tuning::Tuning;

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Lowest frequency a string can be tuned to. Delay buffers are sized from it.
pub const MIN_FREQUENCY: f32 = 50.0;
pub const MAX_STRINGS: usize = 16;
pub const MAX_VOICES: usize = 32;
