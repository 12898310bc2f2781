//! Low-level DSP primitives that make up a plucked string.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! making them safe to embed directly inside voice structs. Each one keeps its
//! own small state and takes the sample rate explicitly at construction.

/// First-order allpass used for fractional delay.
pub mod allpass;
/// Dynamic (pluck-level dependent) brightness blend.
pub mod brightness;
/// Loop lowpass that sets decay time and spectral tilt.
pub mod damping;
/// Power-of-two circular delay line with fractional length.
pub mod delay;
/// White noise for the excitation burst.
pub mod noise;
/// Feed-forward comb emulating pick position.
pub mod pick;

pub use allpass::Allpass;
pub use brightness::DynamicBrightnessFilter;
pub use damping::DampingFilter;
pub use delay::DelayLine;
pub use noise::NoiseSource;
pub use pick::PickPositionFilter;
