//! Real-world scenario benchmarks.
//!
//! These model how the engine is actually driven: single ringing strings and
//! full blocks with many voices resident.

mod engine;
mod voices;

pub use engine::bench_engine;
pub use voices::bench_voices;
