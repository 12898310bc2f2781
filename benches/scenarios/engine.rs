//! Benchmarks for the engine mixing many resident voices.
//!
//! Decay is long enough that no voice retires during measurement, so each
//! case measures a full pool.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use plucked::{synth::SynthParams, EngineConfig, StringEngine};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn engine_with(voices: usize) -> StringEngine {
    let config = EngineConfig {
        sample_rate: SAMPLE_RATE,
        max_voices: 16,
        seed: Some(1),
        ..EngineConfig::default()
    };
    let mut engine = StringEngine::new(&config);
    engine.apply_params(SynthParams {
        voices,
        decay: 60.0,
        ..SynthParams::default()
    });

    let strings = engine.params().tuning.len();
    for i in 0..voices {
        engine.pluck(i % strings, 1.0);
    }
    engine
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for voices in [1, 6, 11] {
            let mut engine = engine_with(voices);
            group.bench_with_input(
                BenchmarkId::new(format!("{voices}_voices"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        engine.render_block(black_box(&mut buffer));
                    })
                },
            );
        }

        // === POLYPHONY PRESSURE ===
        // strumming across all strings with a 4 voice budget steals on every pluck
        let mut engine = engine_with(4);
        let strings = engine.params().tuning.len();
        let mut next = 0;
        group.bench_with_input(BenchmarkId::new("steal_per_block", size), &size, |b, _| {
            b.iter(|| {
                engine.pluck(next % strings, 1.0);
                next += 1;
                engine.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
