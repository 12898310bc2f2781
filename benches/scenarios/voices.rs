//! Benchmarks for a single string voice.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use plucked::{
    dsp::NoiseSource,
    synth::{StringParams, StringVoice},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    let strings: &[(&str, f32)] = &[("low_e", 82.41), ("a3", 220.0), ("high_e", 329.63)];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for &(name, frequency) in strings {
            let mut voice = StringVoice::new(SAMPLE_RATE, NoiseSource::from_seed(1));
            voice.set_params(StringParams {
                frequency,
                brightness: 0.5,
                decay: 30.0,
                position: 0.1,
            });
            voice.pluck(1.0);

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.fill(0.0);
                    voice.render(black_box(&mut buffer));
                })
            });
        }

        // === EXCITATION ===
        // re-pluck every block so the noise burst is always running
        let mut voice = StringVoice::new(SAMPLE_RATE, NoiseSource::from_seed(1));
        voice.set_params(StringParams {
            frequency: 82.41,
            brightness: 0.5,
            decay: 3.0,
            position: 0.1,
        });
        group.bench_with_input(BenchmarkId::new("repluck", size), &size, |b, _| {
            b.iter(|| {
                voice.pluck(1.0);
                buffer.fill(0.0);
                voice.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
