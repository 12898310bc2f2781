//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use plucked::{dsp::DelayLine, MIN_FREQUENCY};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Loop lengths (in samples) for low, middle and high strings
    let lengths: &[f32] = &[
        534.2, // E2
        199.5, // A3
        133.3, // E4
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &length in lengths {
            let mut delay = DelayLine::new(SAMPLE_RATE / MIN_FREQUENCY);
            delay.set_length(length);
            group.bench_with_input(
                BenchmarkId::new(format!("feedback_{}", length as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        let mut sum = 0.0f32;
                        for &x in &input {
                            let y = delay.output();
                            delay.input(x + 0.5 * y);
                            sum += y;
                        }
                        black_box(sum)
                    })
                },
            );
        }

        // Retuning every sample (pitch sweep)
        let mut delay = DelayLine::new(SAMPLE_RATE / MIN_FREQUENCY);
        group.bench_with_input(BenchmarkId::new("set_length", size), &size, |b, _| {
            b.iter(|| {
                for (i, &x) in input.iter().enumerate() {
                    delay.set_length(black_box(200.0 + i as f32 * 0.01));
                    delay.input(x);
                }
                black_box(delay.output())
            })
        });
    }

    group.finish();
}
