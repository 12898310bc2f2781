//! Benchmarks for the per-voice filters.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use plucked::dsp::{DampingFilter, DynamicBrightnessFilter, PickPositionFilter};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut pick = PickPositionFilter::new(SAMPLE_RATE);
        pick.set_frequency(220.0);
        pick.set_position(0.1);
        group.bench_with_input(BenchmarkId::new("pick_position", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &x in &input {
                    sum += pick.process(black_box(x));
                }
                sum
            })
        });

        let mut damping = DampingFilter::new();
        damping.set_frequency(220.0);
        damping.set_decay(3.0);
        damping.set_brightness(0.5);
        group.bench_with_input(BenchmarkId::new("damping", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &x in &input {
                    sum += damping.process(black_box(x));
                }
                sum
            })
        });

        let mut brightness = DynamicBrightnessFilter::new(SAMPLE_RATE);
        brightness.set_frequency(220.0);
        brightness.set_level(0.4);
        group.bench_with_input(BenchmarkId::new("brightness", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &x in &input {
                    sum += brightness.process(black_box(x));
                }
                sum
            })
        });
    }

    group.finish();
}
