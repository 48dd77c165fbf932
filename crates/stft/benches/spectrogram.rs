//! A measured response is several seconds of 44.1 kHz audio.
//! These benchmarks track how long its spectrogram takes at the segment lengths that get plotted.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use stft::SpecCompute;

const SAMPLE_RATE: f32 = 44_100.0;

fn chirp(seconds: f32) -> Vec<f64> {
    let samples = (seconds * SAMPLE_RATE) as usize;
    (0..samples)
        .map(|n| {
            let t = f64::from(n as f32 / SAMPLE_RATE);
            (2.0 * std::f64::consts::PI * (100.0 + 1000.0 * t) * t).sin()
        })
        .collect()
}

fn psd_1024(c: &mut Criterion) {
    let data = chirp(5.0);
    c.bench_function("psd 1024 sample segments", |b| {
        b.iter(|| black_box(SpecCompute::psd(data.clone(), 1024, SAMPLE_RATE).stft()))
    });
}

fn psd_256(c: &mut Criterion) {
    let data = chirp(0.2);
    c.bench_function("psd 256 sample segments", |b| {
        b.iter(|| black_box(SpecCompute::psd(data.clone(), 256, SAMPLE_RATE).stft()))
    });
}

criterion_group!(benches, psd_1024, psd_256);
criterion_main!(benches);
