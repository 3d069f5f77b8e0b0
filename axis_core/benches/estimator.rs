use axis_core::{Estimator, EstimatorCfg};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

// Generate a synthetic stick trace: slow sine with additive white noise
// and occasional decisive moves that trip the escape radius.
fn synth_trace(n: usize, noise_amp: f64, seed: u32) -> Vec<f64> {
    // tiny PRNG
    let mut state = seed.max(1);
    let mut next_f64 = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        f64::from(x) / (f64::from(u32::MAX) + 1.0)
    };
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64 / 200.0;
        let s = t.sin() * 0.6;
        let noise = (next_f64() * 2.0 - 1.0) * noise_amp;
        let kick = if i % 500 == 250 { 0.3 } else { 0.0 };
        v.push((s + noise + kick).clamp(-1.0, 1.0));
    }
    v
}

pub fn bench_estimator(c: &mut Criterion) {
    let mut g = c.benchmark_group("estimator");
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }

    let trace = synth_trace(10_000, 0.01, 42);
    let cfg = EstimatorCfg {
        escape_radius: Some(0.07),
        ..EstimatorCfg::default()
    };

    g.bench_function("apply_10k", |b| {
        b.iter_batched(
            || Estimator::new(cfg).unwrap(),
            |mut est| {
                for &s in &trace {
                    black_box(est.apply(s));
                }
                est
            },
            BatchSize::SmallInput,
        )
    });

    g.finish();
}

criterion_group!(benches, bench_estimator);
criterion_main!(benches);
