use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_tail_probabilities(c: &mut Criterion) {
    let xs: Vec<f64> = (0..10_000).map(|i| (i as f64) * 0.005).collect();

    c.bench_function("chi_squared_survival_10k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &x in &xs {
                acc += toyfit_prob::chi_squared::survival(x, 7).unwrap();
            }
            black_box(acc)
        })
    });

    let ts: Vec<f64> = (0..10_000).map(|i| (i as f64) * 0.0003).collect();
    c.bench_function("kolmogorov_survival_10k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &t in &ts {
                acc += toyfit_prob::kolmogorov::survival(t);
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_tail_probabilities);
criterion_main!(benches);
