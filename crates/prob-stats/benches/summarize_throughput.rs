use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prob_stats::{summarize, theoretical_binomial, GaussianKde2d};

fn series(len: usize) -> Vec<f64> {
    (0..len).map(|i| ((i * 7919) % 1000) as f64 / 37.0).collect()
}

fn summarize_bench(c: &mut Criterion) {
    let values = series(10_000);
    c.bench_function("summarize_10k", |b| {
        b.iter(|| summarize(black_box(&values), &[5.0, 25.0, 50.0, 75.0, 95.0]).unwrap());
    });
}

fn pmf_bench(c: &mut Criterion) {
    c.bench_function("theoretical_binomial_500", |b| {
        b.iter(|| theoretical_binomial(black_box(500), 0.5).unwrap());
    });
}

fn kde_bench(c: &mut Criterion) {
    let xs = series(500);
    let ys: Vec<f64> = xs.iter().enumerate().map(|(i, x)| x * 0.7 + (i % 13) as f64).collect();
    let kde = GaussianKde2d::fit(&xs, &ys).unwrap();
    c.bench_function("kde_evaluate_point", |b| {
        b.iter(|| kde.evaluate(black_box(10.0), black_box(12.0)));
    });
}

criterion_group!(benches, summarize_bench, pmf_bench, kde_bench);
criterion_main!(benches);
