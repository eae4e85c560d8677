use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gf2::config::Cache;
use gf2::echelon::echelonize;
use gf2::matrix::Matrix;
use gf2::mul::{m4rm::mul_m4rm, naive::mul_naive, strassen::mul_strassen};
use rand::SeedableRng;

fn random_matrix(rows: usize, cols: usize, seed: u64) -> Matrix<'static> {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    let mut m = Matrix::new(rows, cols);
    m.randomize(&mut rng);
    m
}

fn bench_mul(c: &mut Criterion) {
    let cutoff = Cache::default().strassen_cutoff();
    let mut group = c.benchmark_group("mul");
    for &size in &[64usize, 128, 256] {
        let a = random_matrix(size, size, 1);
        let b = random_matrix(size, size, 2);

        group.bench_with_input(BenchmarkId::new("naive", size), &size, |bencher, _| {
            bencher.iter(|| mul_naive(&a, &b));
        });
        group.bench_with_input(BenchmarkId::new("m4rm", size), &size, |bencher, _| {
            bencher.iter(|| mul_m4rm(&a, &b));
        });
        group.bench_with_input(BenchmarkId::new("strassen", size), &size, |bencher, _| {
            bencher.iter(|| mul_strassen(&a, &b, cutoff));
        });
    }
    group.finish();
}

fn bench_echelonize(c: &mut Criterion) {
    let mut group = c.benchmark_group("echelonize");
    for &size in &[64usize, 128, 256] {
        group.bench_with_input(BenchmarkId::new("full", size), &size, |bencher, _| {
            bencher.iter_batched(
                || random_matrix(size, size, 3),
                |mut m| echelonize(&mut m, true),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mul, bench_echelonize);
criterion_main!(benches);
