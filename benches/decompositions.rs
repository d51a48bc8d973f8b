use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Helpers: deterministic random inputs shared by both libraries
// ---------------------------------------------------------------------------

fn random_data(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n * n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn symmetric_data(n: usize, seed: u64) -> Vec<f64> {
    let b = random_data(n, seed);
    let mut s = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            s[i * n + j] = b[i * n + j] + b[j * n + i];
        }
    }
    s
}

const SIZES: [usize; 3] = [4, 16, 64];

// ---------------------------------------------------------------------------
// Symmetric eigen-decomposition
// ---------------------------------------------------------------------------

fn symmetric_eigen(c: &mut Criterion) {
    let mut g = c.benchmark_group("symmetric_eigen");

    for n in SIZES {
        let data = symmetric_data(n, 1);

        let a = eigenspan::DenseMatrix::from_vec(n, n, data.clone()).unwrap();
        g.bench_with_input(BenchmarkId::new("eigenspan", n), &a, |b, a| {
            b.iter(|| {
                std::hint::black_box(a)
                    .tridiagonalize()
                    .unwrap()
                    .eigenvector_decomposition()
                    .unwrap()
            })
        });

        let m = nalgebra::DMatrix::from_row_slice(n, n, &data);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).clone().symmetric_eigen())
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Hessenberg reduction
// ---------------------------------------------------------------------------

fn hessenberg(c: &mut Criterion) {
    let mut g = c.benchmark_group("hessenberg");

    for n in SIZES {
        let data = random_data(n, 2);

        let a = eigenspan::DenseMatrix::from_vec(n, n, data.clone()).unwrap();
        g.bench_with_input(BenchmarkId::new("eigenspan", n), &a, |b, a| {
            b.iter(|| std::hint::black_box(a).hessenberg_reduce().unwrap())
        });

        let m = nalgebra::DMatrix::from_row_slice(n, n, &data);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).clone().hessenberg())
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// General eigen-decomposition (nalgebra computes eigenvalues only)
// ---------------------------------------------------------------------------

fn general_eigen(c: &mut Criterion) {
    let mut g = c.benchmark_group("general_eigen");

    for n in SIZES {
        let data = random_data(n, 3);

        let a = eigenspan::DenseMatrix::from_vec(n, n, data.clone()).unwrap();
        g.bench_with_input(BenchmarkId::new("eigenspan", n), &a, |b, a| {
            b.iter(|| {
                std::hint::black_box(a)
                    .hessenberg_reduce()
                    .unwrap()
                    .eigenvector_decomposition()
                    .unwrap()
            })
        });

        let m = nalgebra::DMatrix::from_row_slice(n, n, &data);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).complex_eigenvalues())
        });
    }

    g.finish();
}

criterion_group!(benches, symmetric_eigen, hessenberg, general_eigen);
criterion_main!(benches);
