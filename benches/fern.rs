#[macro_use]
extern crate criterion;

use barnsley::{generate, generate_threaded, TransformTable};
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PALETTE: [&str; 5] = ["#03BFAC", "#75DFCA", "#1DBACC", "#ED3192", "#087FBF"];

fn serial(c: &mut Criterion) {
    c.bench_function("generate 10k", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| generate(10_000, &PALETTE, &mut rng).unwrap())
    });
}

fn threaded(c: &mut Criterion) {
    let table = TransformTable::barnsley_fern();
    c.bench_function("generate_threaded 100k x4", move |b| {
        b.iter(|| generate_threaded(&table, 100_000, &PALETTE, 4, 0).unwrap())
    });
}

criterion_group!(benches, serial, threaded);
criterion_main!(benches);
