//! Scalar multiplication benchmarks

use core::hint::black_box;
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use hex_literal::hex;
use shangmi::{BasepointTable, MulStrategy, ProjectivePoint, Scalar};

fn test_scalar() -> Scalar {
    Scalar::reduce_bytes(&hex!(
        "519b423d715f8b581f4fa8ee59f4771a5b44c8130b4e3eacca54a56dda72b464"
    ))
}

fn bench_strategies<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let k = black_box(test_scalar());
    let g = black_box(ProjectivePoint::GENERATOR);

    for (name, strategy) in [
        ("binary", MulStrategy::Binary),
        ("naf", MulStrategy::Naf),
        ("co-z", MulStrategy::CoZ),
    ] {
        group.bench_function(name, |b| b.iter(|| g.mul_with(&k, strategy)));
    }

    group.bench_function("fixed-base", |b| {
        b.iter(|| ProjectivePoint::mul_by_generator(&k))
    });
}

fn bench_table_build<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.bench_function("table build", |b| {
        b.iter(|| {
            let table = BasepointTable::new();
            black_box(table.points().len())
        })
    });
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar multiplication");
    bench_strategies(&mut group);
    bench_table_build(&mut group);
    group.finish();
}

criterion_group!(benches, bench_point);
criterion_main!(benches);
