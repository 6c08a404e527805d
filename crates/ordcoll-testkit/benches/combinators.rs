//! Combinator benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ordcoll::{Collection, Key, SortFlags};
use ordcoll_testkit::TestFixture;

fn push_benchmark(c: &mut Criterion) {
    c.bench_function("push_10000", |b| {
        b.iter(|| {
            let mut store = Collection::new();
            for i in 0..10000 {
                store.push(i);
            }
            black_box(store.len())
        })
    });
}

fn unset_benchmark(c: &mut Criterion) {
    let base = Collection::from_values(0..1000);

    c.bench_function("unset_front_1000", |b| {
        b.iter(|| {
            let mut store = base.clone();
            for i in 0..1000 {
                store.unset(&Key::from(i));
            }
            black_box(store.is_empty())
        })
    });
}

fn sort_benchmark(c: &mut Criterion) {
    let mut fixture = TestFixture::with_seed(1);
    let ints = fixture.ints(10000, 1000);
    let names = fixture.file_names(1000);

    c.bench_function("sort_regular_10000", |b| {
        b.iter(|| {
            let mut store = ints.clone();
            store.sort(SortFlags::Regular);
            black_box(store.len())
        })
    });

    c.bench_function("natcasesort_1000", |b| {
        b.iter(|| {
            let mut store = names.clone();
            store.natcasesort();
            black_box(store.len())
        })
    });
}

fn set_algebra_benchmark(c: &mut Criterion) {
    let mut fixture = TestFixture::with_seed(2);
    let left = fixture.ints(1000, 500);
    let right = fixture.ints(1000, 500);

    c.bench_function("diff_1000", |b| {
        b.iter(|| black_box(left.diff(&[&right]).len()))
    });

    c.bench_function("intersect_key_1000", |b| {
        b.iter(|| black_box(left.intersect_key(&[&right]).len()))
    });

    c.bench_function("merge_1000", |b| {
        b.iter(|| black_box(left.merge(&[&right]).len()))
    });
}

fn unique_benchmark(c: &mut Criterion) {
    let mut fixture = TestFixture::with_seed(3);
    let mixed = fixture.mixed_map(5000);

    c.bench_function("unique_5000", |b| {
        b.iter(|| {
            let mut store = mixed.clone();
            store.unique(None);
            black_box(store.len())
        })
    });
}

criterion_group!(
    benches,
    push_benchmark,
    unset_benchmark,
    sort_benchmark,
    set_algebra_benchmark,
    unique_benchmark,
);
criterion_main!(benches);
