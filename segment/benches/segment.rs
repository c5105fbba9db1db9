use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nickel_lang_segment::{leaves, Segment};

pub fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    group.bench_function("initialize 32", |b| {
        b.iter(|| black_box(Segment::initialize(32, 0, |i| i as u64)))
    });

    group.bench_function("leaves of 32 out of 10k", |b| {
        b.iter(|| black_box(leaves(32, 0..10_000u64).count()))
    });

    group.bench_function("push up to 32", |b| {
        b.iter(|| {
            let mut seg = Segment::new();
            for i in 0..32u64 {
                seg = seg.push(i);
            }
            black_box(seg)
        })
    });
}

pub fn update(c: &mut Criterion) {
    let seg: Segment<u64> = (0..32).collect();
    let tail: Segment<u64> = (0..32).collect();
    let mut group = c.benchmark_group("update");

    group.bench_function("set 32", |b| {
        b.iter(|| black_box(seg.set(black_box(17), 0)))
    });

    group.bench_function("slice 8 out of 32", |b| {
        b.iter(|| black_box(seg.slice(black_box(8), 16)))
    });

    group.bench_function("append_bounded 16 + 32", |b| {
        let half = seg.slice(0, 16);
        b.iter(|| black_box(half.append_bounded(32, &tail)))
    });

    group.bench_function("fold_left 32", |b| {
        b.iter(|| black_box(seg.fold_left(0u64, |acc, x| acc.wrapping_add(*x))))
    });
}

criterion_group!(benches, build, update);
criterion_main!(benches);
