// Leaf-sized persistent updates: a flat copy-on-write segment against rpds's
// trie, which is what a tree would otherwise use for small arrays.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nickel_lang_segment::{Segment, DEFAULT_LEAF_WIDTH};

pub fn set(c: &mut Criterion) {
    let seg: Segment<u32> = (0..DEFAULT_LEAF_WIDTH as u32).collect();
    let rpds: rpds::Vector<u32> = (0..DEFAULT_LEAF_WIDTH as u32).collect();
    let mut group = c.benchmark_group("set");

    group.bench_function("ours 32", |b| {
        b.iter(|| black_box(seg.set(black_box(5), 0)))
    });

    group.bench_function("rpds 32", |b| {
        b.iter(|| black_box(rpds.set(black_box(5), 0)))
    });
}

pub fn push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    group.bench_function("ours up to 32", |b| {
        b.iter(|| {
            let mut seg = Segment::new();
            for i in 0..DEFAULT_LEAF_WIDTH as u32 {
                seg = seg.push(i);
            }
            black_box(seg)
        })
    });

    group.bench_function("rpds up to 32", |b| {
        b.iter(|| {
            let mut vec = rpds::Vector::new();
            for i in 0..DEFAULT_LEAF_WIDTH as u32 {
                vec = vec.push_back(i);
            }
            black_box(vec)
        })
    });
}

pub fn get(c: &mut Criterion) {
    let seg: Segment<u32> = (0..DEFAULT_LEAF_WIDTH as u32).collect();
    let rpds: rpds::Vector<u32> = (0..DEFAULT_LEAF_WIDTH as u32).collect();
    let mut group = c.benchmark_group("get");

    group.bench_function("ours 32", |b| {
        b.iter(|| black_box(seg.get(black_box(17))))
    });

    group.bench_function("rpds 32", |b| {
        b.iter(|| black_box(rpds.get(black_box(17))))
    });
}

criterion_group!(benches, set, push, get);
criterion_main!(benches);
