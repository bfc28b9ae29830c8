use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use tree_hashmap::{NodeArena, TreeHashMap};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_insert_destroy(c: &mut Criterion) {
    c.bench_function("tree_hashmap_insert_destroy_10k", |b| {
        b.iter_batched(
            || {
                (
                    NodeArena::<u64>::with_capacity(10_000),
                    TreeHashMap::<u64, u64>::new(),
                )
            },
            |(mut arena, mut m)| {
                for (i, k) in lcg(1).take(10_000).enumerate() {
                    m.insert(&mut arena, &k, i as u64);
                }
                // The map must not drop non-empty.
                m.destroy(&mut arena);
                black_box(arena.len())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("tree_hashmap_find_hit", |b| {
        let mut arena = NodeArena::new();
        let mut m: TreeHashMap<u64, u64> = TreeHashMap::new();
        let keys: Vec<u64> = lcg(7).take(20_000).collect();
        for (i, k) in keys.iter().enumerate() {
            m.insert(&mut arena, k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.find(&arena, k));
        });
        m.destroy(&mut arena);
    });
}

fn bench_find_miss(c: &mut Criterion) {
    c.bench_function("tree_hashmap_find_miss", |b| {
        let mut arena = NodeArena::new();
        let mut m: TreeHashMap<u64, u64> = TreeHashMap::new();
        for (i, k) in lcg(11).take(10_000).enumerate() {
            m.insert(&mut arena, &k, i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // keys from a disjoint stream, unlikely to be present
            let k = miss.next().unwrap();
            black_box(m.find(&arena, &k));
        });
        m.destroy(&mut arena);
    });
}

fn bench_traverse(c: &mut Criterion) {
    c.bench_function("tree_hashmap_traverse_10k", |b| {
        let mut arena = NodeArena::new();
        let mut m: TreeHashMap<u64, u64> = TreeHashMap::new();
        for (i, k) in lcg(23).take(10_000).enumerate() {
            m.insert(&mut arena, &k, i as u64);
        }
        b.iter(|| {
            let sum: u64 = m.iter(&arena).map(|(_, v)| *v).sum();
            black_box(sum)
        });
        m.destroy(&mut arena);
    });
}

fn bench_insert_erase_churn(c: &mut Criterion) {
    c.bench_function("tree_hashmap_insert_erase", |b| {
        let mut arena = NodeArena::new();
        let mut m: TreeHashMap<u64, u64> = TreeHashMap::new();
        for (i, k) in lcg(31).take(4_096).enumerate() {
            m.insert(&mut arena, &k, i as u64);
        }
        let mut fresh = lcg(0x5eed);
        b.iter(|| {
            let k = fresh.next().unwrap();
            let cur = m.insert(&mut arena, &k, 0);
            black_box(m.erase(&mut arena, cur));
        });
        m.destroy(&mut arena);
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_destroy, bench_find_hit, bench_find_miss, bench_traverse, bench_insert_erase_churn
}
criterion_main!(benches);
