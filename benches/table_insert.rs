use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use hashbench::{ChainedHashTable, Djb2Mix, Fnv1aMix, HashStrategy};
use rand::prelude::*;

fn random_keys(n: usize) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(42);
    (0..n)
        .map(|_| {
            let len = rng.random_range(3..12);
            (0..len).map(|_| rng.random_range(b'a'..=b'z') as char).collect()
        })
        .collect()
}

fn bench_strategy<S: HashStrategy + Copy>(c: &mut Criterion, strategy: S, keys: &[String]) {
    let mut group = c.benchmark_group(format!("ChainedHashTable_{}", strategy.name()));
    group.sample_size(40);

    group.bench_function("insert", |b| {
        b.iter(|| {
            let mut table = ChainedHashTable::new(32, strategy);
            for key in keys {
                let _ = table.insert(black_box(key.as_str()));
            }
            black_box(table.size())
        });
    });

    let mut table = ChainedHashTable::new(32, strategy);
    for key in keys {
        let _ = table.insert(key.as_str());
    }
    group.bench_function("contains", |b| {
        b.iter(|| {
            for key in keys.iter().step_by(7) {
                black_box(table.contains(black_box(key.as_str())).unwrap_or(false));
            }
        });
    });
    group.finish();
}

fn benchmark_tables(c: &mut Criterion) {
    let keys = random_keys(5_000);
    bench_strategy(c, Fnv1aMix, &keys);
    bench_strategy(c, Djb2Mix, &keys);
}

criterion_group!(benches, benchmark_tables);
criterion_main!(benches);
