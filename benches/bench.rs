use bst_map::Map;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn rng() -> StdRng { StdRng::seed_from_u64(0x5eed) }

fn insert_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_rand");

    for n in [100usize, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut map = Map::new();
            let mut rng = rng();

            for _ in 0..n {
                let i = rng.gen_range(0..n);
                map.insert(i, i);
            }

            b.iter(|| {
                let k = rng.gen_range(0..n);
                map.insert(black_box(k), k);
            });
        });
    }

    group.finish();
}

// Every probe lands on the deepest leaf of a right chain.
fn insert_seq(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_seq");

    for n in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut map = Map::new();
            for i in 0..n { map.insert(i * 2, i * 2); }

            let mut i = 1;
            b.iter(|| {
                map.insert(black_box(i), i);
                i = (i + 2) % (2 * n);
            });
        });
    }

    group.finish();
}

fn find_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_rand");

    for n in [100usize, 10_000] {
        let mut rng = rng();
        let mut keys: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        let mut map = Map::new();
        for &k in &keys { map.insert(k, k); }
        keys.shuffle(&mut rng);

        group.bench_with_input(BenchmarkId::new("grown", n), &n, |b, &n| {
            let mut i = 0;
            b.iter(|| {
                let t = map.get(&keys[i]);
                i = (i + 1) % n;
                black_box(t);
            });
        });

        map.balance();

        group.bench_with_input(BenchmarkId::new("balanced", n), &n, |b, &n| {
            let mut i = 0;
            b.iter(|| {
                let t = map.get(&keys[i]);
                i = (i + 1) % n;
                black_box(t);
            });
        });
    }

    group.finish();
}

fn find_seq(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_seq");

    for n in [100usize, 1_000] {
        let mut map = Map::new();
        for i in 0..n { map.insert(i, i); }

        group.bench_with_input(BenchmarkId::new("chain", n), &n, |b, &n| {
            let mut i = 0;
            b.iter(|| {
                let x = map.find(&i).key_value();
                i = (i + 1) % n;
                black_box(x);
            });
        });

        map.balance();

        group.bench_with_input(BenchmarkId::new("balanced", n), &n, |b, &n| {
            let mut i = 0;
            b.iter(|| {
                let x = map.find(&i).key_value();
                i = (i + 1) % n;
                black_box(x);
            });
        });
    }

    group.finish();
}

fn balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance");

    for n in [1_000usize, 100_000] {
        let mut rng = rng();
        let map: Map<u32, u32> = (0..n).map(|_| (rng.gen(), rng.gen())).collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &map, |b, map| {
            b.iter(|| {
                let mut map = map.clone();
                map.balance();
                black_box(map)
            });
        });
    }

    group.finish();
}

fn iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");

    for n in [100usize, 1_000, 100_000] {
        let mut rng = rng();
        let mut map = Map::<u32, u32>::new();
        for _ in 0..n { map.insert(rng.gen(), rng.gen()); }

        group.bench_with_input(BenchmarkId::from_parameter(n), &map, |b, map| {
            b.iter(|| {
                for entry in map.iter() {
                    black_box(entry);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, insert_rand, insert_seq, find_rand, find_seq, balance, iter);
criterion_main!(benches);
