// Copyright © SurrealDB Ltd
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Criterion benchmarks comparing ordtree against the standard library.
//!
//! This benchmark suite compares:
//! - `ordtree::OrderedTree` - Arena-backed red-black tree
//! - `std::collections::BTreeSet` / `BTreeMap` - Standard library B-tree
//!
//! Every benchmark is single-threaded; the tree has no internal
//! synchronization.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use ordtree::OrderedTree;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};
use std::hint::black_box;

const SEED: u64 = 42;

// ============================================================================
// Helper Functions
// ============================================================================

/// Generate sequential keys from 0 to count-1
fn sequential_keys(count: usize) -> Vec<i64> {
	(0..count as i64).collect()
}

/// Generate random keys using a seeded RNG
fn random_keys(count: usize) -> Vec<i64> {
	let mut rng = StdRng::seed_from_u64(SEED);
	(0..count).map(|_| rng.random()).collect()
}

/// Generate keys that don't exist in a sequential key set
fn missing_keys(count: usize) -> Vec<i64> {
	(0..count as i64).map(|i| -(i + 1)).collect()
}

fn build_tree(keys: &[i64]) -> OrderedTree<i64> {
	keys.iter().copied().collect()
}

// ============================================================================
// Insert Benchmarks
// ============================================================================

fn bench_insert_sequential(c: &mut Criterion) {
	let mut group = c.benchmark_group("insert_sequential");

	for count in [1_000, 10_000, 100_000] {
		let keys = sequential_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		group.bench_with_input(BenchmarkId::new("ordtree", count), &keys, |b, keys| {
			b.iter_batched(
				OrderedTree::new,
				|mut tree| {
					for &k in keys {
						let _ = black_box(tree.insert(k));
					}
					tree
				},
				BatchSize::SmallInput,
			)
		});

		group.bench_with_input(BenchmarkId::new("btreeset", count), &keys, |b, keys| {
			b.iter_batched(
				BTreeSet::new,
				|mut set| {
					for &k in keys {
						black_box(set.insert(k));
					}
					set
				},
				BatchSize::SmallInput,
			)
		});
	}

	group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
	let mut group = c.benchmark_group("insert_random");

	for count in [1_000, 10_000, 100_000] {
		let keys = random_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		group.bench_with_input(BenchmarkId::new("ordtree", count), &keys, |b, keys| {
			b.iter_batched(
				OrderedTree::new,
				|mut tree| {
					for &k in keys {
						let _ = black_box(tree.insert(k));
					}
					tree
				},
				BatchSize::SmallInput,
			)
		});

		group.bench_with_input(BenchmarkId::new("btreeset", count), &keys, |b, keys| {
			b.iter_batched(
				BTreeSet::new,
				|mut set| {
					for &k in keys {
						black_box(set.insert(k));
					}
					set
				},
				BatchSize::SmallInput,
			)
		});
	}

	group.finish();
}

fn bench_insert_duplicates(c: &mut Criterion) {
	let mut group = c.benchmark_group("insert_duplicates");

	for count in [1_000, 10_000] {
		let mut rng = StdRng::seed_from_u64(SEED);
		let keys: Vec<i64> = (0..count).map(|_| rng.random_range(0..64)).collect();
		group.throughput(Throughput::Elements(count as u64));

		group.bench_with_input(BenchmarkId::new("ordtree_multi", count), &keys, |b, keys| {
			b.iter_batched(
				OrderedTree::new_multi,
				|mut tree| {
					for &k in keys {
						let _ = black_box(tree.insert(k));
					}
					tree
				},
				BatchSize::SmallInput,
			)
		});

		// Counting map: the usual std stand-in for a multiset.
		group.bench_with_input(BenchmarkId::new("btreemap_counts", count), &keys, |b, keys| {
			b.iter_batched(
				BTreeMap::<i64, usize>::new,
				|mut map| {
					for &k in keys {
						*map.entry(k).or_default() += 1;
					}
					map
				},
				BatchSize::SmallInput,
			)
		});
	}

	group.finish();
}

// ============================================================================
// Lookup Benchmarks
// ============================================================================

fn bench_lookup_hit(c: &mut Criterion) {
	let mut group = c.benchmark_group("lookup_hit");

	for count in [1_000, 10_000, 100_000] {
		let keys = sequential_keys(count);
		let mut targets = keys.clone();
		targets.shuffle(&mut StdRng::seed_from_u64(SEED));
		group.throughput(Throughput::Elements(count as u64));

		let tree = build_tree(&keys);
		group.bench_with_input(BenchmarkId::new("ordtree", count), &targets, |b, targets| {
			b.iter(|| {
				for k in targets {
					black_box(tree.find(k));
				}
			})
		});

		let set: BTreeSet<i64> = keys.iter().copied().collect();
		group.bench_with_input(BenchmarkId::new("btreeset", count), &targets, |b, targets| {
			b.iter(|| {
				for k in targets {
					black_box(set.get(k));
				}
			})
		});
	}

	group.finish();
}

fn bench_lookup_miss(c: &mut Criterion) {
	let mut group = c.benchmark_group("lookup_miss");

	for count in [1_000, 10_000, 100_000] {
		let keys = sequential_keys(count);
		let targets = missing_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		let tree = build_tree(&keys);
		group.bench_with_input(BenchmarkId::new("ordtree", count), &targets, |b, targets| {
			b.iter(|| {
				for k in targets {
					black_box(tree.find(k));
				}
			})
		});

		let set: BTreeSet<i64> = keys.iter().copied().collect();
		group.bench_with_input(BenchmarkId::new("btreeset", count), &targets, |b, targets| {
			b.iter(|| {
				for k in targets {
					black_box(set.get(k));
				}
			})
		});
	}

	group.finish();
}

fn bench_lower_bound(c: &mut Criterion) {
	let mut group = c.benchmark_group("lower_bound");

	for count in [1_000, 100_000] {
		let keys: Vec<i64> = (0..count as i64).map(|k| k * 2).collect();
		let targets: Vec<i64> = (0..count as i64).map(|k| k * 2 + 1).collect();
		group.throughput(Throughput::Elements(count as u64));

		let tree = build_tree(&keys);
		group.bench_with_input(BenchmarkId::new("ordtree", count), &targets, |b, targets| {
			b.iter(|| {
				for k in targets {
					black_box(tree.lower_bound(k));
				}
			})
		});

		let set: BTreeSet<i64> = keys.iter().copied().collect();
		group.bench_with_input(BenchmarkId::new("btreeset", count), &targets, |b, targets| {
			b.iter(|| {
				for k in targets {
					black_box(set.range(k..).next());
				}
			})
		});
	}

	group.finish();
}

// ============================================================================
// Erase Benchmarks
// ============================================================================

fn bench_erase(c: &mut Criterion) {
	let mut group = c.benchmark_group("erase");

	for count in [1_000, 10_000, 100_000] {
		let keys = random_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		group.bench_with_input(BenchmarkId::new("ordtree", count), &keys, |b, keys| {
			b.iter_batched(
				|| build_tree(keys),
				|mut tree| {
					for k in keys {
						black_box(tree.erase_key(k));
					}
					tree
				},
				BatchSize::LargeInput,
			)
		});

		group.bench_with_input(BenchmarkId::new("btreeset", count), &keys, |b, keys| {
			b.iter_batched(
				|| keys.iter().copied().collect::<BTreeSet<i64>>(),
				|mut set| {
					for k in keys {
						black_box(set.remove(k));
					}
					set
				},
				BatchSize::LargeInput,
			)
		});
	}

	group.finish();
}

fn bench_erase_front(c: &mut Criterion) {
	let mut group = c.benchmark_group("erase_front");

	for count in [1_000, 100_000] {
		let keys = sequential_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		group.bench_with_input(BenchmarkId::new("ordtree", count), &keys, |b, keys| {
			b.iter_batched(
				|| build_tree(keys),
				|mut tree| {
					let mut pos = tree.begin();
					while let Ok(next) = tree.erase(pos) {
						pos = next;
					}
					tree
				},
				BatchSize::LargeInput,
			)
		});

		group.bench_with_input(BenchmarkId::new("btreeset", count), &keys, |b, keys| {
			b.iter_batched(
				|| keys.iter().copied().collect::<BTreeSet<i64>>(),
				|mut set| {
					while let Some(k) = set.pop_first() {
						black_box(k);
					}
					set
				},
				BatchSize::LargeInput,
			)
		});
	}

	group.finish();
}

// ============================================================================
// Iteration Benchmarks
// ============================================================================

fn bench_iter(c: &mut Criterion) {
	let mut group = c.benchmark_group("iter");

	for count in [1_000, 100_000] {
		let keys = random_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		let tree = build_tree(&keys);
		group.bench_function(BenchmarkId::new("ordtree", count), |b| {
			b.iter(|| black_box(tree.iter().fold(0i64, |acc, k| acc.wrapping_add(*k))))
		});

		let set: BTreeSet<i64> = keys.iter().copied().collect();
		group.bench_function(BenchmarkId::new("btreeset", count), |b| {
			b.iter(|| black_box(set.iter().fold(0i64, |acc, k| acc.wrapping_add(*k))))
		});
	}

	group.finish();
}

fn bench_range(c: &mut Criterion) {
	let mut group = c.benchmark_group("range");
	let count = 100_000;
	let keys = sequential_keys(count);
	let tree = build_tree(&keys);
	let set: BTreeSet<i64> = keys.iter().copied().collect();

	for span in [10, 100, 1_000] {
		group.throughput(Throughput::Elements(span as u64));
		let start = (count as i64) / 2;

		group.bench_function(BenchmarkId::new("ordtree", span), |b| {
			b.iter(|| {
				let first = tree.lower_bound(&start);
				let last = tree.lower_bound(&(start + span));
				black_box(tree.range(first, last).count())
			})
		});

		group.bench_function(BenchmarkId::new("btreeset", span), |b| {
			b.iter(|| black_box(set.range(start..start + span).count()))
		});
	}

	group.finish();
}

// ============================================================================
// Whole-Tree Benchmarks
// ============================================================================

fn bench_merge(c: &mut Criterion) {
	let mut group = c.benchmark_group("merge");

	for count in [1_000, 10_000] {
		let evens: Vec<i64> = (0..count as i64).map(|k| k * 2).collect();
		let odds: Vec<i64> = (0..count as i64).map(|k| k * 2 + 1).collect();
		group.throughput(Throughput::Elements(count as u64));

		group.bench_function(BenchmarkId::new("ordtree", count), |b| {
			b.iter_batched(
				|| (build_tree(&evens), build_tree(&odds)),
				|(mut dst, mut src)| {
					black_box(dst.merge(&mut src).unwrap());
					(dst, src)
				},
				BatchSize::LargeInput,
			)
		});

		group.bench_function(BenchmarkId::new("btreeset_append", count), |b| {
			b.iter_batched(
				|| {
					(
						evens.iter().copied().collect::<BTreeSet<i64>>(),
						odds.iter().copied().collect::<BTreeSet<i64>>(),
					)
				},
				|(mut dst, mut src)| {
					dst.append(&mut src);
					(dst, src)
				},
				BatchSize::LargeInput,
			)
		});
	}

	group.finish();
}

fn bench_clone(c: &mut Criterion) {
	let mut group = c.benchmark_group("clone");

	for count in [1_000, 100_000] {
		let keys = random_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		let tree = build_tree(&keys);
		group.bench_function(BenchmarkId::new("ordtree", count), |b| {
			b.iter(|| black_box(tree.clone()))
		});

		let set: BTreeSet<i64> = keys.iter().copied().collect();
		group.bench_function(BenchmarkId::new("btreeset", count), |b| {
			b.iter(|| black_box(set.clone()))
		});
	}

	group.finish();
}

criterion_group!(
	insert_benches,
	bench_insert_sequential,
	bench_insert_random,
	bench_insert_duplicates,
);

criterion_group!(lookup_benches, bench_lookup_hit, bench_lookup_miss, bench_lower_bound);

criterion_group!(erase_benches, bench_erase, bench_erase_front);

criterion_group!(whole_tree_benches, bench_iter, bench_range, bench_merge, bench_clone);

criterion_main!(insert_benches, lookup_benches, erase_benches, whole_tree_benches);
