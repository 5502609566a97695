//! Performance benchmarks for oxiarc-lcpit
//!
//! This benchmark suite evaluates:
//! - Suffix sorting and tree construction alone
//! - Full block match finding across data patterns
//! - The effect of the output stride (effort presets)
//! - Dictionary skipping

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxiarc_lcpit::{
    BlockFlags, DivSufSorter, IntervalTree, MatchEffort, MatchFinder, MatchFinderConfig,
    SuffixSorter,
};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Random data - almost no matches
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Long runs of one byte - deepest possible tree
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Text-like data - realistic scenario
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! \
                     Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }

    /// Text with occasional byte mutations - many medium-length matches
    pub fn mutated_text(size: usize) -> Vec<u8> {
        let mut data = text_like(size);
        let mut seed: u64 = 0xDEADBEEF;
        for i in (0..data.len()).step_by(37) {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data[i] = (seed >> 56) as u8;
        }
        data
    }
}

/// Standard data sizes for benchmarking
mod data_sizes {
    pub const SMALL: usize = 16 * 1024; // 16 KB
    pub const MEDIUM: usize = 128 * 1024; // 128 KB
    pub const LARGE: usize = 1024 * 1024; // 1 MB
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");

    for size in [data_sizes::SMALL, data_sizes::MEDIUM] {
        let data = test_data::text_like(size);
        let mut sorter = DivSufSorter::with_capacity(size).unwrap();
        let mut tree = IntervalTree::with_capacity(size).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let count = tree.build(&mut sorter, black_box(data), 1).unwrap();
                black_box(count);
            });
        });
    }

    group.finish();
}

fn bench_block_matches_data_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_matches_data_types");
    let size = data_sizes::MEDIUM;

    let patterns: [(&str, PatternGenerator); 4] = [
        ("random", test_data::random),
        ("uniform", test_data::uniform),
        ("text", test_data::text_like),
        ("mutated_text", test_data::mutated_text),
    ];

    let config = MatchFinderConfig::new(size, size);
    let mut finder = MatchFinder::new(config).unwrap();

    for (name, generator) in patterns {
        let data = generator(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                finder
                    .find_all_block_matches(black_box(data), 0, BlockFlags::SINGLE)
                    .unwrap();
                black_box(finder.matches().len());
            });
        });
    }

    group.finish();
}

fn bench_effort(c: &mut Criterion) {
    let mut group = c.benchmark_group("effort");
    let size = data_sizes::MEDIUM;
    let data = test_data::mutated_text(size);

    for (name, effort) in [
        ("low", MatchEffort::Low),
        ("medium", MatchEffort::Medium),
        ("high", MatchEffort::High),
    ] {
        let config = MatchFinderConfig::new(size, size).with_effort(effort);
        let mut finder = MatchFinder::new(config).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                finder
                    .find_all_block_matches(black_box(data), 0, BlockFlags::SINGLE)
                    .unwrap();
                black_box(finder.short_offsets().len());
            });
        });
    }

    group.finish();
}

fn bench_dictionary_skip(c: &mut Criterion) {
    let mut group = c.benchmark_group("dictionary_skip");
    let block = data_sizes::SMALL;
    let window = data_sizes::LARGE;
    let data = test_data::mutated_text(window);

    for dict_size in [0, window / 2, window - block] {
        let config = MatchFinderConfig::new(block, window);
        let mut finder = MatchFinder::new(config).unwrap();
        let slice = &data[..dict_size + block];

        group.throughput(Throughput::Bytes(slice.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(dict_size), &slice, |b, slice| {
            b.iter(|| {
                finder
                    .find_all_block_matches(black_box(slice), dict_size, BlockFlags::NONE)
                    .unwrap();
                black_box(finder.block_len());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tree_build,
    bench_block_matches_data_types,
    bench_effort,
    bench_dictionary_skip,
);
criterion_main!(benches);
