use commonmer::extract::{count_kmers, count_kmers_parallel};
use commonmer::kmer::KmerLength;
use commonmer::reduce::intersect_counts;
use commonmer::run::find_common_kmers;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io::Write;
use tempfile::NamedTempFile;

/// Deterministic pseudo-random residues with an `N` roughly every 500 bases.
fn synthetic_genome(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let r = (state >> 33) % 2000;
            match r {
                0..=3 => b'N',
                _ => b"ACGT"[(r % 4) as usize],
            }
        })
        .collect()
}

fn bench_count_kmers(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_kmers");
    let seq = synthetic_genome(200_000, 7);

    for k in [5, 11, 21, 31] {
        let k = KmerLength::new(k).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(k), &seq, |b, seq| {
            b.iter(|| count_kmers(black_box(seq), k));
        });
    }

    group.finish();
}

fn bench_count_kmers_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_kmers_parallel");
    let seq = synthetic_genome(2_000_000, 11);
    let k = KmerLength::new(11).unwrap();

    for chunk_len in [1 << 14, 1 << 17, 1 << 20] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk_len), &seq, |b, seq| {
            b.iter(|| count_kmers_parallel(black_box(seq), k, chunk_len));
        });
    }

    group.finish();
}

fn bench_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersect_counts");
    let k = KmerLength::new(8).unwrap();

    for sources in [2, 4, 8] {
        let per_source: Vec<_> = (0..sources)
            .map(|seed| count_kmers(&synthetic_genome(100_000, seed), k))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(sources),
            &per_source,
            |b, per_source| {
                b.iter(|| intersect_counts(black_box(per_source.clone())).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_find_common_kmers(c: &mut Criterion) {
    let files: Vec<NamedTempFile> = (0..3)
        .map(|seed| {
            let mut file = NamedTempFile::new().unwrap();
            for line in synthetic_genome(300_000, seed + 100).chunks(80) {
                file.write_all(line).unwrap();
                file.write_all(b"\n").unwrap();
            }
            file
        })
        .collect();
    let paths: Vec<_> = files.iter().map(NamedTempFile::path).collect();

    c.bench_function("find_common_kmers/3x300k/k=11", |b| {
        b.iter(|| find_common_kmers(black_box(&paths), 11).unwrap());
    });
}

criterion_group!(
    benches,
    bench_count_kmers,
    bench_count_kmers_parallel,
    bench_intersect,
    bench_find_common_kmers
);
criterion_main!(benches);
