//! K-mer extraction: one residue sequence in, one frequency map out.
//!
//! Every start position `i` in `0..=len - k` yields the window `seq[i..i + k]`.
//! Windows containing `N` are skipped outright; every other window, overlapping
//! or not, adds one to its count. A sequence shorter than `k` yields an empty map.
//!
//! Ambiguity is tracked with a running count of clean residues since the last
//! `N`, so the scan is linear in the sequence length regardless of `k`.
//!
//! Large sequences can be split into overlapping chunks counted in parallel with
//! [`rayon`] into a shared [`DashMap`]; the result is identical to the sequential scan.

use std::hash::BuildHasherDefault;

use dashmap::DashMap;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHasher};

use crate::kmer::{is_ambiguous, KmerLength};

/// Per-source frequency map: k-mer residues to occurrence count.
pub type KmerCounts = FxHashMap<Box<[u8]>, u64>;

/// A custom `DashMap` w/ `FxHasher`.
type DashFx = DashMap<Box<[u8]>, u64, BuildHasherDefault<FxHasher>>;

/// Default number of window positions handed to each parallel task.
pub const DEFAULT_CHUNK_LEN: usize = 1 << 20;

/// How a single sequence is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// One pass on the calling thread.
    Sequential,
    /// Overlapping chunks of `chunk_len` window positions counted in parallel.
    Parallel { chunk_len: usize },
}

impl Default for Extraction {
    fn default() -> Self {
        Self::Parallel {
            chunk_len: DEFAULT_CHUNK_LEN,
        }
    }
}

impl Extraction {
    /// Counts the k-mers of `seq` using this strategy.
    pub fn count(self, seq: &[u8], k: KmerLength) -> KmerCounts {
        match self {
            Self::Sequential => count_kmers(seq, k),
            Self::Parallel { chunk_len } => count_kmers_parallel(seq, k, chunk_len),
        }
    }
}

/// Counts every `N`-free window of width `k` in `seq`.
///
/// # Example
///
/// ```rust
/// use commonmer::{extract::count_kmers, kmer::KmerLength};
///
/// let k = KmerLength::new(3)?;
/// let counts = count_kmers(b"ACGACGNACG", k);
///
/// assert_eq!(counts.get(b"ACG".as_slice()), Some(&3));
/// assert_eq!(counts.get(b"CGA".as_slice()), Some(&1));
/// assert_eq!(counts.len(), 3);
/// # Ok::<(), commonmer::error::KmerLengthError>(())
/// ```
pub fn count_kmers(seq: &[u8], k: KmerLength) -> KmerCounts {
    let mut counts = KmerCounts::default();
    for_each_valid_window(seq, k, |window| {
        if let Some(count) = counts.get_mut(window) {
            *count += 1;
        } else {
            counts.insert(window.into(), 1);
        }
    });
    counts
}

/// Counts k-mers like [`count_kmers`], splitting `seq` into chunks of
/// `chunk_len` window positions that are scanned in parallel.
///
/// Each chunk carries the `k - 1` residues that follow it, so every window is
/// seen by exactly one chunk. Sequences with no more than `chunk_len` windows
/// are counted sequentially.
pub fn count_kmers_parallel(seq: &[u8], k: KmerLength, chunk_len: usize) -> KmerCounts {
    let windows = k.windows_in(seq.len());
    let chunk_len = chunk_len.max(1);
    if windows <= chunk_len {
        return count_kmers(seq, k);
    }

    let map: DashFx = DashMap::with_hasher(BuildHasherDefault::<FxHasher>::default());
    let width = k.get();

    (0..windows.div_ceil(chunk_len))
        .into_par_iter()
        .for_each(|chunk| {
            let start = chunk * chunk_len;
            let end = (start + chunk_len).min(windows);
            let slice = &seq[start..end + width - 1];

            for_each_valid_window(slice, k, |window| {
                // Optimization: skip the owned key allocation for k-mers already seen
                if let Some(mut count) = map.get_mut(window) {
                    *count += 1;
                } else {
                    *map.entry(window.into()).or_insert(0) += 1;
                }
            });
        });

    map.into_iter().collect()
}

/// Calls `f` on each window of `seq` that has no ambiguous residue, in start order.
fn for_each_valid_window<F>(seq: &[u8], k: KmerLength, mut f: F)
where
    F: FnMut(&[u8]),
{
    let width = k.get();
    let mut clean = 0usize;

    for (end, &residue) in seq.iter().enumerate() {
        if is_ambiguous(residue) {
            clean = 0;
            continue;
        }
        clean += 1;
        if clean >= width {
            f(&seq[end + 1 - width..=end]);
        }
    }
}
