//! Intersection reduction across sources.
//!
//! The [`Reducer`] is a left fold over per-source frequency maps. Its single
//! accumulator is the running frequency map, whose key set *is* the common set:
//! a k-mer missing from any folded source is removed, never zeroed, and the sum
//! for each survivor includes every folded source, the seeding one too.
//!
//! ```text
//! Uninitialized --first map--> Active | Exhausted
//! Active        --next map---> Active | Exhausted
//! Active | Exhausted --finish--> Done
//! ```
//!
//! `Exhausted` is terminal: once nothing is common, no later source can add a
//! k-mer back, so callers stop reading sources as soon as it is reached.

use tracing::warn;

use crate::{error::CommonmerError, extract::KmerCounts};

/// Where a [`Reducer`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReducerState {
    /// No source has been folded yet.
    Uninitialized,
    /// The common set is non-empty.
    Active,
    /// The common set became empty; further sources are ignored.
    Exhausted,
    /// The result has been taken.
    Done,
}

impl ReducerState {
    /// Returns `true` if folding another source can no longer change the result.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Done)
    }
}

/// Running intersection of per-source k-mer counts.
///
/// Each reducer owns its accumulator; a fresh one starts from a clean state.
///
/// # Example
///
/// ```rust
/// use commonmer::{extract::count_kmers, kmer::KmerLength, reduce::{Reducer, ReducerState}};
///
/// let k = KmerLength::new(11)?;
/// let mut reducer = Reducer::new();
/// reducer.fold(count_kmers(b"AAAAAAAAAAAC", k));
/// reducer.fold(count_kmers(b"AAAAAAAAAAAG", k));
/// assert_eq!(reducer.state(), ReducerState::Active);
///
/// let common = reducer.finish()?;
/// assert_eq!(common.get(b"AAAAAAAAAAA"), Some(2));
/// assert_eq!(common.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Reducer {
    state: ReducerState,
    frequencies: KmerCounts,
    sources_folded: usize,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer {
    /// Creates a reducer in the `Uninitialized` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ReducerState::Uninitialized,
            frequencies: KmerCounts::default(),
            sources_folded: 0,
        }
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> ReducerState {
        self.state
    }

    /// Number of sources folded so far.
    pub const fn sources_folded(&self) -> usize {
        self.sources_folded
    }

    /// Size of the current common set.
    pub fn common_len(&self) -> usize {
        self.frequencies.len()
    }

    /// Summed frequency of `kmer`, if it is still common.
    pub fn frequency(&self, kmer: &[u8]) -> Option<u64> {
        self.frequencies.get(kmer).copied()
    }

    /// Folds one source's counts into the running intersection.
    ///
    /// The first map seeds the accumulator as-is. Each later map restricts it to
    /// the k-mers both share, adding the new counts to the running sums. Maps
    /// folded after the state turned terminal are dropped unread, with a warning
    /// once the result has been taken.
    pub fn fold(&mut self, counts: KmerCounts) -> ReducerState {
        match self.state {
            ReducerState::Uninitialized => self.frequencies = counts,
            ReducerState::Active => {
                self.frequencies
                    .retain(|kmer, total| match counts.get(kmer) {
                        Some(count) => {
                            *total += count;
                            true
                        }
                        None => false,
                    });
                drop(counts);
                self.release_spare_capacity();
            }
            ReducerState::Exhausted => return self.state,
            ReducerState::Done => {
                warn!(
                    dropped_kmers = counts.len(),
                    "Counts folded after the result was taken are dropped"
                );
                return self.state;
            }
        }

        self.sources_folded += 1;
        self.state = if self.frequencies.is_empty() {
            ReducerState::Exhausted
        } else {
            ReducerState::Active
        };
        self.state
    }

    /// Takes the result, moving the reducer to `Done`.
    ///
    /// # Errors
    ///
    /// Returns [`CommonmerError::EmptyInputList`] if no source was ever folded, and
    /// [`CommonmerError::ResultTaken`] if the result was already taken.
    pub fn finish(&mut self) -> Result<CommonKmers, CommonmerError> {
        let exhausted = match self.state {
            ReducerState::Uninitialized => return Err(CommonmerError::EmptyInputList),
            ReducerState::Active => false,
            ReducerState::Exhausted => true,
            ReducerState::Done => {
                return Err(CommonmerError::ResultTaken {
                    sources_folded: self.sources_folded,
                })
            }
        };
        self.state = ReducerState::Done;

        let mut kmers: Vec<_> = std::mem::take(&mut self.frequencies).into_iter().collect();
        kmers.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        Ok(CommonKmers {
            kmers,
            sources_folded: self.sources_folded,
            exhausted,
        })
    }

    /// The common set only shrinks; hand memory back once it is mostly empty.
    fn release_spare_capacity(&mut self) {
        if self.frequencies.capacity() > 4 * self.frequencies.len().max(1024) {
            self.frequencies.shrink_to_fit();
        }
    }
}

/// Intersects in-memory per-source maps, in iteration order.
///
/// The iterator is not advanced past the map that exhausts the common set.
///
/// # Errors
///
/// Returns [`CommonmerError::EmptyInputList`] if `per_source` yields nothing.
pub fn intersect_counts<I>(per_source: I) -> Result<CommonKmers, CommonmerError>
where
    I: IntoIterator<Item = KmerCounts>,
{
    let mut reducer = Reducer::new();
    for counts in per_source {
        if reducer.fold(counts).is_terminal() {
            break;
        }
    }
    reducer.finish()
}

/// The final result of a run: common k-mers in ascending lexicographic order
/// with their frequencies summed over every folded source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommonKmers {
    kmers: Vec<(Box<[u8]>, u64)>,
    sources_folded: usize,
    exhausted: bool,
}

impl CommonKmers {
    /// Number of common k-mers.
    pub fn len(&self) -> usize {
        self.kmers.len()
    }

    /// Returns `true` if no k-mer is common to every folded source.
    pub fn is_empty(&self) -> bool {
        self.kmers.is_empty()
    }

    /// Number of sources that contributed to the result.
    pub const fn sources_folded(&self) -> usize {
        self.sources_folded
    }

    /// Returns `true` if the fold stopped because the common set became empty.
    pub const fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Summed frequency of `kmer`, if it is common.
    pub fn get(&self, kmer: &[u8]) -> Option<u64> {
        self.kmers
            .binary_search_by(|(candidate, _)| (**candidate).cmp(kmer))
            .ok()
            .map(|i| self.kmers[i].1)
    }

    /// Iterates `(k-mer, frequency)` pairs in ascending k-mer order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> + '_ {
        self.kmers.iter().map(|(kmer, count)| (&**kmer, *count))
    }

    /// Total occurrences across all common k-mers and sources.
    pub fn total_frequency(&self) -> u64 {
        self.kmers.iter().map(|(_, count)| count).sum()
    }
}
