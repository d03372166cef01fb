//! Progress reporting between fold steps.
//!
//! A run folds sources one at a time, so progress is a plain snapshot handed to
//! a callback after each source rather than shared atomic state.
//!
//! # Example
//!
//! ```rust,no_run
//! use commonmer::builder::CommonKmerFinder;
//!
//! let common = CommonKmerFinder::new()
//!     .on_progress(|progress| {
//!         eprintln!(
//!             "{}/{} genomes, {} common k-mers",
//!             progress.sources_folded, progress.sources_total, progress.common_kmers
//!         );
//!     })
//!     .find(["a.fna", "b.fna"])?;
//! # Ok::<(), commonmer::error::CommonmerError>(())
//! ```

use std::sync::Arc;

/// Progress snapshot taken after a source has been folded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    /// Number of sources folded so far.
    pub sources_folded: usize,
    /// Number of sources in the run.
    pub sources_total: usize,
    /// Residues loaded so far, across folded sources.
    pub bases_processed: u64,
    /// Size of the common set after the latest fold.
    pub common_kmers: usize,
}

impl Progress {
    /// Fraction of sources folded, in `0.0..=1.0`.
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.sources_total == 0 {
            return 1.0;
        }
        self.sources_folded as f64 / self.sources_total as f64
    }
}

/// Callback invoked with a [`Progress`] snapshot after each fold.
pub type ProgressCallback = Arc<dyn Fn(&Progress) + Send + Sync>;
