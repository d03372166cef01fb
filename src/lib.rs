//! Common k-mer extraction across many genomes.
//!
//! Each source is read as one contiguous DNA sequence, its k-mers are counted,
//! and the counts are folded into a running intersection. Only k-mers present in
//! every source survive, carrying the sum of their per-source frequencies. The
//! fold stops as soon as the common set becomes empty, and later sources are
//! never read.
//!
//! # Example
//!
//! ```rust,no_run
//! use commonmer::CommonKmerFinder;
//!
//! let common = CommonKmerFinder::new()
//!     .k(11)?
//!     .find(["genome_a.fna", "genome_b.fna", "genome_c.fna"])?;
//!
//! for (kmer, frequency) in common.iter() {
//!     println!("{}\t{frequency}", String::from_utf8_lossy(kmer));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Feature Flags
//!
//! - `gzip`: read `.gz` sources transparently
//! - `async`: [`async_api`] wrappers that run a search on Tokio's blocking pool

#[cfg(feature = "async")]
pub mod async_api;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod input;
pub mod kmer;
pub mod output;
pub mod progress;
pub mod reader;
pub mod reduce;
pub mod run;

pub use builder::CommonKmerFinder;
pub use error::{CommonmerError, KmerLengthError};
pub use input::Input;
pub use kmer::KmerLength;
pub use output::{Output, OutputFormat};
pub use reduce::{CommonKmers, Reducer};
pub use run::{find_common_kmers, UnreadablePolicy};
