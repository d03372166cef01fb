//! Async common k-mer search using Tokio.
//!
//! # Feature Flag
//!
//! This module requires the `async` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! commonmer = { version = "0.1", features = ["async"] }
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use commonmer::async_api::find_common_kmers_async;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let common = find_common_kmers_async(vec!["a.fna".into(), "b.fna".into()], 11).await?;
//!     println!("{} common k-mers", common.len());
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    builder::CommonKmerFinder, error::CommonmerError, input::Input, kmer::KmerLength,
    reduce::CommonKmers,
};

/// Async version of [`find_common_kmers`](crate::run::find_common_kmers).
///
/// The whole fold runs on Tokio's blocking thread pool; sources are still read
/// one at a time and in order.
///
/// # Errors
///
/// Returns an error if `k` is zero, a source cannot be read, `paths` is empty,
/// or the blocking task panics.
pub async fn find_common_kmers_async(
    paths: Vec<PathBuf>,
    k: usize,
) -> Result<CommonKmers, Box<dyn std::error::Error + Send + Sync>> {
    let k = KmerLength::new(k)?;
    let finder = CommonKmerFinder::new().k_validated(k);
    Ok(find_async(finder, paths.into_iter().map(Input::from).collect()).await??)
}

/// Runs a configured [`CommonKmerFinder`] on the blocking thread pool.
///
/// # Errors
///
/// Returns [`task::JoinError`] if the blocking task panics or is cancelled.
pub async fn find_async(
    finder: CommonKmerFinder,
    sources: Vec<Input>,
) -> Result<Result<CommonKmers, CommonmerError>, task::JoinError> {
    task::spawn_blocking(move || finder.find_inputs(&sources)).await
}
