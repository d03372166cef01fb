//! Error types for commonmer.
//!
//! Every failure a run can hit is structural: a source cannot be read, there is
//! nothing to intersect, or the result cannot be persisted. None of them are
//! retried. Each variant carries enough context (the source or destination it
//! concerns) for the caller to decide what to do next.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in commonmer operations.
#[derive(Debug, Error)]
pub enum CommonmerError {
    /// K-mer length is not a positive integer.
    #[error("invalid k-mer length {k}: must be at least 1")]
    InvalidKmerLength { k: usize },

    /// No sources were given, or none of them could be folded.
    #[error("no sequence sources to intersect")]
    EmptyInputList,

    /// A listed source could not be opened, read, or parsed.
    #[error("failed to read sequence source '{path}': {source}")]
    SourceUnreadable {
        #[source]
        source: std::io::Error,
        path: String,
    },

    /// A source directory could not be listed.
    #[error("failed to list sequence sources in '{path}': {source}")]
    SourceDiscovery {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// The result could not be written to its destination.
    #[error("failed to write result to '{destination}': {source}")]
    DestinationUnwritable {
        #[source]
        source: std::io::Error,
        destination: String,
    },

    /// The run was cancelled between two sources.
    #[error("run cancelled after {sources_folded} source(s)")]
    Cancelled { sources_folded: usize },

    /// The reducer's result was already taken; it holds nothing further.
    #[error("common k-mer result already taken after {sources_folded} source(s)")]
    ResultTaken { sources_folded: usize },
}

impl CommonmerError {
    /// Wraps an I/O error raised while reading `path`.
    pub(crate) fn unreadable(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::SourceUnreadable {
            source,
            path: path.to_string(),
        }
    }

    /// Wraps an I/O error raised while writing to `destination`.
    pub(crate) fn unwritable(destination: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::DestinationUnwritable {
            source,
            destination: destination.to_string(),
        }
    }

    /// Returns `true` if this error concerns a single source rather than the whole run.
    pub const fn is_source_error(&self) -> bool {
        matches!(self, Self::SourceUnreadable { .. })
    }
}

/// Error for invalid k-mer length.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("k-mer length {k} is out of range: must be at least 1")]
pub struct KmerLengthError {
    /// The invalid k value that was provided.
    pub k: usize,
}

impl From<KmerLengthError> for CommonmerError {
    fn from(err: KmerLengthError) -> Self {
        Self::InvalidKmerLength { k: err.k }
    }
}
