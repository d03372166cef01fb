//! Writing the result of a run.
//!
//! The TSV rendering is the external contract: a `kmer\tfrequency` header, then
//! one line per common k-mer in ascending lexicographic order. Values are
//! written exactly as summed.

use std::{
    borrow::Cow,
    fs::File,
    io::{self, stdout, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use crate::{error::CommonmerError, reduce::CommonKmers};

/// Header line of the TSV rendering.
pub const TSV_HEADER: &str = "kmer\tfrequency";

/// Output format for common k-mers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Tab-separated values with a `kmer\tfrequency` header
    #[default]
    Tsv,
    /// JSON array of `{"kmer", "frequency"}` objects
    Json,
}

/// Where the result is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Output {
    /// Write to standard output.
    #[default]
    Stdout,
    /// Create (or truncate) the file at this path.
    File(PathBuf),
}

impl Output {
    /// Creates an `Output` from an optional path; `None` and "-" mean stdout.
    #[must_use]
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path.as_os_str() != "-" => Self::File(path.to_path_buf()),
            _ => Self::Stdout,
        }
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "<stdout>"),
        }
    }
}

/// A common k-mer with its frequency, used for JSON serialization.
#[derive(Serialize)]
struct KmerFrequency<'a> {
    kmer: Cow<'a, str>,
    frequency: u64,
}

/// Writes `common` as TSV: header, then `kmer\tfrequency` lines.
///
/// # Example
///
/// ```rust
/// use commonmer::extract::count_kmers;
/// use commonmer::kmer::KmerLength;
/// use commonmer::output::write_tsv;
/// use commonmer::reduce::intersect_counts;
///
/// let k = KmerLength::new(11)?;
/// let common = intersect_counts([
///     count_kmers(b"AAAAAAAAAAAC", k),
///     count_kmers(b"AAAAAAAAAAAG", k),
/// ])?;
///
/// let mut out = Vec::new();
/// write_tsv(&common, &mut out)?;
/// assert_eq!(out, b"kmer\tfrequency\nAAAAAAAAAAA\t2\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_tsv<W: Write>(common: &CommonKmers, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{TSV_HEADER}")?;
    for (kmer, frequency) in common.iter() {
        writer.write_all(kmer)?;
        writeln!(writer, "\t{frequency}")?;
    }
    writer.flush()
}

/// Writes `common` as a pretty-printed JSON array.
pub fn write_json<W: Write>(common: &CommonKmers, mut writer: W) -> io::Result<()> {
    let records: Vec<KmerFrequency<'_>> = common
        .iter()
        .map(|(kmer, frequency)| KmerFrequency {
            kmer: String::from_utf8_lossy(kmer),
            frequency,
        })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    writer.flush()
}

/// Label reported for failures of a caller-supplied writer.
pub const WRITER_LABEL: &str = "<writer>";

/// Writes `common` to `writer` in `format`; failures are reported against `destination`.
pub fn write_to<W: Write>(
    common: &CommonKmers,
    writer: W,
    format: OutputFormat,
    destination: impl std::fmt::Display,
) -> Result<(), CommonmerError> {
    match format {
        OutputFormat::Tsv => write_tsv(common, writer),
        OutputFormat::Json => write_json(common, writer),
    }
    .map_err(|e| CommonmerError::unwritable(destination, e))
}

/// Writes `common` to `output`, creating the destination file if needed.
///
/// # Errors
///
/// Returns [`CommonmerError::DestinationUnwritable`] if the destination cannot be
/// created or written.
pub fn write_result(
    common: &CommonKmers,
    output: &Output,
    format: OutputFormat,
) -> Result<(), CommonmerError> {
    match output {
        Output::Stdout => {
            write_to(common, BufWriter::new(stdout().lock()), format, output)?;
        }
        Output::File(path) => {
            let file = File::create(path).map_err(|e| CommonmerError::unwritable(output, e))?;
            write_to(common, BufWriter::new(file), format, output)?;
        }
    }

    info!(
        destination = %output,
        %format,
        kmers = common.len(),
        "Wrote common k-mers"
    );
    Ok(())
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tsv => write!(f, "tsv"),
            Self::Json => write!(f, "json"),
        }
    }
}
