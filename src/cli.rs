//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

use crate::{format::SequenceFormat, kmer::KmerLength, output::OutputFormat};

/// Find the k-mers shared by every genome, with their summed frequencies.
///
/// Sources are folded in the order given; the run stops early as soon as no
/// k-mer is common to every source read so far.
#[derive(Parser, Debug)]
#[command(name = "commonmer")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Sequence files, in processing order ("-" reads stdin)
    pub sources: Vec<PathBuf>,

    /// K-mer length (at least 1)
    #[arg(
        short = 'k',
        long = "kmer-length",
        value_parser = parse_k,
        default_value_t = KmerLength::DEFAULT
    )]
    pub k: usize,

    /// Also use every file in this directory with the given extension, in sorted order
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// File extension selected by --dir
    #[arg(short, long, default_value = "fna", requires = "dir")]
    pub extension: String,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,

    /// How source lines become residues
    #[arg(long, value_enum, default_value_t = SequenceFormat::Lines)]
    pub input_format: SequenceFormat,

    /// Skip sources that cannot be read instead of aborting
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Scan each sequence on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    KmerLength::new(k)
        .map(KmerLength::get)
        .map_err(|e| e.to_string())
}
