//! How a source's lines become residues.

use clap::ValueEnum;

/// Layout of a sequence source.
///
/// The default, `Lines`, treats every line as residue data: nothing is
/// recognised as a header, so callers must supply bare sequence lines. `Fasta`
/// parses records and concatenates their sequences, dropping `>` header lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SequenceFormat {
    /// Every line is residue data.
    #[default]
    Lines,
    /// FASTA records; headers are skipped and all record sequences concatenated.
    Fasta,
}

impl SequenceFormat {
    /// Returns `true` if this format parses FASTA records.
    #[must_use]
    pub const fn is_fasta(self) -> bool {
        matches!(self, Self::Fasta)
    }
}

impl std::fmt::Display for SequenceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lines => write!(f, "lines"),
            Self::Fasta => write!(f, "fasta"),
        }
    }
}
