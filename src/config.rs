//! Turning command-line arguments into a validated run description.

use crate::{
    builder::CommonKmerFinder,
    cli::Args,
    error::CommonmerError,
    extract::Extraction,
    format::SequenceFormat,
    input::{discover_sources, Input},
    kmer::KmerLength,
    output::{Output, OutputFormat},
    run::UnreadablePolicy,
};

/// Everything a run needs, resolved from [`Args`].
#[derive(Debug, Clone)]
pub struct Config {
    pub k: KmerLength,
    pub sources: Vec<Input>,
    pub output: Output,
    pub format: OutputFormat,
    pub sequence_format: SequenceFormat,
    pub on_unreadable: UnreadablePolicy,
    pub extraction: Extraction,
}

impl Config {
    /// Validates `args` and resolves the ordered source list.
    ///
    /// Sources named on the command line come first, followed by the files
    /// discovered under `--dir` in sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error if `k` is invalid, the directory cannot be listed, or no
    /// sources remain.
    pub fn new(args: &Args) -> Result<Self, CommonmerError> {
        let k = KmerLength::new(args.k)?;

        let mut sources: Vec<Input> = args.sources.iter().map(Input::from).collect();
        if let Some(dir) = &args.dir {
            sources.extend(discover_sources(dir, &args.extension)?);
        }
        if sources.is_empty() {
            return Err(CommonmerError::EmptyInputList);
        }

        Ok(Self {
            k,
            sources,
            output: Output::from_option(args.output.as_deref()),
            format: args.format,
            sequence_format: args.input_format,
            on_unreadable: if args.skip_unreadable {
                UnreadablePolicy::Skip
            } else {
                UnreadablePolicy::Abort
            },
            extraction: if args.sequential {
                Extraction::Sequential
            } else {
                Extraction::default()
            },
        })
    }

    /// Builds a [`CommonKmerFinder`] with this configuration.
    pub fn finder(&self) -> CommonKmerFinder {
        CommonKmerFinder::new()
            .k_validated(self.k)
            .sequence_format(self.sequence_format)
            .extraction(self.extraction)
            .on_unreadable(self.on_unreadable)
    }
}
