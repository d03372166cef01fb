//! The common k-mer pipeline.
//!
//! Sources are processed strictly in order, one at a time: load, extract, fold.
//! Only the current source's counts and the shrinking accumulator are alive at
//! once, and the loop stops reading as soon as the common set is empty.

use std::{fmt::Debug, path::Path};

use tracing::{debug_span, info, warn};

use crate::{
    builder::CommonKmerFinder,
    config::Config,
    error::CommonmerError,
    input::Input,
    kmer::KmerLength,
    output::write_result,
    progress::Progress,
    reader::load_sequence,
    reduce::{CommonKmers, Reducer, ReducerState},
};

/// What to do when a listed source cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnreadablePolicy {
    /// Fail the whole run with the source's error.
    #[default]
    Abort,
    /// Log the failure and continue with the next source.
    Skip,
}

/// Finds the k-mers of width `k` shared by every file in `paths`.
///
/// # Errors
///
/// Returns an error if:
/// - `k` is zero
/// - `paths` is empty
/// - Any file cannot be read
///
/// # Example
///
/// ```rust,no_run
/// use commonmer::run::find_common_kmers;
///
/// let common = find_common_kmers(["genome_a.fna", "genome_b.fna"], 11)?;
/// for (kmer, frequency) in common.iter().take(10) {
///     println!("{}\t{frequency}", String::from_utf8_lossy(kmer));
/// }
/// # Ok::<(), commonmer::error::CommonmerError>(())
/// ```
pub fn find_common_kmers<I, P>(paths: I, k: usize) -> Result<CommonKmers, CommonmerError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path> + Debug,
{
    let k = KmerLength::new(k)?;
    let sources: Vec<Input> = paths
        .into_iter()
        .map(|path| Input::from_path(path.as_ref()))
        .collect();

    CommonKmerFinder::new().k_validated(k).find_inputs(&sources)
}

/// Runs a configured search and writes the result to its destination.
///
/// # Errors
///
/// Returns `CommonmerError` on read, cancellation, or write failures.
pub fn run(config: &Config) -> Result<CommonKmers, CommonmerError> {
    let common = config.finder().find_inputs(&config.sources)?;
    write_result(&common, &config.output, config.format)?;
    Ok(common)
}

/// Folds `sources` in order into a [`Reducer`], stopping early on exhaustion.
pub(crate) fn fold_sources(
    finder: &CommonKmerFinder,
    sources: &[Input],
) -> Result<CommonKmers, CommonmerError> {
    if sources.is_empty() {
        return Err(CommonmerError::EmptyInputList);
    }

    let k = finder.get_k();
    info!(k = k.get(), sources = sources.len(), "Starting common k-mer search");

    let mut reducer = Reducer::new();
    let mut progress = Progress {
        sources_total: sources.len(),
        ..Progress::default()
    };

    for (position, input) in sources.iter().enumerate() {
        if finder.is_cancelled() {
            warn!(sources_folded = reducer.sources_folded(), "Run cancelled");
            return Err(CommonmerError::Cancelled {
                sources_folded: reducer.sources_folded(),
            });
        }

        let label = input.label();
        let residues = match load_sequence(input, finder.get_sequence_format()) {
            Ok(residues) => residues,
            Err(err)
                if err.is_source_error()
                    && finder.get_on_unreadable() == UnreadablePolicy::Skip =>
            {
                warn!(source = %input, error = %err, "Skipping unreadable source");
                continue;
            }
            Err(err) => return Err(err),
        };

        let counts = {
            let _span =
                debug_span!("extract_kmers", source = %label, residues = residues.len()).entered();
            finder.get_extraction().count(&residues, k)
        };
        let distinct = counts.len();
        progress.bases_processed += residues.len() as u64;
        drop(residues);

        let state = reducer.fold(counts);
        progress.sources_folded = reducer.sources_folded();
        progress.common_kmers = reducer.common_len();

        info!(
            source = %label,
            position = position + 1,
            distinct_kmers = distinct,
            common_kmers = progress.common_kmers,
            "Folded source"
        );
        finder.report(&progress);

        if state == ReducerState::Exhausted {
            warn!(
                skipped_sources = sources.len() - position - 1,
                "No common k-mers remain; stopping early"
            );
            break;
        }
    }

    let common = reducer.finish()?;
    info!(
        common_kmers = common.len(),
        sources_folded = common.sources_folded(),
        "Common k-mer search complete"
    );
    Ok(common)
}
