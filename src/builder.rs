//! Builder pattern API for configuring and running a common k-mer search.
//!
//! # Example
//!
//! ```rust,no_run
//! use commonmer::builder::CommonKmerFinder;
//! use commonmer::format::SequenceFormat;
//!
//! let common = CommonKmerFinder::new()
//!     .k(11)?
//!     .sequence_format(SequenceFormat::Fasta)
//!     .find(["genome_a.fna", "genome_b.fna", "genome_c.fna"])?;
//!
//! println!("{} k-mers shared by all genomes", common.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    error::{CommonmerError, KmerLengthError},
    extract::Extraction,
    format::SequenceFormat,
    input::Input,
    kmer::KmerLength,
    output::{write_result, write_to, Output, OutputFormat, WRITER_LABEL},
    progress::{Progress, ProgressCallback},
    reduce::CommonKmers,
    run::{fold_sources, UnreadablePolicy},
};

/// A builder for configuring common k-mer searches.
///
/// Each call to [`find()`](CommonKmerFinder::find) starts from a fresh
/// accumulator, so one finder can be reused across runs.
#[derive(Clone)]
pub struct CommonKmerFinder {
    k: KmerLength,
    sequence_format: SequenceFormat,
    extraction: Extraction,
    on_unreadable: UnreadablePolicy,
    progress: Option<ProgressCallback>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Default for CommonKmerFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommonKmerFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonKmerFinder")
            .field("k", &self.k)
            .field("sequence_format", &self.sequence_format)
            .field("extraction", &self.extraction)
            .field("on_unreadable", &self.on_unreadable)
            .field("progress", &self.progress.is_some())
            .field("cancel", &self.cancel)
            .finish()
    }
}

impl CommonKmerFinder {
    /// Creates a finder with default settings.
    ///
    /// Default settings:
    /// - `k`: 11
    /// - `sequence_format`: `Lines` (every line is residue data)
    /// - `extraction`: parallel over large sequences
    /// - `on_unreadable`: `Abort`
    #[must_use]
    pub fn new() -> Self {
        Self {
            k: KmerLength::default(),
            sequence_format: SequenceFormat::default(),
            extraction: Extraction::default(),
            on_unreadable: UnreadablePolicy::default(),
            progress: None,
            cancel: None,
        }
    }

    /// Sets the k-mer length.
    ///
    /// # Errors
    ///
    /// Returns [`KmerLengthError`] if `k` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use commonmer::builder::CommonKmerFinder;
    ///
    /// let finder = CommonKmerFinder::new().k(21)?;
    /// assert_eq!(finder.get_k().get(), 21);
    /// # Ok::<(), commonmer::error::KmerLengthError>(())
    /// ```
    pub fn k(mut self, k: usize) -> Result<Self, KmerLengthError> {
        self.k = KmerLength::new(k)?;
        Ok(self)
    }

    /// Sets the k-mer length from a pre-validated `KmerLength`.
    #[must_use]
    pub const fn k_validated(mut self, k: KmerLength) -> Self {
        self.k = k;
        self
    }

    /// Sets how source lines are turned into residues.
    #[must_use]
    pub const fn sequence_format(mut self, format: SequenceFormat) -> Self {
        self.sequence_format = format;
        self
    }

    /// Sets how each sequence is scanned for k-mers.
    #[must_use]
    pub const fn extraction(mut self, extraction: Extraction) -> Self {
        self.extraction = extraction;
        self
    }

    /// Sets what happens when a source cannot be read.
    #[must_use]
    pub const fn on_unreadable(mut self, policy: UnreadablePolicy) -> Self {
        self.on_unreadable = policy;
        self
    }

    /// Registers a callback invoked after each source is folded.
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Progress) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Registers a flag checked before each source; raising it cancels the run.
    #[must_use]
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Finds the k-mers common to every source, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `sources` is empty
    /// - A source cannot be read (unless the policy is `Skip`)
    /// - The cancel flag is raised
    pub fn find<I, S>(&self, sources: I) -> Result<CommonKmers, CommonmerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Input>,
    {
        let sources: Vec<Input> = sources.into_iter().map(Into::into).collect();
        self.find_inputs(&sources)
    }

    /// Like [`find()`](Self::find), for an already-built source list.
    pub fn find_inputs(&self, sources: &[Input]) -> Result<CommonKmers, CommonmerError> {
        fold_sources(self, sources)
    }

    /// Finds common k-mers and writes them to `output`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use commonmer::builder::CommonKmerFinder;
    /// use commonmer::output::{Output, OutputFormat};
    ///
    /// CommonKmerFinder::new().write(
    ///     ["genome_a.fna", "genome_b.fna"],
    ///     &Output::File("common_kmers.tsv".into()),
    ///     OutputFormat::Tsv,
    /// )?;
    /// # Ok::<(), commonmer::error::CommonmerError>(())
    /// ```
    pub fn write<I, S>(
        &self,
        sources: I,
        output: &Output,
        format: OutputFormat,
    ) -> Result<CommonKmers, CommonmerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Input>,
    {
        let common = self.find(sources)?;
        write_result(&common, output, format)?;
        Ok(common)
    }

    /// Finds common k-mers and writes them to `writer`.
    ///
    /// Write failures are reported as [`CommonmerError::DestinationUnwritable`]
    /// naming [`WRITER_LABEL`].
    pub fn write_to_writer<I, S, W>(
        &self,
        sources: I,
        writer: W,
        format: OutputFormat,
    ) -> Result<CommonKmers, CommonmerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Input>,
        W: Write,
    {
        let common = self.find(sources)?;
        write_to(&common, writer, format, WRITER_LABEL)?;
        Ok(common)
    }

    /// Returns the configured k-mer length.
    #[must_use]
    pub const fn get_k(&self) -> KmerLength {
        self.k
    }

    /// Returns the configured sequence format.
    #[must_use]
    pub const fn get_sequence_format(&self) -> SequenceFormat {
        self.sequence_format
    }

    /// Returns the configured extraction strategy.
    #[must_use]
    pub const fn get_extraction(&self) -> Extraction {
        self.extraction
    }

    /// Returns the configured unreadable-source policy.
    #[must_use]
    pub const fn get_on_unreadable(&self) -> UnreadablePolicy {
        self.on_unreadable
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    pub(crate) fn report(&self, progress: &Progress) {
        if let Some(callback) = &self.progress {
            callback(progress);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn builder_default() {
        let finder = CommonKmerFinder::new();
        assert_eq!(finder.get_k().get(), 11);
        assert_eq!(finder.get_sequence_format(), SequenceFormat::Lines);
        assert_eq!(finder.get_on_unreadable(), UnreadablePolicy::Abort);
        assert!(!finder.is_cancelled());
    }

    #[test]
    fn builder_k_invalid() {
        assert!(CommonKmerFinder::new().k(0).is_err());
        assert!(CommonKmerFinder::new().k(40).is_ok());
    }

    #[test]
    fn builder_chained() {
        let finder = CommonKmerFinder::new()
            .k(5)
            .unwrap()
            .sequence_format(SequenceFormat::Fasta)
            .extraction(Extraction::Sequential)
            .on_unreadable(UnreadablePolicy::Skip);

        assert_eq!(finder.get_k().get(), 5);
        assert!(finder.get_sequence_format().is_fasta());
        assert_eq!(finder.get_extraction(), Extraction::Sequential);
        assert_eq!(finder.get_on_unreadable(), UnreadablePolicy::Skip);
    }

    #[test]
    fn debug_hides_callback() {
        let finder = CommonKmerFinder::new().on_progress(|_| {});
        let rendered = format!("{finder:?}");
        assert!(rendered.contains("progress: true"));
    }

    #[test]
    fn report_invokes_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let finder = CommonKmerFinder::new().on_progress(move |p| {
            sink.lock().unwrap().push(p.sources_folded);
        });

        finder.report(&Progress {
            sources_folded: 3,
            ..Progress::default()
        });
        assert_eq!(*seen.lock().unwrap(), [3]);
    }

    #[test]
    fn failing_writer_is_named_in_the_error() {
        struct Rejecting;

        impl Write for Rejecting {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut source = tempfile::NamedTempFile::new().unwrap();
        source.write_all(b"AAAAAAAAAAAC\n").unwrap();

        let err = CommonKmerFinder::new()
            .write_to_writer([source.path()], Rejecting, OutputFormat::Tsv)
            .unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, CommonmerError::DestinationUnwritable { .. }));
        assert!(message.contains("<writer>"), "{message}");
        assert!(!message.contains("<stdout>"), "{message}");
    }

    #[test]
    fn find_without_sources_fails() {
        let result = CommonKmerFinder::new().find(Vec::<Input>::new());
        assert!(matches!(result, Err(CommonmerError::EmptyInputList)));
    }
}
