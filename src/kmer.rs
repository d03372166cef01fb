//! K-mer width and the byte-level rules for what counts as a k-mer.
//!
//! K-mers are kept as their literal residue bytes: no 2-bit packing and no
//! canonicalization. Ambiguity codes other than `N` are ordinary residues, so
//! `ACGTRYACGTA` is a valid 11-mer while anything containing `N` is not.

use crate::error::KmerLengthError;

/// The residue that disqualifies any window containing it.
pub const AMBIGUOUS: u8 = b'N';

/// Returns `true` if a k-mer window containing `byte` must be excluded.
#[inline]
pub const fn is_ambiguous(byte: u8) -> bool {
    byte == AMBIGUOUS
}

/// A validated k-mer length (`k >= 1`).
///
/// # Example
///
/// ```rust
/// use commonmer::kmer::KmerLength;
///
/// let k = KmerLength::new(11)?;
/// assert_eq!(k.get(), 11);
/// assert_eq!(KmerLength::default(), k);
/// assert!(KmerLength::new(0).is_err());
/// # Ok::<(), commonmer::error::KmerLengthError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KmerLength(usize);

impl KmerLength {
    /// Minimum valid k-mer length.
    pub const MIN: usize = 1;

    /// K-mer length used when none is given.
    pub const DEFAULT: usize = 11;

    /// Creates a new `KmerLength`, rejecting zero.
    pub const fn new(k: usize) -> Result<Self, KmerLengthError> {
        if k < Self::MIN {
            return Err(KmerLengthError { k });
        }
        Ok(Self(k))
    }

    /// Returns the k-mer length as a `usize`.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Number of windows of this width in a sequence of `len` residues.
    #[inline]
    pub const fn windows_in(self, len: usize) -> usize {
        (len + 1).saturating_sub(self.0)
    }
}

impl Default for KmerLength {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for KmerLength {
    type Error = KmerLengthError;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

impl std::fmt::Display for KmerLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
