//! Sequence loading: one source in, one uppercase residue string out.
//!
//! Each line has surrounding whitespace (including its terminator) removed and is
//! upper-cased before being appended, so a multi-line genome becomes a single
//! contiguous sequence. Loading does not validate the alphabet.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};

use bytes::Bytes;
use tracing::{debug, debug_span};

use crate::{error::CommonmerError, format::SequenceFormat, input::Input};

/// Check if a path has a gzip extension (.gz).
#[cfg(feature = "gzip")]
fn is_gzip_path(path: &std::path::Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Opens a source as a buffered reader, decompressing `.gz` files when the
/// `gzip` feature is enabled.
fn open(input: &Input) -> io::Result<Box<dyn BufRead>> {
    match input {
        Input::Stdin => Ok(Box::new(io::stdin().lock())),
        Input::File(path) => {
            let file = File::open(path)?;

            #[cfg(feature = "gzip")]
            if is_gzip_path(path) {
                use flate2::read::MultiGzDecoder;
                return Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))));
            }

            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Loads one source into a single uppercase residue sequence.
///
/// # Errors
///
/// Returns [`CommonmerError::SourceUnreadable`] naming the source if it cannot be
/// opened, read, or (for [`SequenceFormat::Fasta`]) parsed. Nothing is retried.
///
/// # Example
///
/// ```rust,no_run
/// use commonmer::{format::SequenceFormat, input::Input, reader::load_sequence};
///
/// let residues = load_sequence(&Input::from("genome.fna"), SequenceFormat::Lines)?;
/// println!("{} residues", residues.len());
/// # Ok::<(), commonmer::error::CommonmerError>(())
/// ```
pub fn load_sequence(input: &Input, format: SequenceFormat) -> Result<Bytes, CommonmerError> {
    let _span = debug_span!("load_sequence", source = %input, %format).entered();

    let reader = open(input).map_err(|e| CommonmerError::unreadable(input, e))?;
    let residues = match format {
        SequenceFormat::Lines => concat_lines(reader),
        SequenceFormat::Fasta => concat_records(reader),
    }
    .map_err(|e| CommonmerError::unreadable(input, e))?;

    debug!(residues = residues.len(), "Loaded sequence");
    Ok(Bytes::from(residues))
}

/// Concatenates every line of `reader`, trimmed and upper-cased.
pub(crate) fn concat_lines<R: BufRead>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut residues = Vec::new();
    let mut line = Vec::new();

    while reader.read_until(b'\n', &mut line)? > 0 {
        append_upper(&mut residues, trim_ascii_whitespace(&line));
        line.clear();
    }

    Ok(residues)
}

/// Concatenates the sequences of every FASTA record in `reader`, upper-cased.
fn concat_records<R: BufRead>(reader: R) -> io::Result<Vec<u8>> {
    let mut residues = Vec::new();

    for record in bio::io::fasta::Reader::new(reader).records() {
        let record =
            record.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        append_upper(&mut residues, trim_ascii_whitespace(record.seq()));
    }

    Ok(residues)
}

fn append_upper(residues: &mut Vec<u8>, line: &[u8]) {
    residues.extend(line.iter().map(u8::to_ascii_uppercase));
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
