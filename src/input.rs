//! Sequence sources: files, standard input, and directory discovery.
//!
//! # Example
//!
//! ```rust
//! use commonmer::input::Input;
//! use std::path::Path;
//!
//! let input = Input::from_path(Path::new("genomes/GCA_000001.fna"));
//! assert_eq!(input.label(), "GCA_000001");
//!
//! let input = Input::from_path(Path::new("-"));
//! assert!(input.is_stdin());
//! ```

use std::path::{Path, PathBuf};

use crate::error::CommonmerError;

/// One sequence source in the ordered list a run intersects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    /// Read from a file at the specified path.
    File(PathBuf),
    /// Read from standard input.
    #[default]
    Stdin,
}

impl Input {
    /// Creates an `Input` from a path, treating "-" as standard input.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Returns `true` if this input is stdin.
    #[must_use]
    pub const fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin)
    }

    /// Returns the file path if this is a file input.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Stdin => None,
        }
    }

    /// Short name for log lines: the file name with its sequence extensions removed.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => {
                let name = path.file_name().map_or_else(
                    || path.display().to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
                let name = name.strip_suffix(".gz").unwrap_or(&name);
                match name.rsplit_once('.') {
                    Some((stem, _)) if !stem.is_empty() => stem.to_string(),
                    _ => name.to_string(),
                }
            }
            Self::Stdin => "<stdin>".to_string(),
        }
    }
}

impl From<&Path> for Input {
    fn from(path: &Path) -> Self {
        Self::from_path(path)
    }
}

impl From<&PathBuf> for Input {
    fn from(path: &PathBuf) -> Self {
        Self::from_path(path)
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Self::from_path(&path)
    }
}

impl From<&str> for Input {
    fn from(path: &str) -> Self {
        Self::from_path(Path::new(path))
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Lists the files in `dir` whose name ends in `.{extension}`, sorted by path.
///
/// Sorting fixes which genome seeds the common set, so repeated runs over the same
/// directory fold sources in the same order.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<Input>, CommonmerError> {
    let discovery_error = |source| CommonmerError::SourceDiscovery {
        source,
        path: dir.to_path_buf(),
    };
    let suffix = format!(".{}", extension.trim_start_matches('.'));

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(discovery_error)? {
        let path = entry.map_err(discovery_error)?.path();
        let matches = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(&suffix));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths.into_iter().map(Input::File).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn from_path_stdin() {
        let input = Input::from_path(Path::new("-"));
        assert!(input.is_stdin());
        assert!(input.as_path().is_none());
    }

    #[test]
    fn from_path_file() {
        let input = Input::from_path(Path::new("genome.fna"));
        assert!(!input.is_stdin());
        assert_eq!(input.as_path(), Some(Path::new("genome.fna")));
    }

    #[test]
    fn label_strips_extensions() {
        assert_eq!(Input::from("dir/GCA_1_asm.fna").label(), "GCA_1_asm");
        assert_eq!(Input::from("dir/GCA_1_asm.fna.gz").label(), "GCA_1_asm");
        assert_eq!(Input::from("plain").label(), "plain");
        assert_eq!(Input::Stdin.label(), "<stdin>");
    }

    #[test]
    fn display_file() {
        let input = Input::File(PathBuf::from("genome.fa"));
        assert_eq!(input.to_string(), "genome.fa");
        assert_eq!(Input::Stdin.to_string(), "<stdin>");
    }

    #[test]
    fn discover_sources_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.fna", "a.fna", "notes.txt", "c.fna.gz"] {
            fs::write(dir.path().join(name), "ACGT\n").unwrap();
        }
        fs::create_dir(dir.path().join("nested.fna")).unwrap();

        let found = discover_sources(dir.path(), "fna").unwrap();
        let labels: Vec<_> = found.iter().map(Input::label).collect();
        assert_eq!(labels, ["a", "b"]);
    }

    #[test]
    fn discover_sources_missing_dir() {
        let err = discover_sources(Path::new("/nonexistent/genomes"), "fna").unwrap_err();
        assert!(matches!(err, CommonmerError::SourceDiscovery { .. }));
    }
}
