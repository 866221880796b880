//! Discovery of candidate data files beneath a root directory.
//!
//! Two layouts are recognized. When `<root>/data/UPDOG` exists, each of its
//! child directories is a provider and holds the `mut`/`cna` directories.
//! Otherwise the root itself is searched for `mut`/`cna` directories.

use std::ffi::OsStr;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::kind::DataKind;
use crate::tsv::OUTPUT_EXTENSION;

/// The provider tree below the root, when present.
pub const PROVIDER_TREE: [&str; 2] = ["data", "UPDOG"];

/// File extensions considered for harmonization.
pub const CANDIDATE_EXTENSIONS: [&str; 3] = ["xlsx", "tsv", "csv"];

/// An error related to crawling.
#[derive(Debug)]
pub enum Error {
    /// The root directory does not exist.
    MissingRoot(PathBuf),

    /// An I/O error.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingRoot(path) => {
                write!(f, "root directory does not exist: {}", path.display())
            }
            Error::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A file to harmonize.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    /// The path to the file.
    path: PathBuf,

    /// The kind of data, taken from the parent directory name.
    kind: DataKind,
}

impl Candidate {
    /// Creates a new [`Candidate`].
    pub fn new(path: impl Into<PathBuf>, kind: DataKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Gets the path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the kind of data held in the file.
    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// Gets the path harmonized output is written to: the source file name
    /// with `.lfted` appended, in the same directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use omiclift::crawl::Candidate;
    /// use omiclift::DataKind;
    ///
    /// let candidate = Candidate::new("data/UPDOG/TRACE/mut/data.tsv", DataKind::Mutation);
    /// assert_eq!(
    ///     candidate.output_path(),
    ///     Path::new("data/UPDOG/TRACE/mut/data.tsv.lfted")
    /// );
    /// ```
    pub fn output_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(OUTPUT_EXTENSION);
        self.path.with_file_name(name)
    }
}

/// Finds candidate files beneath `root`, optionally restricted to one kind.
///
/// Results are sorted by path.
pub fn crawl(root: impl AsRef<Path>, filter: Option<DataKind>) -> Result<Vec<Candidate>> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(Error::MissingRoot(root.to_path_buf()));
    }

    let mut candidates = Vec::new();

    for provider in provider_directories(root)? {
        for (directory, kind) in kind_directories(&provider, filter)? {
            for path in sorted_entries(&directory)? {
                if path.is_file() && is_candidate(&path) {
                    candidates.push(Candidate::new(path, kind));
                }
            }
        }
    }

    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("found {} candidate files under {}", candidates.len(), root.display());

    Ok(candidates)
}

/// Whether a file has one of the [`CANDIDATE_EXTENSIONS`].
///
/// # Examples
///
/// ```
/// use omiclift::crawl::is_candidate;
///
/// assert!(is_candidate("mut/data.tsv"));
/// assert!(is_candidate("cna/data.XLSX"));
/// assert!(!is_candidate("mut/data.tsv.lfted"));
/// assert!(!is_candidate("mut/lift.log"));
/// ```
pub fn is_candidate(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            CANDIDATE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

/// Gets the provider directories to search.
fn provider_directories(root: &Path) -> Result<Vec<PathBuf>> {
    let tree = PROVIDER_TREE.iter().fold(root.to_path_buf(), |p, c| p.join(c));

    if !tree.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    Ok(sorted_entries(&tree)?
        .into_iter()
        .filter(|path| path.is_dir())
        .collect())
}

/// Gets the `mut`/`cna` directories directly within a provider directory.
fn kind_directories(
    provider: &Path,
    filter: Option<DataKind>,
) -> Result<Vec<(PathBuf, DataKind)>> {
    Ok(sorted_entries(provider)?
        .into_iter()
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let kind = path.file_name()?.to_str()?.parse::<DataKind>().ok()?;
            Some((path, kind))
        })
        .filter(|(_, kind)| filter.map_or(true, |wanted| wanted == *kind))
        .collect())
}

/// Lists a directory's entries in path order.
fn sorted_entries(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = std::fs::read_dir(directory)
        .map_err(Error::Io)?
        .map(|entry| entry.map(|e| e.path()).map_err(Error::Io))
        .collect::<Result<Vec<_>>>()?;

    paths.sort();
    Ok(paths)
}
