//! The per-file defect log.
//!
//! Every row-level and file-level defect found while harmonizing a source
//! file is appended, one line each, to a log placed beside that file. The
//! log file is only created once the first line is written.

use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

/// An append-only, buffered defect log.
#[derive(Debug)]
pub struct Sidecar<W>
where
    W: Write,
{
    /// The underlying writer.
    inner: W,

    /// The number of lines recorded through this handle.
    lines: usize,
}

/// A file opened for appending on the first write.
#[derive(Debug)]
pub struct AppendFile {
    /// The path to the file.
    path: PathBuf,

    /// The file, once opened.
    file: Option<BufWriter<File>>,
}

impl AppendFile {
    /// Creates a new [`AppendFile`]. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    /// Gets the path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the open file, opening (creating if needed) it first.
    fn file(&mut self) -> io::Result<&mut BufWriter<File>> {
        let file = match self.file.take() {
            Some(file) => file,
            None => BufWriter::new(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            ),
        };

        Ok(self.file.insert(file))
    }
}

impl Write for AppendFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl Sidecar<AppendFile> {
    /// Prepares the log at `path` for appending. The file is created on the
    /// first [`record`](Sidecar::record).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(AppendFile::new(path))
    }

    /// Prepares the log named `name` in the directory holding `source`.
    pub fn beside(source: impl AsRef<Path>, name: &str) -> Self {
        Self::open(path_beside(source, name))
    }
}

impl<W> Sidecar<W>
where
    W: Write,
{
    /// Creates a [`Sidecar`] over any writer.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::harmonizer::Sidecar;
    ///
    /// let mut log = Sidecar::new(Vec::new());
    /// log.record("row 3: unrecognized assembly")?;
    ///
    /// assert_eq!(log.lines(), 1);
    /// assert_eq!(log.into_inner(), b"row 3: unrecognized assembly\n");
    ///
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn new(inner: W) -> Self {
        Self { inner, lines: 0 }
    }

    /// Appends one line.
    pub fn record(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.inner, "{message}")?;
        self.lines += 1;
        Ok(())
    }

    /// Flushes buffered lines to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Gets the number of lines recorded through this handle.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Consumes the log and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Gets the path of a file named `name` in the directory holding `source`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use omiclift::harmonizer::sidecar::path_beside;
///
/// assert_eq!(
///     path_beside("data/UPDOG/TRACE/mut/data.tsv", "lift.log"),
///     Path::new("data/UPDOG/TRACE/mut/lift.log")
/// );
/// assert_eq!(path_beside("data.tsv", "lift.log"), Path::new("lift.log"));
/// ```
pub fn path_beside(source: impl AsRef<Path>, name: &str) -> PathBuf {
    match source.as_ref().parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
