//! Reading delimited files into sheets and writing sheets back out.
//!
//! Output is always tab-separated: cells joined by a single tab, every row
//! terminated by a single newline.

use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

use crate::sheet::Row;
use crate::sheet::Sheet;
use crate::xlsx;

/// The extension appended to harmonized output files.
pub const OUTPUT_EXTENSION: &str = "lfted";

/// An error related to reading a sheet.
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A delimited-text error.
    Csv(csv::Error),

    /// A workbook error.
    Xlsx(xlsx::Error),

    /// The file format is not supported.
    UnsupportedFormat(PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Csv(err) => write!(f, "csv error: {err}"),
            Error::Xlsx(err) => write!(f, "xlsx error: {err}"),
            Error::UnsupportedFormat(path) => {
                write!(f, "file type not supported: {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Gets the delimiter for a file based on its extension.
///
/// # Examples
///
/// ```
/// use omiclift::tsv::delimiter_for;
///
/// assert_eq!(delimiter_for("mut/data.tsv"), Some(b'\t'));
/// assert_eq!(delimiter_for("cna/data.CSV"), Some(b','));
/// assert_eq!(delimiter_for("cna/data.xlsx"), None);
/// ```
pub fn delimiter_for(path: impl AsRef<Path>) -> Option<u8> {
    let extension = path.as_ref().extension()?.to_str()?;

    if extension.eq_ignore_ascii_case("tsv") {
        Some(b'\t')
    } else if extension.eq_ignore_ascii_case("csv") {
        Some(b',')
    } else {
        None
    }
}

/// Reads a sheet from `path`.
///
/// `.tsv` and `.csv` files are read as delimited text. For `.xlsx` files the
/// first worksheet is read. Any other extension is an
/// [`Error::UnsupportedFormat`].
pub fn read_sheet(path: impl AsRef<Path>) -> Result<Sheet> {
    let path = path.as_ref();

    if is_workbook(path) {
        return xlsx::read_first_sheet(path).map_err(Error::Xlsx);
    }

    let delimiter =
        delimiter_for(path).ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;
    let file = File::open(path).map_err(Error::Io)?;

    read_delimited(file, delimiter)
}

/// Whether a file is an `.xlsx` workbook, based on its extension.
fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}

/// Reads delimited text into a [`Sheet`].
///
/// Every non-blank line becomes a row, the first line included. Blank lines
/// are skipped, so row indices count non-blank lines only. Rows may have any
/// number of cells. Tab-separated input is split verbatim; comma-separated
/// input honors double quotes. Bytes that are not valid UTF-8 are replaced
/// with U+FFFD rather than failing the file.
///
/// # Examples
///
/// ```
/// use omiclift::sheet::Row;
/// use omiclift::tsv::read_delimited;
///
/// let data = "chromosome\tseq_start_position\n7\t1000\nX\n";
/// let sheet = read_delimited(data.as_bytes(), b'\t')?;
///
/// assert_eq!(sheet.len(), 3);
/// assert_eq!(sheet.rows()[2], Row::from(["X"]));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_delimited<R>(reader: R, delimiter: u8) -> Result<Sheet>
where
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(delimiter != b'\t')
        .delimiter(delimiter)
        .from_reader(reader);

    reader
        .byte_records()
        .map(|result| {
            result
                .map(|record| {
                    record
                        .iter()
                        .map(|cell| String::from_utf8_lossy(cell).into_owned())
                        .collect::<Row>()
                })
                .map_err(Error::Csv)
        })
        .collect()
}

/// Writes a sheet as tab-separated text.
///
/// # Examples
///
/// ```
/// use omiclift::sheet::Row;
/// use omiclift::sheet::Sheet;
/// use omiclift::tsv::write_sheet;
///
/// let sheet = Sheet::from(vec![Row::from(["chromosome", "seq_start_position"]), Row::from(["7", "1200"])]);
///
/// let mut buffer = Vec::new();
/// write_sheet(&sheet, &mut buffer)?;
///
/// assert_eq!(buffer, b"chromosome\tseq_start_position\n7\t1200\n");
///
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_sheet<W>(sheet: &Sheet, writer: W) -> io::Result<()>
where
    W: Write,
{
    let mut writer = BufWriter::new(writer);

    for row in sheet.rows() {
        writer.write_all(row.cells().join("\t").as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

/// Writes a sheet to `path`, creating parent directories as needed.
pub fn write_sheet_to_path(sheet: &Sheet, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    write_sheet(sheet, File::create(path)?)
}
