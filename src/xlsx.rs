//! Reading the first worksheet of an `.xlsx` workbook into a [`Sheet`].
//!
//! Only cell text is read. Formatting, formulas and every worksheet but the
//! first are ignored. Row `n` of the worksheet becomes row `n - 1` of the
//! sheet; missing rows are filled with empty rows and missing cells with
//! empty strings.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::{self};
use std::path::Path;

use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::sheet::Row;
use crate::sheet::Sheet;

/// The workbook part.
const WORKBOOK_PART: &str = "xl/workbook.xml";

/// The workbook relationships part.
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// The shared strings part.
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// The worksheet used when the workbook does not name its sheets.
const DEFAULT_WORKSHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// An error related to reading a workbook.
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// The file is not a readable zip archive.
    Zip(ZipError),

    /// A workbook part is not well-formed XML.
    Xml(quick_xml::Error),

    /// A cell refers to a shared string that does not exist.
    MissingSharedString(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Zip(err) => write!(f, "zip error: {err}"),
            Error::Xml(err) => write!(f, "xml error: {err}"),
            Error::MissingSharedString(index) => {
                write!(f, "shared string `{index}` does not exist")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err)
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(quick_xml::Error::from(err))
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Reads the first worksheet of the workbook at `path`.
pub fn read_first_sheet(path: impl AsRef<Path>) -> Result<Sheet> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    read_first_sheet_from(BufReader::new(file))
}

/// Reads the first worksheet of a workbook.
pub fn read_first_sheet_from<R>(reader: R) -> Result<Sheet>
where
    R: Read + Seek,
{
    let mut archive = ZipArchive::new(reader).map_err(Error::Zip)?;

    let part = first_worksheet_part(&mut archive)?;
    let shared = match read_part(&mut archive, SHARED_STRINGS_PART)? {
        Some(xml) => parse_shared_strings(&xml)?,
        None => Vec::new(),
    };

    let xml = read_part(&mut archive, &part)?
        .ok_or(Error::Zip(ZipError::FileNotFound))?;

    parse_worksheet(&xml, &shared)
}

/// Reads a part of the archive as text, if it exists.
fn read_part<R>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>>
where
    R: Read + Seek,
{
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => return Err(Error::Zip(err)),
    };

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(Error::Io)?;

    Ok(Some(contents))
}

/// Gets the value of an attribute by local name.
fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes().with_checks(false) {
        let attr = attr?;

        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }

    Ok(None)
}

/// Finds the part name of the first worksheet listed in the workbook.
fn first_worksheet_part<R>(archive: &mut ZipArchive<R>) -> Result<String>
where
    R: Read + Seek,
{
    let id = match read_part(archive, WORKBOOK_PART)? {
        Some(xml) => first_sheet_relationship(&xml)?,
        None => None,
    };

    let target = match (id, read_part(archive, WORKBOOK_RELS_PART)?) {
        (Some(id), Some(xml)) => relationship_target(&xml, &id)?,
        _ => None,
    };

    Ok(match target {
        Some(target) => match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{target}"),
        },
        None => DEFAULT_WORKSHEET_PART.to_string(),
    })
}

/// Gets the relationship id of the first `<sheet>` in the workbook.
fn first_sheet_relationship(xml: &str) -> Result<Option<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                return attribute(&e, b"id");
            }
            Event::Eof => return Ok(None),
            _ => {}
        }

        buf.clear();
    }
}

/// Gets the target of the relationship with the given id.
fn relationship_target(xml: &str, id: &str) -> Result<Option<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if attribute(&e, b"Id")?.as_deref() == Some(id) {
                    return attribute(&e, b"Target");
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }

        buf.clear();
    }
}

/// Parses the shared string table. Phonetic runs are skipped.
fn parse_shared_strings(xml: &str) -> Result<Vec<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"rPh" => in_phonetic = true,
                b"t" => in_text = !in_phonetic,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(e) if in_text => {
                if let Some(current) = current.as_mut() {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.extend(current.take()),
                b"rPh" => in_phonetic = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(strings)
}

/// Converts the letters of a cell reference (`AB12`) to a 0-based column.
fn column_index(reference: &str) -> Option<usize> {
    let letters = reference
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .collect::<Vec<_>>();

    if letters.is_empty() {
        return None;
    }

    letters
        .iter()
        .try_fold(0usize, |acc, b| {
            acc.checked_mul(26)?
                .checked_add(usize::from(b.to_ascii_uppercase() - b'A') + 1)
        })
        .map(|n| n - 1)
}

/// A cell being read.
#[derive(Debug)]
struct Cell {
    /// The 0-based column.
    column: usize,

    /// The `t` attribute.
    kind: Option<String>,

    /// The text of `<v>` or of the inline string.
    value: String,
}

impl Cell {
    /// Resolves the displayed text of the cell.
    fn resolve(self, shared: &[String]) -> Result<String> {
        match self.kind.as_deref() {
            Some("s") => self
                .value
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|index| shared.get(index).cloned())
                .ok_or(Error::MissingSharedString(self.value)),
            Some("b") => Ok(match self.value.trim() {
                "1" => String::from("TRUE"),
                _ => String::from("FALSE"),
            }),
            _ => Ok(self.value),
        }
    }
}

/// Places a cell in a row, padding skipped columns.
fn place(cells: &mut Vec<String>, column: usize, value: String) {
    if cells.len() <= column {
        cells.resize(column + 1, String::new());
    }

    cells[column] = value;
}

/// Pads `rows` with empty rows up to the 1-based worksheet row `number`.
fn pad_rows(rows: &mut Vec<Row>, number: Option<usize>) {
    if let Some(number) = number {
        while rows.len() + 1 < number {
            rows.push(Row::default());
        }
    }
}

/// Parses a worksheet into a sheet.
fn parse_worksheet(xml: &str, shared: &[String]) -> Result<Sheet> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut rows = Vec::new();
    let mut cells: Option<Vec<String>> = None;
    let mut cell: Option<Cell> = None;
    let mut in_value = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"row" => {
                let number = attribute(&e, b"r")?.and_then(|r| r.trim().parse::<usize>().ok());
                pad_rows(&mut rows, number);
                cells = Some(Vec::new());
            }
            Event::Empty(e) if e.local_name().as_ref() == b"row" => {
                let number = attribute(&e, b"r")?.and_then(|r| r.trim().parse::<usize>().ok());
                pad_rows(&mut rows, number);
                rows.push(Row::default());
            }
            Event::End(e) if e.local_name().as_ref() == b"row" => {
                rows.push(Row::from(cells.take().unwrap_or_default()));
            }
            Event::Start(e) if e.local_name().as_ref() == b"c" => {
                let next = cells.as_ref().map_or(0, Vec::len);
                let column = attribute(&e, b"r")?
                    .as_deref()
                    .and_then(column_index)
                    .unwrap_or(next);

                cell = Some(Cell {
                    column,
                    kind: attribute(&e, b"t")?,
                    value: String::new(),
                });
            }
            Event::End(e) if e.local_name().as_ref() == b"c" => {
                if let (Some(cell), Some(cells)) = (cell.take(), cells.as_mut()) {
                    let column = cell.column;
                    place(cells, column, cell.resolve(shared)?);
                }
            }
            Event::Start(e) if matches!(e.local_name().as_ref(), b"v" | b"t") => {
                in_value = cell.is_some();
            }
            Event::End(e) if matches!(e.local_name().as_ref(), b"v" | b"t") => {
                in_value = false;
            }
            Event::Text(e) if in_value => {
                if let Some(cell) = cell.as_mut() {
                    cell.value.push_str(&e.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(Sheet::from(rows))
}
