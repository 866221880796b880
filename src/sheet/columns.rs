//! Resolution of the coordinate and assembly columns from a header row.

use crate::config::Headers;
use crate::sheet::Row;
use crate::DataKind;

/// An error related to resolving [`Columns`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// One or more mandatory columns are absent from the header.
    Missing(Vec<String>),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Missing(names) => {
                write!(f, "missing mandatory column(s): {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for Error {}

/// Finds the first header cell matching `name`, ignoring case.
///
/// # Examples
///
/// ```
/// use omiclift::sheet::columns::find;
/// use omiclift::sheet::Row;
///
/// let header = Row::from(["Chromosome", "seq_start_position"]);
/// assert_eq!(find(&header, "chromosome"), Some(0));
/// assert_eq!(find(&header, "genome_assembly"), None);
/// ```
pub fn find(header: &Row, name: &str) -> Option<usize> {
    header
        .cells()
        .iter()
        .position(|cell| cell.eq_ignore_ascii_case(name))
}

/// The column indices needed to harmonize a sheet, resolved once per sheet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Columns {
    /// The chromosome column.
    chromosome: usize,

    /// The start position column.
    start: usize,

    /// The end position column. For mutation data this is the start column.
    end: usize,

    /// The assembly column.
    assembly: usize,

    /// The data kind the columns were resolved for.
    kind: DataKind,
}

impl Columns {
    /// Resolves the columns for `kind` against a header row.
    ///
    /// The chromosome, start, and assembly columns are always mandatory; the
    /// end column is mandatory for copy-number data only.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::config::Headers;
    /// use omiclift::sheet::Columns;
    /// use omiclift::sheet::Row;
    /// use omiclift::DataKind;
    ///
    /// let header = Row::from(["chromosome", "seq_start_position", "genome_assembly"]);
    /// let columns = Columns::resolve(&header, &Headers::default(), DataKind::Mutation)?;
    ///
    /// assert_eq!(columns.start(), 1);
    /// assert_eq!(columns.end(), 1);
    /// assert_eq!(columns.assembly(), 2);
    ///
    /// let err = Columns::resolve(&header, &Headers::default(), DataKind::CopyNumberAlteration)
    ///     .unwrap_err();
    /// assert_eq!(err.to_string(), "missing mandatory column(s): seq_end_position");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn resolve(header: &Row, headers: &Headers, kind: DataKind) -> Result<Self, Error> {
        let chromosome = find(header, &headers.chromosome);
        let start = find(header, &headers.start);
        let assembly = find(header, &headers.assembly);
        let end = match kind {
            DataKind::CopyNumberAlteration => find(header, &headers.end),
            DataKind::Mutation => start,
        };

        match (chromosome, start, end, assembly) {
            (Some(chromosome), Some(start), Some(end), Some(assembly)) => Ok(Self {
                chromosome,
                start,
                end,
                assembly,
                kind,
            }),
            _ => {
                let mut missing = Vec::new();

                if chromosome.is_none() {
                    missing.push(headers.chromosome.clone());
                }

                if start.is_none() {
                    missing.push(headers.start.clone());
                }

                if kind.has_end_column() && end.is_none() {
                    missing.push(headers.end.clone());
                }

                if assembly.is_none() {
                    missing.push(headers.assembly.clone());
                }

                Err(Error::Missing(missing))
            }
        }
    }

    /// Gets the chromosome column index.
    pub fn chromosome(&self) -> usize {
        self.chromosome
    }

    /// Gets the start position column index.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Gets the end position column index.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Gets the assembly column index.
    pub fn assembly(&self) -> usize {
        self.assembly
    }

    /// Gets the data kind.
    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// The number of cells a row needs to hold every coordinate column.
    pub fn coordinate_width(&self) -> usize {
        self.chromosome.max(self.start).max(self.end) + 1
    }
}
