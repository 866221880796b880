//! Genomic coordinates and their extraction from sheet rows.

use crate::sheet::Columns;
use crate::sheet::Row;

/// An error related to extracting [`Coordinates`] from a row.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The row has fewer cells than the coordinate columns require.
    ShortRow {
        /// The number of cells in the row.
        found: usize,

        /// The number of cells required.
        required: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ShortRow { found, required } => write!(
                f,
                "column count is less than header: expected at least {required} cells, found \
                 {found}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A position cell after parsing.
///
/// Anything other than [`Position::Value`] carries no usable coordinate and is
/// treated the same way by the harmonizer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Position {
    /// A parsed, 1-based position.
    Value(u64),

    /// The cell was empty or whitespace.
    Blank,

    /// The cell held something other than a non-negative integer.
    Invalid(String),
}

impl Position {
    /// Parses a position cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::coordinate::Position;
    ///
    /// assert_eq!(Position::parse("1000"), Position::Value(1000));
    /// assert_eq!(Position::parse("  "), Position::Blank);
    /// assert_eq!(Position::parse("12a"), Position::Invalid(String::from("12a")));
    /// ```
    pub fn parse(cell: &str) -> Self {
        let cell = cell.trim();

        if cell.is_empty() {
            return Position::Blank;
        }

        match cell.parse::<u64>() {
            Ok(value) => Position::Value(value),
            Err(_) => Position::Invalid(cell.to_string()),
        }
    }

    /// Gets the position, if one was parsed.
    pub fn value(&self) -> Option<u64> {
        match self {
            Position::Value(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Value(value) => write!(f, "{value}"),
            Position::Blank => write!(f, "<blank>"),
            Position::Invalid(value) => write!(f, "<invalid: {value}>"),
        }
    }
}

/// A closed, 1-based genomic interval.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Interval {
    /// The chromosome label.
    chromosome: String,

    /// The first position.
    start: u64,

    /// The last position.
    end: u64,
}

impl Interval {
    /// Creates a new [`Interval`].
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::coordinate::Interval;
    ///
    /// let interval = Interval::new("chr7", 1000, 2000);
    /// assert_eq!(interval.to_string(), "chr7:1000-2000");
    /// ```
    pub fn new(chromosome: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
        }
    }

    /// Gets the chromosome label.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the start position.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Gets the end position.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Consumes the interval and returns its parts.
    pub fn into_parts(self) -> (String, u64, u64) {
        (self.chromosome, self.start, self.end)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

/// The raw coordinates read from a row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Coordinates {
    /// The chromosome cell, as written.
    chromosome: String,

    /// The start position.
    start: Position,

    /// The end position.
    end: Position,
}

impl Coordinates {
    /// Extracts the coordinates of a row.
    ///
    /// For mutation data the end mirrors the start. A row too short to hold
    /// every coordinate column is an [`Error::ShortRow`].
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::config::Headers;
    /// use omiclift::coordinate::Coordinates;
    /// use omiclift::coordinate::Position;
    /// use omiclift::sheet::Columns;
    /// use omiclift::sheet::Row;
    /// use omiclift::DataKind;
    ///
    /// let header = Row::from(["chromosome", "seq_start_position", "genome_assembly"]);
    /// let columns = Columns::resolve(&header, &Headers::default(), DataKind::Mutation)?;
    ///
    /// let coordinates = Coordinates::extract(&Row::from(["X", "500", "hg19"]), &columns)?;
    /// assert_eq!(coordinates.chromosome(), "X");
    /// assert_eq!(coordinates.start(), &Position::Value(500));
    /// assert_eq!(coordinates.end(), &Position::Value(500));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn extract(row: &Row, columns: &Columns) -> Result<Self, Error> {
        let required = columns.coordinate_width();

        if row.len() < required {
            return Err(Error::ShortRow {
                found: row.len(),
                required,
            });
        }

        let cell = |index: usize| row.get(index).unwrap_or_default();

        let start = Position::parse(cell(columns.start()));
        let end = if columns.kind().has_end_column() {
            Position::parse(cell(columns.end()))
        } else {
            start.clone()
        };

        Ok(Self {
            chromosome: cell(columns.chromosome()).to_string(),
            start,
            end,
        })
    }

    /// Gets the chromosome cell.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the start position.
    pub fn start(&self) -> &Position {
        &self.start
    }

    /// Gets the end position.
    pub fn end(&self) -> &Position {
        &self.end
    }

    /// Builds an interval over the given chromosome label if both positions
    /// were parsed.
    pub fn to_interval(&self, chromosome: impl Into<String>) -> Option<Interval> {
        Some(Interval::new(
            chromosome,
            self.start.value()?,
            self.end.value()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Headers;
    use crate::DataKind;

    fn cna_columns() -> Columns {
        let header = Row::from([
            "chromosome",
            "seq_start_position",
            "seq_end_position",
            "genome_assembly",
        ]);
        Columns::resolve(&header, &Headers::default(), DataKind::CopyNumberAlteration).unwrap()
    }

    #[test]
    fn test_extract_copy_number_coordinates() -> Result<(), Box<dyn std::error::Error>> {
        let coordinates = Coordinates::extract(&Row::from(["7", "1000", "2000", "GRCh37"]), &cna_columns())?;

        assert_eq!(coordinates.start(), &Position::Value(1000));
        assert_eq!(coordinates.end(), &Position::Value(2000));
        assert_eq!(
            coordinates.to_interval("chr7"),
            Some(Interval::new("chr7", 1000, 2000))
        );

        Ok(())
    }

    #[test]
    fn test_blank_positions_have_no_interval() -> Result<(), Box<dyn std::error::Error>> {
        let coordinates = Coordinates::extract(&Row::from(["7", "", " ", "GRCh37"]), &cna_columns())?;

        assert_eq!(coordinates.start(), &Position::Blank);
        assert_eq!(coordinates.end(), &Position::Blank);
        assert_eq!(coordinates.to_interval("chr7"), None);

        Ok(())
    }

    #[test]
    fn test_unparseable_position_has_no_interval() -> Result<(), Box<dyn std::error::Error>> {
        let coordinates =
            Coordinates::extract(&Row::from(["7", "1000", "-5", "GRCh37"]), &cna_columns())?;

        assert_eq!(coordinates.end(), &Position::Invalid(String::from("-5")));
        assert_eq!(coordinates.to_interval("chr7"), None);

        Ok(())
    }

    #[test]
    fn test_empty_chromosome_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let coordinates = Coordinates::extract(&Row::from(["", "1", "2", "GRCh37"]), &cna_columns())?;
        assert_eq!(coordinates.chromosome(), "");
        Ok(())
    }

    #[test]
    fn test_short_row() {
        let err = Coordinates::extract(&Row::from(["7", "1000"]), &cna_columns()).unwrap_err();

        assert_eq!(
            err,
            Error::ShortRow {
                found: 2,
                required: 3
            }
        );
    }
}
