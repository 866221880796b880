//! In-memory tabular sheets.
//!
//! A [`Sheet`] is an ordered list of [`Row`]s where the first row is the
//! header. Rows may be shorter than the header; every cell access is checked.

pub mod columns;

pub use columns::Columns;

/// A single row of text cells.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Row(Vec<String>);

impl Row {
    /// Creates a new [`Row`] from its cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::sheet::Row;
    ///
    /// let row = Row::new(vec![String::from("7"), String::from("1000")]);
    /// assert_eq!(row.len(), 2);
    /// ```
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Gets the cell at `index`, if the row is long enough.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::sheet::Row;
    ///
    /// let row = Row::from(["7", "1000"]);
    /// assert_eq!(row.get(1), Some("1000"));
    /// assert_eq!(row.get(2), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Replaces the cell at `index`. Returns `false` (leaving the row
    /// untouched) if the row is too short.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// Gets the number of cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the cells.
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    /// Consumes the row and returns its cells.
    pub fn into_cells(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self(cells)
    }
}

impl<const N: usize> From<[&str; N]> for Row {
    fn from(cells: [&str; N]) -> Self {
        Self(cells.iter().map(|cell| cell.to_string()).collect())
    }
}

impl FromIterator<String> for Row {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// An ordered sequence of rows whose first row is the header.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sheet(Vec<Row>);

impl Sheet {
    /// Creates a new, empty [`Sheet`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the header row.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::sheet::Row;
    /// use omiclift::sheet::Sheet;
    ///
    /// let sheet = Sheet::from(vec![Row::from(["chromosome"]), Row::from(["7"])]);
    /// assert_eq!(sheet.header(), Some(&Row::from(["chromosome"])));
    /// assert_eq!(Sheet::new().header(), None);
    /// ```
    pub fn header(&self) -> Option<&Row> {
        self.0.first()
    }

    /// Iterates over the data rows together with their index in the sheet
    /// (the first data row has index `1`).
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::sheet::Row;
    /// use omiclift::sheet::Sheet;
    ///
    /// let sheet = Sheet::from(vec![Row::from(["chromosome"]), Row::from(["7"])]);
    /// let rows = sheet.data().collect::<Vec<_>>();
    ///
    /// assert_eq!(rows, vec![(1, &Row::from(["7"]))]);
    /// ```
    pub fn data(&self) -> impl Iterator<Item = (usize, &Row)> + '_ {
        self.0.iter().enumerate().skip(1)
    }

    /// Appends a row.
    pub fn push(&mut self, row: Row) {
        self.0.push(row);
    }

    /// Gets the number of rows, including the header.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sheet has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the sheet holds at least one row beyond the header.
    pub fn has_data(&self) -> bool {
        self.0.len() > 1
    }

    /// Gets all rows, including the header.
    pub fn rows(&self) -> &[Row] {
        &self.0
    }

    /// Consumes the sheet and returns all rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.0
    }
}

impl From<Vec<Row>> for Sheet {
    fn from(rows: Vec<Row>) -> Self {
        Self(rows)
    }
}

impl FromIterator<Row> for Sheet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_on_short_row_is_rejected() {
        let mut row = Row::from(["7", "1000"]);

        assert!(row.set(1, "1200"));
        assert!(!row.set(2, "GRCh38"));
        assert_eq!(row, Row::from(["7", "1200"]));
    }

    #[test]
    fn test_row_display() {
        assert_eq!(Row::from(["X", "500", "hg19"]).to_string(), "[X, 500, hg19]");
        assert_eq!(Row::default().to_string(), "[]");
    }

    #[test]
    fn test_header_only_sheet_has_no_data() {
        let sheet = Sheet::from(vec![Row::from(["chromosome"])]);

        assert!(!sheet.has_data());
        assert_eq!(sheet.data().count(), 0);
        assert_eq!(sheet.len(), 1);
    }
}
