//! The kinds of variant data that can be harmonized.

use std::str::FromStr;

/// An error related to parsing a [`DataKind`].
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The value names no known data kind.
    Unknown(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Unknown(value) => write!(
                f,
                "unknown data kind: expected \"mut\" or \"cna\", found \"{value}\""
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// The kind of records held by a sheet.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DataKind {
    /// Point mutations: a single position column serves as start and end.
    Mutation,

    /// Copy-number alterations: distinct start and end columns.
    CopyNumberAlteration,
}

impl DataKind {
    /// The directory name under which providers store this kind of data.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::DataKind;
    ///
    /// assert_eq!(DataKind::Mutation.directory_name(), "mut");
    /// assert_eq!(DataKind::CopyNumberAlteration.directory_name(), "cna");
    /// ```
    pub fn directory_name(&self) -> &'static str {
        match self {
            DataKind::Mutation => "mut",
            DataKind::CopyNumberAlteration => "cna",
        }
    }

    /// Whether records of this kind carry a dedicated end column.
    pub fn has_end_column(&self) -> bool {
        matches!(self, DataKind::CopyNumberAlteration)
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataKind::Mutation => write!(f, "mutation"),
            DataKind::CopyNumberAlteration => write!(f, "copy number alteration"),
        }
    }
}

impl FromStr for DataKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("mut") {
            Ok(DataKind::Mutation)
        } else if s.eq_ignore_ascii_case("cna") {
            Ok(DataKind::CopyNumberAlteration)
        } else {
            Err(ParseError::Unknown(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("mut".parse::<DataKind>()?, DataKind::Mutation);
        assert_eq!("MUT".parse::<DataKind>()?, DataKind::Mutation);
        assert_eq!("Cna".parse::<DataKind>()?, DataKind::CopyNumberAlteration);

        let err = "cnv".parse::<DataKind>().unwrap_err();
        assert_eq!(err, ParseError::Unknown(String::from("cnv")));
        assert_eq!(
            err.to_string(),
            "unknown data kind: expected \"mut\" or \"cna\", found \"cnv\""
        );

        Ok(())
    }
}
