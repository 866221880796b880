//! Classification of free-text genome assembly labels.

use std::sync::LazyLock;

use regex::Regex;

/// Labels naming the legacy assembly (GRCh37/hg19).
static LEGACY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(grch|hg)?(37|19)(\.p[0-9]+)?$").unwrap());

/// Labels naming the target assembly (GRCh38/hg38).
static TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(grch|hg)?38(\.p[0-9]+)?$").unwrap());

/// The assembly a row declares itself to be in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Assembly {
    /// The legacy assembly; the row must be lifted.
    Legacy,

    /// The target assembly; the row passes through unchanged.
    Target,

    /// Anything else, including an empty or absent cell.
    Unrecognized,
}

impl Assembly {
    /// Classifies an assembly cell.
    ///
    /// Matching ignores surrounding whitespace and case. `None` stands for a
    /// row too short to hold the assembly column.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::assembly::Assembly;
    ///
    /// assert_eq!(Assembly::classify(Some("GRCh37")), Assembly::Legacy);
    /// assert_eq!(Assembly::classify(Some(" hg38 ")), Assembly::Target);
    /// assert_eq!(Assembly::classify(Some("hg18")), Assembly::Unrecognized);
    /// assert_eq!(Assembly::classify(None), Assembly::Unrecognized);
    /// ```
    pub fn classify(cell: Option<&str>) -> Self {
        let value = match cell {
            Some(value) => value.trim(),
            None => return Assembly::Unrecognized,
        };

        if LEGACY.is_match(value) {
            Assembly::Legacy
        } else if TARGET.is_match(value) {
            Assembly::Target
        } else {
            Assembly::Unrecognized
        }
    }

    /// Whether the label was matched to a known assembly.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Assembly::Unrecognized)
    }
}

impl std::fmt::Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assembly::Legacy => write!(f, "legacy"),
            Assembly::Target => write!(f, "target"),
            Assembly::Unrecognized => write!(f, "unrecognized"),
        }
    }
}
