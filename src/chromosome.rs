//! Chromosome name normalization.
//!
//! Providers spell chromosomes inconsistently (`7`, `chr7`, `CHR7`, `MT`,
//! `chrMT`, and so on). Two conventions matter to this crate:
//!
//! - The **mapper form** (`chr1`..`chr22`, `chrX`, `chrY`, `chrM`) is what the
//!   [interval mapper](crate::liftover::IntervalMapper) expects.
//! - The **display form** (`1`..`22`, `X`, `Y`, `M`) is what is written back
//!   into harmonized sheets.

use std::sync::LazyLock;

use regex::Regex;

/// The prefix used by the mapper form.
pub const PREFIX: &str = "chr";

/// The mapper form of the mitochondrial chromosome.
pub const MITOCHONDRIAL: &str = "chrM";

/// Labels already in mapper form (ignoring case).
static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^chr([0-9]{1,2}|[XYM])$").unwrap());

/// Mitochondrial spellings that are not already canonical.
static MITO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(chr)?mt$").unwrap());

/// Numeric encodings of the sex chromosomes used by some legacy providers.
static NUMERIC_SEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(chr)?(23|24)$").unwrap());

/// Normalizes chromosome labels into the mapper and display conventions.
///
/// # Examples
///
/// ```
/// use omiclift::chromosome::Normalizer;
///
/// let normalizer = Normalizer::default();
/// assert_eq!(normalizer.to_mapper_form("7"), "chr7");
/// assert_eq!(normalizer.to_mapper_form(" CHRx "), "chrX");
/// assert_eq!(normalizer.to_mapper_form("MT"), "chrM");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Normalizer {
    /// Whether `23` and `24` are read as `X` and `Y`.
    numeric_sex_chromosomes: bool,
}

impl Normalizer {
    /// Creates a new [`Normalizer`].
    ///
    /// When `numeric_sex_chromosomes` is set, the labels `23` and `24` (with
    /// or without a `chr` prefix) are translated to `chrX` and `chrY`.
    /// Otherwise they are forwarded like any other number.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::chromosome::Normalizer;
    ///
    /// assert_eq!(Normalizer::new(true).to_mapper_form("23"), "chrX");
    /// assert_eq!(Normalizer::new(true).to_mapper_form("chr24"), "chrY");
    /// assert_eq!(Normalizer::new(false).to_mapper_form("23"), "chr23");
    /// ```
    pub fn new(numeric_sex_chromosomes: bool) -> Self {
        Self {
            numeric_sex_chromosomes,
        }
    }

    /// Converts a label to the mapper form.
    ///
    /// This never fails: a label that cannot name a chromosome is still
    /// rewritten as `chr<LABEL>` and left for the mapper to reject.
    pub fn to_mapper_form(&self, label: &str) -> String {
        let label = label.trim();

        if CANONICAL.is_match(label) {
            return with_prefix(strip_prefix(label));
        }

        if MITO.is_match(label) {
            return MITOCHONDRIAL.to_string();
        }

        if self.numeric_sex_chromosomes {
            if let Some(groups) = NUMERIC_SEX.captures(label) {
                return match &groups[2] {
                    "23" => with_prefix("X"),
                    _ => with_prefix("Y"),
                };
            }
        }

        with_prefix(strip_prefix(label))
    }
}

/// Converts a label to the display form: uppercased, without a leading `chr`.
///
/// # Examples
///
/// ```
/// use omiclift::chromosome::to_display_form;
///
/// assert_eq!(to_display_form("chr7"), "7");
/// assert_eq!(to_display_form("chrx"), "X");
/// assert_eq!(to_display_form("MT"), "MT");
/// ```
pub fn to_display_form(label: &str) -> String {
    strip_prefix(label.trim()).to_uppercase()
}

/// Removes a leading `chr` (any case) from a label.
fn strip_prefix(label: &str) -> &str {
    match label.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => &label[PREFIX.len()..],
        _ => label,
    }
}

/// Prepends the lowercase `chr` prefix to an uppercased label.
fn with_prefix(label: &str) -> String {
    format!("{PREFIX}{}", label.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapper_form_of_canonical_labels() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.to_mapper_form("chr7"), "chr7");
        assert_eq!(normalizer.to_mapper_form("CHR7"), "chr7");
        assert_eq!(normalizer.to_mapper_form("chrm"), "chrM");
        assert_eq!(normalizer.to_mapper_form("Chr22"), "chr22");
    }

    #[test]
    fn test_mapper_form_of_bare_labels() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.to_mapper_form("1"), "chr1");
        assert_eq!(normalizer.to_mapper_form("x"), "chrX");
        assert_eq!(normalizer.to_mapper_form(" y\t"), "chrY");
    }

    #[test]
    fn test_mapper_form_of_mitochondrial_labels() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.to_mapper_form("MT"), "chrM");
        assert_eq!(normalizer.to_mapper_form("mt"), "chrM");
        assert_eq!(normalizer.to_mapper_form("chrMT"), "chrM");
        assert_eq!(normalizer.to_mapper_form("M"), "chrM");
    }

    #[test]
    fn test_mapper_form_of_malformed_labels() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.to_mapper_form(""), "chr");
        assert_eq!(normalizer.to_mapper_form("gl000192.1"), "chrGL000192.1");
        assert_eq!(normalizer.to_mapper_form("ch"), "chrCH");
    }

    #[test]
    fn test_display_form() {
        assert_eq!(to_display_form("chr7"), "7");
        assert_eq!(to_display_form("CHR7"), "7");
        assert_eq!(to_display_form("chrM"), "M");
        assert_eq!(to_display_form("x"), "X");
        assert_eq!(to_display_form("ch"), "CH");
    }

    #[test]
    fn test_round_trip_matches_display_canonicalization() {
        let normalizer = Normalizer::default();
        let mut labels = (1..=22).map(|n| n.to_string()).collect::<Vec<_>>();
        labels.extend(["X", "Y", "chrM", "chr7", "CHR7", "x", "y"].map(String::from));

        for label in labels {
            let lower = label.to_lowercase();
            let expected = to_display_form(&label);

            assert_eq!(to_display_form(&normalizer.to_mapper_form(&label)), expected);
            assert_eq!(to_display_form(&normalizer.to_mapper_form(&lower)), expected);
        }

        // Mitochondrial spellings collapse onto `M`.
        assert_eq!(to_display_form(&normalizer.to_mapper_form("MT")), "M");
        assert_eq!(to_display_form(&normalizer.to_mapper_form("chrmt")), "M");
    }
}
