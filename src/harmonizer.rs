//! Harmonizing sheets onto the target assembly.
//!
//! A [`Harmonizer`] takes a parsed [`Sheet`] and produces a new sheet that
//! keeps the header and, for every data row:
//!
//! - passes rows already on the target assembly through unchanged,
//! - lifts rows on the legacy assembly, rewriting their chromosome,
//!   positions, and assembly label, and
//! - drops rows that cannot be classified or lifted, recording one line per
//!   dropped row in the [`Sidecar`].
//!
//! A run of unrecognized rows long enough to trip the [`CircuitBreaker`]
//! stops the file early. Rows harmonized before that point are kept.

use std::io::Write;
use std::io::{self};
use std::path::Path;

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::assembly::Assembly;
use crate::breaker::CircuitBreaker;
use crate::chromosome;
use crate::chromosome::Normalizer;
use crate::coordinate;
use crate::coordinate::Coordinates;
use crate::coordinate::Interval;
use crate::coordinate::Position;
use crate::liftover::IntervalMapper;
use crate::liftover::LiftResult;
use crate::sheet::columns;
use crate::sheet::Columns;
use crate::sheet::Row;
use crate::sheet::Sheet;
use crate::Config;
use crate::DataKind;

pub mod sidecar;

pub use sidecar::Sidecar;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error that aborts the harmonization of a whole file.
#[derive(Debug)]
pub enum Error {
    /// The sheet has no rows, not even a header.
    EmptySheet,

    /// Mandatory columns are missing from the header.
    Columns(columns::Error),

    /// The defect log could not be written.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptySheet => write!(f, "sheet is empty"),
            Error::Columns(err) => write!(f, "headers not found: {err}"),
            Error::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A reason a single row was left out of the output.
#[derive(Debug, Eq, PartialEq)]
enum Defect {
    /// The assembly cell was absent or not recognized.
    UnrecognizedAssembly(Option<String>),

    /// The row is too short to hold the coordinate columns.
    Extraction(coordinate::Error),

    /// A position was blank or unparseable.
    MissingPosition(Position, Position),

    /// The mapper found no mapping.
    Unmapped(Interval),

    /// The mapper failed.
    Mapper(Interval, String),
}

impl std::fmt::Display for Defect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Defect::UnrecognizedAssembly(Some(cell)) => {
                write!(f, "unrecognized genome assembly \"{cell}\"")
            }
            Defect::UnrecognizedAssembly(None) => write!(f, "genome assembly cell is missing"),
            Defect::Extraction(err) => write!(f, "{err}"),
            Defect::MissingPosition(start, end) => {
                write!(f, "start or end position missing (start {start}, end {end})")
            }
            Defect::Unmapped(interval) => {
                write!(f, "genomic coordinates not lifted for {interval}")
            }
            Defect::Mapper(interval, err) => {
                write!(f, "genomic coordinates not lifted for {interval}: {err}")
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Summary
////////////////////////////////////////////////////////////////////////////////////////

/// Counters describing one harmonized file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// Legacy rows lifted onto the target assembly.
    pub lifted: usize,

    /// Target rows passed through unchanged.
    pub passed_through: usize,

    /// Legacy rows that could not be lifted.
    pub rejected: usize,

    /// Rows whose assembly was not recognized.
    pub unrecognized: usize,

    /// Whether the circuit breaker stopped the file early.
    pub tripped: bool,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} lifted, {} passed through, {} rejected, {} unrecognized",
            self.lifted, self.passed_through, self.rejected, self.unrecognized
        )?;

        if self.tripped {
            write!(f, " (stopped early)")?;
        }

        Ok(())
    }
}

/// The result of harmonizing one file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Harmonized {
    /// The output sheet, starting with the source header.
    sheet: Sheet,

    /// The counters.
    summary: Summary,
}

impl Harmonized {
    /// Gets the output sheet.
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Gets the counters.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Consumes self and returns the output sheet.
    pub fn into_sheet(self) -> Sheet {
        self.sheet
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Harmonizer
////////////////////////////////////////////////////////////////////////////////////////

/// Harmonizes sheets through an [`IntervalMapper`].
///
/// # Examples
///
/// ```
/// use omiclift::coordinate::Interval;
/// use omiclift::harmonizer::Sidecar;
/// use omiclift::liftover::LiftResult;
/// use omiclift::sheet::Row;
/// use omiclift::sheet::Sheet;
/// use omiclift::DataKind;
/// use omiclift::Harmonizer;
///
/// let mapper = |interval: &Interval| {
///     LiftResult::Mapped(Interval::new("chr7", interval.start() + 200, interval.end() + 200))
/// };
///
/// let sheet = Sheet::from(vec![
///     Row::from(["chromosome", "seq_start_position", "seq_end_position", "genome_assembly"]),
///     Row::from(["7", "1000", "2000", "GRCh37"]),
/// ]);
///
/// let mut log = Sidecar::new(Vec::new());
/// let harmonized = Harmonizer::new(&mapper)
///     .harmonize(&sheet, DataKind::CopyNumberAlteration, &mut log)?;
///
/// assert_eq!(harmonized.sheet().rows()[1], Row::from(["7", "1200", "2200", "GRCh38"]));
/// assert_eq!(log.lines(), 0);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Harmonizer<'a, M> {
    /// The interval mapper.
    mapper: &'a M,

    /// The settings.
    config: Config,

    /// The chromosome normalizer.
    normalizer: Normalizer,
}

impl<'a, M> Harmonizer<'a, M>
where
    M: IntervalMapper,
{
    /// Creates a [`Harmonizer`] with the default [`Config`].
    pub fn new(mapper: &'a M) -> Self {
        Self::with_config(mapper, Config::default())
    }

    /// Creates a [`Harmonizer`] with the given [`Config`].
    pub fn with_config(mapper: &'a M, config: Config) -> Self {
        let normalizer = Normalizer::new(config.numeric_sex_chromosomes());

        Self {
            mapper,
            config,
            normalizer,
        }
    }

    /// Gets the settings.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Harmonizes the sheet parsed from `source`, appending defects to the
    /// sidecar log beside it.
    pub fn harmonize_file(
        &self,
        sheet: &Sheet,
        kind: DataKind,
        source: impl AsRef<Path>,
    ) -> Result<Harmonized> {
        let source = source.as_ref();
        let mut log = Sidecar::beside(source, self.config.sidecar_name());

        info!("lifting {} ({kind})", source.display());

        let result = self.harmonize(sheet, kind, &mut log);
        log.flush().map_err(Error::Io)?;

        match &result {
            Ok(harmonized) => info!("{}: {}", source.display(), harmonized.summary()),
            Err(err) => error!("{}: {err}", source.display()),
        }

        result
    }

    /// Harmonizes a sheet, recording defects in `log`.
    ///
    /// Missing mandatory columns and empty sheets fail the whole file before
    /// any data row is looked at. Row-level defects never do.
    pub fn harmonize<W>(
        &self,
        sheet: &Sheet,
        kind: DataKind,
        log: &mut Sidecar<W>,
    ) -> Result<Harmonized>
    where
        W: Write,
    {
        let header = match sheet.header() {
            Some(header) => header,
            None => {
                log.record(Error::EmptySheet).map_err(Error::Io)?;
                return Err(Error::EmptySheet);
            }
        };

        let columns = match Columns::resolve(header, self.config.headers(), kind) {
            Ok(columns) => columns,
            Err(err) => {
                let err = Error::Columns(err);
                log.record(&err).map_err(Error::Io)?;
                return Err(err);
            }
        };

        let mut output = Sheet::new();
        output.push(header.clone());

        let mut summary = Summary::default();
        let mut breaker = CircuitBreaker::new(self.config.breaker_threshold());

        for (index, row) in sheet.data() {
            let assembly = Assembly::classify(row.get(columns.assembly()));

            let outcome = match assembly {
                Assembly::Target => {
                    summary.passed_through += 1;
                    Ok(row.clone())
                }
                Assembly::Legacy => {
                    let lifted = self.lift_row(row, &columns);

                    match lifted {
                        Ok(_) => summary.lifted += 1,
                        Err(_) => summary.rejected += 1,
                    }

                    lifted
                }
                Assembly::Unrecognized => {
                    summary.unrecognized += 1;
                    Err(Defect::UnrecognizedAssembly(
                        row.get(columns.assembly()).map(String::from),
                    ))
                }
            };

            match outcome {
                Ok(row) => output.push(row),
                Err(defect) => {
                    debug!("row {index}: {defect}");
                    log.record(format_args!("row {index}: {defect}; row data: {row}"))
                        .map_err(Error::Io)?;
                }
            }

            if breaker.observe(assembly) {
                let message = format!(
                    "circuit breaker: threshold of {} consecutive rows with an unrecognized \
                     genome assembly met at row {index}; stopping",
                    breaker.threshold()
                );

                warn!("{message}");
                log.record(&message).map_err(Error::Io)?;

                summary.tripped = true;
                break;
            }
        }

        Ok(Harmonized {
            sheet: output,
            summary,
        })
    }

    /// Lifts a single legacy row, returning the rewritten copy.
    fn lift_row(&self, row: &Row, columns: &Columns) -> std::result::Result<Row, Defect> {
        let coordinates = Coordinates::extract(row, columns).map_err(Defect::Extraction)?;

        if coordinates.chromosome().trim().is_empty() {
            debug!("no chromosome information found");
        }

        let chromosome = self.normalizer.to_mapper_form(coordinates.chromosome());
        let interval = coordinates.to_interval(chromosome).ok_or_else(|| {
            Defect::MissingPosition(coordinates.start().clone(), coordinates.end().clone())
        })?;

        let lifted = match self.mapper.lift(&interval) {
            Ok(LiftResult::Mapped(lifted)) => lifted,
            Ok(LiftResult::Unmapped) => return Err(Defect::Unmapped(interval)),
            Err(err) => {
                let message = err.to_string();
                return Err(Defect::Mapper(interval, message));
            }
        };

        let (lifted_chromosome, start, end) = lifted.into_parts();

        let mut out = row.clone();
        out.set(
            columns.chromosome(),
            chromosome::to_display_form(&lifted_chromosome),
        );
        out.set(columns.start(), start.to_string());

        if columns.kind().has_end_column() {
            out.set(columns.end(), end.to_string());
        }

        out.set(columns.assembly(), self.config.target_assembly());

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    const CNA_HEADER: [&str; 4] = [
        "chromosome",
        "seq_start_position",
        "seq_end_position",
        "genome_assembly",
    ];

    const MUT_HEADER: [&str; 3] = ["chromosome", "seq_start_position", "genome_assembly"];

    /// Shifts every interval by 200 bases.
    fn shift(interval: &Interval) -> LiftResult {
        LiftResult::Mapped(Interval::new(
            interval.chromosome(),
            interval.start() + 200,
            interval.end() + 200,
        ))
    }

    fn unmapped(_: &Interval) -> LiftResult {
        LiftResult::Unmapped
    }

    /// A mapper that always fails.
    struct Failing;

    impl IntervalMapper for Failing {
        type Error = io::Error;

        fn lift(&self, _: &Interval) -> std::result::Result<LiftResult, Self::Error> {
            Err(io::Error::new(io::ErrorKind::Other, "index unavailable"))
        }
    }

    fn run<M: IntervalMapper>(
        mapper: &M,
        sheet: &Sheet,
        kind: DataKind,
    ) -> Result<(Harmonized, Vec<String>)> {
        let mut log = Sidecar::new(Vec::new());
        let harmonized = Harmonizer::new(mapper).harmonize(sheet, kind, &mut log)?;
        let lines = String::from_utf8_lossy(&log.into_inner())
            .lines()
            .map(String::from)
            .collect();

        Ok((harmonized, lines))
    }

    #[test]
    fn test_copy_number_row_is_lifted() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mapper = |interval: &Interval| {
            assert_eq!(interval, &Interval::new("chr7", 1000, 2000));
            LiftResult::Mapped(Interval::new("chr7", 1200, 2200))
        };

        let sheet = Sheet::from(vec![
            Row::from(CNA_HEADER),
            Row::from(["7", "1000", "2000", "GRCh37"]),
        ]);
        let (harmonized, lines) = run(&mapper, &sheet, DataKind::CopyNumberAlteration)?;

        assert_eq!(
            harmonized.sheet(),
            &Sheet::from(vec![
                Row::from(CNA_HEADER),
                Row::from(["7", "1200", "2200", "GRCh38"]),
            ])
        );
        assert_eq!(harmonized.summary().lifted, 1);
        assert!(lines.is_empty());

        Ok(())
    }

    #[test]
    fn test_unmapped_mutation_is_logged_and_dropped(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mapper = |interval: &Interval| {
            assert_eq!(interval, &Interval::new("chrX", 500, 500));
            LiftResult::Unmapped
        };

        let sheet = Sheet::from(vec![Row::from(MUT_HEADER), Row::from(["X", "500", "hg19"])]);
        let (harmonized, lines) = run(&mapper, &sheet, DataKind::Mutation)?;

        assert_eq!(harmonized.sheet(), &Sheet::from(vec![Row::from(MUT_HEADER)]));
        assert_eq!(harmonized.summary().rejected, 1);
        assert_eq!(
            lines,
            vec![String::from(
                "row 1: genomic coordinates not lifted for chrX:500-500; row data: [X, 500, hg19]"
            )]
        );

        Ok(())
    }

    #[test]
    fn test_mutation_only_rewrites_the_position_column(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let header = Row::from(["sample", "chromosome", "seq_start_position", "genome_assembly", "ref"]);
        let sheet = Sheet::from(vec![
            header.clone(),
            Row::from(["s1", "chr17", "7577120", "GRCh37", "C"]),
        ]);
        let (harmonized, _) = run(&shift, &sheet, DataKind::Mutation)?;

        assert_eq!(
            harmonized.sheet().rows()[1],
            Row::from(["s1", "17", "7577320", "GRCh38", "C"])
        );

        Ok(())
    }

    #[test]
    fn test_target_rows_pass_through_without_mapping(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mapper = |_: &Interval| -> LiftResult { panic!("target rows are never lifted") };

        let sheet = Sheet::from(vec![
            Row::from(CNA_HEADER),
            Row::from(["chrz", "", "not a number", "hg38"]),
            Row::from(["7", "100", "200", "GRCh38"]),
            Row::from(["MT", "5", "9", " 38 "]),
        ]);
        let (harmonized, lines) = run(&mapper, &sheet, DataKind::CopyNumberAlteration)?;

        assert_eq!(harmonized.sheet(), &sheet);
        assert_eq!(harmonized.summary().passed_through, 3);
        assert!(lines.is_empty());

        Ok(())
    }

    #[test]
    fn test_rows_without_positions_are_logged() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let mapper = |_: &Interval| -> LiftResult { panic!("incomplete rows are never lifted") };

        let sheet = Sheet::from(vec![
            Row::from(CNA_HEADER),
            Row::from(["7", "", "2000", "GRCh37"]),
            Row::from(["7", "1000", "n/a", "GRCh37"]),
            Row::from(["7", "1000"]),
        ]);
        let (harmonized, lines) = run(&mapper, &sheet, DataKind::CopyNumberAlteration)?;

        assert!(!harmonized.sheet().has_data());
        assert_eq!(harmonized.summary().rejected, 2);
        assert_eq!(harmonized.summary().unrecognized, 1);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("row 1: start or end position missing (start <blank>"));
        assert!(lines[1].contains("<invalid: n/a>"));
        assert_eq!(
            lines[2],
            "row 3: genome assembly cell is missing; row data: [7, 1000]"
        );

        Ok(())
    }

    #[test]
    fn test_short_legacy_row_is_logged() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let header = Row::from(["genome_assembly", "chromosome", "seq_start_position"]);
        let sheet = Sheet::from(vec![header, Row::from(["hg19", "7"])]);
        let (harmonized, lines) = run(&shift, &sheet, DataKind::Mutation)?;

        assert!(!harmonized.sheet().has_data());
        assert_eq!(
            lines,
            vec![String::from(
                "row 1: column count is less than header: expected at least 3 cells, found 2; \
                 row data: [hg19, 7]"
            )]
        );

        Ok(())
    }

    #[test]
    fn test_mapper_errors_are_treated_as_unmapped(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let sheet = Sheet::from(vec![
            Row::from(CNA_HEADER),
            Row::from(["7", "1000", "2000", "GRCh37"]),
            Row::from(["7", "3000", "4000", "GRCh37"]),
        ]);
        let (harmonized, lines) = run(&Failing, &sheet, DataKind::CopyNumberAlteration)?;

        assert!(!harmonized.sheet().has_data());
        assert_eq!(harmonized.summary().rejected, 2);
        assert_eq!(
            lines[0],
            "row 1: genomic coordinates not lifted for chr7:1000-2000: index unavailable; row \
             data: [7, 1000, 2000, GRCh37]"
        );

        Ok(())
    }

    #[test]
    fn test_missing_headers_fail_the_file() {
        let sheet = Sheet::from(vec![
            Row::from(["chromosome", "seq_start_position"]),
            Row::from(["7", "1000"]),
        ]);

        let mut log = Sidecar::new(Vec::new());
        let err = Harmonizer::new(&shift)
            .harmonize(&sheet, DataKind::Mutation, &mut log)
            .unwrap_err();

        assert!(matches!(err, Error::Columns(_)));
        assert_eq!(
            String::from_utf8(log.into_inner()).unwrap(),
            "headers not found: missing mandatory column(s): genome_assembly\n"
        );
    }

    #[test]
    fn test_empty_sheet_fails_the_file() {
        let mut log = Sidecar::new(Vec::new());
        let err = Harmonizer::new(&shift)
            .harmonize(&Sheet::new(), DataKind::Mutation, &mut log)
            .unwrap_err();

        assert!(matches!(err, Error::EmptySheet));
        assert_eq!(log.lines(), 1);
    }

    #[test]
    fn test_circuit_breaker_keeps_rows_harmonized_so_far(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut rows = vec![
            Row::from(MUT_HEADER),
            Row::from(["1", "100", "GRCh37"]),
            Row::from(["2", "100", "GRCh38"]),
        ];
        rows.extend((0..30).map(|_| Row::from(["1", "100", "hg18"])));
        rows.push(Row::from(["3", "100", "GRCh37"]));

        let sheet = Sheet::from(rows);
        let (harmonized, lines) = run(&shift, &sheet, DataKind::Mutation)?;

        assert_eq!(
            harmonized.sheet(),
            &Sheet::from(vec![
                Row::from(MUT_HEADER),
                Row::from(["1", "300", "GRCh38"]),
                Row::from(["2", "100", "GRCh38"]),
            ])
        );
        assert!(harmonized.summary().tripped);
        assert_eq!(harmonized.summary().unrecognized, 25);

        // One line per unrecognized row plus the terminating line.
        assert_eq!(lines.len(), 26);
        assert!(lines[25].starts_with("circuit breaker: threshold of 25"));
        assert!(lines[25].contains("at row 27"));

        Ok(())
    }

    #[test]
    fn test_circuit_breaker_does_not_leak_across_files(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut rows = vec![Row::from(MUT_HEADER)];
        rows.extend((0..24).map(|_| Row::from(["1", "100", "?"])));
        let sheet = Sheet::from(rows);

        let harmonizer = Harmonizer::new(&unmapped);

        for _ in 0..2 {
            let mut log = Sidecar::new(Vec::new());
            let harmonized = harmonizer.harmonize(&sheet, DataKind::Mutation, &mut log)?;

            assert!(!harmonized.summary().tripped);
            assert_eq!(log.lines(), 24);
        }

        Ok(())
    }

    #[test]
    fn test_interrupted_run_does_not_trip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut rows = vec![Row::from(MUT_HEADER)];
        rows.extend((0..24).map(|_| Row::from(["1", "100", ""])));
        rows.push(Row::from(["1", "100", "GRCh38"]));
        rows.extend((0..24).map(|_| Row::from(["1", "100", ""])));

        let (harmonized, _) = run(&unmapped, &Sheet::from(rows), DataKind::Mutation)?;

        assert!(!harmonized.summary().tripped);
        assert_eq!(harmonized.summary().unrecognized, 48);
        assert_eq!(harmonized.summary().passed_through, 1);

        Ok(())
    }

    #[test]
    fn test_configured_threshold_and_labels() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let config = Config::default()
            .with_breaker_threshold(2)
            .with_target_assembly("hg38")
            .with_numeric_sex_chromosomes(true);

        let sheet = Sheet::from(vec![
            Row::from(MUT_HEADER),
            Row::from(["23", "100", "37"]),
            Row::from(["1", "100", "?"]),
            Row::from(["1", "100", "?"]),
            Row::from(["1", "100", "37"]),
        ]);

        let mut log = Sidecar::new(Vec::new());
        let harmonized =
            Harmonizer::with_config(&shift, config).harmonize(&sheet, DataKind::Mutation, &mut log)?;

        assert_eq!(
            harmonized.sheet().rows()[1..],
            [Row::from(["X", "300", "hg38"])]
        );
        assert!(harmonized.summary().tripped);
        assert_eq!(log.lines(), 3);

        Ok(())
    }

    #[test]
    fn test_harmonize_file_writes_sidecar() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("harmonize")?;
        let source = dir.path().join("mut.tsv");
        std::fs::write(dir.path().join("lift.log"), "earlier\n")?;

        let sheet = Sheet::from(vec![
            Row::from(MUT_HEADER),
            Row::from(["X", "500", "hg19"]),
            Row::from(["Y", "500", "GRCh38"]),
        ]);

        let harmonized = Harmonizer::new(&unmapped).harmonize_file(&sheet, DataKind::Mutation, &source)?;
        assert_eq!(harmonized.summary().passed_through, 1);

        let contents = std::fs::read_to_string(dir.path().join("lift.log"))?;
        let lines = contents.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "earlier");
        assert!(lines[1].starts_with("row 1: genomic coordinates not lifted for chrX:500-500"));

        Ok(())
    }

    #[test]
    fn test_harmonize_file_without_defects_leaves_no_sidecar(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("harmonize")?;
        let source = dir.path().join("mut.tsv");

        let sheet = Sheet::from(vec![
            Row::from(MUT_HEADER),
            Row::from(["Y", "500", "GRCh38"]),
        ]);

        let harmonized = Harmonizer::new(&unmapped).harmonize_file(&sheet, DataKind::Mutation, &source)?;
        assert_eq!(harmonized.summary().passed_through, 1);
        assert!(!dir.path().join("lift.log").exists());

        Ok(())
    }
}
