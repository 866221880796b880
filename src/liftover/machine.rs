//! A machine for lifting over intervals from a reference genome to a query
//! genome using a chain file.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::{self};
use std::path::Path;

use flate2::read::GzDecoder;
use rust_lapper as lapper;
use tracing::debug;

use crate::coordinate::Interval;
use crate::liftover::chain;
use crate::liftover::chain::Header;
use crate::liftover::chain::Segment;
use crate::liftover::chain::Strand;
use crate::liftover::IntervalMapper;
use crate::liftover::LiftResult;

/// The minimum fraction of an interval's bases a chain must cover for the
/// interval to be lifted through it.
pub const DEFAULT_MIN_MATCH: f64 = 0.95;

/// An error related to building a [`Machine`].
#[derive(Debug)]
pub enum Error {
    /// The chain file could not be opened.
    Io(io::Error),

    /// The chain file is malformed.
    Chain(chain::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Chain(err) => write!(f, "chain file error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// An indexed segment, tagged with the chain it belongs to.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Entry {
    /// The index of the chain header in [`Machine::headers`].
    chain: usize,

    /// The aligned segment.
    segment: Segment,
}

/// The bases of an interval that a single chain covers.
#[derive(Debug)]
struct Coverage {
    /// The number of covered bases.
    bases: u64,

    /// The smallest covered query position (query strand, 0-based).
    query_start: u64,

    /// The end of the largest covered query position (exclusive).
    query_end: u64,
}

/// A machine for lifting over intervals from a reference genome to a query
/// genome.
///
/// The index is built once and only read afterwards, so a single machine can
/// serve every file of a run.
#[derive(Debug)]
pub struct Machine {
    /// The chain headers.
    headers: Vec<Header>,

    /// The aligned segments of each reference contig.
    inner: HashMap<String, lapper::Lapper<u64, Entry>>,

    /// The minimum fraction of bases a chain must cover.
    min_match: f64,
}

impl Machine {
    /// Builds a [`Machine`] from a chain file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::coordinate::Interval;
    /// use omiclift::liftover::chain::Reader;
    /// use omiclift::liftover::LiftResult;
    /// use omiclift::liftover::Machine;
    ///
    /// let data = b"chain 0 chr7 5000 + 0 3000 chr7 5000 + 200 3200 1\n3000\n";
    /// let machine = Machine::try_build_from(Reader::new(&data[..]))?;
    ///
    /// assert_eq!(
    ///     machine.lift_interval(&Interval::new("chr7", 1000, 2000)),
    ///     LiftResult::Mapped(Interval::new("chr7", 1200, 2200))
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build_from<T>(mut reader: chain::Reader<T>) -> Result<Self>
    where
        T: BufRead,
    {
        let mut headers = Vec::new();
        let mut hm = HashMap::<String, Vec<lapper::Interval<u64, Entry>>>::new();

        for result in reader.chains() {
            let chain = result.map_err(Error::Chain)?;
            let index = headers.len();

            let entry = hm
                .entry(chain.header().reference().name().to_string())
                .or_default();

            for segment in chain.segments().filter(|segment| segment.size > 0) {
                entry.push(lapper::Interval {
                    start: segment.reference_start,
                    stop: segment.reference_start + segment.size,
                    val: Entry {
                        chain: index,
                        segment,
                    },
                });
            }

            headers.push(chain.header().clone());
        }

        debug!(
            "indexed {} chains over {} reference contigs",
            headers.len(),
            hm.len()
        );

        let inner = hm
            .into_iter()
            .map(|(contig, intervals)| (contig, lapper::Lapper::new(intervals)))
            .collect();

        Ok(Self {
            headers,
            inner,
            min_match: DEFAULT_MIN_MATCH,
        })
    }

    /// Builds a [`Machine`] from a chain file on disk. Files ending in `.gz`
    /// are decompressed on the fly.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::Io)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Self::try_build_from(chain::Reader::new(BufReader::new(
                GzDecoder::new(file),
            ))),
            _ => Self::try_build_from(chain::Reader::new(BufReader::new(file))),
        }
    }

    /// Sets the minimum fraction of bases a chain must cover. The value is
    /// clamped to `0.0..=1.0`.
    pub fn with_min_match(mut self, min_match: f64) -> Self {
        self.min_match = min_match.clamp(0.0, 1.0);
        self
    }

    /// Gets the number of chains in the index.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether the index holds no chains.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Lifts a closed, 1-based interval.
    ///
    /// Every chain overlapping the interval is considered. The interval is
    /// lifted only if exactly one chain covers at least the minimum fraction
    /// of its bases; the result spans the first to the last covered base on
    /// the forward strand of the query.
    pub fn lift_interval(&self, interval: &Interval) -> LiftResult {
        if interval.start() == 0 || interval.end() < interval.start() {
            return LiftResult::Unmapped;
        }

        let entries = match self.inner.get(interval.chromosome()) {
            Some(entries) => entries,
            None => return LiftResult::Unmapped,
        };

        // Half-open, 0-based.
        let (from, to) = (interval.start() - 1, interval.end());
        let length = to - from;

        let mut coverage = BTreeMap::<usize, Coverage>::new();

        for found in entries.find(from, to) {
            let Entry { chain, segment } = &found.val;
            let start = from.max(found.start);
            let stop = to.min(found.stop);

            if start >= stop {
                continue;
            }

            let query_start = segment.query_start + (start - segment.reference_start);
            let query_end = query_start + (stop - start);

            coverage
                .entry(*chain)
                .and_modify(|c| {
                    c.bases += stop - start;
                    c.query_start = c.query_start.min(query_start);
                    c.query_end = c.query_end.max(query_end);
                })
                .or_insert(Coverage {
                    bases: stop - start,
                    query_start,
                    query_end,
                });
        }

        let mut candidates = coverage
            .into_iter()
            .filter(|(_, c)| c.bases as f64 / length as f64 >= self.min_match);

        let (chain, covered) = match (candidates.next(), candidates.next()) {
            (Some(candidate), None) => candidate,
            _ => return LiftResult::Unmapped,
        };

        let query = self.headers[chain].query();
        let (start, end) = match query.strand() {
            Strand::Positive => (covered.query_start, covered.query_end),
            Strand::Negative => (
                query.size() - covered.query_end,
                query.size() - covered.query_start,
            ),
        };

        LiftResult::Mapped(Interval::new(query.name(), start + 1, end))
    }
}

impl IntervalMapper for Machine {
    type Error = Infallible;

    fn lift(&self, interval: &Interval) -> std::result::Result<LiftResult, Self::Error> {
        Ok(self.lift_interval(interval))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempdir::TempDir;

    use super::*;
    use crate::liftover::chain::ParseError;
    use crate::liftover::chain::Reader;

    const CHAIN: &[u8] = b"chain 0 chr7 5000 + 0 3000 chr7 5000 + 200 3200 1\n3000\n";

    fn machine(data: &[u8]) -> Machine {
        Machine::try_build_from(Reader::new(data)).unwrap()
    }

    #[test]
    fn test_positive_strand_liftover() {
        let machine = machine(b"chain 0 chr1 100 + 0 50 chr1 120 + 10 60 1\n50\n");

        assert_eq!(machine.len(), 1);
        assert_eq!(
            machine.lift_interval(&Interval::new("chr1", 1, 10)),
            LiftResult::Mapped(Interval::new("chr1", 11, 20))
        );
        assert_eq!(
            machine.lift_interval(&Interval::new("chr1", 25, 25)),
            LiftResult::Mapped(Interval::new("chr1", 35, 35))
        );
    }

    #[test]
    fn test_negative_strand_liftover() {
        // Query position `q` on the reverse strand is `100 - q` forward.
        let machine = machine(b"chain 0 chr1 100 + 0 10 chr2 100 - 0 10 1\n10\n");

        assert_eq!(
            machine.lift_interval(&Interval::new("chr1", 1, 1)),
            LiftResult::Mapped(Interval::new("chr2", 100, 100))
        );
        assert_eq!(
            machine.lift_interval(&Interval::new("chr1", 3, 5)),
            LiftResult::Mapped(Interval::new("chr2", 96, 98))
        );
    }

    #[test]
    fn test_gapped_interval_below_min_match_is_unmapped() {
        // Blocks [0, 10) and [20, 30) on the reference.
        let machine = machine(b"chain 0 chr1 100 + 0 30 chr1 100 + 0 25 1\n10\t10\t5\n10\n");

        assert_eq!(
            machine.lift_interval(&Interval::new("chr1", 21, 30)),
            LiftResult::Mapped(Interval::new("chr1", 16, 25))
        );
        assert_eq!(
            machine.lift_interval(&Interval::new("chr1", 5, 25)),
            LiftResult::Unmapped
        );
        assert_eq!(
            machine
                .with_min_match(0.5)
                .lift_interval(&Interval::new("chr1", 5, 25)),
            LiftResult::Mapped(Interval::new("chr1", 5, 20))
        );
    }

    #[test]
    fn test_unknown_contig_and_degenerate_intervals() {
        let machine = machine(b"chain 0 chr1 100 + 0 50 chr1 100 + 0 50 1\n50\n");

        assert_eq!(machine.lift_interval(&Interval::new("chr", 1, 1)), LiftResult::Unmapped);
        assert_eq!(machine.lift_interval(&Interval::new("chr1", 0, 1)), LiftResult::Unmapped);
        assert_eq!(machine.lift_interval(&Interval::new("chr1", 9, 8)), LiftResult::Unmapped);
        assert_eq!(machine.lift_interval(&Interval::new("chr1", 60, 70)), LiftResult::Unmapped);
    }

    #[test]
    fn test_ambiguous_liftover_is_unmapped() {
        let machine = machine(
            b"chain 0 chr1 100 + 0 50 chr1 100 + 0 50 1\n50\n\n\
              chain 0 chr1 100 + 0 50 chr9 100 + 0 50 2\n50\n",
        );

        assert_eq!(machine.len(), 2);
        assert_eq!(machine.lift_interval(&Interval::new("chr1", 1, 10)), LiftResult::Unmapped);
    }

    #[test]
    fn test_overflowing_chain_fails_to_build() {
        let data = b"chain 0 chr1 100 + 0 10 chr1 100 + 0 10 1\n5\t18446744073709551615\t0\n5\n";
        let err = Machine::try_build_from(Reader::new(&data[..])).unwrap_err();

        assert!(matches!(
            err,
            Error::Chain(chain::Error::Parse(3, ParseError::CoordinateOverflow(1)))
        ));
    }

    #[test]
    fn test_from_plain_path() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("machine")?;
        let path = dir.path().join("hg19ToHg38.over.chain");
        std::fs::write(&path, CHAIN)?;

        let machine = Machine::from_path(&path)?;

        assert_eq!(machine.len(), 1);
        assert_eq!(
            machine.lift_interval(&Interval::new("chr7", 1000, 2000)),
            LiftResult::Mapped(Interval::new("chr7", 1200, 2200))
        );

        Ok(())
    }

    #[test]
    fn test_from_gzipped_path() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("machine")?;
        let path = dir.path().join("hg19ToHg38.over.chain.gz");

        let mut encoder = GzEncoder::new(File::create(&path)?, Compression::default());
        encoder.write_all(CHAIN)?;
        encoder.finish()?;

        let machine = Machine::from_path(&path)?;

        assert_eq!(machine.len(), 1);
        assert_eq!(
            machine.lift_interval(&Interval::new("chr7", 1, 1)),
            LiftResult::Mapped(Interval::new("chr7", 201, 201))
        );

        Ok(())
    }

    #[test]
    fn test_from_missing_path() {
        let err = Machine::from_path("/definitely/not/a/real/file.chain.gz").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
