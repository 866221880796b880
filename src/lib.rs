//! `omiclift` harmonizes tabular mutation and copy-number-alteration records
//! from a legacy reference assembly (GRCh37/hg19) onto a target assembly
//! (GRCh38), so that downstream consumers see a single coordinate system.
//!
//! The crate operates on already-parsed [`Sheet`]s. For each data row, the
//! declared assembly is [classified](assembly::Assembly::classify):
//!
//! - rows already on the target assembly are passed through untouched,
//! - rows on the legacy assembly have their coordinates
//!   [extracted](coordinate::Coordinates::extract), their chromosome
//!   [normalized](chromosome::Normalizer) and lifted through an
//!   [`IntervalMapper`](liftover::IntervalMapper), and
//! - everything else is dropped and recorded in a per-file
//!   [sidecar log](harmonizer::Sidecar).
//!
//! A [`CircuitBreaker`](breaker::CircuitBreaker) stops a file early once a
//! long run of unrecognized rows makes it clear the file is structurally
//! wrong.
//!
//! Most users will want to build a [`liftover::Machine`] from a UCSC chain
//! file once and hand it to a [`Harmonizer`] for every file of a run.
//!
//! ```
//! use omiclift::harmonizer::Sidecar;
//! use omiclift::liftover::chain::Reader;
//! use omiclift::liftover::Machine;
//! use omiclift::sheet::Row;
//! use omiclift::sheet::Sheet;
//! use omiclift::DataKind;
//! use omiclift::Harmonizer;
//!
//! let data = b"chain 0 chr7 5000 + 0 3000 chr7 5000 + 200 3200 1\n3000\n";
//! let machine = Machine::try_build_from(Reader::new(&data[..]))?;
//!
//! let sheet = Sheet::from(vec![
//!     Row::from(["chromosome", "seq_start_position", "genome_assembly"]),
//!     Row::from(["7", "1000", "hg19"]),
//!     Row::from(["7", "1000", "hg38"]),
//!     Row::from(["7", "4000", "hg19"]),
//! ]);
//!
//! let mut log = Sidecar::new(Vec::new());
//! let harmonized = Harmonizer::new(&machine).harmonize(&sheet, DataKind::Mutation, &mut log)?;
//!
//! assert_eq!(
//!     harmonized.sheet().rows()[1..],
//!     [Row::from(["7", "1200", "GRCh38"]), Row::from(["7", "1000", "hg38"])]
//! );
//! assert_eq!(log.lines(), 1);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod assembly;
pub mod breaker;
pub mod chromosome;
pub mod config;
pub mod coordinate;
pub mod crawl;
pub mod harmonizer;
pub mod kind;
pub mod liftover;
pub mod sheet;
pub mod tsv;
pub mod xlsx;

pub use config::Config;
pub use harmonizer::Harmonizer;
pub use kind::DataKind;
pub use sheet::Sheet;
