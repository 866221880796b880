//! A binary that lifts every mutation and copy-number-alteration file beneath
//! a directory from GRCh37/hg19 onto GRCh38.
//!
//! ```shell
//! cargo run --release --bin=omiclift --features=binaries -- \
//!     --dir /data/pdx --chain hg19ToHg38.over.chain.gz
//! ```
//!
//! Each candidate file is read, harmonized and written beside its source
//! with a `.lfted` suffix (or under `--output`, keeping the layout relative
//! to `--dir`). Row defects are appended to a `lift.log` in the same
//! directory as the source file. A file that cannot be processed is
//! reported and skipped.

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use omiclift::crawl::Candidate;
use omiclift::liftover::Machine;
use omiclift::tsv;
use omiclift::Config;
use omiclift::DataKind;
use omiclift::Harmonizer;
use tracing::error;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The root directory to search for `mut` and `cna` directories.
    #[arg(short, long)]
    dir: PathBuf,

    /// The chain file used for liftover (e.g., `hg19ToHg38.over.chain.gz`).
    #[arg(short, long)]
    chain: PathBuf,

    /// If desired, only lift files of this kind (`mut` or `cna`).
    #[arg(short, long)]
    kind: Option<DataKind>,

    /// Translate the numeric sex-chromosome codes `23` and `24` to X and Y.
    #[arg(long, default_value_t = false)]
    numeric_sex_chromosomes: bool,

    /// If desired, a directory to write lifted files to instead of beside
    /// their sources.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity,
}

/// Gets where the lifted version of `candidate` is written.
fn destination(args: &Args, candidate: &Candidate) -> Result<PathBuf> {
    let beside = candidate.output_path();

    match &args.output {
        Some(output) => {
            let relative = beside.strip_prefix(&args.dir).with_context(|| {
                format!("{} is not beneath {}", beside.display(), args.dir.display())
            })?;
            Ok(output.join(relative))
        }
        None => Ok(beside),
    }
}

/// Lifts a single file.
fn lift_file(
    args: &Args,
    harmonizer: &Harmonizer<'_, Machine>,
    candidate: &Candidate,
) -> Result<()> {
    let source = candidate.path();

    let sheet = tsv::read_sheet(source)
        .with_context(|| format!("reading {}", source.display()))?;

    let harmonized = harmonizer
        .harmonize_file(&sheet, candidate.kind(), source)
        .with_context(|| format!("harmonizing {}", source.display()))?;

    if !harmonized.sheet().has_data() {
        info!("{}: no data lifted", source.display());
        return Ok(());
    }

    let destination = destination(args, candidate)?;
    tsv::write_sheet_to_path(harmonized.sheet(), &destination)
        .with_context(|| format!("writing {}", destination.display()))?;

    info!("{} -> {}", source.display(), destination.display());

    Ok(())
}

fn throw(args: &Args) -> Result<()> {
    if !args.chain.is_file() {
        bail!("chain file does not exist: {}", args.chain.display());
    }

    let machine = Machine::from_path(&args.chain)
        .with_context(|| format!("loading chain file {}", args.chain.display()))?;
    info!("loaded {} chains from {}", machine.len(), args.chain.display());

    let config = Config::default().with_numeric_sex_chromosomes(args.numeric_sex_chromosomes);
    let harmonizer = Harmonizer::with_config(&machine, config);

    let candidates = omiclift::crawl::crawl(&args.dir, args.kind)
        .with_context(|| format!("searching {}", args.dir.display()))?;

    if candidates.is_empty() {
        warn!("no candidate files found under {}", args.dir.display());
        return Ok(());
    }

    let mut failed = 0usize;

    for candidate in &candidates {
        if let Err(err) = lift_file(args, &harmonizer, candidate) {
            error!("{err:#}");
            failed += 1;
        }
    }

    info!("processed {} files ({failed} failed)", candidates.len());

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    throw(&args)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_destination() {
        let args = Args::parse_from([
            "omiclift",
            "--dir",
            "/data/pdx",
            "--chain",
            "chain.gz",
            "--output",
            "/out",
        ]);
        let candidate = Candidate::new(Path::new("/data/pdx/mut/a.tsv"), DataKind::Mutation);

        assert_eq!(
            destination(&args, &candidate).unwrap(),
            Path::new("/out/mut/a.tsv.lfted")
        );
    }

    #[test]
    fn test_kind_argument() {
        let args = Args::parse_from(["omiclift", "-d", ".", "-c", "x", "--kind", "CNA"]);
        assert_eq!(args.kind, Some(DataKind::CopyNumberAlteration));
    }
}
