use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};

use crate::config::{RangeBands, SamplingMode, TripletConfig};
use crate::constants::config::{
    DEFAULT_HIGH_END, DEFAULT_HIGH_START, DEFAULT_LOW_END, DEFAULT_LOW_START,
    DEFAULT_REPEAT_PER_TARGET, DEFAULT_SEED,
};
use crate::constants::corpus::{DEFAULT_ARCHIVE_DIR, DEFAULT_BUCKET_SEED, DEFAULT_STAGING_DIR};
use crate::constants::store::DEFAULT_TRIPLETS_DIR;
use crate::layout::move_into_buckets;
use crate::pipeline::{RunOutcome, run_from_archive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Random,
    Range,
}

impl From<ModeArg> for SamplingMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Random => SamplingMode::Random,
            ModeArg::Range => SamplingMode::Range,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "make_triplets",
    disable_help_subcommand = true,
    about = "Build (target, context, negative) triplets from category metadata",
    long_about = "Load per-document metadata from the archive, sample triplets in each requested mode, and write one JSONL file per mode.",
    after_help = "Existing output files are never overwritten; a mode whose file exists is skipped."
)]
/// CLI for `make_triplets`.
///
/// Common usage:
/// - Default run (random then range mode): `make_triplets`
/// - Range mode only with custom bands: `--modes range --pos-dist-f 1 --neg-dist-s 4`
/// - Cap the output: `--size 100000`
struct MakeTripletsCli {
    #[arg(
        long = "arxiv-dir",
        value_name = "DIR",
        default_value = DEFAULT_ARCHIVE_DIR,
        help = "Archive root holding per-document folders (metadata, pdf, text)"
    )]
    arxiv_dir: PathBuf,
    #[arg(
        long = "triplets-dir",
        value_name = "DIR",
        default_value = DEFAULT_TRIPLETS_DIR,
        help = "Directory where triplet files are written"
    )]
    triplets_dir: PathBuf,
    #[arg(
        long,
        default_value_t = DEFAULT_REPEAT_PER_TARGET,
        value_parser = parse_positive_usize,
        help = "Sampler invocations per target document"
    )]
    repeat: usize,
    #[arg(
        long,
        value_enum,
        num_args = 1..,
        default_values_t = [ModeArg::Random, ModeArg::Range],
        help = "Sampling modes to run, in order"
    )]
    modes: Vec<ModeArg>,
    #[arg(long = "pos-dist-s", default_value_t = DEFAULT_LOW_START, help = "Min distance for context")]
    pos_dist_s: f64,
    #[arg(long = "pos-dist-f", default_value_t = DEFAULT_LOW_END, help = "Max distance for context")]
    pos_dist_f: f64,
    #[arg(long = "neg-dist-s", default_value_t = DEFAULT_HIGH_START, help = "Min distance for negative sample")]
    neg_dist_s: f64,
    #[arg(long = "neg-dist-f", default_value_t = DEFAULT_HIGH_END, help = "Max distance for negative sample")]
    neg_dist_f: f64,
    #[arg(long, default_value_t = DEFAULT_SEED, help = "Seed for shuffling and sampling")]
    seed: u64,
    #[arg(long = "no-shuffle", help = "Keep metadata in archive order instead of shuffling")]
    no_shuffle: bool,
    #[arg(
        long,
        value_parser = parse_positive_usize,
        help = "Max triplets per mode (may be fewer if the search space runs out)"
    )]
    size: Option<usize>,
}

#[derive(Debug, Parser)]
#[command(
    name = "bucket_documents",
    disable_help_subcommand = true,
    about = "Move staged document folders into hash buckets",
    long_about = "Move every folder in the staging directory to <done-dir>/<bucket>/<name>, where the bucket is a seeded hash of the folder name."
)]
struct BucketDocumentsCli {
    #[arg(long, default_value_t = DEFAULT_BUCKET_SEED, help = "Seed for the bucket hash")]
    seed: u32,
    #[arg(
        long = "tasks-dir",
        value_name = "DIR",
        default_value = DEFAULT_STAGING_DIR,
        help = "Staging directory holding unbucketed document folders"
    )]
    tasks_dir: PathBuf,
    #[arg(
        long = "done-dir",
        value_name = "DIR",
        default_value = DEFAULT_ARCHIVE_DIR,
        help = "Archive root receiving the bucket directories"
    )]
    done_dir: PathBuf,
}

/// Run the `make_triplets` CLI with the given arguments (program name excluded).
pub fn run_make_triplets<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    init_tracing();

    let Some(cli) = parse_cli::<MakeTripletsCli, _>(
        std::iter::once("make_triplets".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let mut modes: Vec<SamplingMode> = Vec::new();
    for mode in cli.modes.into_iter().map(SamplingMode::from) {
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }
    let bands = RangeBands::new(cli.pos_dist_s, cli.pos_dist_f, cli.neg_dist_s, cli.neg_dist_f)?;
    let config = TripletConfig {
        seed: cli.seed,
        repeat_per_target: cli.repeat,
        max_size: cli.size,
        modes,
        bands: Some(bands),
        shuffle: !cli.no_shuffle,
    };

    let outcomes = run_from_archive(config, &cli.arxiv_dir, &cli.triplets_dir)?;
    for outcome in outcomes {
        match outcome {
            RunOutcome::Written { mode, path, report } => println!(
                "{mode}: wrote {} triplets to {} (exhausted searches: {}, skipped targets: {})",
                report.accepted,
                path.display(),
                report.exhausted,
                report.degenerate_targets
            ),
            RunOutcome::AlreadyExists { mode, path } => {
                println!("{mode}: {} already exists, skipped", path.display())
            }
        }
    }
    Ok(())
}

/// Run the `bucket_documents` CLI with the given arguments (program name excluded).
pub fn run_bucket_documents<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    init_tracing();

    let Some(cli) = parse_cli::<BucketDocumentsCli, _>(
        std::iter::once("bucket_documents".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let report = move_into_buckets(&cli.tasks_dir, &cli.done_dir, cli.seed)?;
    println!(
        "moved {} folders into {} ({} already present)",
        report.moved,
        cli.done_dir.display(),
        report.skipped
    );
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse '{}' as a positive integer", raw))?;
    if parsed == 0 {
        return Err("value must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
