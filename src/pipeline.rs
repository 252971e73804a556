use std::path::{Path, PathBuf};

use tracing::info;

use crate::collector::{CollectionReport, TripletCollector};
use crate::config::{SamplingMode, TripletConfig};
use crate::corpus::load_metadata;
use crate::data::DocumentRecord;
use crate::errors::TripletError;
use crate::rng::{DeterministicRng, shuffle_metadata};
use crate::sampler::TripletSampler;
use crate::store::TripletStore;

/// Result of running one mode.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    /// Triplets were collected and written to `path`.
    Written {
        mode: SamplingMode,
        path: PathBuf,
        report: CollectionReport,
    },
    /// A file for this configuration already existed; nothing was sampled or written.
    AlreadyExists { mode: SamplingMode, path: PathBuf },
}

impl RunOutcome {
    /// Destination path for this mode.
    pub fn path(&self) -> &Path {
        match self {
            RunOutcome::Written { path, .. } | RunOutcome::AlreadyExists { path, .. } => path,
        }
    }
}

/// Run every configured mode over an in-memory metadata collection.
///
/// The configuration is validated before anything else happens. The shuffle
/// draws from the run seed and each mode samples from its own stream, so a
/// mode's file depends only on the seed and the input ordering, never on
/// which other modes ran or were skipped.
pub fn run_triplets(
    config: TripletConfig,
    mut metadata: Vec<DocumentRecord>,
    store: &TripletStore,
) -> Result<Vec<RunOutcome>, TripletError> {
    let config = config.validated()?;
    let collector = TripletCollector::new(config.repeat_per_target, config.max_size)?;
    if config.shuffle {
        shuffle_metadata(&mut metadata, &mut DeterministicRng::new(config.seed));
    }

    let mut outcomes = Vec::with_capacity(config.modes.len());
    for &mode in &config.modes {
        let path = store.path_for(mode, config.bands.as_ref())?;
        if TripletStore::exists(&path) {
            info!(%mode, path = %path.display(), "triplet file already exists; skipping");
            outcomes.push(RunOutcome::AlreadyExists { mode, path });
            continue;
        }
        let mut sampler = TripletSampler::for_mode(mode, config.bands)?;
        let mut rng = DeterministicRng::for_stream(config.seed, mode.stream());
        let collected = collector.collect(&metadata, &mut sampler, &mut rng);
        info!(
            %mode,
            accepted = collected.report.accepted,
            exhausted = collected.report.exhausted,
            degenerate_targets = collected.report.degenerate_targets,
            "collection finished"
        );
        match TripletStore::persist(&collected.triplets, &path) {
            Ok(()) => outcomes.push(RunOutcome::Written {
                mode,
                path,
                report: collected.report,
            }),
            Err(TripletError::OutputConflict { path }) => {
                info!(%mode, path = %path.display(), "triplet file appeared during run; skipping");
                outcomes.push(RunOutcome::AlreadyExists { mode, path });
            }
            Err(err) => return Err(err),
        }
    }
    info!("all triplets are ready");
    Ok(outcomes)
}

/// Load the archive at `archive_dir` and run every configured mode into `triplets_dir`.
pub fn run_from_archive(
    config: TripletConfig,
    archive_dir: &Path,
    triplets_dir: &Path,
) -> Result<Vec<RunOutcome>, TripletError> {
    let config = config.validated()?;
    let load = load_metadata(archive_dir)?;
    run_triplets(config, load.records, &TripletStore::new(triplets_dir))
}
