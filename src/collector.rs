use rand::Rng;
use tracing::{info, warn};

use crate::constants::collector::PROGRESS_LOG_INTERVAL;
use crate::data::{DocumentRecord, Triplet};
use crate::errors::TripletError;
use crate::sampler::TripletSampler;

/// Outcome counters for one collection pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionReport {
    /// Triplets appended to the output.
    pub accepted: usize,
    /// Sampler calls that spent their retry budget.
    pub exhausted: usize,
    /// Sampler calls skipped because the target had no categories.
    pub degenerate_targets: usize,
    /// Candidates skipped inside the sampler because they had no categories.
    pub degenerate_candidates: usize,
    /// True if collection stopped at `max_size`.
    pub reached_max_size: bool,
}

/// Triplets collected for one mode plus its counters.
#[derive(Clone, Debug, Default)]
pub struct CollectedTriplets {
    pub triplets: Vec<Triplet>,
    pub report: CollectionReport,
}

/// Drives a sampler across every target document.
#[derive(Clone, Copy, Debug)]
pub struct TripletCollector {
    repeat_per_target: usize,
    max_size: Option<usize>,
}

impl TripletCollector {
    /// Create a collector invoking the sampler `repeat_per_target` times per document.
    pub fn new(repeat_per_target: usize, max_size: Option<usize>) -> Result<Self, TripletError> {
        if repeat_per_target == 0 {
            return Err(TripletError::Configuration(
                "repeat per target must be greater than zero".to_string(),
            ));
        }
        if max_size == Some(0) {
            return Err(TripletError::Configuration(
                "max size must be greater than zero when set".to_string(),
            ));
        }
        Ok(Self {
            repeat_per_target,
            max_size,
        })
    }

    /// Upper bound on the number of triplets this collector can produce for `documents`.
    pub fn expected_total(&self, documents: usize) -> usize {
        let full = documents.saturating_mul(self.repeat_per_target);
        self.max_size.map_or(full, |limit| limit.min(full))
    }

    /// Collect triplets without a progress observer.
    pub fn collect<R: Rng + ?Sized>(
        &self,
        metadata: &[DocumentRecord],
        sampler: &mut TripletSampler,
        rng: &mut R,
    ) -> CollectedTriplets {
        self.collect_with_progress(metadata, sampler, rng, |_| {})
    }

    /// Collect triplets in collection order, calling `on_progress` with the running
    /// count after every accepted triplet.
    ///
    /// Exhausted searches and degenerate targets are skipped; collection stops as
    /// soon as `max_size` triplets are held.
    pub fn collect_with_progress<R, F>(
        &self,
        metadata: &[DocumentRecord],
        sampler: &mut TripletSampler,
        rng: &mut R,
        mut on_progress: F,
    ) -> CollectedTriplets
    where
        R: Rng + ?Sized,
        F: FnMut(usize),
    {
        let mut collected = CollectedTriplets::default();
        let expected = self.expected_total(metadata.len());
        info!(
            mode = %sampler.mode(),
            documents = metadata.len(),
            expected,
            "collecting triplets"
        );

        'targets: for target in metadata {
            for _ in 0..self.repeat_per_target {
                match sampler.sample(metadata, target, rng) {
                    Ok(Some(triplet)) => {
                        collected.triplets.push(triplet);
                        collected.report.accepted += 1;
                        on_progress(collected.report.accepted);
                        if collected.report.accepted % PROGRESS_LOG_INTERVAL == 0 {
                            info!(
                                accepted = collected.report.accepted,
                                expected, "triplet collection progress"
                            );
                        }
                    }
                    Ok(None) => collected.report.exhausted += 1,
                    Err(err) => {
                        warn!(target_id = %target.id, error = %err, "skipping target");
                        collected.report.degenerate_targets += 1;
                        continue 'targets;
                    }
                }
                if self.max_size == Some(collected.triplets.len()) {
                    collected.report.reached_max_size = true;
                    break 'targets;
                }
            }
        }

        collected.report.degenerate_candidates = sampler.degenerate_candidates();
        collected
    }
}
