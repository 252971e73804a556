use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

use crate::config::{RangeBands, SamplingMode};
use crate::constants::sampler::{RANGE_BATCH_DRAWS, SEARCH_RETRY_LIMIT};
use crate::data::{DocumentRecord, Triplet};
use crate::errors::TripletError;
use crate::metric::{document_distance, ensure_categories};
use crate::types::DocumentId;

/// Uniform random search.
///
/// Each attempt draws two candidates with replacement. The draw is accepted when
/// target, first and second candidate are pairwise distinct and the two
/// candidates sit at different distances from the target; the closer one
/// becomes the context. No band constrains how hard the negative is.
#[derive(Debug, Default)]
pub struct RandomSearch {
    degenerate_candidates: usize,
}

impl RandomSearch {
    /// Create a random search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to build one triplet for `target`.
    ///
    /// Returns `Ok(None)` once the retry budget is spent. Fails only when the
    /// target itself has no categories.
    pub fn sample<R: Rng + ?Sized>(
        &mut self,
        metadata: &[DocumentRecord],
        target: &DocumentRecord,
        rng: &mut R,
    ) -> Result<Option<Triplet>, TripletError> {
        ensure_categories(target)?;
        if metadata.is_empty() {
            return Ok(None);
        }
        for _attempt in 0..=SEARCH_RETRY_LIMIT {
            let first = &metadata[rng.random_range(0..metadata.len())];
            let second = &metadata[rng.random_range(0..metadata.len())];
            if first.id == target.id || second.id == target.id || first.id == second.id {
                continue;
            }
            let (Ok(first_dist), Ok(second_dist)) = (
                document_distance(target, first),
                document_distance(target, second),
            ) else {
                self.degenerate_candidates += 1;
                continue;
            };
            if first_dist == second_dist {
                continue;
            }
            let triplet = if first_dist < second_dist {
                Triplet::new(target, first, second, first_dist, second_dist)
            } else {
                Triplet::new(target, second, first, second_dist, first_dist)
            };
            return Ok(Some(triplet));
        }
        debug!(target_id = %target.id, "random search exhausted");
        Ok(None)
    }
}

/// Banded range search with per-instance duplicate suppression.
///
/// Each attempt draws a fresh batch of candidates and keeps the first one inside
/// the context band and the first one inside the negative band. A
/// `(context, negative)` pair is emitted at most once per instance.
#[derive(Debug)]
pub struct RangeSearch {
    bands: RangeBands,
    emitted: HashSet<(DocumentId, DocumentId)>,
    degenerate_candidates: usize,
}

impl RangeSearch {
    /// Create a range search over validated bands.
    pub fn new(bands: RangeBands) -> Result<Self, TripletError> {
        Ok(Self {
            bands: bands.validated()?,
            emitted: HashSet::new(),
            degenerate_candidates: 0,
        })
    }

    /// Number of distinct pairs emitted so far.
    pub fn emitted_pairs(&self) -> usize {
        self.emitted.len()
    }

    /// Try to build one triplet for `target`.
    ///
    /// Returns `Ok(None)` once the retry budget is spent. Fails only when the
    /// target itself has no categories.
    pub fn sample<R: Rng + ?Sized>(
        &mut self,
        metadata: &[DocumentRecord],
        target: &DocumentRecord,
        rng: &mut R,
    ) -> Result<Option<Triplet>, TripletError> {
        ensure_categories(target)?;
        if metadata.is_empty() {
            return Ok(None);
        }
        for _attempt in 0..=SEARCH_RETRY_LIMIT {
            let draws: Vec<usize> = (0..RANGE_BATCH_DRAWS)
                .map(|_| rng.random_range(0..metadata.len()))
                .collect();
            let mut positive: Option<(&DocumentRecord, f64)> = None;
            let mut negative: Option<(&DocumentRecord, f64)> = None;
            for idx in draws {
                let candidate = &metadata[idx];
                if candidate.id == target.id {
                    continue;
                }
                let Ok(distance) = document_distance(target, candidate) else {
                    self.degenerate_candidates += 1;
                    continue;
                };
                if positive.is_none() && self.bands.in_low(distance) {
                    positive = Some((candidate, distance));
                } else if negative.is_none() && self.bands.in_high(distance) {
                    negative = Some((candidate, distance));
                }
                if let (Some((context, context_dist)), Some((other, other_dist))) =
                    (positive, negative)
                {
                    if self.emitted.insert((context.id.clone(), other.id.clone())) {
                        return Ok(Some(Triplet::new(
                            target,
                            context,
                            other,
                            context_dist,
                            other_dist,
                        )));
                    }
                    break;
                }
            }
        }
        debug!(target_id = %target.id, "range search exhausted");
        Ok(None)
    }
}

/// Closed set of triplet search strategies selected by [`SamplingMode`].
#[derive(Debug)]
pub enum TripletSampler {
    Random(RandomSearch),
    Range(RangeSearch),
}

impl TripletSampler {
    /// Build the sampler for `mode`; range mode requires bands.
    pub fn for_mode(mode: SamplingMode, bands: Option<RangeBands>) -> Result<Self, TripletError> {
        match mode {
            SamplingMode::Random => Ok(TripletSampler::Random(RandomSearch::new())),
            SamplingMode::Range => {
                let bands = bands.ok_or_else(|| {
                    TripletError::Configuration(
                        "range mode requires all four band boundaries".to_string(),
                    )
                })?;
                Ok(TripletSampler::Range(RangeSearch::new(bands)?))
            }
        }
    }

    /// Mode implemented by this sampler.
    pub fn mode(&self) -> SamplingMode {
        match self {
            TripletSampler::Random(_) => SamplingMode::Random,
            TripletSampler::Range(_) => SamplingMode::Range,
        }
    }

    /// Try to build one triplet for `target`; `Ok(None)` means the search was exhausted.
    pub fn sample<R: Rng + ?Sized>(
        &mut self,
        metadata: &[DocumentRecord],
        target: &DocumentRecord,
        rng: &mut R,
    ) -> Result<Option<Triplet>, TripletError> {
        match self {
            TripletSampler::Random(search) => search.sample(metadata, target, rng),
            TripletSampler::Range(search) => search.sample(metadata, target, rng),
        }
    }

    /// Candidates skipped so far because their category set was empty.
    pub fn degenerate_candidates(&self) -> usize {
        match self {
            TripletSampler::Random(search) => search.degenerate_candidates,
            TripletSampler::Range(search) => search.degenerate_candidates,
        }
    }
}
