#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runners shared by the binaries.
pub mod apps;
/// Triplet collection across target documents.
pub mod collector;
/// Run configuration types.
pub mod config;
/// Centralized constants used across metric, samplers, store, and corpus.
pub mod constants;
/// Archive metadata loading.
pub mod corpus;
/// Document and triplet record types.
pub mod data;
mod hash;
pub mod layout;
pub mod metric;
/// Run orchestration from metadata to persisted triplet files.
pub mod pipeline;
/// Deterministic random number generation.
pub mod rng;
/// Triplet search strategies.
pub mod sampler;
/// Triplet file persistence.
pub mod store;
/// Shared type aliases.
pub mod types;

mod errors;

pub use collector::{CollectedTriplets, CollectionReport, TripletCollector};
pub use config::{RangeBands, SamplingMode, TripletConfig};
pub use corpus::{CorpusLoad, load_metadata};
pub use data::{DocumentRecord, Triplet};
pub use errors::TripletError;
pub use metric::{category_distance, document_distance};
pub use pipeline::{RunOutcome, run_from_archive, run_triplets};
pub use rng::DeterministicRng;
pub use sampler::{RandomSearch, RangeSearch, TripletSampler};
pub use store::TripletStore;
pub use types::{Category, DocumentId};
