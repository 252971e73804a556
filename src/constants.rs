/// Constants used by the category taxonomy metric.
pub mod metric {
    /// Separator between hierarchy levels in a category label (`math.AG`).
    pub const CATEGORY_SEPARATOR: char = '.';
    /// Closed set of top-level mains treated as loosely related physics fields.
    pub const PHYSICS_MAINS: [&str; 13] = [
        "astro-ph", "cond-mat", "gr-qc", "hep-ex", "hep-lat", "hep-ph", "hep-th", "math-ph",
        "nlin", "nucl-ex", "nucl-th", "physics", "quant-ph",
    ];
    /// Extra penalty for mains that share no relation at all.
    pub const UNRELATED_MAIN_PENALTY: usize = 1;
}

/// Constants used by the triplet search strategies.
pub mod sampler {
    /// Retries allowed after the first failed attempt before a search gives up.
    pub const SEARCH_RETRY_LIMIT: usize = 15;
    /// Number of candidate indices drawn per range-search attempt.
    pub const RANGE_BATCH_DRAWS: usize = 1000;
    /// Decimal places kept on emitted triplet distances.
    pub const DISTANCE_DECIMALS: i32 = 1;
    /// Multiplier spreading stream ids across the seed space.
    pub const STREAM_STRIDE: u64 = 0xD1B5_4A32_D192_ED03;
}

/// Constants used by run configuration defaults.
pub mod config {
    /// Default RNG seed for shuffling and sampling.
    pub const DEFAULT_SEED: u64 = 42;
    /// Default number of sampler invocations per target document.
    pub const DEFAULT_REPEAT_PER_TARGET: usize = 5;
    /// Default context band start for range mode.
    pub const DEFAULT_LOW_START: f64 = 0.0;
    /// Default context band end for range mode.
    pub const DEFAULT_LOW_END: f64 = 2.0;
    /// Default negative band start for range mode.
    pub const DEFAULT_HIGH_START: f64 = 3.0;
    /// Default negative band end for range mode.
    pub const DEFAULT_HIGH_END: f64 = 5.0;
    /// Mode label accepted for uniform random search.
    pub const MODE_LABEL_RANDOM: &str = "random";
    /// Mode label accepted for banded range search.
    pub const MODE_LABEL_RANGE: &str = "range";
}

/// Constants used by triplet persistence.
pub mod store {
    /// Output filename for random-mode triplet sets.
    pub const RANDOM_TRIPLETS_FILENAME: &str = "triplets.jsonl";
    /// Filename prefix for range-mode triplet sets.
    pub const RANGE_TRIPLETS_PREFIX: &str = "triplets_range";
    /// Extension shared by all triplet files.
    pub const TRIPLETS_EXTENSION: &str = "jsonl";
    /// Default directory for persisted triplet files.
    pub const DEFAULT_TRIPLETS_DIR: &str = "triplets";
}

/// Constants used by the on-disk document archive.
pub mod corpus {
    /// Default archive root containing per-document folders.
    pub const DEFAULT_ARCHIVE_DIR: &str = "arxiv";
    /// Entries a document folder holds once fully materialized (metadata, pdf, text).
    pub const COMPLETE_DOCUMENT_ENTRIES: usize = 3;
    /// Number of hash buckets used by the balanced directory layout.
    pub const BUCKET_COUNT: u32 = 500;
    /// Default MurmurHash3 seed for bucket assignment.
    pub const DEFAULT_BUCKET_SEED: u32 = 42;
    /// Default staging directory for documents not yet bucketed.
    pub const DEFAULT_STAGING_DIR: &str = "arxiv_tmp";
    /// Log message used when a metadata file cannot be parsed.
    pub const SKIP_UNPARSABLE_MSG: &str = "skipping unparsable metadata file";
    /// Log message used when a document folder cannot be listed.
    pub const SKIP_UNREADABLE_MSG: &str = "skipping unreadable document folder";
}

/// Constants used by collector progress reporting.
pub mod collector {
    /// Accepted triplets between periodic progress log lines.
    pub const PROGRESS_LOG_INTERVAL: usize = 10_000;
}
