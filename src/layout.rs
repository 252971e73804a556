//! Hash-bucketed archive layout.
//!
//! Document folders live under `<root>/<bucket>/<id>/` where the bucket is the
//! signed 32-bit MurmurHash3 of the id, floor-modulo [`BUCKET_COUNT`]
//! (`mmh3.hash(id, seed) % 500`), so the archive downloader and this crate
//! agree on every folder's location.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::constants::corpus::BUCKET_COUNT;
use crate::errors::TripletError;
use crate::hash::murmur3_str;

/// Counters for one bucketing pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// Entries moved into their bucket.
    pub moved: usize,
    /// Entries left in place because the destination already existed.
    pub skipped: usize,
}

/// Bucket index for a document id.
pub fn bucket_for(document_id: &str, seed: u32) -> Result<u32, TripletError> {
    let hash = murmur3_str(seed, document_id)?;
    Ok(hash.rem_euclid(BUCKET_COUNT as i32) as u32)
}

/// Destination folder for `name` under `root`.
pub fn bucket_path(root: &Path, name: &str, seed: u32) -> Result<PathBuf, TripletError> {
    Ok(root.join(bucket_for(name, seed)?.to_string()).join(name))
}

/// Create every bucket directory under `root`.
pub fn ensure_bucket_dirs(root: &Path) -> Result<(), TripletError> {
    for bucket in 0..BUCKET_COUNT {
        fs::create_dir_all(root.join(bucket.to_string()))?;
    }
    Ok(())
}

/// Move every top-level entry of `staging` into its bucket under `root`.
///
/// Entries whose destination already exists are left in place.
pub fn move_into_buckets(
    staging: &Path,
    root: &Path,
    seed: u32,
) -> Result<MoveReport, TripletError> {
    ensure_bucket_dirs(root)?;
    let mut names: Vec<String> = fs::read_dir(staging)?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut report = MoveReport::default();
    for name in names {
        let destination = bucket_path(root, &name, seed)?;
        if destination.exists() {
            debug!(name = %name, "bucket destination exists; leaving entry in place");
            report.skipped += 1;
            continue;
        }
        fs::rename(staging.join(&name), &destination)?;
        report.moved += 1;
    }
    info!(
        moved = report.moved,
        skipped = report.skipped,
        root = %root.display(),
        "documents bucketed"
    );
    Ok(report)
}
