use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{RangeBands, SamplingMode};
use crate::constants::store::{
    RANDOM_TRIPLETS_FILENAME, RANGE_TRIPLETS_PREFIX, TRIPLETS_EXTENSION,
};
use crate::data::Triplet;
use crate::errors::TripletError;
use crate::types::OutputFileName;

/// Output filename for a mode.
///
/// Range mode embeds its four boundaries so distinct configurations never share
/// a file, e.g. `triplets_range(0-2_3-5).jsonl`.
pub fn output_file_name(
    mode: SamplingMode,
    bands: Option<&RangeBands>,
) -> Result<OutputFileName, TripletError> {
    match mode {
        SamplingMode::Random => Ok(RANDOM_TRIPLETS_FILENAME.to_string()),
        SamplingMode::Range => {
            let bands = bands.ok_or_else(|| {
                TripletError::Configuration(
                    "range mode requires all four band boundaries".to_string(),
                )
            })?;
            Ok(format!(
                "{}({}-{}_{}-{}).{}",
                RANGE_TRIPLETS_PREFIX,
                bands.low_start,
                bands.low_end,
                bands.high_start,
                bands.high_end,
                TRIPLETS_EXTENSION
            ))
        }
    }
}

/// Newline-delimited JSON persistence for triplet sets.
///
/// A store never overwrites: an existing destination is reported as
/// [`TripletError::OutputConflict`] and left untouched.
#[derive(Clone, Debug)]
pub struct TripletStore {
    dir: PathBuf,
}

impl TripletStore {
    /// Create a store writing into `dir` (created on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the triplet files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Destination path for a mode.
    pub fn path_for(
        &self,
        mode: SamplingMode,
        bands: Option<&RangeBands>,
    ) -> Result<PathBuf, TripletError> {
        Ok(self.dir.join(output_file_name(mode, bands)?))
    }

    /// True if a triplet file already exists at `path`.
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// Write `triplets` to `path`, one JSON object per line.
    pub fn persist(triplets: &[Triplet], path: &Path) -> Result<(), TripletError> {
        ensure_parent_dir(path)?;
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => TripletError::OutputConflict {
                    path: path.to_path_buf(),
                },
                _ => TripletError::Io(err),
            })?;
        let mut writer = BufWriter::new(file);
        for triplet in triplets {
            serde_json::to_writer(&mut writer, triplet)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        info!(count = triplets.len(), path = %path.display(), "triplets saved");
        Ok(())
    }

    /// Read a persisted triplet file back.
    pub fn load(path: &Path) -> Result<Vec<Triplet>, TripletError> {
        let raw = fs::read_to_string(path)?;
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(TripletError::from))
            .collect()
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), TripletError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_triplets() -> Vec<Triplet> {
        vec![
            Triplet {
                target: "t1".to_string(),
                context: "c1".to_string(),
                negative: "n1".to_string(),
                dist_to_context: 0.0,
                dist_to_negative: 4.0,
            },
            Triplet {
                target: "t2".to_string(),
                context: "c2".to_string(),
                negative: "n2".to_string(),
                dist_to_context: 1.5,
                dist_to_negative: 3.3,
            },
        ]
    }

    #[test]
    fn file_names_embed_range_bands() {
        assert_eq!(
            output_file_name(SamplingMode::Random, None).unwrap(),
            "triplets.jsonl"
        );
        let bands = RangeBands::default();
        assert_eq!(
            output_file_name(SamplingMode::Range, Some(&bands)).unwrap(),
            "triplets_range(0-2_3-5).jsonl"
        );
        let fractional = RangeBands::new(0.5, 1.5, 2.5, 4.0).unwrap();
        assert_eq!(
            output_file_name(SamplingMode::Range, Some(&fractional)).unwrap(),
            "triplets_range(0.5-1.5_2.5-4).jsonl"
        );
        assert!(output_file_name(SamplingMode::Range, None).is_err());
    }

    #[test]
    fn persist_writes_one_record_per_line() {
        let dir = tempdir().unwrap();
        let store = TripletStore::new(dir.path().join("nested"));
        let path = store.path_for(SamplingMode::Random, None).unwrap();
        TripletStore::persist(&sample_triplets(), &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"target":"t1","context":"c1","negative":"n1","dist_to_context":0.0,"dist_to_negative":4.0}"#
        );
        assert!(raw.ends_with('\n'));
        assert_eq!(TripletStore::load(&path).unwrap(), sample_triplets());
    }

    #[test]
    fn persist_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("triplets.jsonl");
        fs::write(&path, "previous run\n").unwrap();
        assert!(TripletStore::exists(&path));

        let err = TripletStore::persist(&sample_triplets(), &path).unwrap_err();
        assert!(matches!(err, TripletError::OutputConflict { path: ref p } if p == &path));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous run\n");
    }

    #[test]
    fn persist_accepts_empty_sets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.jsonl");
        TripletStore::persist(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert!(TripletStore::load(&path).unwrap().is_empty());
    }
}
