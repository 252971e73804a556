use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::constants::corpus::{
    COMPLETE_DOCUMENT_ENTRIES, SKIP_UNPARSABLE_MSG, SKIP_UNREADABLE_MSG,
};
use crate::data::DocumentRecord;
use crate::errors::TripletError;
use crate::types::DocumentId;

/// Fields read from a per-document metadata file; everything else is ignored.
#[derive(Debug, Deserialize)]
struct MetadataFile {
    id: DocumentId,
    /// Whitespace-separated category labels, e.g. `"math.AG math.CO"`.
    categories: String,
}

/// Metadata collection loaded from an archive root.
#[derive(Clone, Debug, Default)]
pub struct CorpusLoad {
    /// Complete documents sorted by id.
    pub records: Vec<DocumentRecord>,
    /// Document folders skipped as incomplete, unparsable, or duplicated.
    pub failed: usize,
}

/// Load every fully materialized document under `root`.
///
/// Document folders sit either directly under the root or one bucket level
/// below it. A folder `<id>/` is recognized by its metadata file `<id>/<id>` and
/// counts as complete once it holds exactly three entries (metadata, pdf, text).
pub fn load_metadata(root: &Path) -> Result<CorpusLoad, TripletError> {
    if !root.is_dir() {
        return Err(TripletError::MetadataUnavailable {
            path: root.to_path_buf(),
            reason: "archive root is not a directory".to_string(),
        });
    }
    info!(root = %root.display(), "loading metadata");

    let mut complete: Vec<PathBuf> = Vec::new();
    let mut failed = 0usize;
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
    {
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        let metadata_path = entry.path().join(name);
        if !metadata_path.is_file() {
            continue;
        }
        match count_entries(entry.path()) {
            Ok(COMPLETE_DOCUMENT_ENTRIES) => complete.push(metadata_path),
            Ok(_) => failed += 1,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "{}", SKIP_UNREADABLE_MSG);
                failed += 1;
            }
        }
    }

    let parsed: Vec<Result<DocumentRecord, TripletError>> = complete
        .par_iter()
        .map(|path| read_metadata_file(path))
        .collect();

    let mut records = Vec::with_capacity(parsed.len());
    for (path, result) in complete.iter().zip(parsed) {
        match result {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "{}", SKIP_UNPARSABLE_MSG);
                failed += 1;
            }
        }
    }
    records.sort_by(|a, b| a.id.cmp(&b.id));
    let before = records.len();
    records.dedup_by(|later, earlier| later.id == earlier.id);
    failed += before - records.len();

    info!(size = records.len(), failed, "metadata ready");
    Ok(CorpusLoad { records, failed })
}

/// Parse one metadata file into a document record.
pub fn read_metadata_file(path: &Path) -> Result<DocumentRecord, TripletError> {
    let raw = fs::read_to_string(path)?;
    let file: MetadataFile = serde_json::from_str(&raw)?;
    Ok(DocumentRecord::from_category_line(file.id, &file.categories))
}

fn count_entries(dir: &Path) -> Result<usize, TripletError> {
    Ok(fs::read_dir(dir)?.filter_map(Result::ok).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_document(dir: &Path, id: &str, categories: &str, complete: bool) {
        let folder = dir.join(id);
        fs::create_dir_all(&folder).unwrap();
        let json = serde_json::json!({
            "date": "Mon, 2 Apr 2007 19:18:42 GMT",
            "id": id,
            "title": format!("title {id}"),
            "abstract": "abstract",
            "categories": categories,
        });
        fs::write(folder.join(id), json.to_string()).unwrap();
        fs::write(folder.join(format!("{id}.pdf")), b"%PDF").unwrap();
        if complete {
            fs::write(folder.join(format!("{id}.txt")), "text").unwrap();
        }
    }

    #[test]
    fn loads_complete_documents_from_flat_and_bucketed_layouts() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_document(root, "b-doc", "math.AG math.CO", true);
        write_document(&root.join("17"), "a-doc", "hep-th", true);
        write_document(&root.join("17"), "c-doc", "q-bio.PE", false);

        let load = load_metadata(root).unwrap();
        let ids: Vec<&str> = load.records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["a-doc", "b-doc"]);
        assert_eq!(load.records[1].categories, vec!["math.AG", "math.CO"]);
        assert_eq!(load.failed, 1);
    }

    #[test]
    fn unparsable_metadata_is_counted_and_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_document(root, "good", "math.AG", true);
        let broken = root.join("broken");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("broken"), "{not json").unwrap();
        fs::write(broken.join("broken.pdf"), b"%PDF").unwrap();
        fs::write(broken.join("broken.txt"), "text").unwrap();

        let load = load_metadata(root).unwrap();
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.failed, 1);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_folder_is_counted_and_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        write_document(root, "good", "math.AG", true);
        write_document(root, "locked", "hep-th", true);
        let locked = root.join("locked");
        // search permission only: the metadata file can be stat'ed but the folder not listed
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o311)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            // privileged user; permissions are not enforced
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let load = load_metadata(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let load = load.unwrap();
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.records[0].id, "good");
        assert_eq!(load.failed, 1);
    }

    #[test]
    fn missing_root_is_reported() {
        let dir = tempdir().unwrap();
        let err = load_metadata(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, TripletError::MetadataUnavailable { .. }));
    }
}
