use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::app_config::AppConfig;
use crate::models::map_collection::MapCollection;
use crate::storage::error::StorageError;
use crate::storage::serialization;
use crate::utils::logging::{self, OperationCategory, StorageOpType};

/// Whole-collection persistence. Every save replaces everything that was
/// stored before; there are no incremental updates.
pub trait CollectionStore {
    fn load(&self) -> Result<Vec<MapCollection>, StorageError>;
    fn save_all(&self, collections: &[MapCollection]) -> Result<(), StorageError>;
}

/// Stores all collections as one JSON document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileCollectionStore {
    path: PathBuf,
}

impl FileCollectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCollectionStore { path: path.into() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.data_file_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Distinguishes "nothing saved yet" from a saved empty list.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Moves an unreadable data file aside so the next save does not overwrite
    /// it. Returns where the file went, or `None` if there was nothing to move.
    pub fn quarantine(&self) -> Result<Option<PathBuf>, StorageError> {
        let _timing = logging::start_timing("FileCollectionStore::quarantine",
            OperationCategory::Storage { subcategory: StorageOpType::Quarantine });

        if !self.exists() {
            return Ok(None);
        }

        let backup = self.sibling(&format!("corrupt-{}", Utc::now().format("%Y%m%dT%H%M%S%.3fZ")));
        fs::rename(&self.path, &backup).map_err(|source| StorageError::Write {
            path: backup.clone(),
            source,
        })?;

        warn!(from = %self.path.display(), to = %backup.display(), "moved unreadable map data aside");
        Ok(Some(backup))
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}", suffix));
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Write { path: self.path.clone(), source }
    }
}

impl CollectionStore for FileCollectionStore {
    fn load(&self) -> Result<Vec<MapCollection>, StorageError> {
        let _timing = logging::start_timing("FileCollectionStore::load",
            OperationCategory::Storage { subcategory: StorageOpType::Load });

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "data file does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                // not UTF-8
                return Err(StorageError::Corrupt {
                    path: self.path.clone(),
                    reason: e.to_string(),
                });
            }
            Err(source) => {
                return Err(StorageError::Read { path: self.path.clone(), source });
            }
        };

        let collections = serialization::decode(&contents).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        info!(path = %self.path.display(), count = collections.len(), "loaded map collections");
        Ok(collections)
    }

    fn save_all(&self, collections: &[MapCollection]) -> Result<(), StorageError> {
        let _timing = logging::start_timing("FileCollectionStore::save_all",
            OperationCategory::Storage { subcategory: StorageOpType::Save });

        let json = serialization::encode(collections)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        // Write next to the target and rename over it so a crash never leaves
        // a half-written data file behind.
        let tmp_path = self.sibling("tmp");
        let written = fs::File::create(&tmp_path).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp_path, &self.path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.write_error(e));
        }

        debug!(path = %self.path.display(), bytes = json.len(), "wrote data file");
        info!(count = collections.len(), "saved map collections");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::Place;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileCollectionStore {
        FileCollectionStore::new(dir.path().join("user_maps.json"))
    }

    fn trip() -> MapCollection {
        MapCollection::new("Trip", Some("desc".to_string()), vec![Place::new("A", "d", 1.0, 2.0)])
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save_all(&[trip()]).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title(), "Trip");
        assert_eq!(loaded[0].description(), Some("desc"));
        assert_eq!(loaded[0].places().len(), 1);
        assert_eq!(loaded[0].places()[0].title(), "A");
        assert_eq!(loaded[0].places()[0].latitude(), 1.0);
        assert_eq!(loaded[0].places()[0].longitude(), 2.0);
    }

    #[test]
    fn round_trip_preserves_order_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let collections = vec![
            trip(),
            MapCollection::new("Trip", None, vec![Place::new("B", "e", -33.86, 151.2)]),
            MapCollection::new(
                "Coffee",
                Some(String::new()),
                vec![
                    Place::new("First", "one", 48.8566, 2.3522),
                    Place::new("Second", "two", 40.7128, -74.006),
                    Place::new("Third", "three", 35.6762, 139.6503),
                ],
            ),
        ];

        store.save_all(&collections).unwrap();

        assert_eq!(store.load().unwrap(), collections);
    }

    #[test]
    fn saved_empty_list_is_distinguishable_from_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save_all(&[]).unwrap();

        assert!(store.exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save_all(&[trip(), trip()]).unwrap();
        store.save_all(&[trip()]).unwrap();

        assert_eq!(store.load().unwrap().len(), 1);
        assert!(!dir.path().join("user_maps.json.tmp").exists());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileCollectionStore::new(dir.path().join("nested/deeper/user_maps.json"));

        store.save_all(&[trip()]).unwrap();

        assert_eq!(store.load().unwrap(), vec![trip()]);
    }

    #[test]
    fn corrupt_file_is_reported_and_left_alone() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ definitely not maps").unwrap();

        let err = store.load().unwrap_err();

        assert!(err.is_corrupt());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ definitely not maps");
    }

    #[test]
    fn unsupported_version_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"version": 2, "collections": []}"#).unwrap();

        let err = store.load().unwrap_err();

        assert!(err.is_corrupt());
        assert!(err.to_string().contains("unsupported format version 2"));
        assert!(store.exists());
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir(store.path()).unwrap();

        let err = store.load().unwrap_err();

        assert!(matches!(err, StorageError::Read { .. }));
        assert!(!err.is_corrupt());
    }

    #[test]
    fn non_utf8_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), [0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert!(store.load().unwrap_err().is_corrupt());
    }

    #[test]
    fn quarantine_moves_the_file_aside() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "garbage").unwrap();

        let backup = store.quarantine().unwrap().unwrap();

        assert!(!store.exists());
        assert_eq!(fs::read_to_string(&backup).unwrap(), "garbage");
        assert!(backup
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("user_maps.json.corrupt-"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn quarantine_without_file_is_a_no_op() {
        let dir = TempDir::new().unwrap();

        assert_eq!(store_in(&dir).quarantine().unwrap(), None);
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // The data "file" path is an existing directory, so the rename fails.
        let target = dir.path().join("user_maps.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();
        let store = FileCollectionStore::new(&target);

        let err = store.save_all(&[trip()]).unwrap_err();

        assert!(matches!(err, StorageError::Write { .. }));
        assert!(!dir.path().join("user_maps.json.tmp").exists());
    }
}
