//! Flat-file record store module
//!
//! Persists the whole squirrel collection as a single JSON document.
//! Every operation reads the file in full, works on the collection in
//! memory and rewrites the file wholesale. No caching, no indexing.

mod error;

pub use error::StoreError;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// A single squirrel record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squirrel {
    pub id: u64,
    pub name: String,
    pub size: String,
}

/// Flat-file store owning the squirrel collection on disk
///
/// Mutating operations serialize their load-mutate-save cycle through
/// an internal write lock; reads go straight to the file.
pub struct SquirrelStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SquirrelStore {
    /// Open a store at `path`, writing an empty collection when no
    /// file exists there. An existing file is left untouched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        if !store.path.exists() {
            store.save_all(&[])?;
        }
        Ok(store)
    }

    /// Read and deserialize the full collection
    pub fn load_all(&self) -> Result<Vec<Squirrel>, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Serialize the collection and rewrite the file, truncating any
    /// prior content
    pub fn save_all(&self, squirrels: &[Squirrel]) -> Result<(), StoreError> {
        let content = serde_json::to_string(squirrels)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Load, append one record, save. Last writer wins against
    /// concurrent callers outside the write lock.
    pub async fn append_one(&self, squirrel: Squirrel) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut squirrels = self.load_all()?;
        squirrels.push(squirrel);
        self.save_all(&squirrels)
    }

    /// Full collection in insertion order
    pub fn squirrels(&self) -> Result<Vec<Squirrel>, StoreError> {
        self.load_all()
    }

    /// Look up a record by id
    ///
    /// The id is an opaque string taken from the URL; it is compared
    /// against the rendered record id and never parsed as a number.
    pub fn squirrel(&self, id: &str) -> Result<Option<Squirrel>, StoreError> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|s| s.id.to_string() == id))
    }

    /// Create a record, assigning the next free id (max existing + 1)
    pub async fn create(&self, name: &str, size: &str) -> Result<Squirrel, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut squirrels = self.load_all()?;
        let id = squirrels.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let squirrel = Squirrel {
            id,
            name: name.to_string(),
            size: size.to_string(),
        };
        squirrels.push(squirrel.clone());
        self.save_all(&squirrels)?;
        Ok(squirrel)
    }

    /// Replace name and size of the record with `id`
    ///
    /// Returns false when no such record exists; the file is not
    /// rewritten in that case.
    pub async fn update(&self, id: &str, name: &str, size: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut squirrels = self.load_all()?;
        let Some(squirrel) = squirrels.iter_mut().find(|s| s.id.to_string() == id) else {
            return Ok(false);
        };
        squirrel.name = name.to_string();
        squirrel.size = size.to_string();
        self.save_all(&squirrels)?;
        Ok(true)
    }

    /// Remove the record with `id`
    ///
    /// Returns false when no such record exists; the file is not
    /// rewritten in that case.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut squirrels = self.load_all()?;
        let before = squirrels.len();
        squirrels.retain(|s| s.id.to_string() != id);
        if squirrels.len() == before {
            return Ok(false);
        }
        self.save_all(&squirrels)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(id: u64, name: &str, size: &str) -> Squirrel {
        Squirrel {
            id,
            name: name.to_string(),
            size: size.to_string(),
        }
    }

    #[test]
    fn test_open_creates_empty_collection_when_file_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("squirrels.db");
        assert!(!path.exists());

        let store = SquirrelStore::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(store.load_all().unwrap(), Vec::new());
    }

    #[test]
    fn test_open_preserves_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("squirrels.db");

        let first = SquirrelStore::open(&path).unwrap();
        first
            .save_all(&[sample(1, "Fluffy", "large")])
            .unwrap();

        // Re-opening must not reset the collection
        let second = SquirrelStore::open(&path).unwrap();
        assert_eq!(second.load_all().unwrap(), vec![sample(1, "Fluffy", "large")]);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = SquirrelStore::open(dir.path().join("squirrels.db")).unwrap();

        let collection = vec![
            sample(1, "Fluffy", "large"),
            sample(2, "Sandy", "small"),
            sample(7, "Rex", "medium"),
        ];
        store.save_all(&collection).unwrap();

        assert_eq!(store.load_all().unwrap(), collection);
    }

    #[test]
    fn test_load_all_fails_on_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("squirrels.db");
        std::fs::write(&path, "not json at all").unwrap();

        let store = SquirrelStore::open(&path).unwrap();
        assert!(matches!(
            store.load_all(),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_append_one_grows_collection_by_one() {
        let dir = tempdir().unwrap();
        let store = SquirrelStore::open(dir.path().join("squirrels.db")).unwrap();
        store
            .save_all(&[sample(1, "Fluffy", "large"), sample(2, "Sandy", "small")])
            .unwrap();

        store.append_one(sample(3, "Rex", "medium")).await.unwrap();

        let collection = store.load_all().unwrap();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.last().unwrap(), &sample(3, "Rex", "medium"));
    }

    #[test]
    fn test_squirrel_lookup_is_opaque_string_comparison() {
        let dir = tempdir().unwrap();
        let store = SquirrelStore::open(dir.path().join("squirrels.db")).unwrap();
        store.save_all(&[sample(7, "Sandy", "small")]).unwrap();

        assert_eq!(
            store.squirrel("7").unwrap(),
            Some(sample(7, "Sandy", "small"))
        );
        assert_eq!(store.squirrel("999").unwrap(), None);
        // Non-numeric ids are legal lookups, they just never match
        assert_eq!(store.squirrel("fluffy").unwrap(), None);
        assert_eq!(store.squirrel("").unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let dir = tempdir().unwrap();
        let store = SquirrelStore::open(dir.path().join("squirrels.db")).unwrap();

        let first = store.create("Fluffy", "large").await.unwrap();
        assert_eq!(first.id, 1);

        store.save_all(&[first, sample(9, "Sandy", "small")]).unwrap();
        let next = store.create("Rex", "medium").await.unwrap();
        assert_eq!(next.id, 10);

        let collection = store.load_all().unwrap();
        assert_eq!(collection.last().unwrap(), &next);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_in_place() {
        let dir = tempdir().unwrap();
        let store = SquirrelStore::open(dir.path().join("squirrels.db")).unwrap();
        store
            .save_all(&[sample(1, "Fluffy", "large"), sample(3, "Old", "large")])
            .unwrap();

        assert!(store.update("3", "New", "small").await.unwrap());
        assert_eq!(
            store.load_all().unwrap(),
            vec![sample(1, "Fluffy", "large"), sample(3, "New", "small")]
        );

        assert!(!store.update("42", "Ghost", "tiny").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let dir = tempdir().unwrap();
        let store = SquirrelStore::open(dir.path().join("squirrels.db")).unwrap();
        store
            .save_all(&[sample(1, "Fluffy", "large"), sample(5, "Sandy", "small")])
            .unwrap();

        assert!(store.delete("5").await.unwrap());
        assert_eq!(store.load_all().unwrap(), vec![sample(1, "Fluffy", "large")]);

        assert!(!store.delete("5").await.unwrap());
    }
}
