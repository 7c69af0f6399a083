//! Document persistence collaborator.
//!
//! The engine only ever calls [`DocumentStore::put`] after a successful
//! pass; creation, deletion, and listing exist for the owning application.

use std::collections::HashMap;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use realscore_types::{Document, DocumentId};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {0} not found")]
    Missing(DocumentId),
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode document {id}")]
    Encode {
        id: DocumentId,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence collaborator owning durable document records.
pub trait DocumentStore: Send + Sync {
    fn put(&self, document: &Document) -> Result<(), StoreError>;
    fn get(&self, id: DocumentId) -> Result<Option<Document>, StoreError>;
    fn delete(&self, id: DocumentId) -> Result<(), StoreError>;
    /// All known ids, most-recently-modified first.
    fn list_ids(&self) -> Result<Vec<DocumentId>, StoreError>;
}

// ============================================================================
// JSON file store
// ============================================================================

/// One JSON file per document under a data directory, written atomically
/// (temp file then rename) so a crash never leaves a half-written record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Write {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, id: DocumentId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn read_document(&self, path: &Path) -> Result<Document, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl DocumentStore for JsonFileStore {
    fn put(&self, document: &Document) -> Result<(), StoreError> {
        let path = self.path_for(document.id);
        let bytes = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Encode {
            id: document.id,
            source,
        })?;
        atomic_write(&path, &bytes).map_err(|source| StoreError::Write { path, source })
    }

    fn get(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        self.read_document(&path).map(Some)
    }

    fn delete(&self, id: DocumentId) -> Result<(), StoreError> {
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }

    fn list_ids(&self) -> Result<Vec<DocumentId>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::Read {
            path: self.dir.clone(),
            source,
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Read {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match self.read_document(&path) {
                Ok(document) => documents.push(document),
                Err(err) => {
                    // Tolerate stray or corrupt files instead of failing the listing.
                    tracing::warn!(path = %path.display(), "Skipping unreadable document: {err}");
                }
            }
        }

        documents.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(documents.into_iter().map(|d| d.id).collect())
    }
}

/// Write via a temp file in the same directory, then rename over the target.
fn atomic_write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;

    match tmp.persist(path) {
        Ok(_) => Ok(()),
        Err(err) if path.exists() => {
            // Windows refuses to rename over an existing file; fall back to
            // backup-and-restore so the old record survives a failed swap.
            let backup = path.with_extension("bak");
            let _ = fs::remove_file(&backup);
            fs::rename(path, &backup)?;
            if let Err(persist_err) = err.file.persist(path) {
                let _ = fs::rename(&backup, path);
                return Err(persist_err.error);
            }
            let _ = fs::remove_file(&backup);
            Ok(())
        }
        Err(err) => Err(err.error),
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<DocumentId, Document>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn put(&self, document: &Document) -> Result<(), StoreError> {
        self.documents
            .lock()
            .expect("document map lock poisoned")
            .insert(document.id, document.clone());
        Ok(())
    }

    fn get(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self
            .documents
            .lock()
            .expect("document map lock poisoned")
            .get(&id)
            .cloned())
    }

    fn delete(&self, id: DocumentId) -> Result<(), StoreError> {
        self.documents
            .lock()
            .expect("document map lock poisoned")
            .remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<DocumentId>, StoreError> {
        let documents = self.documents.lock().expect("document map lock poisoned");
        let mut all: Vec<&Document> = documents.values().collect();
        all.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(all.into_iter().map(|d| d.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn document_modified_at(title: &str, hour: u32) -> Document {
        let mut doc = Document::new(title, "content");
        doc.last_modified = Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap();
        doc
    }

    #[test]
    fn json_store_round_trips_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("documents")).unwrap();

        let doc = Document::new("Essay", "<p>Hello</p>");
        store.put(&doc).unwrap();

        let loaded = store.get(doc.id).unwrap().expect("document present");
        assert_eq!(loaded.id, doc.id);
        assert_eq!(loaded.content, doc.content);
    }

    #[test]
    fn json_store_get_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(store.get(DocumentId::new()).unwrap().is_none());
    }

    #[test]
    fn json_store_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        let doc = Document::new("Essay", "x");
        store.put(&doc).unwrap();
        store.delete(doc.id).unwrap();
        store.delete(doc.id).unwrap();
        assert!(store.get(doc.id).unwrap().is_none());
    }

    #[test]
    fn json_store_lists_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        let oldest = document_modified_at("a", 1);
        let newest = document_modified_at("b", 9);
        let middle = document_modified_at("c", 5);
        for doc in [&oldest, &newest, &middle] {
            store.put(doc).unwrap();
        }

        assert_eq!(
            store.list_ids().unwrap(),
            vec![newest.id, middle.id, oldest.id]
        );
    }

    #[test]
    fn json_store_overwrite_leaves_no_debris() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        let mut doc = Document::new("Essay", "one");
        store.put(&doc).unwrap();
        doc.content = "two".to_string();
        store.put(&doc).unwrap();

        assert_eq!(store.get(doc.id).unwrap().unwrap().content, "two");
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1, "expected only the document file");
    }

    #[test]
    fn json_store_listing_skips_stray_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        let doc = Document::new("Essay", "x");
        store.put(&doc).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a document").unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();

        assert_eq!(store.list_ids().unwrap(), vec![doc.id]);
    }

    #[test]
    fn memory_store_round_trips_and_orders() {
        let store = MemoryStore::new();
        let oldest = document_modified_at("a", 1);
        let newest = document_modified_at("b", 9);
        store.put(&oldest).unwrap();
        store.put(&newest).unwrap();

        assert_eq!(store.list_ids().unwrap(), vec![newest.id, oldest.id]);
        store.delete(newest.id).unwrap();
        assert_eq!(store.list_ids().unwrap(), vec![oldest.id]);
    }
}
