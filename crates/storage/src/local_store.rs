//! Local document store.
//!
//! Documents are kept in a single JSON file keyed by `/`-separated paths, the
//! way browser local storage holds an application's files. Folders are implied
//! by key prefixes and entries keep their first-insertion order. The store is
//! safe to share across tasks; every write rewrites the whole file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::serde::ts_seconds;
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use vellum_types::{BackendError, Entry, FileEntry, FileRef, FolderEntry, FolderRef, LOCAL_STORAGE_LABEL};

/// Error surfaced when the store file cannot be opened.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredDocument {
    content: String,
    #[serde(with = "ts_seconds")]
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    documents: IndexMap<String, StoredDocument>,
}

#[derive(Debug)]
struct StoreInner {
    path: PathBuf,
    file: Mutex<StoreFile>,
    persist_to_disk: bool,
}

/// Handle to the document store. Clones share the same underlying data.
#[derive(Debug, Clone)]
pub struct LocalStore {
    inner: Arc<StoreInner>,
}

impl LocalStore {
    /// Opens the store persisted at `path`.
    ///
    /// A missing file starts an empty store; an unreadable document is logged
    /// and replaced by an empty store on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let file = load_store_file(&path)?;
        debug!(path = %path.display(), documents = file.documents.len(), "opened local store");
        Ok(Self {
            inner: Arc::new(StoreInner {
                path,
                file: Mutex::new(file),
                persist_to_disk: true,
            }),
        })
    }

    /// Builds an in-memory store that never touches the disk.
    pub fn ephemeral() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: PathBuf::new(),
                file: Mutex::new(StoreFile::default()),
                persist_to_disk: false,
            }),
        }
    }

    /// The top-level folder of the store.
    pub fn root(&self) -> FolderRef {
        Arc::new(LocalFolder {
            store: self.clone(),
            prefix: String::new(),
            name: LOCAL_STORAGE_LABEL.to_string(),
            path: "/".to_string(),
        })
    }

    /// Number of documents currently stored.
    pub async fn len(&self) -> usize {
        self.inner.file.lock().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Writes a document at `key`, creating intermediate folders implicitly.
    ///
    /// Existing documents are overwritten.
    #[cfg(test)]
    pub(crate) async fn put(&self, key: &str, content: &str) -> Result<(), BackendError> {
        let key = key.trim_matches('/');
        if key.is_empty() || key.split('/').any(str::is_empty) {
            return Err(BackendError::invalid_name(key));
        }
        let mut file = self.inner.file.lock().await;
        file.documents.insert(key.to_string(), StoredDocument::new(content));
        self.persist(&file).await
    }

    async fn persist(&self, file: &StoreFile) -> Result<(), BackendError> {
        if !self.inner.persist_to_disk {
            return Ok(());
        }
        let path = &self.inner.path;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|error| BackendError::from_io(parent.display().to_string(), error))?;
        }
        let data = serde_json::to_string_pretty(file).map_err(|error| BackendError::serialization(error.to_string()))?;
        tokio::fs::write(path, data)
            .await
            .map_err(|error| BackendError::from_io(path.display().to_string(), error))
    }
}

impl StoredDocument {
    fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            updated_at: Utc::now(),
        }
    }
}

fn load_store_file(path: &Path) -> Result<StoreFile, StoreError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(file) => Ok(file),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse local store; starting empty"
                );
                Ok(StoreFile::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
        Err(error) => Err(StoreError::Io(error)),
    }
}

/// Folder implied by a key prefix (`""` for the root, otherwise ending in `/`).
#[derive(Debug)]
struct LocalFolder {
    store: LocalStore,
    prefix: String,
    name: String,
    path: String,
}

#[derive(Debug)]
struct LocalFile {
    store: LocalStore,
    key: String,
    name: String,
    path: String,
}

impl LocalFolder {
    fn child_folder(&self, name: &str) -> FolderRef {
        let prefix = format!("{}{}/", self.prefix, name);
        Arc::new(LocalFolder {
            store: self.store.clone(),
            path: format!("/{}", prefix.trim_end_matches('/')),
            prefix,
            name: name.to_string(),
        })
    }

    fn child_file(&self, name: &str) -> FileRef {
        let key = format!("{}{}", self.prefix, name);
        Arc::new(LocalFile {
            store: self.store.clone(),
            path: format!("/{key}"),
            key,
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl FolderEntry for LocalFolder {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    async fn list(&self) -> Result<Vec<Entry>, BackendError> {
        let file = self.store.inner.file.lock().await;
        let mut folders: IndexSet<&str> = IndexSet::new();
        let mut children: Vec<Entry> = Vec::new();
        for key in file.documents.keys() {
            let Some(rest) = key.strip_prefix(&self.prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((folder, _)) => {
                    if folders.insert(folder) {
                        children.push(self.child_folder(folder).into());
                    }
                }
                None => children.push(self.child_file(rest).into()),
            }
        }
        Ok(children)
    }

    async fn create(&self, name: &str, content: &str) -> Result<FileRef, BackendError> {
        if name.is_empty() || name.contains('/') {
            return Err(BackendError::invalid_name(name));
        }
        let key = format!("{}{}", self.prefix, name);
        let mut file = self.store.inner.file.lock().await;
        if file.documents.contains_key(&key) {
            return Err(BackendError::conflict(format!("/{key}")));
        }
        file.documents.insert(key.clone(), StoredDocument::new(content));
        if let Err(error) = self.store.persist(&file).await {
            file.documents.shift_remove(&key);
            return Err(error);
        }
        debug!(key = %key, "created local document");
        Ok(self.child_file(name))
    }
}

#[async_trait]
impl FileEntry for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    async fn read(&self) -> Result<String, BackendError> {
        let file = self.store.inner.file.lock().await;
        file.documents
            .get(&self.key)
            .map(|document| document.content.clone())
            .ok_or_else(|| BackendError::not_found(&self.path))
    }

    async fn update(&self, content: &str) -> Result<(), BackendError> {
        let mut file = self.store.inner.file.lock().await;
        let document = file
            .documents
            .get_mut(&self.key)
            .ok_or_else(|| BackendError::not_found(&self.path))?;
        let previous = std::mem::replace(document, StoredDocument::new(content));
        if let Err(error) = self.store.persist(&file).await {
            file.documents.insert(self.key.clone(), previous);
            return Err(error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(entries: &[Entry]) -> Vec<(&str, vellum_types::EntryKind)> {
        entries.iter().map(|entry| (entry.name(), entry.kind())).collect()
    }

    #[tokio::test]
    async fn lists_immediate_children_in_insertion_order() {
        use vellum_types::EntryKind::{File, Folder};

        let store = LocalStore::ephemeral();
        store.put("zeta.json", "z").await.unwrap();
        store.put("dicts/en.json", "en").await.unwrap();
        store.put("alpha.json", "a").await.unwrap();
        store.put("dicts/ja.json", "ja").await.unwrap();
        store.put("dicts/old/v1.json", "v1").await.unwrap();

        let root = store.root().list().await.unwrap();
        assert_eq!(names(&root), vec![("zeta.json", File), ("dicts", Folder), ("alpha.json", File)]);

        let Entry::Folder(dicts) = &root[1] else {
            panic!("expected folder");
        };
        assert_eq!(dicts.path(), "/dicts");
        let children = dicts.list().await.unwrap();
        assert_eq!(names(&children), vec![("en.json", File), ("ja.json", File), ("old", Folder)]);
        assert_eq!(children[1].path(), "/dicts/ja.json");
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = LocalStore::ephemeral();
        assert!(store.root().list().await.unwrap().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_then_read_and_update() {
        let store = LocalStore::ephemeral();
        let file = store.root().create("notes.json", "{}").await.unwrap();
        assert_eq!(file.path(), "/notes.json");
        assert_eq!(file.read().await.unwrap(), "{}");

        file.update(r#"{"a":1}"#).await.unwrap();
        assert_eq!(file.read().await.unwrap(), r#"{"a":1}"#);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn create_refuses_existing_and_nested_names() {
        let store = LocalStore::ephemeral();
        store.put("notes.json", "old").await.unwrap();
        let root = store.root();

        let err = root.create("notes.json", "new").await.unwrap_err();
        assert_eq!(err, BackendError::conflict("/notes.json"));
        let err = root.create("a/b.json", "new").await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidName { .. }));
    }

    #[tokio::test]
    async fn update_of_missing_document_fails() {
        let store = LocalStore::ephemeral();
        let file = store.root().create("gone.json", "x").await.unwrap();
        store.inner.file.lock().await.documents.clear();
        assert_eq!(file.update("y").await.unwrap_err(), BackendError::not_found("/gone.json"));
        assert!(file.read().await.is_err());
    }

    #[tokio::test]
    async fn persists_documents_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = LocalStore::open(&path).unwrap();
        store.root().create("a.json", "alpha").await.unwrap();
        drop(store);

        let reopened = LocalStore::open(&path).unwrap();
        let entries = reopened.root().list().await.unwrap();
        assert_eq!(entries.len(), 1);
        let file = entries[0].as_file().unwrap();
        assert_eq!(file.read().await.unwrap(), "alpha");
    }

    #[tokio::test]
    async fn failed_writes_leave_memory_as_it_was() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = LocalStore::open(&path).unwrap();
        let file = store.root().create("a.json", "old").await.unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(matches!(file.update("new").await, Err(BackendError::Io { .. })));
        assert_eq!(file.read().await.unwrap(), "old");
        assert!(store.root().create("b.json", "b").await.is_err());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn corrupt_store_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = LocalStore::open(&path).unwrap();
        assert!(store.is_empty().await);
    }
}
