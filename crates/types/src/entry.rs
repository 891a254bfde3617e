//! Storage capability contracts.
//!
//! Every provider exposes two entity variants: folders that can be listed and
//! written into, and files that can be read and overwritten. Consumers switch
//! on the [`Entry`] tag and never on the concrete provider type.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, BackendError};

/// Shared handle to a leaf entry.
pub type FileRef = Arc<dyn FileEntry>;

/// Shared handle to a listable location.
pub type FolderRef = Arc<dyn FolderEntry>;

/// Readable and writable leaf entry of a backend.
#[async_trait]
pub trait FileEntry: Send + Sync + fmt::Debug {
    /// Display name (last path segment).
    fn name(&self) -> &str;

    /// Backend-qualified path used in dialogs and collision messages.
    fn path(&self) -> &str;

    /// Reads the full content of the file.
    async fn read(&self) -> Result<String, BackendError>;

    /// Replaces the content of the file.
    async fn update(&self, content: &str) -> Result<(), BackendError>;
}

/// Listable location of a backend that new files can be created in.
#[async_trait]
pub trait FolderEntry: Send + Sync + fmt::Debug {
    /// Display name used as the page title.
    fn name(&self) -> &str;

    /// Backend-qualified path.
    fn path(&self) -> &str;

    /// Lists the direct children of this folder in backend order.
    async fn list(&self) -> Result<Vec<Entry>, BackendError>;

    /// Creates a new file named `name` inside this folder.
    async fn create(&self, name: &str, content: &str) -> Result<FileRef, BackendError>;
}

/// A single listed child: either a file or a folder.
#[derive(Clone, Debug)]
pub enum Entry {
    File(FileRef),
    Folder(FolderRef),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File(file) => file.name(),
            Entry::Folder(folder) => folder.name(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Entry::File(file) => file.path(),
            Entry::Folder(folder) => folder.path(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Folder(_) => EntryKind::Folder,
        }
    }

    /// Returns the file handle when this entry is a file.
    pub fn as_file(&self) -> Option<&FileRef> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Folder(_) => None,
        }
    }
}

impl From<FileRef> for Entry {
    fn from(file: FileRef) -> Self {
        Entry::File(file)
    }
}

impl From<FolderRef> for Entry {
    fn from(folder: FolderRef) -> Self {
        Entry::Folder(folder)
    }
}

/// Discriminant of an [`Entry`] without the handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// Stable identifier of a configured backend (for example, `local` or `dropbox`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendId(String);

/// Label of the always-available local store, both as a backend row and as its root page.
pub const LOCAL_STORAGE_LABEL: &str = "Local storage";

impl BackendId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier reserved for the always-available local store.
    pub fn local() -> Self {
        Self::new("local")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BackendId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Family a backend belongs to; presentation layers pick icons from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Application-local document storage; always available.
    #[default]
    Local,
    /// Cloud drive account (Dropbox-like).
    CloudDrive,
    /// Source-control hosted snippet service (Gist-like).
    SnippetHost,
    /// Directory on the local filesystem mounted as a backend.
    Mount,
    /// One-shot import from the device filesystem.
    Device,
}

/// Remote backend whose root only becomes available after logging in.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    fn id(&self) -> &BackendId;

    /// Human-friendly label rendered in the backend list.
    fn label(&self) -> &str;

    fn kind(&self) -> BackendKind;

    /// Root established earlier in the session, if any.
    fn cached_root(&self) -> Option<FolderRef> {
        None
    }

    /// Runs the login flow and resolves to the backend root.
    async fn log_in(&self) -> Result<FolderRef, AuthError>;
}

/// One-shot import of a file from the device, outside any folder context.
#[async_trait]
pub trait DeviceSource: Send + Sync {
    async fn import(&self) -> Result<String, BackendError>;
}
