//! Folders and files backed by a plain directory tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};
use vellum_types::{BackendError, Entry, FileEntry, FileRef, FolderEntry};

/// A directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirFolder {
    dir: PathBuf,
    name: String,
    display: String,
}

/// A regular file on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirFile {
    file: PathBuf,
    name: String,
    display: String,
}

impl DirFolder {
    /// Wraps `dir` as a backend root titled `name`.
    pub fn root(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let dir = dir.into();
        Self {
            display: dir.display().to_string(),
            dir,
            name: name.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn child_path(&self, name: &str) -> Result<PathBuf, BackendError> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(BackendError::invalid_name(name));
        }
        Ok(self.dir.join(name))
    }
}

impl DirFile {
    fn new(file: PathBuf, name: String) -> Self {
        Self {
            display: file.display().to_string(),
            file,
            name,
        }
    }
}

#[async_trait]
impl FolderEntry for DirFolder {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.display
    }

    /// Lists children sorted by name; entries with non UTF-8 names are skipped.
    async fn list(&self) -> Result<Vec<Entry>, BackendError> {
        let io_error = |error| BackendError::from_io(&self.display, error);
        let mut read_dir = fs::read_dir(&self.dir).await.map_err(io_error)?;
        let mut children: Vec<(String, Entry)> = Vec::new();
        while let Some(dir_entry) = read_dir.next_entry().await.map_err(io_error)? {
            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let path = dir_entry.path();
            let file_type = dir_entry.file_type().await.map_err(io_error)?;
            let entry = if file_type.is_dir() {
                Entry::Folder(Arc::new(DirFolder::root(path, name.clone())))
            } else {
                Entry::File(Arc::new(DirFile::new(path, name.clone())))
            };
            children.push((name, entry));
        }
        children.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(children.into_iter().map(|(_, entry)| entry).collect())
    }

    /// Creates `name` exclusively; a partially written file is removed again.
    async fn create(&self, name: &str, content: &str) -> Result<FileRef, BackendError> {
        let path = self.child_path(name)?;
        let shown = path.display().to_string();
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|error| BackendError::from_io(&shown, error))?;
        write_or_remove(file, &path, content.as_bytes())
            .await
            .map_err(|error| BackendError::from_io(&shown, error))?;
        debug!(path = %path.display(), "created file");
        Ok(Arc::new(DirFile::new(path, name.to_string())))
    }
}

/// Writes `content` to the freshly created `path`, removing it again when the write fails.
async fn write_or_remove<W>(mut writer: W, path: &Path, content: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match writer.write_all(content).await {
        Ok(()) => writer.flush().await,
        Err(error) => Err(error),
    };
    drop(writer);
    if written.is_err()
        && let Err(cleanup) = fs::remove_file(path).await
    {
        warn!(path = %path.display(), error = %cleanup, "could not remove partially written file");
    }
    written
}

#[async_trait]
impl FileEntry for DirFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.display
    }

    async fn read(&self) -> Result<String, BackendError> {
        fs::read_to_string(&self.file)
            .await
            .map_err(|error| BackendError::from_io(&self.display, error))
    }

    /// Truncates and rewrites the file; fails when it no longer exists.
    async fn update(&self, content: &str) -> Result<(), BackendError> {
        let io_error = |error| BackendError::from_io(&self.display, error);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.file)
            .await
            .map_err(io_error)?;
        file.write_all(content.as_bytes()).await.map_err(io_error)?;
        file.flush().await.map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tempfile::tempdir;

    /// Writer whose every write fails, as a full disk would.
    struct FullDisk;

    impl AsyncWrite for FullDisk {
        fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &[u8]) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::other("no space left on device")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn lists_sorted_by_name_with_kinds() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "b").unwrap();
        std::fs::create_dir(dir.path().join("a-folder")).unwrap();
        std::fs::write(dir.path().join("C.json"), "c").unwrap();

        let root = DirFolder::root(dir.path(), "tmp");
        let entries = root.list().await.unwrap();
        let names: Vec<_> = entries.iter().map(|entry| (entry.name().to_string(), entry.kind())).collect();
        assert_eq!(
            names,
            vec![
                ("C.json".to_string(), vellum_types::EntryKind::File),
                ("a-folder".to_string(), vellum_types::EntryKind::Folder),
                ("b.json".to_string(), vellum_types::EntryKind::File),
            ]
        );
    }

    #[tokio::test]
    async fn create_is_exclusive_and_contained() {
        let dir = tempdir().unwrap();
        let root = DirFolder::root(dir.path(), "tmp");

        let file = root.create("new.json", "{}").await.unwrap();
        assert_eq!(file.read().await.unwrap(), "{}");
        assert!(matches!(root.create("new.json", "x").await, Err(BackendError::Conflict { .. })));
        assert!(matches!(root.create("../escape.json", "x").await, Err(BackendError::InvalidName { .. })));
        assert!(matches!(root.create("..", "x").await, Err(BackendError::InvalidName { .. })));
    }

    #[tokio::test]
    async fn failed_write_removes_the_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("half.json");
        std::fs::write(&path, "").unwrap();

        let err = write_or_remove(FullDisk, &path, b"{}").await.unwrap_err();
        assert_eq!(err.to_string(), "no space left on device");
        assert!(!path.exists());

        let root = DirFolder::root(dir.path(), "tmp");
        assert!(root.list().await.unwrap().is_empty());
        assert!(root.create("half.json", "{}").await.is_ok());
    }

    #[tokio::test]
    async fn update_truncates_and_requires_existing_file() {
        let dir = tempdir().unwrap();
        let root = DirFolder::root(dir.path(), "tmp");
        let file = root.create("doc.txt", "a much longer original body").await.unwrap();

        file.update("short").await.unwrap();
        assert_eq!(file.read().await.unwrap(), "short");

        std::fs::remove_file(dir.path().join("doc.txt")).unwrap();
        assert!(matches!(file.update("again").await, Err(BackendError::NotFound { .. })));
    }

    #[tokio::test]
    async fn listing_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let root = DirFolder::root(dir.path().join("missing"), "missing");
        assert!(matches!(root.list().await, Err(BackendError::NotFound { .. })));
    }
}
