use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use vellum_types::{AuthError, BackendId, BackendKind, FolderRef, RemoteClient};
use vellum_util::MountConfig;

use crate::directory::DirFolder;

/// A directory exposed through the remote login contract.
///
/// Logging in succeeds once the directory is reachable, which lets
/// configured mounts on removable or network drives show up lazily.
#[derive(Debug, Clone)]
pub struct MountClient {
    id: BackendId,
    label: String,
    dir: PathBuf,
}

impl MountClient {
    pub fn new(id: impl Into<String>, label: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            id: BackendId::new(id),
            label: label.into(),
            dir: dir.into(),
        }
    }
}

impl From<&MountConfig> for MountClient {
    fn from(config: &MountConfig) -> Self {
        Self::new(config.id.clone(), config.label(), config.resolved_path())
    }
}

#[async_trait]
impl RemoteClient for MountClient {
    fn id(&self) -> &BackendId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Mount
    }

    async fn log_in(&self) -> Result<FolderRef, AuthError> {
        match tokio::fs::metadata(&self.dir).await {
            Ok(metadata) if metadata.is_dir() => {
                info!(mount = %self.id, dir = %self.dir.display(), "mounted directory");
                Ok(Arc::new(DirFolder::root(&self.dir, &self.label)))
            }
            Ok(_) => Err(AuthError::rejected(self.id.as_str(), format!("{} is not a directory", self.dir.display()))),
            Err(error) => Err(AuthError::rejected(self.id.as_str(), format!("{}: {error}", self.dir.display()))),
        }
    }
}
