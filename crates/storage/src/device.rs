use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use vellum_types::{BackendError, DeviceSource, DialogHost};
use vellum_util::expand_tilde;

/// Imports a file from the device by asking the user for its path.
pub struct FsDeviceImport {
    dialogs: Arc<dyn DialogHost>,
}

impl FsDeviceImport {
    pub fn new(dialogs: Arc<dyn DialogHost>) -> Self {
        Self { dialogs }
    }
}

#[async_trait]
impl DeviceSource for FsDeviceImport {
    async fn import(&self) -> Result<String, BackendError> {
        let Some(input) = self.dialogs.prompt("Path of the file to import", "").await else {
            return Err(BackendError::Cancelled);
        };
        if input.trim().is_empty() {
            return Err(BackendError::Cancelled);
        }
        let path = expand_tilde(&input);
        debug!(path = %path.display(), "importing device file");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|error| BackendError::from_io(path.display().to_string(), error))
    }
}
