use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};
use vellum_types::{DialogHost, FileRef, FolderRef, Severity};

use crate::error::PickerError;

enum Target {
    Overwrite(FileRef),
    Create { folder: FolderRef, name: String },
}

/// Single-use callback handed to the save consumer.
///
/// Calling [`commit`](WriteBack::commit) performs exactly one backend write:
/// an `update` of the confirmed file, or a `create` in the current folder.
/// Consuming `self` makes a second write impossible.
pub struct WriteBack {
    target: Target,
    dialogs: Arc<dyn DialogHost>,
}

impl WriteBack {
    pub(crate) fn overwrite(file: FileRef, dialogs: Arc<dyn DialogHost>) -> Self {
        Self {
            target: Target::Overwrite(file),
            dialogs,
        }
    }

    pub(crate) fn create(folder: FolderRef, name: String, dialogs: Arc<dyn DialogHost>) -> Self {
        Self {
            target: Target::Create { folder, name },
            dialogs,
        }
    }

    /// Whether committing replaces an existing file.
    pub fn is_overwrite(&self) -> bool {
        matches!(self.target, Target::Overwrite(_))
    }

    /// Path the content will be written to.
    pub fn target_path(&self) -> String {
        match &self.target {
            Target::Overwrite(file) => file.path().to_string(),
            Target::Create { folder, name } => join_path(folder.path(), name),
        }
    }

    /// Persists `content` and returns the written file.
    ///
    /// Success and failure are both reported to the user before returning.
    pub async fn commit(self, content: &str) -> Result<FileRef, PickerError> {
        let outcome = match self.target {
            Target::Overwrite(file) => match file.update(content).await {
                Ok(()) => {
                    info!(path = %file.path(), bytes = content.len(), "overwrote file");
                    self.dialogs
                        .alert(Severity::Success, &format!("Overwrote {}.", file.path()))
                        .await;
                    Ok(file)
                }
                Err(source) => Err(PickerError::write(file.path(), source)),
            },
            Target::Create { folder, name } => match folder.create(&name, content).await {
                Ok(file) => {
                    info!(path = %file.path(), bytes = content.len(), "created file");
                    self.dialogs
                        .alert(Severity::Success, &format!("Created {}.", file.path()))
                        .await;
                    Ok(file)
                }
                Err(source) => Err(PickerError::write(join_path(folder.path(), &name), source)),
            },
        };
        if let Err(error) = &outcome {
            warn!(%error, "save failed");
            self.dialogs.alert(Severity::Error, &error.to_string()).await;
        }
        outcome
    }
}

impl fmt::Debug for WriteBack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteBack")
            .field("target", &self.target_path())
            .field("overwrite", &self.is_overwrite())
            .finish()
    }
}

fn join_path(folder: &str, name: &str) -> String {
    if folder.ends_with('/') {
        format!("{folder}{name}")
    } else {
        format!("{folder}/{name}")
    }
}
