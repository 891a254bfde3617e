//! Consumer callbacks configured by whoever embeds the picker.

use async_trait::async_trait;
use vellum_types::FileRef;

use crate::write_back::WriteBack;

/// Receives the content of a file chosen in open mode.
#[async_trait]
pub trait OpenHandler: Send + Sync {
    /// `file` is `None` for device imports, which no backend tracks.
    async fn on_open(&self, content: String, file: Option<FileRef>);
}

/// Receives the single-use write-back for a save target.
#[async_trait]
pub trait SaveHandler: Send + Sync {
    /// Supply the content by calling [`WriteBack::commit`] before returning.
    async fn on_save(&self, write_back: WriteBack);
}

/// Invoked when the user dismisses the picker.
pub type CancelHandler = Box<dyn Fn() + Send + Sync>;
