//! Picker consumers for the two subcommands.
//!
//! Each consumer records its outcome and raises the shared `finished` signal
//! that ends the TUI session.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use tracing::info;
use vellum_picker::{OpenHandler, SaveHandler, WriteBack};
use vellum_types::FileRef;

/// Keeps the content of the first file opened.
pub struct OpenCapture {
    opened: Mutex<Option<String>>,
    finished: Arc<Notify>,
}

impl OpenCapture {
    pub fn new(finished: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            opened: Mutex::new(None),
            finished,
        })
    }

    pub fn take(&self) -> Option<String> {
        self.opened.lock().expect("open capture lock poisoned").take()
    }
}

#[async_trait]
impl OpenHandler for OpenCapture {
    async fn on_open(&self, content: String, file: Option<FileRef>) {
        let source = file.as_ref().map_or("device file", |file| file.path());
        info!(source, bytes = content.len(), "document opened");
        *self.opened.lock().expect("open capture lock poisoned") = Some(content);
        self.finished.notify_one();
    }
}

/// Commits a fixed document and remembers where it landed.
///
/// A failed write leaves the picker open so the user can choose another target.
pub struct SaveDocument {
    content: String,
    saved_to: Mutex<Option<String>>,
    finished: Arc<Notify>,
}

impl SaveDocument {
    pub fn new(content: String, finished: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            content,
            saved_to: Mutex::new(None),
            finished,
        })
    }

    pub fn saved_to(&self) -> Option<String> {
        self.saved_to.lock().expect("save capture lock poisoned").clone()
    }
}

#[async_trait]
impl SaveHandler for SaveDocument {
    async fn on_save(&self, write_back: WriteBack) {
        if let Ok(file) = write_back.commit(&self.content).await {
            *self.saved_to.lock().expect("save capture lock poisoned") = Some(file.path().to_string());
            self.finished.notify_one();
        }
    }
}
