//! Immutable views of the picker state handed to rendering layers.

use serde::{Deserialize, Serialize};

use crate::entry::{BackendId, BackendKind, EntryKind};

/// Which workflow the picker is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerMode {
    #[default]
    Open,
    Save,
}

impl PickerMode {
    /// Title of the root page.
    pub fn title(&self) -> &'static str {
        match self {
            PickerMode::Open => "Open file",
            PickerMode::Save => "Save as",
        }
    }
}

/// Authentication sub-state of a backend as seen by the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthStatus {
    /// No login required.
    #[default]
    Always,
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// A backend row on the root page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendView {
    pub id: BackendId,
    pub label: String,
    pub kind: BackendKind,
    pub auth: AuthStatus,
}

/// A listed entry with its handle stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
}

/// One navigation level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub path: String,
    pub entries: Vec<EntryView>,
}

/// Point-in-time copy of everything a renderer needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerSnapshot {
    pub mode: PickerMode,
    pub loading: bool,
    pub backends: Vec<BackendView>,
    /// Whether the "import from device" row is offered.
    pub device_import: bool,
    pub pages: Vec<PageView>,
    /// Number of commands the controller has finished executing.
    pub handled: u64,
}

impl PickerSnapshot {
    /// The page currently on top of the stack, or `None` on the root view.
    pub fn current_page(&self) -> Option<&PageView> {
        self.pages.last()
    }

    pub fn depth(&self) -> usize {
        self.pages.len()
    }
}
