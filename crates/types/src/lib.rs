//! Shared type definitions for the Vellum picker.
//!
//! The storage capability contracts (`FolderEntry`, `FileEntry`, `RemoteClient`,
//! `DeviceSource`), the dialog request/response protocol, and the immutable
//! snapshots handed to presentation layers all live here so that backends,
//! the controller, and the terminal UI can depend on one small crate.

mod command;
mod dialog;
mod entry;
mod error;
mod snapshot;

pub use command::PickerCommand;
pub use dialog::{DialogHost, DialogRequest, DialogResponse, Severity};
pub use entry::{LOCAL_STORAGE_LABEL, BackendId, BackendKind, DeviceSource, Entry, EntryKind, FileEntry, FileRef, FolderEntry, FolderRef, RemoteClient};
pub use error::{AuthError, BackendError};
pub use snapshot::{AuthStatus, BackendView, EntryView, PageView, PickerMode, PickerSnapshot};
