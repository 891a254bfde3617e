use crate::entry::BackendId;

/// User gestures forwarded from a presentation layer to the picker driver.
///
/// Page-relative gestures carry the stack depth the user was looking at, so a
/// gesture that arrives after the stack moved can be recognised and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerCommand {
    /// Authenticate if needed, then list the root of the backend.
    OpenBackend(BackendId),
    /// Import a file from the device (open mode only).
    OpenDevice,
    /// Activate the entry at `index` of the page at `depth`.
    Select { depth: usize, index: usize },
    /// Leave the page at `depth`.
    Pop { depth: usize },
    /// Save into a new (or colliding) file in the folder at `depth`.
    CreateNew { depth: usize },
    /// Dismiss the picker.
    Cancel,
}

impl PickerCommand {
    /// Stack depth the gesture was aimed at; the root view is depth 0.
    ///
    /// `None` for gestures that apply wherever the picker is.
    pub fn depth(&self) -> Option<usize> {
        match self {
            PickerCommand::OpenBackend(_) | PickerCommand::OpenDevice => Some(0),
            PickerCommand::Select { depth, .. } | PickerCommand::Pop { depth } | PickerCommand::CreateNew { depth } => Some(*depth),
            PickerCommand::Cancel => None,
        }
    }
}
