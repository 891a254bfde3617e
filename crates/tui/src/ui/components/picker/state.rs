//! Row model of the picker view.

use vellum_types::{AuthStatus, BackendId, BackendKind, EntryKind, PickerCommand, PickerMode, PickerSnapshot};

use crate::ui::icons::{backend_icon, icon};

/// One selectable line of the picker view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Backend {
        id: BackendId,
        label: String,
        kind: BackendKind,
        auth: AuthStatus,
    },
    Device,
    Back,
    Entry {
        index: usize,
        name: String,
        kind: EntryKind,
    },
    CreateNew,
}

impl Row {
    /// Gesture sent to the picker when the row is activated on the page at `depth`.
    pub fn command(&self, depth: usize) -> PickerCommand {
        match self {
            Row::Backend { id, .. } => PickerCommand::OpenBackend(id.clone()),
            Row::Device => PickerCommand::OpenDevice,
            Row::Back => PickerCommand::Pop { depth },
            Row::Entry { index, .. } => PickerCommand::Select { depth, index: *index },
            Row::CreateNew => PickerCommand::CreateNew { depth },
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Row::Backend { kind, .. } => backend_icon(*kind),
            Row::Device => icon("desktop"),
            Row::Back => icon("chevron-left"),
            Row::Entry { kind: EntryKind::Folder, .. } => icon("folder"),
            Row::Entry { kind: EntryKind::File, .. } => icon("file"),
            Row::CreateNew => icon("plus"),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Row::Backend { label, auth, .. } => match auth {
                AuthStatus::Unauthenticated => format!("{label} (log in)"),
                AuthStatus::Authenticating => format!("{label} (logging in…)"),
                AuthStatus::Always | AuthStatus::Authenticated => label.clone(),
            },
            Row::Device => "Device file".to_string(),
            Row::Back => "Back".to_string(),
            Row::Entry { name, .. } => name.clone(),
            Row::CreateNew => "Save as new file".to_string(),
        }
    }
}

/// Rows for the current view: the backend list on the root, otherwise the top page.
pub fn rows(snapshot: &PickerSnapshot) -> Vec<Row> {
    let Some(page) = snapshot.current_page() else {
        let mut rows: Vec<Row> = snapshot
            .backends
            .iter()
            .map(|backend| Row::Backend {
                id: backend.id.clone(),
                label: backend.label.clone(),
                kind: backend.kind,
                auth: backend.auth,
            })
            .collect();
        if snapshot.device_import {
            rows.push(Row::Device);
        }
        return rows;
    };

    let mut rows = Vec::with_capacity(page.entries.len() + 2);
    rows.push(Row::Back);
    rows.extend(page.entries.iter().enumerate().map(|(index, entry)| Row::Entry {
        index,
        name: entry.name.clone(),
        kind: entry.kind,
    }));
    if snapshot.mode == PickerMode::Save {
        rows.push(Row::CreateNew);
    }
    rows
}

/// Highlighted row of every level of the page stack, root included.
#[derive(Debug, Clone, Default)]
pub struct PickerViewState {
    cursors: Vec<usize>,
}

impl PickerViewState {
    /// Follows the page stack: new levels start at the top row, popped levels are forgotten.
    pub fn sync_depth(&mut self, depth: usize) {
        self.cursors.resize(depth + 1, 0);
    }

    /// Highlighted row, clamped to `len` rows.
    pub fn selected(&self, len: usize) -> Option<usize> {
        let cursor = self.cursors.last().copied().unwrap_or_default();
        (len > 0).then(|| cursor.min(len - 1))
    }

    pub fn select_next(&mut self, len: usize) {
        if let Some(current) = self.selected(len) {
            self.set_cursor((current + 1) % len);
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if let Some(current) = self.selected(len) {
            self.set_cursor(current.checked_sub(1).unwrap_or(len - 1));
        }
    }

    fn set_cursor(&mut self, cursor: usize) {
        match self.cursors.last_mut() {
            Some(last) => *last = cursor,
            None => self.cursors.push(cursor),
        }
    }
}
