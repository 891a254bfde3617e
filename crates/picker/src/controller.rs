//! Navigation and selection controller.
//!
//! The controller keeps a stack of listed folder pages and decides what a
//! selection means in the current mode: opening reads the file and hands its
//! content to the open consumer; saving hands the save consumer a
//! [`WriteBack`] aimed at the chosen (or new) file. Every backend call is
//! bracketed by the loading flag, and every backend failure is logged and
//! shown to the user before the typed error is returned.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use vellum_types::{
    AuthStatus, BackendError, BackendId, BackendKind, BackendView, DialogHost, Entry, EntryView, FileRef, FolderRef, LOCAL_STORAGE_LABEL,
    PageView, PickerCommand, PickerMode, PickerSnapshot, Severity,
};
use vellum_util::validate_file_name;

use crate::auth::{AuthSlot, Claim};
use crate::backends::Backends;
use crate::error::PickerError;
use crate::handlers::{CancelHandler, OpenHandler, SaveHandler};
use crate::write_back::WriteBack;

/// One level of navigation history.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub folder: FolderRef,
    pub items: Vec<Entry>,
}

impl Page {
    fn view(&self) -> PageView {
        PageView {
            title: self.title.clone(),
            path: self.folder.path().to_string(),
            entries: self
                .items
                .iter()
                .map(|entry| EntryView {
                    name: entry.name().to_string(),
                    path: entry.path().to_string(),
                    kind: entry.kind(),
                })
                .collect(),
        }
    }
}

#[derive(Default)]
struct PickerState {
    pages: Vec<Page>,
    in_flight: usize,
    handled: u64,
    slots: IndexMap<BackendId, AuthSlot>,
}

/// The picker's state machine. Share it behind an `Arc`; all operations take `&self`.
pub struct FilePicker {
    mode: PickerMode,
    backends: Backends,
    dialogs: Arc<dyn DialogHost>,
    on_open: Option<Arc<dyn OpenHandler>>,
    on_save: Option<Arc<dyn SaveHandler>>,
    on_cancel: Option<CancelHandler>,
    default_file_name: String,
    state: Mutex<PickerState>,
    snapshots: watch::Sender<PickerSnapshot>,
}

/// Configures the consumers of a [`FilePicker`].
pub struct FilePickerBuilder {
    mode: PickerMode,
    backends: Backends,
    dialogs: Arc<dyn DialogHost>,
    on_open: Option<Arc<dyn OpenHandler>>,
    on_save: Option<Arc<dyn SaveHandler>>,
    on_cancel: Option<CancelHandler>,
    default_file_name: String,
}

impl FilePickerBuilder {
    pub fn on_open(mut self, handler: Arc<dyn OpenHandler>) -> Self {
        self.on_open = Some(handler);
        self
    }

    pub fn on_save(mut self, handler: Arc<dyn SaveHandler>) -> Self {
        self.on_save = Some(handler);
        self
    }

    pub fn on_cancel(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Box::new(handler));
        self
    }

    /// Text pre-filled in the new file name prompt (`.json` unless set).
    pub fn default_file_name(mut self, name: impl Into<String>) -> Self {
        self.default_file_name = name.into();
        self
    }

    pub fn build(self) -> FilePicker {
        let slots = self
            .backends
            .remotes()
            .map(|client| (client.id().clone(), AuthSlot::for_client(client.as_ref())))
            .collect();
        let state = PickerState {
            slots,
            ..PickerState::default()
        };
        let (snapshots, _) = watch::channel(PickerSnapshot::default());
        let picker = FilePicker {
            mode: self.mode,
            backends: self.backends,
            dialogs: self.dialogs,
            on_open: self.on_open,
            on_save: self.on_save,
            on_cancel: self.on_cancel,
            default_file_name: self.default_file_name,
            state: Mutex::new(state),
            snapshots,
        };
        picker.publish();
        picker
    }
}

/// Raises the loading flag for its lifetime.
struct LoadingGuard<'a> {
    picker: &'a FilePicker,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.picker.update_state(|state| state.in_flight = state.in_flight.saturating_sub(1));
    }
}

impl FilePicker {
    pub fn builder(mode: PickerMode, backends: Backends, dialogs: Arc<dyn DialogHost>) -> FilePickerBuilder {
        FilePickerBuilder {
            mode,
            backends,
            dialogs,
            on_open: None,
            on_save: None,
            on_cancel: None,
            default_file_name: ".json".to_string(),
        }
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    /// Current state as an immutable snapshot.
    pub fn snapshot(&self) -> PickerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<PickerSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().in_flight > 0
    }

    pub fn depth(&self) -> usize {
        self.lock().pages.len()
    }

    /// The page on top of the stack.
    pub fn current_page(&self) -> Option<Page> {
        self.lock().pages.last().cloned()
    }

    /// Authentication state of a backend; the local store never needs a login.
    pub fn auth_status(&self, id: &BackendId) -> Option<AuthStatus> {
        if *id == BackendId::local() {
            return Some(AuthStatus::Always);
        }
        self.lock().slots.get(id).map(AuthSlot::status)
    }

    /// Runs a gesture forwarded by the presentation layer.
    ///
    /// Gestures aimed at a different stack depth than the current one are
    /// stale and ignored. Every command, run or ignored, bumps the handled
    /// counter of the next snapshot.
    pub async fn execute(&self, command: PickerCommand) -> Result<(), PickerError> {
        let outcome = match command.depth() {
            Some(depth) if depth != self.depth() => {
                debug!(?command, current = self.depth(), "ignoring command aimed at another page");
                Ok(())
            }
            _ => self.run(command).await,
        };
        self.update_state(|state| state.handled += 1);
        outcome
    }

    async fn run(&self, command: PickerCommand) -> Result<(), PickerError> {
        match command {
            PickerCommand::OpenBackend(id) => self.open_backend(&id).await,
            PickerCommand::OpenDevice => self.import_from_device().await,
            PickerCommand::Select { index, .. } => self.select_entry(index).await,
            PickerCommand::Pop { .. } => {
                self.pop();
                Ok(())
            }
            PickerCommand::CreateNew { .. } => self.create_new_file().await,
            PickerCommand::Cancel => {
                self.cancel();
                Ok(())
            }
        }
    }

    /// Removes the last page. Returns `false` when already on the root view.
    pub fn pop(&self) -> bool {
        let popped = self.update_state(|state| state.pages.pop());
        match popped {
            Some(page) => {
                debug!(title = %page.title, "popped page");
                true
            }
            None => false,
        }
    }

    pub fn cancel(&self) {
        debug!("picker cancelled");
        if let Some(on_cancel) = &self.on_cancel {
            on_cancel();
        }
    }

    /// Resolves the root of `id`, logging in first when the backend requires it.
    pub async fn open_backend(&self, id: &BackendId) -> Result<(), PickerError> {
        let root = if *id == BackendId::local() {
            self.backends.local().clone()
        } else {
            self.ensure_authenticated(id).await?
        };
        self.list_folder(root).await
    }

    /// Returns the root of a remote backend, running its login flow at most once.
    ///
    /// Concurrent callers for the same backend share the in-flight login.
    pub async fn ensure_authenticated(&self, id: &BackendId) -> Result<FolderRef, PickerError> {
        let client = self
            .backends
            .remote(id)
            .cloned()
            .ok_or_else(|| PickerError::unknown_backend(id.as_str()))?;

        let claim = self.update_state(|state| state.slots.entry(id.clone()).or_insert(AuthSlot::Unauthenticated).claim(&client));
        let (login, leading) = match claim {
            Claim::Ready(root) => return Ok(root),
            Claim::Join(login) => (login, false),
            Claim::Lead(login) => (login, true),
        };

        if leading {
            info!(backend = %id, "logging in");
            self.dialogs
                .alert(Severity::Info, &format!("Logging in to {}.", client.label()))
                .await;
        }
        let outcome = login.clone().await;
        self.update_state(|state| {
            if let Some(slot) = state.slots.get_mut(id) {
                slot.settle(&login, &outcome);
            }
        });

        match outcome {
            Ok(root) => {
                if leading {
                    info!(backend = %id, "logged in");
                    self.dialogs
                        .alert(Severity::Success, &format!("Logged in to {}.", client.label()))
                        .await;
                }
                Ok(root)
            }
            Err(error) => {
                let error = PickerError::from(error);
                if leading {
                    return Err(self.report(error).await);
                }
                Err(error)
            }
        }
    }

    /// Lists `folder` and pushes it as a new page. The stack is untouched on failure.
    pub async fn list_folder(&self, folder: FolderRef) -> Result<(), PickerError> {
        let listed = {
            let _loading = self.begin_loading();
            match folder.list().await {
                Ok(items) => {
                    debug!(path = %folder.path(), entries = items.len(), "listed folder");
                    self.update_state(|state| {
                        state.pages.push(Page {
                            title: folder.name().to_string(),
                            folder: folder.clone(),
                            items,
                        })
                    });
                    Ok(())
                }
                Err(source) => Err(PickerError::list(folder.path(), source)),
            }
        };
        match listed {
            Ok(()) => Ok(()),
            Err(error) => Err(self.report(error).await),
        }
    }

    /// Activates the entry at `index` of the current page.
    pub async fn select_entry(&self, index: usize) -> Result<(), PickerError> {
        let entry = self.lock().pages.last().and_then(|page| page.items.get(index).cloned());
        match entry {
            Some(Entry::Folder(folder)) => self.list_folder(folder).await,
            Some(Entry::File(file)) => self.select_file(file).await,
            None => {
                debug!(index, "selection outside the current page ignored");
                Ok(())
            }
        }
    }

    /// Opens or overwrites `file`, depending on the mode.
    pub async fn select_file(&self, file: FileRef) -> Result<(), PickerError> {
        match self.mode {
            PickerMode::Open => self.open_file(file).await,
            PickerMode::Save => {
                self.confirm_overwrite(file).await;
                Ok(())
            }
        }
    }

    /// Prompts for a name and saves into the current folder.
    ///
    /// A name matching an existing file of the current page (exact,
    /// case-sensitive, files only) goes through the overwrite confirmation.
    pub async fn create_new_file(&self) -> Result<(), PickerError> {
        if self.mode != PickerMode::Save {
            return Ok(());
        }
        let Some(on_save) = self.on_save.clone() else {
            return Ok(());
        };
        let Some(page) = self.current_page() else {
            return Ok(());
        };
        let Some(name) = self.dialogs.prompt("New file name", &self.default_file_name).await else {
            debug!("new file prompt cancelled");
            return Ok(());
        };
        if let Err(error) = validate_file_name(&name) {
            debug!(%error, "rejected file name");
            self.dialogs.alert(Severity::Warning, &error.to_string()).await;
            return Err(error.into());
        }

        let existing = page.items.iter().filter_map(Entry::as_file).find(|file| file.name() == name).cloned();
        if let Some(file) = existing {
            self.confirm_overwrite(file).await;
            return Ok(());
        }

        let _loading = self.begin_loading();
        on_save.on_save(WriteBack::create(page.folder, name, self.dialogs.clone())).await;
        Ok(())
    }

    /// Reads a file from the device and hands it to the open consumer without a backend handle.
    pub async fn import_from_device(&self) -> Result<(), PickerError> {
        if self.mode != PickerMode::Open {
            return Ok(());
        }
        let (Some(device), Some(on_open)) = (self.backends.device().cloned(), self.on_open.clone()) else {
            return Ok(());
        };
        match device.import().await {
            Ok(content) => {
                info!(bytes = content.len(), "imported device file");
                on_open.on_open(content, None).await;
                Ok(())
            }
            Err(BackendError::Cancelled) => {
                debug!("device import cancelled");
                Ok(())
            }
            Err(source) => Err(self.report(PickerError::read("device file", source)).await),
        }
    }

    async fn open_file(&self, file: FileRef) -> Result<(), PickerError> {
        let Some(on_open) = self.on_open.clone() else {
            return Ok(());
        };
        let read = {
            let _loading = self.begin_loading();
            file.read().await
        };
        match read {
            Ok(content) => {
                info!(path = %file.path(), bytes = content.len(), "opened file");
                on_open.on_open(content, Some(file)).await;
                Ok(())
            }
            Err(source) => Err(self.report(PickerError::read(file.path(), source)).await),
        }
    }

    async fn confirm_overwrite(&self, file: FileRef) {
        let Some(on_save) = self.on_save.clone() else {
            return;
        };
        let message = format!("{} already exists. Overwrite it?", file.path());
        if !self.dialogs.confirm("Overwrite file", &message).await {
            debug!(path = %file.path(), "overwrite declined");
            return;
        }
        let _loading = self.begin_loading();
        on_save.on_save(WriteBack::overwrite(file, self.dialogs.clone())).await;
    }

    async fn report(&self, error: PickerError) -> PickerError {
        warn!(%error, "picker operation failed");
        self.dialogs.alert(Severity::Error, &error.to_string()).await;
        error
    }

    fn begin_loading(&self) -> LoadingGuard<'_> {
        self.update_state(|state| state.in_flight += 1);
        LoadingGuard { picker: self }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PickerState> {
        self.state.lock().expect("picker state lock poisoned")
    }

    /// Applies `change` and publishes the resulting snapshot.
    fn update_state<T>(&self, change: impl FnOnce(&mut PickerState) -> T) -> T {
        let mut state = self.lock();
        let result = change(&mut state);
        self.snapshots.send_replace(self.build_snapshot(&state));
        result
    }

    fn publish(&self) {
        self.update_state(|_| ());
    }

    fn build_snapshot(&self, state: &PickerState) -> PickerSnapshot {
        let local = BackendView {
            id: BackendId::local(),
            label: LOCAL_STORAGE_LABEL.to_string(),
            kind: BackendKind::Local,
            auth: AuthStatus::Always,
        };
        let remotes = self.backends.remotes().map(|client| BackendView {
            id: client.id().clone(),
            label: client.label().to_string(),
            kind: client.kind(),
            auth: state
                .slots
                .get(client.id())
                .map_or(AuthStatus::Unauthenticated, AuthSlot::status),
        });
        PickerSnapshot {
            mode: self.mode,
            loading: state.in_flight > 0,
            backends: std::iter::once(local).chain(remotes).collect(),
            device_import: self.mode == PickerMode::Open && self.backends.device().is_some(),
            pages: state.pages.iter().map(Page::view).collect(),
            handled: state.handled,
        }
    }
}
