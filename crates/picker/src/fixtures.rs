//! Scripted collaborators shared by the controller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use vellum_types::{
    AuthError, BackendError, BackendId, BackendKind, DialogHost, DialogRequest, DialogResponse, Entry, FileEntry, FileRef,
    FolderEntry, FolderRef, RemoteClient,
};

use crate::error::PickerError;
use crate::handlers::{OpenHandler, SaveHandler};
use crate::write_back::WriteBack;

/// Answers dialogs from a fixed script and records every request.
///
/// Alerts never consume the script. Once the script runs dry, confirmations
/// are declined and prompts cancelled.
pub(crate) struct ScriptedDialogs {
    script: Mutex<VecDeque<DialogResponse>>,
    requests: Mutex<Vec<DialogRequest>>,
}

impl ScriptedDialogs {
    pub(crate) fn new(script: Vec<DialogResponse>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<DialogRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Messages of the alerts shown so far.
    pub(crate) fn alerts(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|request| match request {
                DialogRequest::Alert { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl DialogHost for ScriptedDialogs {
    async fn request(&self, request: DialogRequest) -> DialogResponse {
        self.requests.lock().unwrap().push(request.clone());
        match request {
            DialogRequest::Alert { .. } => DialogResponse::Dismissed,
            DialogRequest::Confirm { .. } => self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(DialogResponse::Confirmed(false)),
            DialogRequest::Prompt { .. } => self.script.lock().unwrap().pop_front().unwrap_or(DialogResponse::Text(None)),
        }
    }
}

/// Counters and hooks shared by every entry of a recording tree.
#[derive(Default)]
pub(crate) struct Calls {
    lists: AtomicUsize,
    reads: AtomicUsize,
    updates: Mutex<Vec<(String, String)>>,
    creates: Mutex<Vec<(String, String)>>,
    failure: Mutex<Option<BackendError>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl Calls {
    pub(crate) fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn updates(&self) -> Vec<(String, String)> {
        self.updates.lock().unwrap().clone()
    }

    pub(crate) fn creates(&self) -> Vec<(String, String)> {
        self.creates.lock().unwrap().clone()
    }

    /// Makes the next backend call fail with `error`.
    pub(crate) fn fail_next(&self, error: BackendError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Holds every subsequent backend call until the returned gate is notified.
    pub(crate) fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    async fn enter(&self) -> Result<(), BackendError> {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        tokio::task::yield_now().await;
        match self.failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
struct MockFile {
    name: String,
    path: String,
    content: Mutex<String>,
    calls: Arc<Calls>,
}

impl std::fmt::Debug for Calls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calls").field("lists", &self.lists()).field("reads", &self.reads()).finish()
    }
}

#[async_trait]
impl FileEntry for MockFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    async fn read(&self) -> Result<String, BackendError> {
        self.calls.reads.fetch_add(1, Ordering::SeqCst);
        self.calls.enter().await?;
        Ok(self.content.lock().unwrap().clone())
    }

    async fn update(&self, content: &str) -> Result<(), BackendError> {
        self.calls.enter().await?;
        self.calls.updates.lock().unwrap().push((self.path.clone(), content.to_string()));
        *self.content.lock().unwrap() = content.to_string();
        Ok(())
    }
}

#[derive(Debug)]
struct MockFolder {
    name: String,
    path: String,
    children: Vec<Entry>,
    calls: Arc<Calls>,
}

#[async_trait]
impl FolderEntry for MockFolder {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    async fn list(&self) -> Result<Vec<Entry>, BackendError> {
        self.calls.lists.fetch_add(1, Ordering::SeqCst);
        self.calls.enter().await?;
        Ok(self.children.clone())
    }

    async fn create(&self, name: &str, content: &str) -> Result<FileRef, BackendError> {
        self.calls.enter().await?;
        self.calls.creates.lock().unwrap().push((name.to_string(), content.to_string()));
        Ok(Arc::new(MockFile {
            name: name.to_string(),
            path: format!("{}/{name}", self.path),
            content: Mutex::new(content.to_string()),
            calls: self.calls.clone(),
        }))
    }
}

/// Folder at `/mock` whose children are `names`, in order.
///
/// A name ending in `/` becomes an empty sub-folder; every other name is a
/// file whose content is `content of <name>`.
pub(crate) fn recording_folder(names: &[&str]) -> (FolderRef, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    let folder = build_folder("mock", "/mock", names, &calls);
    (folder, calls)
}

fn build_folder(name: &str, path: &str, names: &[&str], calls: &Arc<Calls>) -> FolderRef {
    let children = names
        .iter()
        .map(|child| match child.strip_suffix('/') {
            Some(folder) => Entry::Folder(build_folder(folder, &format!("{path}/{folder}"), &[], calls)),
            None => Entry::File(Arc::new(MockFile {
                name: child.to_string(),
                path: format!("{path}/{child}"),
                content: Mutex::new(format!("content of {child}")),
                calls: calls.clone(),
            })),
        })
        .collect();
    Arc::new(MockFolder {
        name: name.to_string(),
        path: path.to_string(),
        children,
        calls: calls.clone(),
    })
}

/// Remote whose login yields once, then resolves to a fixed root.
pub(crate) struct MockRemote {
    id: BackendId,
    root: FolderRef,
    logins: AtomicUsize,
    rejections: Mutex<VecDeque<AuthError>>,
}

impl MockRemote {
    pub(crate) fn new(id: &str, root: FolderRef) -> Arc<Self> {
        Arc::new(Self {
            id: BackendId::new(id),
            root,
            logins: AtomicUsize::new(0),
            rejections: Mutex::new(VecDeque::new()),
        })
    }

    pub(crate) fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    /// Makes the next login attempt fail with `error`.
    pub(crate) fn reject_next(&self, error: AuthError) {
        self.rejections.lock().unwrap().push_back(error);
    }
}

#[async_trait]
impl RemoteClient for MockRemote {
    fn id(&self) -> &BackendId {
        &self.id
    }

    fn label(&self) -> &str {
        "Mock Drive"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::CloudDrive
    }

    async fn log_in(&self) -> Result<FolderRef, AuthError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        match self.rejections.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(self.root.clone()),
        }
    }
}

/// Records every delivered `(content, file path)` pair.
#[derive(Default)]
pub(crate) struct OpenRecorder {
    opened: Mutex<Vec<(String, Option<String>)>>,
}

impl OpenRecorder {
    pub(crate) fn opened(&self) -> Vec<(String, Option<String>)> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl OpenHandler for OpenRecorder {
    async fn on_open(&self, content: String, file: Option<FileRef>) {
        let path = file.map(|file| file.path().to_string());
        self.opened.lock().unwrap().push((content, path));
    }
}

/// Commits a fixed body through every write-back it receives.
pub(crate) struct SaveRecorder {
    content: String,
    saved: Mutex<Vec<Result<String, PickerError>>>,
}

impl SaveRecorder {
    pub(crate) fn new(content: &str) -> Arc<Self> {
        Arc::new(Self {
            content: content.to_string(),
            saved: Mutex::new(Vec::new()),
        })
    }

    /// Outcome of each commit, as the written path.
    pub(crate) fn saved(&self) -> Vec<Result<String, PickerError>> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveHandler for SaveRecorder {
    async fn on_save(&self, write_back: WriteBack) {
        let outcome = write_back
            .commit(&self.content)
            .await
            .map(|file| file.path().to_string());
        self.saved.lock().unwrap().push(outcome);
    }
}
