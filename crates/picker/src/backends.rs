use std::sync::Arc;

use indexmap::IndexMap;
use vellum_types::{BackendId, DeviceSource, FolderRef, RemoteClient};

/// The storage backends offered on the picker's root page.
///
/// The local root is always present; remotes are listed in registration order.
#[derive(Clone)]
pub struct Backends {
    local: FolderRef,
    remotes: IndexMap<BackendId, Arc<dyn RemoteClient>>,
    device: Option<Arc<dyn DeviceSource>>,
}

impl Backends {
    pub fn new(local: FolderRef) -> Self {
        Self {
            local,
            remotes: IndexMap::new(),
            device: None,
        }
    }

    /// Registers a remote backend. A later client with the same id replaces the earlier one.
    pub fn with_remote(mut self, client: Arc<dyn RemoteClient>) -> Self {
        self.remotes.insert(client.id().clone(), client);
        self
    }

    pub fn with_device(mut self, device: Arc<dyn DeviceSource>) -> Self {
        self.device = Some(device);
        self
    }

    pub fn local(&self) -> &FolderRef {
        &self.local
    }

    pub fn remote(&self, id: &BackendId) -> Option<&Arc<dyn RemoteClient>> {
        self.remotes.get(id)
    }

    pub fn remotes(&self) -> impl Iterator<Item = &Arc<dyn RemoteClient>> {
        self.remotes.values()
    }

    pub fn device(&self) -> Option<&Arc<dyn DeviceSource>> {
        self.device.as_ref()
    }
}
