//! Storage providers implementing the Vellum folder/file capability set.
//!
//! - [`LocalStore`]: JSON-file document store, always available.
//! - [`DirFolder`] / [`DirFile`]: plain directories on the local filesystem.
//! - [`MountClient`]: a directory exposed behind the remote login contract.
//! - [`FsDeviceImport`]: one-shot import of a file picked by path.

mod device;
mod directory;
mod local_store;
mod mount;

pub use device::FsDeviceImport;
pub use directory::{DirFile, DirFolder};
pub use local_store::{LocalStore, StoreError};
pub use mount::MountClient;
