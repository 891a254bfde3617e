//! # Vellum picker controller
//!
//! [`FilePicker`] owns the picker's state machine: a stack of listed folder
//! pages, a loading flag raised around every backend call, and one lazily
//! authenticated slot per remote backend. Presentation layers read immutable
//! [`PickerSnapshot`](vellum_types::PickerSnapshot)s and feed user gestures
//! back as [`PickerCommand`](vellum_types::PickerCommand)s through
//! [`spawn_driver`].
//!
//! Modal interactions go through a [`DialogHost`](vellum_types::DialogHost);
//! [`ChannelDialogs`] forwards them to an event loop over a channel.

mod auth;
mod backends;
mod controller;
mod dialogs;
mod driver;
mod error;
mod handlers;
mod write_back;

#[cfg(test)]
mod fixtures;

pub use backends::Backends;
pub use controller::{FilePicker, FilePickerBuilder, Page};
pub use dialogs::{ChannelDialogs, PendingDialog};
pub use driver::spawn_driver;
pub use error::PickerError;
pub use handlers::{CancelHandler, OpenHandler, SaveHandler};
pub use write_back::WriteBack;
