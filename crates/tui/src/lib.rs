//! # Vellum TUI
//!
//! Terminal front end for the file picker. It renders the snapshots a
//! [`FilePicker`](vellum_picker::FilePicker) publishes, answers its dialog
//! requests with modals, and forwards key presses as picker commands.
//!
//! The UI holds no navigation state of its own beyond the highlighted row, so
//! the same controller can be driven by any other front end.

mod app;
mod ui;

pub use app::{App, DialogView, Effect, Msg};
pub use ui::icons::{SPINNER_FRAMES, backend_icon, icon};
pub use ui::runtime::run_app;
