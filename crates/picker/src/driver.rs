use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use vellum_types::PickerCommand;

use crate::controller::FilePicker;

/// Runs commands against `picker` one at a time until the sender side closes.
///
/// Failures have already been reported to the user by the controller, so the
/// loop only logs them and moves on to the next gesture.
pub fn spawn_driver(picker: Arc<FilePicker>, mut commands: mpsc::Receiver<PickerCommand>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            debug!(?command, "running picker command");
            if let Err(error) = picker.execute(command).await {
                debug!(%error, "picker command failed");
            }
        }
        debug!("picker driver stopped");
    })
}
