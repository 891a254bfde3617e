//! Channel-backed dialog host for event-loop driven presentation layers.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;
use vellum_types::{DialogHost, DialogRequest, DialogResponse};

/// A dialog waiting for the user, together with the way to answer it.
#[derive(Debug)]
pub struct PendingDialog {
    request: DialogRequest,
    responder: oneshot::Sender<DialogResponse>,
}

impl PendingDialog {
    pub fn request(&self) -> &DialogRequest {
        &self.request
    }

    /// Resolves the dialog. The requester may already be gone, which is not an error.
    pub fn respond(self, response: DialogResponse) {
        let _ = self.responder.send(response);
    }
}

/// Forwards every request over an mpsc channel and waits for the answer.
///
/// Dropping a [`PendingDialog`] unanswered, or the receiving end, resolves the
/// request as declined or cancelled.
#[derive(Debug, Clone)]
pub struct ChannelDialogs {
    sender: mpsc::Sender<PendingDialog>,
}

impl ChannelDialogs {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<PendingDialog>) {
        let (sender, receiver) = mpsc::channel(buffer);
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl DialogHost for ChannelDialogs {
    async fn request(&self, request: DialogRequest) -> DialogResponse {
        let fallback = unanswered(&request);
        let (responder, answer) = oneshot::channel();
        if self.sender.send(PendingDialog { request, responder }).await.is_err() {
            debug!("dialog receiver closed");
            return fallback;
        }
        answer.await.unwrap_or(fallback)
    }
}

fn unanswered(request: &DialogRequest) -> DialogResponse {
    match request {
        DialogRequest::Confirm { .. } => DialogResponse::Confirmed(false),
        DialogRequest::Prompt { .. } => DialogResponse::Text(None),
        DialogRequest::Alert { .. } => DialogResponse::Dismissed,
    }
}
