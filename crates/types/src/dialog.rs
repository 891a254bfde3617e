//! Modal dialog request/response protocol.
//!
//! The controller never blocks on a native prompt. It issues a
//! [`DialogRequest`] to a [`DialogHost`] and suspends until the host resolves
//! it, which keeps it portable to event-loop driven toolkits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Visual weight of an alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A single modal interaction the host must resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogRequest {
    /// Yes/no question.
    Confirm { title: String, message: String },
    /// Free-text input seeded with `initial`.
    Prompt { title: String, initial: String },
    /// Notice that only needs acknowledging.
    Alert { severity: Severity, message: String },
}

/// The host's answer to a [`DialogRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResponse {
    Confirmed(bool),
    /// Submitted text, or `None` when the prompt was cancelled.
    Text(Option<String>),
    Dismissed,
}

/// Anything able to present modal dialogs and report the user's answer.
#[async_trait]
pub trait DialogHost: Send + Sync {
    async fn request(&self, request: DialogRequest) -> DialogResponse;

    /// Asks a yes/no question; anything but an explicit "yes" counts as declined.
    async fn confirm(&self, title: &str, message: &str) -> bool {
        let request = DialogRequest::Confirm {
            title: title.to_string(),
            message: message.to_string(),
        };
        matches!(self.request(request).await, DialogResponse::Confirmed(true))
    }

    async fn prompt(&self, title: &str, initial: &str) -> Option<String> {
        let request = DialogRequest::Prompt {
            title: title.to_string(),
            initial: initial.to_string(),
        };
        match self.request(request).await {
            DialogResponse::Text(text) => text,
            _ => None,
        }
    }

    async fn alert(&self, severity: Severity, message: &str) {
        let request = DialogRequest::Alert {
            severity,
            message: message.to_string(),
        };
        let _ = self.request(request).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(DialogResponse);

    #[async_trait]
    impl DialogHost for Fixed {
        async fn request(&self, _request: DialogRequest) -> DialogResponse {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn confirm_requires_explicit_yes() {
        assert!(Fixed(DialogResponse::Confirmed(true)).confirm("t", "m").await);
        assert!(!Fixed(DialogResponse::Confirmed(false)).confirm("t", "m").await);
        assert!(!Fixed(DialogResponse::Dismissed).confirm("t", "m").await);
    }

    #[tokio::test]
    async fn prompt_treats_mismatched_answers_as_cancelled() {
        let host = Fixed(DialogResponse::Text(Some("notes.json".into())));
        assert_eq!(host.prompt("Name", ".json").await.as_deref(), Some("notes.json"));
        assert_eq!(Fixed(DialogResponse::Confirmed(true)).prompt("Name", "").await, None);
    }
}
