//! Per-remote authentication slots.

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use vellum_types::{AuthError, AuthStatus, FolderRef, RemoteClient};

/// A login in progress, shared by every caller that asks for the same backend.
pub(crate) type LoginFuture = Shared<BoxFuture<'static, Result<FolderRef, AuthError>>>;

/// Authentication state of one remote backend.
#[derive(Clone)]
pub(crate) enum AuthSlot {
    Unauthenticated,
    Authenticating(LoginFuture),
    Authenticated(FolderRef),
}

/// What a caller must do after inspecting a slot.
pub(crate) enum Claim {
    /// Root already known.
    Ready(FolderRef),
    /// Another caller started the login; wait for it.
    Join(LoginFuture),
    /// This caller started the login and owns its notifications.
    Lead(LoginFuture),
}

impl AuthSlot {
    pub(crate) fn for_client(client: &dyn RemoteClient) -> Self {
        client.cached_root().map_or(AuthSlot::Unauthenticated, AuthSlot::Authenticated)
    }

    pub(crate) fn status(&self) -> AuthStatus {
        match self {
            AuthSlot::Unauthenticated => AuthStatus::Unauthenticated,
            AuthSlot::Authenticating(_) => AuthStatus::Authenticating,
            AuthSlot::Authenticated(_) => AuthStatus::Authenticated,
        }
    }

    /// Resolves the slot for a caller, starting a login when none is running.
    pub(crate) fn claim(&mut self, client: &Arc<dyn RemoteClient>) -> Claim {
        match self {
            AuthSlot::Authenticated(root) => Claim::Ready(root.clone()),
            AuthSlot::Authenticating(login) => Claim::Join(login.clone()),
            AuthSlot::Unauthenticated => {
                let client = Arc::clone(client);
                let login = async move { client.log_in().await }.boxed().shared();
                *self = AuthSlot::Authenticating(login.clone());
                Claim::Lead(login)
            }
        }
    }

    /// Records the outcome of `login`.
    ///
    /// A failure only resets the slot while it still holds that same login, so
    /// a late waiter never clobbers a newer attempt.
    pub(crate) fn settle(&mut self, login: &LoginFuture, outcome: &Result<FolderRef, AuthError>) {
        match outcome {
            Ok(root) => *self = AuthSlot::Authenticated(root.clone()),
            Err(_) => {
                if let AuthSlot::Authenticating(current) = self
                    && current.ptr_eq(login)
                {
                    *self = AuthSlot::Unauthenticated;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{MockRemote, recording_folder};

    fn remote() -> Arc<dyn RemoteClient> {
        let (root, _) = recording_folder(&[]);
        MockRemote::new("drive", root)
    }

    fn pending(claim: Claim) -> LoginFuture {
        match claim {
            Claim::Lead(login) | Claim::Join(login) => login,
            Claim::Ready(_) => panic!("expected a login in flight"),
        }
    }

    #[tokio::test]
    async fn joiners_share_the_leaders_login() {
        let client = remote();
        let mut slot = AuthSlot::Unauthenticated;

        let lead = pending(slot.claim(&client));
        assert!(matches!(slot.claim(&client), Claim::Join(ref join) if join.ptr_eq(&lead)));
        assert_eq!(slot.status(), AuthStatus::Authenticating);

        let outcome = lead.clone().await;
        slot.settle(&lead, &outcome);
        assert!(matches!(slot.claim(&client), Claim::Ready(_)));
    }

    #[tokio::test]
    async fn stale_failure_keeps_a_newer_login_running() {
        let (root, _) = recording_folder(&[]);
        let mock = MockRemote::new("drive", root);
        mock.reject_next(AuthError::rejected("drive", "token expired"));
        let client: Arc<dyn RemoteClient> = mock.clone();
        let mut slot = AuthSlot::Unauthenticated;

        let first = pending(slot.claim(&client));
        let joined = first.clone();
        let outcome = first.clone().await;
        assert!(outcome.is_err());
        slot.settle(&first, &outcome);
        assert_eq!(slot.status(), AuthStatus::Unauthenticated);

        let second = pending(slot.claim(&client));
        slot.settle(&joined, &outcome);
        assert_eq!(slot.status(), AuthStatus::Authenticating);
        assert!(matches!(slot.claim(&client), Claim::Join(ref join) if join.ptr_eq(&second)));

        let outcome = second.clone().await;
        slot.settle(&second, &outcome);
        assert_eq!(slot.status(), AuthStatus::Authenticated);
        assert_eq!(mock.logins(), 2);
    }
}
