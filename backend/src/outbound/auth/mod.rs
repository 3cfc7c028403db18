//! Scripted identity provider.
//!
//! Stands in for an interactive provider: each `sign_in` consumes the next
//! scripted outcome, and identity changes are pushed over a watch channel the
//! same way a provider's auth-state listener would push them.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::Identity;
use crate::domain::ports::{Authenticator, AuthenticatorError, LiveQuery};

/// Authenticator adapter driven by queued sign-in outcomes.
///
/// With nothing queued, sign-in behaves as if the user dismissed the prompt.
///
/// # Examples
/// ```
/// use recipe_companion::domain::{Identity, UserId};
/// use recipe_companion::domain::ports::Authenticator;
/// use recipe_companion::outbound::auth::InMemoryAuthenticator;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let auth = InMemoryAuthenticator::new();
/// auth.queue_sign_in(Ok(Identity::new(UserId::random())));
/// let identity = auth.sign_in().await.expect("scripted success");
/// assert_eq!(auth.current(), Some(identity));
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryAuthenticator {
    identity: watch::Sender<Option<Identity>>,
    scripted: Mutex<VecDeque<Result<Identity, AuthenticatorError>>>,
}

impl Default for InMemoryAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthenticator {
    /// Signed-out authenticator with no scripted outcomes.
    pub fn new() -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            identity,
            scripted: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue the result of a future `sign_in` call.
    pub fn queue_sign_in(&self, outcome: Result<Identity, AuthenticatorError>) {
        if let Ok(mut scripted) = self.scripted.lock() {
            scripted.push_back(outcome);
        }
    }

    /// Push an identity change originating at the provider, such as a session
    /// expiring or a sign-in from another tab.
    pub fn push_identity(&self, identity: Option<Identity>) {
        self.identity.send_replace(identity);
    }

    /// Identity currently signed in.
    pub fn current(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    fn next_outcome(&self) -> Result<Identity, AuthenticatorError> {
        let mut scripted = self
            .scripted
            .lock()
            .map_err(|_| AuthenticatorError::provider("sign-in script lock poisoned"))?;
        scripted
            .pop_front()
            .unwrap_or_else(|| Err(AuthenticatorError::user_cancelled()))
    }
}

#[async_trait]
impl Authenticator for InMemoryAuthenticator {
    async fn sign_in(&self) -> Result<Identity, AuthenticatorError> {
        let identity = self.next_outcome()?;
        debug!(user_id = %identity.user_id, "provider sign-in completed");
        self.identity.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthenticatorError> {
        self.identity.send_if_modified(|current| current.take().is_some());
        Ok(())
    }

    fn identity_changes(&self) -> LiveQuery<Option<Identity>> {
        LiveQuery::new(self.identity.subscribe())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::UserId;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn unscripted_sign_in_is_cancelled() {
        let auth = InMemoryAuthenticator::new();
        let err = auth.sign_in().await.expect_err("nothing scripted");
        assert_eq!(err, AuthenticatorError::UserCancelled);
        assert!(auth.current().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn provider_failures_leave_user_signed_out() {
        let auth = InMemoryAuthenticator::new();
        auth.queue_sign_in(Err(AuthenticatorError::provider("popup blocked")));
        let err = auth.sign_in().await.expect_err("scripted failure");
        assert!(matches!(err, AuthenticatorError::Provider { .. }));
        assert!(auth.current().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn sign_in_and_out_are_pushed() {
        let auth = InMemoryAuthenticator::new();
        let mut changes = auth.identity_changes();
        let identity = Identity::new(UserId::random());
        auth.queue_sign_in(Ok(identity.clone()));

        auth.sign_in().await.expect("scripted success");
        assert_eq!(changes.next().await, Some(Some(identity)));

        auth.sign_out().await.expect("sign out");
        assert_eq!(changes.next().await, Some(None));
    }

    #[rstest]
    #[tokio::test]
    async fn repeated_sign_out_is_silent() {
        let auth = InMemoryAuthenticator::new();
        let mut changes = auth.identity_changes();
        auth.sign_out().await.expect("sign out");
        auth.push_identity(Some(Identity::new(UserId::random())));
        assert!(matches!(changes.next().await, Some(Some(_))));
    }
}
