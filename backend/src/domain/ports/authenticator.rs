//! Driven port for the external identity provider.
//!
//! Sign-in is interactive and may be cancelled by the user. The provider also
//! pushes identity changes (sign-in elsewhere, token expiry) which the session
//! runtime observes through [`Authenticator::identity_changes`].

use async_trait::async_trait;

use crate::domain::Identity;

use super::{LiveQuery, define_port_error};

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum AuthenticatorError {
        /// The user dismissed the sign-in prompt.
        UserCancelled => "sign-in cancelled by user",
        /// The provider failed or rejected the request.
        Provider { message: String } =>
            "identity provider failed: {message}",
    }
}

/// Port for interactive sign-in against an external provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Run the interactive sign-in flow and return the resulting identity.
    async fn sign_in(&self) -> Result<Identity, AuthenticatorError>;

    /// End the current provider session. Signing out twice is not an error.
    async fn sign_out(&self) -> Result<(), AuthenticatorError>;

    /// Live view of the current identity, `None` while signed out.
    fn identity_changes(&self) -> LiveQuery<Option<Identity>>;
}

/// Fixture implementation that never signs anyone in.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthenticator;

#[async_trait]
impl Authenticator for FixtureAuthenticator {
    async fn sign_in(&self) -> Result<Identity, AuthenticatorError> {
        Err(AuthenticatorError::user_cancelled())
    }

    async fn sign_out(&self) -> Result<(), AuthenticatorError> {
        Ok(())
    }

    fn identity_changes(&self) -> LiveQuery<Option<Identity>> {
        LiveQuery::fixed(None)
    }
}
