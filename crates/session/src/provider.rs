//! Identity-provider contract (consumed; token issuance lives elsewhere).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use scolaris_core::{DomainError, SubjectId};

/// Provider-issued proof of authentication, mirrored locally as a
/// read-mostly cache. The provider refreshes it independently of this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    subject_id: SubjectId,
    access_token: String,
    issued_at: DateTime<Utc>,
}

impl Session {
    /// Mirror a provider session.
    ///
    /// Rejects a blank access token: a session without a usable bearer
    /// token must be treated as absent, never stored.
    pub fn new(
        subject_id: SubjectId,
        access_token: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(DomainError::validation("session access_token is empty"));
        }

        Ok(Self {
            subject_id,
            access_token,
            issued_at,
        })
    }

    pub fn subject_id(&self) -> SubjectId {
        self.subject_id
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

/// Session lifecycle events emitted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChangeEvent {
    /// Explicit sign-in. Forces a profile fetch even for an
    /// already-tracked subject.
    SignedIn,
    /// Generic session change (token refresh, claims re-validation).
    SessionChanged,
    /// The provider reports the session is gone.
    SignedOut,
}

/// Failure talking to the identity provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider rejected the request: {0}")]
    Rejected(String),
}

/// A subscription to provider lifecycle events.
///
/// Wraps a channel receiver; the stream ends when the provider side drops
/// its sender (component teardown).
#[derive(Debug)]
pub struct ProviderEvents {
    receiver: mpsc::UnboundedReceiver<(AuthChangeEvent, Option<Session>)>,
}

impl ProviderEvents {
    pub fn new(receiver: mpsc::UnboundedReceiver<(AuthChangeEvent, Option<Session>)>) -> Self {
        Self { receiver }
    }

    /// Await the next lifecycle event, or `None` once the provider side
    /// has shut down.
    pub async fn next(&mut self) -> Option<(AuthChangeEvent, Option<Session>)> {
        self.receiver.recv().await
    }
}

/// The identity-provider surface this core consumes.
///
/// Implementations wrap whatever SDK the deployment uses; tests use an
/// in-memory fake. All calls are async and non-blocking.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The provider's current session, if any.
    async fn current_session(&self) -> Result<Option<Session>, ProviderError>;

    /// Subscribe to session lifecycle events.
    fn subscribe(&self) -> ProviderEvents;

    /// Invalidate the session at the provider.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}

#[async_trait]
impl<P> IdentityProvider for std::sync::Arc<P>
where
    P: IdentityProvider + ?Sized,
{
    async fn current_session(&self) -> Result<Option<Session>, ProviderError> {
        (**self).current_session().await
    }

    fn subscribe(&self) -> ProviderEvents {
        (**self).subscribe()
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        (**self).sign_out().await
    }
}
