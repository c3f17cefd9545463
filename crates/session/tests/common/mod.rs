//! Shared fakes for lifecycle/fetcher integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, oneshot};

use scolaris_auth::{EnrichedUser, LoginStatus, PermissionId, RoleId};
use scolaris_core::{SchoolId, SubjectId, UserId};
use scolaris_session::{
    AuthChangeEvent, FetchError, IdentityProvider, ProfileFetcher, ProviderError, ProviderEvents,
    Session, SessionConfig,
};

pub fn test_config() -> SessionConfig {
    SessionConfig::new("http://unused.invalid").with_grace(std::time::Duration::ZERO)
}

pub fn session_for(subject: SubjectId) -> Session {
    session_with_token(subject, "tok-1")
}

pub fn session_with_token(subject: SubjectId, token: &str) -> Session {
    Session::new(subject, token, Utc::now()).unwrap()
}

pub fn profile_named(full_name: &str) -> EnrichedUser {
    profile_with(full_name, &[RoleId::Faculty], &[PermissionId::MarksEntry])
}

pub fn profile_with(
    full_name: &str,
    roles: &[RoleId],
    permissions: &[PermissionId],
) -> EnrichedUser {
    EnrichedUser {
        id: UserId::new(),
        email: format!("{}@stmarys.edu", full_name.to_lowercase()),
        school_id: SchoolId::new(),
        roles: roles.iter().copied().collect(),
        permissions: permissions.iter().copied().collect(),
        full_name: full_name.to_string(),
        login_status: LoginStatus::Approved,
        login_decision_reason: None,
    }
}

/// In-memory identity provider with scriptable sign-out behavior.
pub struct FakeProvider {
    current: Mutex<Option<Session>>,
    fail_sign_out: bool,
    pub sign_out_calls: AtomicUsize,
    senders: Mutex<Vec<mpsc::UnboundedSender<(AuthChangeEvent, Option<Session>)>>>,
}

impl FakeProvider {
    pub fn new(current: Option<Session>) -> Self {
        Self {
            current: Mutex::new(current),
            fail_sign_out: false,
            sign_out_calls: AtomicUsize::new(0),
            senders: Mutex::new(Vec::new()),
        }
    }

    pub fn with_failing_sign_out(current: Option<Session>) -> Self {
        Self {
            fail_sign_out: true,
            ..Self::new(current)
        }
    }

    /// Emit a lifecycle event to every live subscription.
    pub fn emit(&self, event: AuthChangeEvent, session: Option<Session>) {
        let mut senders = self.senders.lock().unwrap();
        senders.retain(|tx| tx.send((event, session.clone())).is_ok());
    }

    /// Drop every subscription sender, ending subscribers' event streams.
    pub fn close_subscriptions(&self) {
        self.senders.lock().unwrap().clear();
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn current_session(&self) -> Result<Option<Session>, ProviderError> {
        Ok(self.current.lock().unwrap().clone())
    }

    fn subscribe(&self) -> ProviderEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.lock().unwrap().push(tx);
        ProviderEvents::new(rx)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out {
            return Err(ProviderError::Unreachable("simulated outage".to_string()));
        }
        *self.current.lock().unwrap() = None;
        Ok(())
    }
}

/// Fetcher that pops pre-scripted responses in order.
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<EnrichedUser, FetchError>>>,
    pub calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(responses: Vec<Result<EnrichedUser, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProfileFetcher for ScriptedFetcher {
    async fn fetch(&self, _token: &str) -> Result<EnrichedUser, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("no scripted response".to_string())))
    }
}

/// Fetcher whose completions the test releases by hand, for observing
/// in-flight state and forcing resolution orders.
pub struct GatedFetcher {
    started_tx: mpsc::UnboundedSender<String>,
    gates: Mutex<VecDeque<oneshot::Receiver<Result<EnrichedUser, FetchError>>>>,
}

impl GatedFetcher {
    /// Returns the fetcher and a channel reporting each call's token the
    /// moment the fetch starts.
    pub fn new() -> (std::sync::Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (started_tx, started_rx) = mpsc::unbounded_channel();
        let fetcher = std::sync::Arc::new(Self {
            started_tx,
            gates: Mutex::new(VecDeque::new()),
        });
        (fetcher, started_rx)
    }

    /// Queue a gate for the next fetch; send on the returned handle to
    /// release that fetch with a result.
    pub fn push_gate(&self) -> oneshot::Sender<Result<EnrichedUser, FetchError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl ProfileFetcher for GatedFetcher {
    async fn fetch(&self, token: &str) -> Result<EnrichedUser, FetchError> {
        let gate = self.gates.lock().unwrap().pop_front();
        let _ = self.started_tx.send(token.to_string());

        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string()))),
            None => Err(FetchError::Network("no gate queued".to_string())),
        }
    }
}
