//! Session/profile lifecycle orchestration.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use scolaris_auth::EnrichedUser;
use scolaris_core::SubjectId;

use crate::config::SessionConfig;
use crate::fetcher::ProfileFetcher;
use crate::provider::{AuthChangeEvent, IdentityProvider, ProviderEvents, Session};
use crate::tracker::FetchTracker;

/// Lifecycle phase of the authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// No session; the app shows the unauthenticated entry point.
    Unauthenticated,
    /// A session query or profile fetch is in flight.
    Resolving,
    /// A session exists but no profile could be loaded (fail-closed).
    AuthenticatedNoProfile,
    /// Session and profile are both present.
    AuthenticatedProfiled,
}

/// Read-only view of the auth state, taken atomically under the lock.
#[derive(Debug, Clone)]
pub struct AuthSnapshot {
    pub session: Option<Session>,
    pub user: Option<EnrichedUser>,
    pub loading: bool,
    pub phase: AuthPhase,
}

#[derive(Debug)]
struct AuthState {
    session: Option<Session>,
    user: Option<EnrichedUser>,
    loading: bool,
    tracker: FetchTracker,
    last_fetch_error: Option<String>,
}

impl AuthState {
    fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Resolving
        } else if self.session.is_none() {
            AuthPhase::Unauthenticated
        } else if self.user.is_none() {
            AuthPhase::AuthenticatedNoProfile
        } else {
            AuthPhase::AuthenticatedProfiled
        }
    }
}

/// Owns `{session, user, loading}`; subscribes to provider lifecycle
/// events; orchestrates when to (re)fetch; exposes sign-out and manual
/// refresh.
///
/// One logical writer (this manager), many readers (the guards). Writes
/// are whole-value replacements under the lock, so readers never observe a
/// partially updated profile, and the lock is never held across an await.
/// Overlapping event chains are resolved by "last synchronous tracker
/// write wins" plus a monotonic fetch generation that turns superseded
/// completions into no-ops.
///
/// Construct one manager at application start and inject it; guards read
/// through [`SessionManager::snapshot`].
pub struct SessionManager<P, F> {
    provider: P,
    fetcher: F,
    config: SessionConfig,
    state: RwLock<AuthState>,
}

impl<P, F> SessionManager<P, F>
where
    P: IdentityProvider,
    F: ProfileFetcher,
{
    /// The manager starts in the Resolving phase: the UI must not redirect
    /// before the first session query settles.
    pub fn new(provider: P, fetcher: F, config: SessionConfig) -> Self {
        Self {
            provider,
            fetcher,
            config,
            state: RwLock::new(AuthState {
                session: None,
                user: None,
                loading: true,
                tracker: FetchTracker::new(),
                last_fetch_error: None,
            }),
        }
    }

    // A poisoned lock only means some reader panicked mid-read; the state
    // itself is always a consistent whole-value replacement, so recover
    // the inner guard instead of propagating the poison.
    fn read_state(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Query the provider's current session once at startup and, if one
    /// exists, load the profile after the configured grace interval.
    pub async fn initialize(&self) {
        match self.provider.current_session().await {
            Ok(Some(session)) => {
                let subject = session.subject_id();
                let generation = {
                    let mut state = self.write_state();
                    let generation = state.tracker.begin(subject);
                    state.session = Some(session);
                    state.loading = true;
                    generation
                };

                tracing::info!(%subject, "session present at startup");

                // Give outbound-request infrastructure a beat to observe
                // the new token before the first authorized call.
                // TODO: drop this once the HTTP layer reads the token per
                // request instead of caching it at interceptor setup.
                if !self.config.profile_fetch_grace.is_zero() {
                    tokio::time::sleep(self.config.profile_fetch_grace).await;
                }

                self.run_fetch(None, generation).await;
            }
            Ok(None) => {
                tracing::debug!("no session at startup");
                self.write_state().loading = false;
            }
            Err(e) => {
                tracing::warn!("session query failed at startup: {e}");
                self.write_state().loading = false;
            }
        }
    }

    /// Apply a provider lifecycle event to the mirrored state.
    ///
    /// The tracker is updated synchronously before any await, which is
    /// what lets overlapping event chains resolve without mutual
    /// exclusion.
    pub async fn handle_provider_event(&self, event: AuthChangeEvent, session: Option<Session>) {
        let Some(session) = session else {
            // Sign-out observed externally.
            {
                let mut state = self.write_state();
                state.session = None;
                state.user = None;
                state.loading = false;
                state.last_fetch_error = None;
                state.tracker.clear();
            }
            tracing::info!(?event, "provider reported session gone; local state cleared");
            return;
        };

        let subject = session.subject_id();
        let token = session.access_token().to_string();

        let fetch_generation = {
            let mut state = self.write_state();
            let is_new_subject = state.tracker.subject() != Some(subject);
            state.session = Some(session);

            if is_new_subject || event == AuthChangeEvent::SignedIn {
                let generation = state.tracker.begin(subject);
                if is_new_subject {
                    // A same-subject re-validation (token refresh) must not
                    // flip `loading`; flicker is worse than a momentarily
                    // stale profile.
                    state.loading = true;
                }
                Some(generation)
            } else {
                None
            }
        };

        if let Some(generation) = fetch_generation {
            tracing::debug!(%subject, ?event, "session event triggers profile fetch");
            self.run_fetch(Some(token), generation).await;
        }
    }

    /// Fetch the profile with the current session's token, or with
    /// `token_override` when given (an override wins).
    ///
    /// Failures are recovered locally: the state becomes "no profile"
    /// (fail-closed) and the error is recorded for diagnostics. Nothing is
    /// surfaced to the render tree.
    pub async fn fetch_profile(&self, token_override: Option<&str>) {
        let generation = self.read_state().tracker.generation();
        self.run_fetch(token_override.map(str::to_string), generation).await;
    }

    async fn run_fetch(&self, token_override: Option<String>, generation: u64) {
        let token = {
            let state = self.read_state();
            if !state.tracker.is_current(generation) {
                // Superseded before it even started.
                return;
            }
            token_override.or_else(|| state.session.as_ref().map(|s| s.access_token().to_string()))
        };

        let Some(token) = token else {
            // No usable token: nothing to fetch, stop showing the spinner.
            self.write_state().loading = false;
            return;
        };

        let outcome = self.fetcher.fetch(&token).await;

        let mut state = self.write_state();
        if !state.tracker.is_current(generation) {
            tracing::debug!(generation, "discarding superseded profile fetch");
            return;
        }

        match outcome {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "profile loaded");
                state.last_fetch_error = None;
                state.user = Some(user);
            }
            Err(e) => {
                // Fail closed: an unreadable profile leaves the user
                // unauthorized, retryable via `refresh_profile`.
                tracing::warn!("profile fetch failed: {e}");
                state.last_fetch_error = Some(e.to_string());
                state.user = None;
            }
        }

        state.loading = false;
    }

    /// Sign out of the provider and clear local state.
    ///
    /// Local de-authentication must not depend on remote success: the
    /// state is cleared even when the provider call fails.
    pub async fn sign_out(&self) {
        self.write_state().loading = true;

        if let Err(e) = self.provider.sign_out().await {
            tracing::warn!("provider sign-out failed; clearing local state anyway: {e}");
        }

        let mut state = self.write_state();
        state.session = None;
        state.user = None;
        state.loading = false;
        state.last_fetch_error = None;
        state.tracker.clear();
    }

    /// Manual revalidation. Never flips `loading` on its own; that flag is
    /// reserved for new-subject resolution.
    pub async fn refresh_profile(&self) {
        self.fetch_profile(None).await;
    }

    /// Subscribe to the provider's lifecycle events (pass the result to
    /// [`SessionManager::run`]).
    pub fn subscribe(&self) -> ProviderEvents {
        self.provider.subscribe()
    }

    /// Drive the manager from a provider event subscription until the
    /// provider side closes the channel.
    pub async fn run(&self, mut events: ProviderEvents) {
        while let Some((event, session)) = events.next().await {
            self.handle_provider_event(event, session).await;
        }
        tracing::debug!("provider event stream closed");
    }

    pub fn session(&self) -> Option<Session> {
        self.read_state().session.clone()
    }

    pub fn user(&self) -> Option<EnrichedUser> {
        self.read_state().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().loading
    }

    pub fn phase(&self) -> AuthPhase {
        self.read_state().phase()
    }

    /// Subject owned by the latest fetch attempt (diagnostics).
    pub fn tracked_subject(&self) -> Option<SubjectId> {
        self.read_state().tracker.subject()
    }

    /// The most recent profile-fetch failure, if the last fetch failed.
    pub fn last_fetch_error(&self) -> Option<String> {
        self.read_state().last_fetch_error.clone()
    }

    /// Atomic view of the state for the guard layer.
    pub fn snapshot(&self) -> AuthSnapshot {
        let state = self.read_state();
        AuthSnapshot {
            session: state.session.clone(),
            user: state.user.clone(),
            loading: state.loading,
            phase: state.phase(),
        }
    }
}
