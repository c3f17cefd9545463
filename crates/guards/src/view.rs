//! Capability-check contract consumed by every guard.

use scolaris_auth::EnrichedUser;
use scolaris_session::{AuthSnapshot, Session};

/// Read access to the lifecycle manager's state, as seen at render time.
///
/// Guards are polymorphic over this trait so they can be exercised with
/// hand-built stubs as easily as with a live [`AuthSnapshot`].
pub trait AuthView {
    fn session(&self) -> Option<&Session>;
    fn user(&self) -> Option<&EnrichedUser>;
    fn is_loading(&self) -> bool;
}

impl AuthView for AuthSnapshot {
    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn user(&self) -> Option<&EnrichedUser> {
        self.user.as_ref()
    }

    fn is_loading(&self) -> bool {
        self.loading
    }
}
