//! Guard decisions.

use scolaris_auth::LoginStatus;

/// What a guard decided for the subtree it protects.
///
/// Never persisted; computed per render from the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Resolution in flight: show a neutral waiting state — never the
    /// protected subtree, never a redirect.
    Waiting,
    /// Send the visitor to the unauthenticated entry point.
    RedirectToSignIn,
    /// Render nothing at all.
    Hidden,
    /// Show the approval pending/blocked view.
    PendingApproval {
        status: LoginStatus,
        /// Approver's reason, surfaced when status is REJECTED.
        reason: Option<String>,
    },
    /// Render the protected subtree.
    Render,
    /// Render the caller-supplied fallback (silent omission by default).
    Fallback,
}
