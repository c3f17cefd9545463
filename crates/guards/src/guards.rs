//! The guard set.
//!
//! Four predicates with deliberately non-uniform policies: a session gate,
//! an approval gate with an administrative bypass, a generic permission
//! check, and an operator carve-out that refuses even administrators.

use scolaris_auth::{
    LoginStatus, OperatorAction, PermissionId, has_permission, may_perform,
};

use crate::outcome::GuardOutcome;
use crate::paths::is_self_service_path;
use crate::view::AuthView;

/// Gate a protected subtree on a resolved, profiled session.
///
/// While loading, only the waiting state is rendered — redirecting during
/// resolution is what causes the sign-in flicker this core exists to
/// avoid. Once resolved, a missing session or profile redirects to the
/// unauthenticated entry point.
pub fn session_guard<V: AuthView>(view: &V) -> GuardOutcome {
    if view.is_loading() {
        return GuardOutcome::Waiting;
    }

    if view.session().is_none() || view.user().is_none() {
        return GuardOutcome::RedirectToSignIn;
    }

    GuardOutcome::Render
}

/// Restrict not-yet-approved users to the self-service pages.
///
/// Administrators pass unconditionally, whatever their own approval record
/// says — an admin locked out by an inconsistent record could not repair
/// it.
pub fn approval_gate<V: AuthView>(view: &V, path: &str) -> GuardOutcome {
    let Some(user) = view.user() else {
        return GuardOutcome::Hidden;
    };

    if user.is_administrative() {
        return GuardOutcome::Render;
    }

    if user.login_status != LoginStatus::Approved && !is_self_service_path(path) {
        tracing::debug!(status = %user.login_status, %path, "approval gate held a subtree back");
        return GuardOutcome::PendingApproval {
            status: user.login_status,
            reason: user.login_decision_reason.clone(),
        };
    }

    GuardOutcome::Render
}

/// Render the subtree iff the current user holds `permission`.
///
/// The refusal is a silent omission, not an error — callers map
/// [`GuardOutcome::Fallback`] to whatever stand-in they declared (nothing
/// by default). Nests arbitrarily.
pub fn permission_guard<V: AuthView>(view: &V, permission: PermissionId) -> GuardOutcome {
    if has_permission(view.user(), permission) {
        GuardOutcome::Render
    } else {
        GuardOutcome::Fallback
    }
}

/// Render the subtree iff the current user may perform the
/// examination-cell `action`.
///
/// Unlike [`approval_gate`], the generic ADMIN role does not satisfy this
/// guard: the action table reserves these operations for the operator
/// role.
pub fn operation_guard<V: AuthView>(view: &V, action: OperatorAction) -> GuardOutcome {
    if may_perform(view.user(), action) {
        GuardOutcome::Render
    } else {
        tracing::debug!(?action, "operator action refused");
        GuardOutcome::Fallback
    }
}

/// The composition routed pages use: the session guard wrapping the
/// approval gate.
pub fn guard_route<V: AuthView>(view: &V, path: &str) -> GuardOutcome {
    match session_guard(view) {
        GuardOutcome::Render => approval_gate(view, path),
        other => other,
    }
}
