//! Pure permission/role evaluation.
//!
//! - No IO
//! - No panics
//! - Safe to call on every render

use crate::policy::{authorized_roles, implied_permissions};
use crate::{EnrichedUser, OperatorAction, PermissionId, RoleId};

/// Whether the current user may exercise `code`.
///
/// Administrative roles (ADMIN/SUPERADMIN) satisfy every permission code
/// regardless of the explicit grant set. Everyone else needs the code
/// granted explicitly or implied by one of their roles.
pub fn has_permission(user: Option<&EnrichedUser>, code: PermissionId) -> bool {
    let Some(user) = user else {
        return false;
    };

    if user.is_administrative() {
        return true;
    }

    user.permissions.contains(&code)
        || user
            .roles
            .iter()
            .any(|role| implied_permissions(*role).contains(&code))
}

/// Whether the current user holds `role`.
pub fn has_role(user: Option<&EnrichedUser>, role: RoleId) -> bool {
    user.is_some_and(|u| u.roles.contains(&role))
}

/// Whether the current user may perform an examination-cell action.
///
/// Strictly table-driven: the administrative bypass does not apply, so an
/// ADMIN without the operator role is refused.
pub fn may_perform(user: Option<&EnrichedUser>, action: OperatorAction) -> bool {
    let Some(user) = user else {
        return false;
    };

    authorized_roles(action)
        .iter()
        .any(|role| user.roles.contains(role))
}
