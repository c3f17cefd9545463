//! The school-scoped authorization profile.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use scolaris_core::{SchoolId, UserId};

use crate::{PermissionId, RoleId};

/// Login approval status of a profile.
///
/// State machine: `Pending → Approved` (full access), `Pending → Rejected`
/// (blocked except self-view with reason), any state `→ Blocked` (full
/// denial). There are no other edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Blocked,
}

impl LoginStatus {
    /// Whether the approval state machine permits moving to `next`.
    pub fn may_become(self, next: LoginStatus) -> bool {
        match (self, next) {
            (_, LoginStatus::Blocked) => true,
            (LoginStatus::Pending, LoginStatus::Approved | LoginStatus::Rejected) => true,
            _ => false,
        }
    }
}

impl core::fmt::Display for LoginStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            LoginStatus::Pending => "PENDING",
            LoginStatus::Approved => "APPROVED",
            LoginStatus::Rejected => "REJECTED",
            LoginStatus::Blocked => "BLOCKED",
        };
        f.write_str(s)
    }
}

/// The locally cached authorization profile: identity combined with
/// school-scoped roles, permissions and approval state.
///
/// Created only as the result of a successful profile fetch. The lifecycle
/// manager replaces it wholesale; nothing mutates it in place, which is why
/// guards may read it lock-free from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedUser {
    pub id: UserId,
    pub email: String,
    pub school_id: SchoolId,
    pub roles: BTreeSet<RoleId>,
    pub permissions: BTreeSet<PermissionId>,
    pub full_name: String,
    pub login_status: LoginStatus,
    /// Populated when an approver recorded a reason (shown for REJECTED).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_decision_reason: Option<String>,
}

impl EnrichedUser {
    /// Whether any held role short-circuits permission-code checks.
    pub fn is_administrative(&self) -> bool {
        self.roles.iter().any(|r| r.is_administrative())
    }
}
