//! Declarative authorization policy tables.
//!
//! Single source of truth for role→permission implication and for the
//! examination-cell carve-out. Call sites consult these tables instead of
//! hardcoding role names.

use serde::{Deserialize, Serialize};

use crate::{PermissionId, RoleId};

/// Permissions implied by holding a role, beyond any granted explicitly.
pub fn implied_permissions(role: RoleId) -> &'static [PermissionId] {
    use PermissionId::*;

    match role {
        // Administrative roles bypass permission-code checks entirely
        // (see `has_permission`), so they carry no rows here.
        RoleId::SuperAdmin | RoleId::Admin => &[],
        RoleId::Faculty => &[MarksEntry, StudentRecordsView],
        RoleId::Student | RoleId::Parent => &[],
        RoleId::Accountant => &[FeeCollection, StudentRecordsView],
        RoleId::TransportManager => &[TransportSetup],
        RoleId::ExamCellOperator => &[ExamSchedule, HallTicketIssue],
    }
}

/// Actions reserved for the examination cell.
///
/// These are deliberately not modeled as [`PermissionId`] codes: they are
/// role-exclusive operations, and keeping them out of the permission space
/// prevents an explicit grant (or the administrative bypass) from reaching
/// them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatorAction {
    PublishExamResults,
    FreezeMarksEntry,
    GenerateHallTickets,
    ReopenMarksheet,
}

impl OperatorAction {
    /// Every operator action, in declaration order.
    pub const ALL: &'static [OperatorAction] = &[
        OperatorAction::PublishExamResults,
        OperatorAction::FreezeMarksEntry,
        OperatorAction::GenerateHallTickets,
        OperatorAction::ReopenMarksheet,
    ];
}

/// Roles authorized for an operator action.
///
/// The table lists every authorized role explicitly; the ADMIN/SUPERADMIN
/// bypass does not apply to operator actions.
pub fn authorized_roles(action: OperatorAction) -> &'static [RoleId] {
    match action {
        OperatorAction::PublishExamResults
        | OperatorAction::FreezeMarksEntry
        | OperatorAction::GenerateHallTickets
        | OperatorAction::ReopenMarksheet => &[RoleId::ExamCellOperator],
    }
}
