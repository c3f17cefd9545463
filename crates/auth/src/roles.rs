use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// Roles are a closed enumeration so that every policy decision in the
/// workspace draws from one vocabulary; an unknown role string in a profile
/// payload is a deserialization failure, not a silently ignored grant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleId {
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
    Admin,
    Faculty,
    Student,
    Parent,
    Accountant,
    TransportManager,
    ExamCellOperator,
}

impl RoleId {
    /// Every role, in declaration order.
    pub const ALL: &'static [RoleId] = &[
        RoleId::SuperAdmin,
        RoleId::Admin,
        RoleId::Faculty,
        RoleId::Student,
        RoleId::Parent,
        RoleId::Accountant,
        RoleId::TransportManager,
        RoleId::ExamCellOperator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleId::SuperAdmin => "SUPERADMIN",
            RoleId::Admin => "ADMIN",
            RoleId::Faculty => "FACULTY",
            RoleId::Student => "STUDENT",
            RoleId::Parent => "PARENT",
            RoleId::Accountant => "ACCOUNTANT",
            RoleId::TransportManager => "TRANSPORT_MANAGER",
            RoleId::ExamCellOperator => "EXAM_CELL_OPERATOR",
        }
    }

    /// Whether this role short-circuits permission-code checks.
    pub fn is_administrative(&self) -> bool {
        matches!(self, RoleId::Admin | RoleId::SuperAdmin)
    }
}

impl core::fmt::Display for RoleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
