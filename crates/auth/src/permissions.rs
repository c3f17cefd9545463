use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Like [`crate::RoleId`], permissions are a closed enumeration. There is no
/// wildcard entry: "allow all" is a property of administrative roles (see
/// the evaluator), not a grantable code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionId {
    MarksEntry,
    TransportSetup,
    FeeCollection,
    AdmissionsReview,
    TimetableEdit,
    ExamSchedule,
    ReportCardView,
    HallTicketIssue,
    StudentRecordsView,
}

impl PermissionId {
    /// Every permission, in declaration order.
    pub const ALL: &'static [PermissionId] = &[
        PermissionId::MarksEntry,
        PermissionId::TransportSetup,
        PermissionId::FeeCollection,
        PermissionId::AdmissionsReview,
        PermissionId::TimetableEdit,
        PermissionId::ExamSchedule,
        PermissionId::ReportCardView,
        PermissionId::HallTicketIssue,
        PermissionId::StudentRecordsView,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionId::MarksEntry => "MARKS_ENTRY",
            PermissionId::TransportSetup => "TRANSPORT_SETUP",
            PermissionId::FeeCollection => "FEE_COLLECTION",
            PermissionId::AdmissionsReview => "ADMISSIONS_REVIEW",
            PermissionId::TimetableEdit => "TIMETABLE_EDIT",
            PermissionId::ExamSchedule => "EXAM_SCHEDULE",
            PermissionId::ReportCardView => "REPORT_CARD_VIEW",
            PermissionId::HallTicketIssue => "HALL_TICKET_ISSUE",
            PermissionId::StudentRecordsView => "STUDENT_RECORDS_VIEW",
        }
    }
}

impl core::fmt::Display for PermissionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
