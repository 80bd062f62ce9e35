use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One employee's attendance row for one calendar day.
///
/// `id` and `created_at` are assigned by the store on insert. `check_in` is
/// set exactly once at creation; `check_out` at most once afterwards. The
/// row is never mutated again once `check_out` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = "2026-01-05T09:00:00Z", format = "date-time", value_type = String)]
    pub check_in: DateTime<Utc>,
    #[schema(example = "2026-01-05T17:30:00Z", format = "date-time", value_type = String)]
    pub check_out: Option<DateTime<Utc>>,
    /// Buckets the record into a calendar day for the daily lookup.
    #[schema(example = "2026-01-05T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Per-day attendance progress, derived from today's record.
///
/// `Completed` is terminal for the day; the machine resets implicitly when
/// the next day's window begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    NoRecord,
    CheckedIn,
    Completed,
}

impl AttendanceState {
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        match record {
            None => AttendanceState::NoRecord,
            Some(rec) if rec.check_out.is_none() => AttendanceState::CheckedIn,
            Some(_) => AttendanceState::Completed,
        }
    }

    /// Label for the dashboard's attendance button.
    pub fn action_label(&self) -> &'static str {
        match self {
            AttendanceState::NoRecord => "Clock In",
            AttendanceState::CheckedIn => "Clock Out",
            AttendanceState::Completed => "Attendance Completed",
        }
    }

    /// The button is disabled once the day is completed.
    pub fn action_enabled(&self) -> bool {
        !matches!(self, AttendanceState::Completed)
    }
}
