use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dashboard statistics for the current week. Derived on every call, never
/// persisted; the caller owns the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyStats {
    /// Attendance records falling inside the week window.
    #[schema(example = 4)]
    pub weekly_attendance_count: u64,
    /// Worked hours averaged over ALL in-window records, including ones
    /// that only have a check-in (those dilute the average toward zero).
    #[schema(example = 7.5)]
    pub average_hours_per_day: f64,
    /// Annual allowance minus approved leave requests. Not floored at zero.
    #[schema(example = 15)]
    pub leave_balance: i64,
}
