use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

use crate::error::ServiceError;
use crate::model::leave_request::LeaveStatus;
use crate::model::stats::WeeklyStats;
use crate::service::local_midnight;
use crate::store::RecordStore;

/// The week window for `now`: Sunday's local midnight up to (but not
/// including) the next Sunday's, expressed in UTC.
pub fn week_window<Tz: TimeZone>(now: &DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let days_into_week = now.weekday().num_days_from_sunday() as i64;
    let week_start = now.date_naive() - Duration::days(days_into_week);
    let tz = now.timezone();
    let start = local_midnight(&tz, week_start).with_timezone(&Utc);
    let end = local_midnight(&tz, week_start + Duration::days(7)).with_timezone(&Utc);
    (start, end)
}

/// Compute this week's dashboard statistics.
///
/// `scope` restricts the attendance fetch to one employee; admin views pass
/// `None` for the fleet-wide set. The approved-leave fetch is never scoped
/// by employee or window. Pure read: errors from the store propagate, and
/// repeated calls over unchanged data return identical values.
pub async fn weekly<S, Tz>(
    store: &S,
    scope: Option<u64>,
    now: &DateTime<Tz>,
    allowance: i64,
) -> Result<WeeklyStats, ServiceError>
where
    S: RecordStore,
    Tz: TimeZone,
{
    let (start, end) = week_window(now);
    let records = store.query_attendance(scope, start, end).await?;

    let worked_hours: f64 = records
        .iter()
        .filter_map(|r| {
            r.check_out
                .map(|out| (out - r.check_in).num_milliseconds() as f64 / 3_600_000.0)
        })
        .sum();
    // Records that only have a check-in stay in the divisor and pull the
    // average toward zero. Divisor 1 keeps the empty week at 0.
    let divisor = records.len().max(1) as f64;

    let approved = store
        .query_leave_requests(None, Some(LeaveStatus::Approved))
        .await?;

    Ok(WeeklyStats {
        weekly_attendance_count: records.len() as u64,
        average_hours_per_day: worked_hours / divisor,
        leave_balance: allowance - approved.len() as i64,
    })
}
