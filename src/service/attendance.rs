use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::{info, warn};

use crate::error::ServiceError;
use crate::model::attendance::AttendanceRecord;
use crate::service::local_midnight;
use crate::store::RecordStore;

/// What a toggle call did, so the caller can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    ClockedIn,
    ClockedOut,
    /// The day was already completed; nothing was written.
    AlreadyCompleted,
}

/// The day window for `now`: `[local midnight, local midnight + 24h)`,
/// expressed in UTC. The same window backs both the daily lookup and the
/// clock-in path, so a record can never land outside the day it is read
/// from.
pub fn day_window<Tz: TimeZone>(now: &DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight(&now.timezone(), now.date_naive()).with_timezone(&Utc);
    (start, start + Duration::hours(24))
}

/// Today's attendance record for one employee, if any. Read-only.
///
/// A duplicate same-day pair would mean the store's per-day key failed
/// upstream; the earliest `created_at` wins deterministically and the
/// extras are ignored.
pub async fn today_record<S, Tz>(
    store: &S,
    employee_id: u64,
    now: &DateTime<Tz>,
) -> Result<Option<AttendanceRecord>, ServiceError>
where
    S: RecordStore,
    Tz: TimeZone,
{
    let (start, end) = day_window(now);
    let records = store.query_attendance(Some(employee_id), start, end).await?;
    if records.len() > 1 {
        warn!(
            employee_id,
            count = records.len(),
            "multiple attendance records in one day window, keeping the earliest"
        );
    }
    Ok(records.into_iter().min_by_key(|r| r.created_at))
}

/// Advance the employee's per-day attendance machine by one step:
/// no record yet clocks in, an open record clocks out, and a completed day
/// is a terminal no-op that returns the stored record unchanged.
///
/// The read-decide-write sequence is not atomic against a concurrent toggle
/// for the same employee; the store's per-day unique key rejects the loser
/// of a clock-in race.
pub async fn toggle<S, Tz>(
    store: &S,
    employee_id: u64,
    now: &DateTime<Tz>,
) -> Result<(AttendanceRecord, ToggleOutcome), ServiceError>
where
    S: RecordStore,
    Tz: TimeZone,
{
    let instant = now.with_timezone(&Utc);
    match today_record(store, employee_id, now).await? {
        None => {
            let record = store.insert_attendance(employee_id, instant).await?;
            info!(employee_id, record_id = record.id, "clocked in");
            Ok((record, ToggleOutcome::ClockedIn))
        }
        Some(open) if open.check_out.is_none() => {
            let record = store.update_attendance_check_out(open.id, instant).await?;
            info!(employee_id, record_id = record.id, "clocked out");
            Ok((record, ToggleOutcome::ClockedOut))
        }
        Some(done) => Ok((done, ToggleOutcome::AlreadyCompleted)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceState;
    use crate::store::memory::MemoryStore;
    use chrono::{FixedOffset, TimeZone};

    const EMPLOYEE: u64 = 1000;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[actix_web::test]
    async fn day_starts_with_no_record() {
        let store = MemoryStore::new();
        let now = utc(2026, 1, 5, 9, 0, 0);

        let record = today_record(&store, EMPLOYEE, &now).await.unwrap();

        assert!(record.is_none());
        assert_eq!(AttendanceState::of(record.as_ref()), AttendanceState::NoRecord);
    }

    #[actix_web::test]
    async fn first_toggle_clocks_in() {
        let store = MemoryStore::new();
        let now = utc(2026, 1, 5, 9, 0, 0);

        let (record, outcome) = toggle(&store, EMPLOYEE, &now).await.unwrap();

        assert_eq!(outcome, ToggleOutcome::ClockedIn);
        assert_eq!(record.employee_id, EMPLOYEE);
        assert_eq!(record.check_in, now);
        assert!(record.check_out.is_none());
        assert_eq!(AttendanceState::of(Some(&record)), AttendanceState::CheckedIn);
        assert_eq!(store.write_count(), 1);
    }

    #[actix_web::test]
    async fn second_toggle_clocks_out_and_preserves_the_rest() {
        let store = MemoryStore::new();
        let morning = utc(2026, 1, 5, 9, 0, 0);
        let evening = utc(2026, 1, 5, 17, 30, 0);

        let (first, _) = toggle(&store, EMPLOYEE, &morning).await.unwrap();
        let (second, outcome) = toggle(&store, EMPLOYEE, &evening).await.unwrap();

        assert_eq!(outcome, ToggleOutcome::ClockedOut);
        assert_eq!(second.id, first.id);
        assert_eq!(second.employee_id, first.employee_id);
        assert_eq!(second.check_in, first.check_in);
        assert_eq!(second.check_out, Some(evening));
        assert_eq!(AttendanceState::of(Some(&second)), AttendanceState::Completed);
    }

    #[actix_web::test]
    async fn third_toggle_is_a_no_op() {
        let store = MemoryStore::new();
        let morning = utc(2026, 1, 5, 9, 0, 0);
        let evening = utc(2026, 1, 5, 17, 30, 0);
        let later = utc(2026, 1, 5, 18, 0, 0);

        toggle(&store, EMPLOYEE, &morning).await.unwrap();
        let (completed, _) = toggle(&store, EMPLOYEE, &evening).await.unwrap();
        let writes_before = store.write_count();

        let (unchanged, outcome) = toggle(&store, EMPLOYEE, &later).await.unwrap();

        assert_eq!(outcome, ToggleOutcome::AlreadyCompleted);
        assert_eq!(unchanged, completed);
        assert_eq!(store.write_count(), writes_before);
        let stored = today_record(&store, EMPLOYEE, &later).await.unwrap().unwrap();
        assert_eq!(stored, completed);
    }

    #[actix_web::test]
    async fn next_day_resets_the_machine() {
        let store = MemoryStore::new();
        let monday = utc(2026, 1, 5, 9, 0, 0);
        let tuesday = utc(2026, 1, 6, 9, 0, 0);

        toggle(&store, EMPLOYEE, &monday).await.unwrap();
        toggle(&store, EMPLOYEE, &monday).await.unwrap();

        assert!(today_record(&store, EMPLOYEE, &tuesday).await.unwrap().is_none());
        let (record, outcome) = toggle(&store, EMPLOYEE, &tuesday).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::ClockedIn);
        assert_eq!(record.check_in, tuesday);
    }

    #[actix_web::test]
    async fn day_window_includes_start_and_excludes_end() {
        let store = MemoryStore::new();
        let now = utc(2026, 1, 5, 12, 0, 0);
        let start = utc(2026, 1, 5, 0, 0, 0);
        let millisecond = Duration::milliseconds(1);

        // One record per employee so each probe is independent.
        store.seed_attendance(1, start - millisecond, None, start - millisecond);
        store.seed_attendance(2, start, None, start);
        let last_inside = start + Duration::hours(24) - millisecond;
        store.seed_attendance(3, last_inside, None, last_inside);
        let next_midnight = start + Duration::hours(24);
        store.seed_attendance(4, next_midnight, None, next_midnight);

        assert!(today_record(&store, 1, &now).await.unwrap().is_none());
        assert!(today_record(&store, 2, &now).await.unwrap().is_some());
        assert!(today_record(&store, 3, &now).await.unwrap().is_some());
        assert!(today_record(&store, 4, &now).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn day_window_follows_the_viewer_time_zone() {
        let store = MemoryStore::new();
        let kolkata = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        // 10:00 on Jan 6 in +05:30 is 04:30Z; the local day starts at
        // Jan 5 18:30Z.
        let now = kolkata.with_ymd_and_hms(2026, 1, 6, 10, 0, 0).unwrap();

        let yesterday_utc = utc(2026, 1, 5, 20, 0, 0);
        store.seed_attendance(EMPLOYEE, yesterday_utc, None, yesterday_utc);

        let record = today_record(&store, EMPLOYEE, &now).await.unwrap();
        assert!(record.is_some(), "20:00Z on Jan 5 is already Jan 6 in +05:30");

        let (start, end) = day_window(&now);
        assert_eq!(start, utc(2026, 1, 5, 18, 30, 0));
        assert_eq!(end, utc(2026, 1, 6, 18, 30, 0));
    }

    #[actix_web::test]
    async fn duplicate_day_records_resolve_to_the_earliest() {
        let store = MemoryStore::new();
        let now = utc(2026, 1, 5, 12, 0, 0);
        let later = store.seed_attendance(EMPLOYEE, utc(2026, 1, 5, 9, 30, 0), None, utc(2026, 1, 5, 9, 30, 0));
        let earlier = store.seed_attendance(EMPLOYEE, utc(2026, 1, 5, 9, 0, 0), None, utc(2026, 1, 5, 9, 0, 0));

        let record = today_record(&store, EMPLOYEE, &now).await.unwrap().unwrap();

        assert_eq!(record, earlier);
        assert_ne!(record.id, later.id);
    }

    #[actix_web::test]
    async fn toggle_only_sees_the_callers_records() {
        let store = MemoryStore::new();
        let now = utc(2026, 1, 5, 9, 0, 0);
        store.seed_attendance(2000, now, None, now);

        let (record, outcome) = toggle(&store, EMPLOYEE, &now).await.unwrap();

        assert_eq!(outcome, ToggleOutcome::ClockedIn);
        assert_eq!(record.employee_id, EMPLOYEE);
    }
}
