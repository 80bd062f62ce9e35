//! Core dashboard logic: the daily attendance state machine and the weekly
//! statistics aggregation. Both are stateless; durable state stays behind
//! the [`RecordStore`](crate::store::RecordStore) contract, and the caller
//! supplies identity and the current instant explicitly.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone};

pub mod attendance;
pub mod stats;

/// First instant of `date` in `tz`.
pub(crate) fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let mut candidate = date.and_time(NaiveTime::MIN);
    loop {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(instant) => return instant,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            // Midnight can fall inside a DST gap; take the first wall-clock
            // time that exists again.
            LocalResult::None => candidate += Duration::minutes(30),
        }
    }
}
