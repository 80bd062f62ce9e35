//! Record store boundary. All durable state lives behind this contract;
//! the attendance and stats services stay stateless between calls.

use chrono::{DateTime, Utc};

use crate::error::ServiceError;
use crate::model::attendance::AttendanceRecord;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, NewLeaveRequest};

#[cfg(test)]
pub mod memory;
pub mod mysql;

/// Persistence contract over attendance and leave data.
pub trait RecordStore {
    /// Attendance records with `created_at` in the half-open range
    /// `[start, end)`, optionally restricted to one employee, ordered by
    /// `created_at` ascending.
    async fn query_attendance(
        &self,
        employee_id: Option<u64>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>, ServiceError>;

    /// Create the day's record with `check_in` set and no `check_out`.
    /// The store assigns `id` and `created_at`; a second same-day insert
    /// for the employee fails with `InvariantViolation`.
    async fn insert_attendance(
        &self,
        employee_id: u64,
        check_in: DateTime<Utc>,
    ) -> Result<AttendanceRecord, ServiceError>;

    /// Set `check_out` on an open record. A record whose `check_out` is
    /// already present is left untouched and returned as stored.
    async fn update_attendance_check_out(
        &self,
        record_id: u64,
        check_out: DateTime<Utc>,
    ) -> Result<AttendanceRecord, ServiceError>;

    /// Leave requests, optionally filtered by employee and/or status.
    async fn query_leave_requests(
        &self,
        employee_id: Option<u64>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequest>, ServiceError>;

    /// Create a leave request in `Pending` status.
    async fn insert_leave_request(
        &self,
        employee_id: u64,
        request: &NewLeaveRequest,
    ) -> Result<LeaveRequest, ServiceError>;
}
