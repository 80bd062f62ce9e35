//! In-memory `RecordStore` used by the service tests. `created_at` is taken
//! from `check_in`, so tests drive the clock through the values they pass.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ServiceError;
use crate::model::attendance::AttendanceRecord;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest};
use crate::store::RecordStore;

#[derive(Default)]
pub struct MemoryStore {
    attendance: Mutex<Vec<AttendanceRecord>>,
    leaves: Mutex<Vec<LeaveRequest>>,
    next_id: AtomicU64,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutations performed, so no-op paths can assert zero.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn assign_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Place a fully-specified record, bypassing the insert path.
    pub fn seed_attendance(
        &self,
        employee_id: u64,
        check_in: DateTime<Utc>,
        check_out: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> AttendanceRecord {
        let record = AttendanceRecord {
            id: self.assign_id(),
            employee_id,
            check_in,
            check_out,
            created_at,
        };
        self.attendance.lock().unwrap().push(record.clone());
        record
    }

    pub fn seed_leave(&self, employee_id: u64, status: LeaveStatus) -> LeaveRequest {
        let request = LeaveRequest {
            id: self.assign_id(),
            employee_id,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
            leave_type: LeaveType::Annual,
            status,
            created_at: None,
        };
        self.leaves.lock().unwrap().push(request.clone());
        request
    }
}

impl RecordStore for MemoryStore {
    async fn query_attendance(
        &self,
        employee_id: Option<u64>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let mut matching: Vec<_> = self
            .attendance
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.created_at >= start && r.created_at < end)
            .filter(|r| employee_id.is_none_or(|id| r.employee_id == id))
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.created_at);
        Ok(matching)
    }

    async fn insert_attendance(
        &self,
        employee_id: u64,
        check_in: DateTime<Utc>,
    ) -> Result<AttendanceRecord, ServiceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.seed_attendance(employee_id, check_in, None, check_in))
    }

    async fn update_attendance_check_out(
        &self,
        record_id: u64,
        check_out: DateTime<Utc>,
    ) -> Result<AttendanceRecord, ServiceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut attendance = self.attendance.lock().unwrap();
        let record = attendance
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or(ServiceError::StoreWrite(sqlx::Error::RowNotFound))?;
        if record.check_out.is_none() {
            record.check_out = Some(check_out);
        }
        Ok(record.clone())
    }

    async fn query_leave_requests(
        &self,
        employee_id: Option<u64>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequest>, ServiceError> {
        Ok(self
            .leaves
            .lock()
            .unwrap()
            .iter()
            .filter(|l| employee_id.is_none_or(|id| l.employee_id == id))
            .filter(|l| status.is_none_or(|s| l.status == s))
            .cloned()
            .collect())
    }

    async fn insert_leave_request(
        &self,
        employee_id: u64,
        request: &NewLeaveRequest,
    ) -> Result<LeaveRequest, ServiceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let request = LeaveRequest {
            id: self.assign_id(),
            employee_id,
            start_date: request.start_date,
            end_date: request.end_date,
            leave_type: request.leave_type,
            status: LeaveStatus::Pending,
            created_at: None,
        };
        self.leaves.lock().unwrap().push(request.clone());
        Ok(request)
    }
}
