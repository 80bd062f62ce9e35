use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use tracing::error;

use crate::error::ServiceError;
use crate::model::attendance::AttendanceRecord;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, NewLeaveRequest};
use crate::store::RecordStore;

/// MySQL-backed record store. The `attendance` table carries a unique key
/// on (employee_id, day of created_at), so the per-day invariant holds even
/// when two toggles race; see `schema.sql`.
#[derive(Clone)]
pub struct MySqlRecordStore {
    pool: MySqlPool,
}

impl MySqlRecordStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_attendance_row(&self, record_id: u64) -> Result<AttendanceRecord, sqlx::Error> {
        sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, employee_id, check_in, check_out, created_at
            FROM attendance
            WHERE id = ?
            "#,
        )
        .bind(record_id)
        .fetch_one(&self.pool)
        .await
    }
}

impl RecordStore for MySqlRecordStore {
    async fn query_attendance(
        &self,
        employee_id: Option<u64>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let mut sql = String::from(
            "SELECT id, employee_id, check_in, check_out, created_at \
             FROM attendance WHERE created_at >= ? AND created_at < ?",
        );
        if employee_id.is_some() {
            sql.push_str(" AND employee_id = ?");
        }
        sql.push_str(" ORDER BY created_at ASC");

        let mut query = sqlx::query_as::<_, AttendanceRecord>(&sql).bind(start).bind(end);
        if let Some(id) = employee_id {
            query = query.bind(id);
        }

        query.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, ?employee_id, "Failed to query attendance");
            ServiceError::StoreRead(e)
        })
    }

    async fn insert_attendance(
        &self,
        employee_id: u64,
        check_in: DateTime<Utc>,
    ) -> Result<AttendanceRecord, ServiceError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, check_in)
            VALUES (?, ?)
            "#,
        )
        .bind(employee_id)
        .bind(check_in)
        .execute(&self.pool)
        .await;

        let inserted = match result {
            Ok(res) => res,
            Err(e) => {
                // Unique key on (employee_id, day): a same-day duplicate
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23000") {
                        return Err(ServiceError::InvariantViolation { employee_id });
                    }
                }
                error!(error = %e, employee_id, "Clock-in insert failed");
                return Err(ServiceError::StoreWrite(e));
            }
        };

        self.fetch_attendance_row(inserted.last_insert_id()).await.map_err(|e| {
            error!(error = %e, employee_id, "Failed to read back clock-in row");
            ServiceError::StoreWrite(e)
        })
    }

    async fn update_attendance_check_out(
        &self,
        record_id: u64,
        check_out: DateTime<Utc>,
    ) -> Result<AttendanceRecord, ServiceError> {
        // Guarded write: a record that already has a check_out stays as-is.
        sqlx::query(
            r#"
            UPDATE attendance
            SET check_out = ?
            WHERE id = ?
            AND check_out IS NULL
            "#,
        )
        .bind(check_out)
        .bind(record_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, record_id, "Clock-out update failed");
            ServiceError::StoreWrite(e)
        })?;

        self.fetch_attendance_row(record_id).await.map_err(|e| {
            error!(error = %e, record_id, "Failed to read back clock-out row");
            ServiceError::StoreWrite(e)
        })
    }

    async fn query_leave_requests(
        &self,
        employee_id: Option<u64>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequest>, ServiceError> {
        let mut sql = String::from(
            "SELECT id, employee_id, start_date, end_date, leave_type, status, created_at \
             FROM leave_requests WHERE 1=1",
        );
        if employee_id.is_some() {
            sql.push_str(" AND employee_id = ?");
        }
        if status.is_some() {
            sql.push_str(" AND status = ?");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, LeaveRequest>(&sql);
        if let Some(id) = employee_id {
            query = query.bind(id);
        }
        if let Some(status) = status {
            query = query.bind(status);
        }

        query.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, ?employee_id, "Failed to query leave requests");
            ServiceError::StoreRead(e)
        })
    }

    async fn insert_leave_request(
        &self,
        employee_id: u64,
        request: &NewLeaveRequest,
    ) -> Result<LeaveRequest, ServiceError> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO leave_requests (employee_id, start_date, end_date, leave_type)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(employee_id)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.leave_type)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to create leave request");
            ServiceError::StoreWrite(e)
        })?;

        sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, employee_id, start_date, end_date, leave_type, status, created_at
            FROM leave_requests
            WHERE id = ?
            "#,
        )
        .bind(inserted.last_insert_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to read back leave request");
            ServiceError::StoreWrite(e)
        })
    }
}
