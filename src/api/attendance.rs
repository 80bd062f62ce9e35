use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::auth::session::AuthSession;
use crate::model::attendance::{AttendanceRecord, AttendanceState};
use crate::service::attendance::{self, ToggleOutcome};
use crate::store::mysql::MySqlRecordStore;

#[derive(Serialize, ToSchema)]
pub struct AttendanceToday {
    pub record: Option<AttendanceRecord>,
    pub state: AttendanceState,
    #[schema(example = "Clock In")]
    pub action_label: String,
    #[schema(example = true)]
    pub action_enabled: bool,
}

impl AttendanceToday {
    fn from_record(record: Option<AttendanceRecord>) -> Self {
        let state = AttendanceState::of(record.as_ref());
        Self {
            record,
            state,
            action_label: state.action_label().to_string(),
            action_enabled: state.action_enabled(),
        }
    }
}

/// Today's attendance endpoint
#[utoipa::path(
    get,
    path = "/api/v1/attendance/today",
    responses(
        (status = 200, description = "Today's attendance state", body = AttendanceToday),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn today(
    auth: AuthSession,
    store: web::Data<MySqlRecordStore>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    let record = attendance::today_record(store.get_ref(), employee_id, &Local::now()).await?;

    Ok(HttpResponse::Ok().json(AttendanceToday::from_record(record)))
}

/// Clock-in / clock-out toggle endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    responses(
        (status = 200, description = "Attendance transition applied", body = Object, example = json!({
            "message": "Clocked in successfully",
            "state": "checked_in",
            "action_label": "Clock Out",
            "action_enabled": true
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Already clocked in today", body = Object, example = json!({
            "message": "attendance already recorded today for employee 1000"
        })),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn toggle(
    auth: AuthSession,
    store: web::Data<MySqlRecordStore>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;
    debug!(username = %auth.username, employee_id, "Attendance toggle requested");

    let (record, outcome) = attendance::toggle(store.get_ref(), employee_id, &Local::now()).await?;

    let message = match outcome {
        ToggleOutcome::ClockedIn => "Clocked in successfully",
        ToggleOutcome::ClockedOut => "Clocked out successfully",
        ToggleOutcome::AlreadyCompleted => "Attendance already completed today",
    };
    let today = AttendanceToday::from_record(Some(record));

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": message,
        "record": today.record,
        "state": today.state,
        "action_label": today.action_label,
        "action_enabled": today.action_enabled,
    })))
}
