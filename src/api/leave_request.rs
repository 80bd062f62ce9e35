use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::session::AuthSession;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, NewLeaveRequest};
use crate::store::mysql::MySqlRecordStore;
use crate::store::RecordStore;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    #[schema(example = "approved")]
    /// Filter by leave status
    pub status: Option<LeaveStatus>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
}

/* =========================
Submit leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = NewLeaveRequest,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted successfully",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "status": "pending"
         })
        ),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthSession,
    store: web::Data<MySqlRecordStore>,
    payload: web::Json<NewLeaveRequest>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    if payload.start_date > payload.end_date {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "start_date cannot be after end_date"
        })));
    }

    // Approval or rejection happens in the HR tooling, not here.
    let request = store.insert_leave_request(employee_id, &payload).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request submitted",
        "status": request.status,
        "request": request,
    })))
}

/* =========================
List own leave requests
========================= */
/// Swagger doc for leave_list endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "The caller's leave requests", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthSession,
    store: web::Data<MySqlRecordStore>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    let leaves = store
        .query_leave_requests(Some(employee_id), query.status)
        .await?;

    Ok(HttpResponse::Ok().json(LeaveListResponse { data: leaves }))
}
