use actix_web::{HttpResponse, Responder, web};
use chrono::Local;

use crate::auth::session::AuthSession;
use crate::config::Config;
use crate::model::stats::WeeklyStats;
use crate::service::stats;
use crate::store::mysql::MySqlRecordStore;

/// Weekly dashboard statistics endpoint
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    responses(
        (status = 200, description = "Weekly stats for the caller's view", body = WeeklyStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn weekly_stats(
    auth: AuthSession,
    store: web::Data<MySqlRecordStore>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    // Admin/HR dashboards aggregate the whole fleet; everyone else sees
    // their own week.
    let scope = if auth.role.sees_fleet() {
        None
    } else {
        Some(auth.require_employee()?)
    };

    let stats = stats::weekly(
        store.get_ref(),
        scope,
        &Local::now(),
        config.annual_leave_allowance,
    )
    .await?;

    Ok(HttpResponse::Ok().json(stats))
}
