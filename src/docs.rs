use crate::api::attendance::AttendanceToday;
use crate::api::leave_request::{LeaveFilter, LeaveListResponse};
use crate::model::attendance::{AttendanceRecord, AttendanceState};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest};
use crate::model::stats::WeeklyStats;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timeclock API",
        version = "1.0.0",
        description = r#"
## Attendance & Leave Dashboard

This API backs an employee attendance dashboard: one clock-in/clock-out
pair per day, leave request submission, and weekly statistics.

### 🔹 Key Features
- **Attendance**
  - One record per employee per calendar day, toggled by a single button
- **Dashboard**
  - Weekly attendance count, average hours per day, remaining leave balance
  - Admin and HR tokens get the fleet-wide view
- **Leave**
  - Submit and list leave requests (approval happens in the HR tooling)

### 🔐 Security
All endpoints expect a **JWT Bearer token** issued by the login service.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::today,
        crate::api::attendance::toggle,

        crate::api::dashboard::weekly_stats,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::leave_list
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceState,
            AttendanceToday,
            WeeklyStats,
            LeaveRequest,
            LeaveStatus,
            LeaveType,
            NewLeaveRequest,
            LeaveFilter,
            LeaveListResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Daily clock-in/clock-out APIs"),
        (name = "Dashboard", description = "Weekly statistics APIs"),
        (name = "Leave", description = "Leave request APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
