use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for the attendance and stats operations.
///
/// Nothing here is retried by the service: store failures surface to the
/// caller as visible errors, and `Unauthenticated` sends the client back
/// to login. The only tolerated anomaly is a duplicate same-day record on
/// the read path, which the tracker resolves by taking the earliest row
/// instead of erroring.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No usable identity on the request.
    #[error("no authenticated identity")]
    Unauthenticated,

    /// The record store failed while being read.
    #[error("record store read failed: {0}")]
    StoreRead(#[source] sqlx::Error),

    /// The record store rejected or failed an insert/update.
    #[error("record store write failed: {0}")]
    StoreWrite(#[source] sqlx::Error),

    /// The store's per-day unique key rejected a second same-day insert.
    #[error("attendance already recorded today for employee {employee_id}")]
    InvariantViolation { employee_id: u64 },
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ServiceError::StoreRead(_) | ServiceError::StoreWrite(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::InvariantViolation { .. } => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Store errors carry connection details; keep those out of the body.
        let message = match self {
            ServiceError::StoreRead(_) | ServiceError::StoreWrite(_) => {
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
