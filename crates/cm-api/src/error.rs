//! API error handling
//!
//! Every failure leaves as `{"error": <code>, "message": <detail>}` with the
//! status taken from the ledger error taxonomy.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cm_core::error::LedgerError;
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// A ledger operation failed
    Ledger(LedgerError),
    /// The request itself could not be decoded
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Ledger(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Ledger(LedgerError::Validation(errors)) => ErrorBody {
                error: "invalid_argument",
                message: errors.full_messages().join(", "),
            },
            ApiError::Ledger(err) if err.status_code() >= 500 => ErrorBody {
                error: err.error_code(),
                message: "An internal error occurred".into(),
            },
            ApiError::Ledger(err) => ErrorBody {
                error: err.error_code(),
                message: err.to_string(),
            },
            ApiError::BadRequest(msg) => ErrorBody {
                error: "invalid_argument",
                message: msg.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Ledger(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LedgerError::not_found("Task", 1), StatusCode::NOT_FOUND),
            (LedgerError::invalid("hours_worked", "must be greater than 0"), StatusCode::BAD_REQUEST),
            (LedgerError::failed_precondition("not assigned"), StatusCode::BAD_REQUEST),
            (LedgerError::conflict("duplicate"), StatusCode::CONFLICT),
            (LedgerError::Database("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_cap_body_reports_logged_hours() {
        let err = ApiError::from(LedgerError::DailyCapExceeded {
            consultant_id: 1,
            work_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            logged_hours: Decimal::from(5),
            requested_hours: Decimal::from(8),
            cap: Decimal::from(12),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.body();
        assert_eq!(body.error, "resource_exhausted");
        assert!(body.message.contains("Already worked 5 hours"));
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let body = ApiError::from(LedgerError::Database("password=hunter2".into())).body();
        assert_eq!(body.error, "database_error");
        assert!(!body.message.contains("hunter2"));
    }
}
