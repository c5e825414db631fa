//! Response types for the payroll engine API.
//!
//! This module defines the success payloads, the error response structure,
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{BranchFilter, PayrollRun, PayslipLine, RunStatus, StoredPayrollRun};

/// A persisted payroll run as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunResponse {
    /// Run identifier.
    pub id: Uuid,
    /// Version to send back with the next update.
    pub version: u64,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Branch filter the run covers.
    pub branch: BranchFilter,
    /// Lifecycle state.
    pub status: RunStatus,
    /// Payslip lines.
    pub items: Vec<PayslipLine>,
    /// Sum of net pay across lines.
    pub total_payout: Decimal,
    /// When the run was first saved.
    pub created_at: DateTime<Utc>,
    /// When the run was last written.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<StoredPayrollRun> for PayrollRunResponse {
    type Error = EngineError;

    fn try_from(stored: StoredPayrollRun) -> Result<Self, Self::Error> {
        let total_payout = stored.run.total_payout()?;
        Ok(PayrollRunResponse {
            id: stored.id,
            version: stored.version,
            period_start: stored.run.period.start_date,
            period_end: stored.run.period.end_date,
            branch: stored.run.branch_filter,
            status: stored.run.status,
            items: stored.run.lines,
            total_payout,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }
}

/// Result of a live recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculateResponse {
    /// The lines after the edit.
    pub items: Vec<PayslipLine>,
    /// Sum of net pay across the updated lines.
    pub total_payout: Decimal,
}

impl TryFrom<PayrollRun> for RecalculateResponse {
    type Error = EngineError;

    fn try_from(run: PayrollRun) -> Result<Self, Self::Error> {
        let total_payout = run.total_payout()?;
        Ok(RecalculateResponse {
            items: run.lines,
            total_payout,
        })
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", path),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    message,
                    "period_end must be on or after period_start",
                ),
            },
            EngineError::InvalidAmount { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_AMOUNT", message),
            },
            EngineError::EmployeeNotInRun { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_IN_RUN", message),
            },
            EngineError::RunNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("RUN_NOT_FOUND", message),
            },
            EngineError::VersionConflict { actual, .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "VERSION_CONFLICT",
                    message,
                    format!("Reload the run (current version {}) and reapply the edit", actual),
                ),
            },
            EngineError::Storage { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            },
        }
    }
}
