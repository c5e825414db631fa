//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{apply_field_edit, classify_cutoff, generate_run, suggest_period};
use crate::error::EngineError;
use crate::models::PayrollRun;

use super::request::{
    CalculationRequest, CutoffQuery, RecalculateRequest, SaveRunRequest, SuggestPeriodQuery,
    UpdateRunRequest,
};
use super::response::{ApiError, ApiErrorResponse, PayrollRunResponse, RecalculateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/cutoff", get(cutoff_handler))
        .route("/cutoff/suggest", get(suggest_period_handler))
        .route("/payroll", post(create_run_handler).get(list_runs_handler))
        .route("/payroll/:id", get(get_run_handler).patch(update_run_handler))
        .route("/recalculate", post(recalculate_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Generates a preview payslip line for every employee in the requested
/// branch. Nothing is persisted.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let period = match request.period() {
        Ok(period) => period,
        Err(err) => return error_response(err, correlation_id),
    };
    let selection = request.selection();

    let start_time = Instant::now();
    match generate_run(
        state.directory(),
        period,
        &request.branch,
        &selection,
        &state.run_defaults(),
    ) {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                lines = run.lines.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, &run.lines)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /cutoff.
async fn cutoff_handler(query: Result<Query<CutoffQuery>, QueryRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    match query {
        Ok(Query(query)) => {
            let classification = classify_cutoff(query.period_end);
            info!(
                correlation_id = %correlation_id,
                period_end = %query.period_end,
                category = %classification.category,
                "Cutoff classified"
            );
            json_response(StatusCode::OK, &classification)
        }
        Err(rejection) => validation_response(rejection.body_text()),
    }
}

/// Handler for GET /cutoff/suggest.
async fn suggest_period_handler(
    query: Result<Query<SuggestPeriodQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match query {
        Ok(Query(query)) => {
            let period = suggest_period(query.today);
            info!(
                correlation_id = %correlation_id,
                today = %query.today,
                start_date = %period.start_date,
                end_date = %period.end_date,
                "Pay period suggested"
            );
            json_response(StatusCode::OK, &period)
        }
        Err(rejection) => validation_response(rejection.body_text()),
    }
}

/// Handler for POST /payroll.
async fn create_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing save run request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let result = PayrollRun::try_from(request)
        .and_then(|run| state.payroll().save(run))
        .and_then(PayrollRunResponse::try_from);
    match result {
        Ok(response) => json_response(StatusCode::CREATED, &response),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /payroll.
async fn list_runs_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing payroll runs");
    let result = state.payroll().list().and_then(|runs| {
        runs.into_iter()
            .map(PayrollRunResponse::try_from)
            .collect::<Result<Vec<_>, _>>()
    });
    match result {
        Ok(runs) => json_response(StatusCode::OK, &runs),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /payroll/:id.
async fn get_run_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return validation_response(rejection.body_text()),
    };
    info!(correlation_id = %correlation_id, run_id = %id, "Fetching payroll run");

    match state.payroll().get(id).and_then(PayrollRunResponse::try_from) {
        Ok(response) => json_response(StatusCode::OK, &response),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for PATCH /payroll/:id.
///
/// Overwrites the run's period, lines and status. The request must carry
/// the version it was based on.
async fn update_run_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing update run request");

    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return validation_response(rejection.body_text()),
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let result = request
        .validated_period()
        .and_then(|period| {
            state
                .payroll()
                .update(id, request.version, period, request.items, request.status)
        })
        .and_then(PayrollRunResponse::try_from);
    match result {
        Ok(response) => json_response(StatusCode::OK, &response),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /recalculate.
///
/// Applies one attendance edit to the submitted lines and returns the
/// recomputed lines. Nothing is persisted.
async fn recalculate_handler(payload: Result<Json<RecalculateRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing recalculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let employee_id = request.employee_id.clone();
    let field = request.field;
    let value = request.value;
    let result = PayrollRun::try_from(request)
        .and_then(|run| apply_field_edit(&run, &employee_id, field, value))
        .and_then(RecalculateResponse::try_from);
    match result {
        Ok(response) => json_response(StatusCode::OK, &response),
        Err(err) => error_response(err, correlation_id),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, Json(body)).into_response()
}

fn validation_response(message: String) -> Response {
    json_response(StatusCode::BAD_REQUEST, &ApiError::validation_error(message))
}

fn error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}
