//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for previewing runs, classifying
//! cutoffs, recalculating edited lines and persisting payroll runs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, CutoffQuery, RecalculateRequest, SaveRunRequest, SuggestPeriodQuery,
    UpdateRunRequest,
};
pub use response::{ApiError, ApiErrorResponse, PayrollRunResponse, RecalculateResponse};
pub use state::AppState;
