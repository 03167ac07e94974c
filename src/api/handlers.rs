//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::PayrollEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PublicHoliday};

use super::request::{PayLineRequest, RosterRequest, into_clock_events};
use super::response::{ApiError, ApiErrorResponse, PayLineResponse, RosterResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/pay-line", post(pay_line_handler))
        .route("/roster-summary", post(roster_summary_handler))
        .with_state(state)
}

/// Handler for POST /pay-line endpoint.
///
/// Computes one employee's pay line, daily breakdown and audit trace.
async fn pay_line_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayLineRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing pay line request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_json(correlation_id, rejection),
    };

    let config = state.config();
    let (employee, period) = match request
        .employee
        .into_employee(config)
        .and_then(|employee| Ok((employee, request.period.into_period()?)))
    {
        Ok(parts) => parts,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rejected pay line request"
            );
            return engine_error(err);
        }
    };

    let mut holidays: Vec<PublicHoliday> = config.holidays().to_vec();
    holidays.extend(request.public_holidays.into_iter().map(Into::into));
    let events = into_clock_events(request.events);
    let as_of = request.as_of.unwrap_or_else(Utc::now);

    let start_time = Instant::now();
    let engine = PayrollEngine::new(config.time_zone(), &holidays, config.pay_policy());
    let outcome = match engine.pay_line(&employee, &events, period, as_of) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                error = %err,
                "Pay line computation failed"
            );
            return engine_error(err);
        }
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        events_count = events.len(),
        diagnostics_count = outcome.diagnostics.len(),
        gross_pay = %outcome.pay_line.gross_pay,
        provisional = outcome.pay_line.is_provisional,
        duration_us = start_time.elapsed().as_micros(),
        "Pay line computed"
    );

    json_ok(PayLineResponse::new(as_of, outcome))
}

/// Handler for POST /roster-summary endpoint.
///
/// Computes pay lines for every listed employee and their totals.
async fn roster_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<RosterRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing roster summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_json(correlation_id, rejection),
    };

    let config = state.config();
    let employees: EngineResult<Vec<Employee>> = request
        .employees
        .into_iter()
        .map(|employee| employee.into_employee(config))
        .collect();
    let (employees, period) = match employees
        .and_then(|employees| Ok((employees, request.period.into_period()?)))
    {
        Ok(parts) => parts,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rejected roster summary request"
            );
            return engine_error(err);
        }
    };

    let holidays: Vec<PublicHoliday> = config.holidays().to_vec();
    let events = into_clock_events(request.events);
    let as_of = request.as_of.unwrap_or_else(Utc::now);

    let start_time = Instant::now();
    let engine = PayrollEngine::new(config.time_zone(), &holidays, config.pay_policy());
    let outcome = match engine.roster_summary(&employees, &events, period, as_of) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Roster summary computation failed"
            );
            return engine_error(err);
        }
    };

    info!(
        correlation_id = %correlation_id,
        employee_count = outcome.summary.employee_count,
        events_count = events.len(),
        diagnostics_count = outcome.diagnostics.len(),
        gross_pay = %outcome.summary.gross_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Roster summary computed"
    );

    json_ok(RosterResponse::new(as_of, outcome))
}

/// Maps a JSON extraction failure to a 400 response.
fn bad_json(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn engine_error(err: EngineError) -> Response {
    ApiErrorResponse::from(err).into_response()
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
