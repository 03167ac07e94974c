//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints that compute pay lines and
//! roster summaries from posted clock events.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EmployeeRequest, EventRequest, PayLineRequest, PayPeriodRequest, PublicHolidayRequest,
    RosterRequest, WageBasisRequest,
};
pub use response::{ApiError, PayLineResponse, RosterResponse};
pub use state::AppState;
