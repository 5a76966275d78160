//! HTTP API module for the Work Tracker.
//!
//! This module provides the REST endpoints for selecting a month, toggling
//! half-day shifts and reading monthly summaries and calendars.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{SelectMonthRequest, ToggleRequest};
pub use response::{ApiError, ApiErrorResponse, SelectionResponse};
pub use state::AppState;
