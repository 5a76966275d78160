//! HTTP request handlers for the Work Tracker API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::YearMonth;
use crate::tracker::LoadOutcome;

use super::request::{SelectMonthRequest, ToggleRequest};
use super::response::{ApiError, ApiErrorResponse, SelectionResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/selection", get(get_selection_handler).put(put_selection_handler))
        .route("/selection/previous", post(previous_month_handler))
        .route("/selection/next", post(next_month_handler))
        .route("/months/:year/:month/summary", get(month_summary_handler))
        .route("/months/:year/:month/calendar", get(month_calendar_handler))
        .route("/shifts/toggle", post(toggle_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a body rejection to a 400 with a JSON error body.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    ApiErrorResponse::bad_request(error)
}

/// Resolves `/months/:year/:month` into a validated month.
fn month_from_path(
    correlation_id: Uuid,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Result<YearMonth, ApiErrorResponse> {
    let Path((year, month)) = path.map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid month path"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;
    YearMonth::new(year, month).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid month");
        ApiErrorResponse::from(err)
    })
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Handler for GET /selection.
///
/// Returns the selected month with its summary and grid.
async fn get_selection_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.tracker().snapshot())
}

/// Handler for PUT /selection.
async fn put_selection_handler(
    State(state): State<AppState>,
    payload: Result<Json<SelectMonthRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing month selection");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };
    let year_month = match request.year_month() {
        Ok(year_month) => year_month,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid month");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let outcome = state.tracker().select(year_month).await;
    selection_response(&state, correlation_id, outcome)
}

/// Handler for POST /selection/previous.
async fn previous_month_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Navigating to previous month");
    let outcome = state.tracker().previous_month().await;
    selection_response(&state, correlation_id, outcome)
}

/// Handler for POST /selection/next.
async fn next_month_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Navigating to next month");
    let outcome = state.tracker().next_month().await;
    selection_response(&state, correlation_id, outcome)
}

fn selection_response(state: &AppState, correlation_id: Uuid, outcome: LoadOutcome) -> Response {
    let view = state.tracker().snapshot();
    info!(
        correlation_id = %correlation_id,
        year_month = %view.year_month,
        outcome = ?outcome,
        total_working_days = %view.summary.totals.total_working_days,
        "Selection updated"
    );
    json_response(StatusCode::OK, SelectionResponse { outcome, view })
}

/// Handler for GET /months/:year/:month/summary.
///
/// Loads and summarises any month without changing the selection.
async fn month_summary_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let year_month = match month_from_path(correlation_id, path) {
        Ok(year_month) => year_month,
        Err(err) => return err.into_response(),
    };
    info!(correlation_id = %correlation_id, %year_month, "Processing summary request");

    let start_time = Instant::now();
    let summary = state.tracker().summarize(year_month).await;
    info!(
        correlation_id = %correlation_id,
        %year_month,
        days = summary.days.len(),
        salary = %summary.totals.salary,
        complete = summary.status.is_complete(),
        duration_us = start_time.elapsed().as_micros(),
        "Summary completed"
    );
    json_response(StatusCode::OK, summary)
}

/// Handler for GET /months/:year/:month/calendar.
async fn month_calendar_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let year_month = match month_from_path(correlation_id, path) {
        Ok(year_month) => year_month,
        Err(err) => return err.into_response(),
    };
    info!(correlation_id = %correlation_id, %year_month, "Processing calendar request");
    json_response(StatusCode::OK, state.tracker().calendar_for(year_month).await)
}

/// Handler for POST /shifts/toggle.
///
/// Flips one half-day of the selected month and returns the stored record.
async fn toggle_handler(
    State(state): State<AppState>,
    payload: Result<Json<ToggleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing toggle request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    match state.tracker().toggle(request.date, request.period).await {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                date = %record.date,
                period = %record.period,
                is_working = record.is_working,
                "Toggle completed"
            );
            json_response(StatusCode::OK, record)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                date = %request.date,
                period = %request.period,
                error = %err,
                "Toggle failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayConfig;
    use crate::store::MemoryStore;
    use crate::tracker::WorkTracker;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn create_test_state(store: Arc<MemoryStore>) -> AppState {
        let january = YearMonth::new(2026, 1).unwrap();
        let tracker = WorkTracker::new(store, PayConfig::default(), january).unwrap();
        tracker.select(january).await;
        AppState::new(tracker)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn toggle_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/shifts/toggle")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let router = create_router(create_test_state(Arc::new(MemoryStore::new())).await);
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_toggle_returns_stored_record() {
        let store = Arc::new(MemoryStore::new());
        let router = create_router(create_test_state(store.clone()).await);

        let response = router
            .oneshot(toggle_request(r#"{"date":"2026-01-05","period":"PM"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let json = body_json(response).await;
        assert_eq!(json["date"], "2026-01-05");
        assert_eq!(json["period"], "PM");
        assert_eq!(json["is_working"], true);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_with_missing_field_is_validation_error() {
        let router = create_router(create_test_state(Arc::new(MemoryStore::new())).await);
        let response = router
            .oneshot(toggle_request(r#"{"date":"2026-01-05"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_toggle_with_bad_syntax_is_malformed_json() {
        let router = create_router(create_test_state(Arc::new(MemoryStore::new())).await);
        let response = router.oneshot(toggle_request("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_toggle_outside_selection_is_conflict() {
        let router = create_router(create_test_state(Arc::new(MemoryStore::new())).await);
        let response = router
            .oneshot(toggle_request(r#"{"date":"2026-03-05","period":"AM"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["code"], "DATE_OUTSIDE_MONTH");
    }

    #[tokio::test]
    async fn test_rejected_write_is_bad_gateway() {
        let store = Arc::new(MemoryStore::new());
        let router = create_router(create_test_state(store.clone()).await);
        store.set_fail_writes(true);
        let response = router
            .oneshot(toggle_request(r#"{"date":"2026-01-05","period":"AM"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "WRITE_REJECTED");
    }

    #[tokio::test]
    async fn test_invalid_month_path_is_bad_request() {
        let router = create_router(create_test_state(Arc::new(MemoryStore::new())).await);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/months/2026/13/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_MONTH");
    }

    #[tokio::test]
    async fn test_non_numeric_month_path_is_bad_request() {
        let router = create_router(create_test_state(Arc::new(MemoryStore::new())).await);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/months/2026/june/calendar")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_put_selection_switches_month() {
        let state = create_test_state(Arc::new(MemoryStore::new())).await;
        let router = create_router(state.clone());
        let response = router
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/selection")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"year":2026,"month":2}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["outcome"], "applied");
        assert_eq!(json["year_month"]["month"], 2);
        assert_eq!(json["calendar"]["days"].as_array().unwrap().len(), 28);
        assert_eq!(state.tracker().selection(), YearMonth::new(2026, 2).unwrap());
    }
}
