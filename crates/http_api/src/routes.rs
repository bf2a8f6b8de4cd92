//! HTTP routes
//!
//! - `POST /process` - validate, route, dispatch in the background, acknowledge
//! - `GET /health` - liveness plus dispatch counters

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use contracts::{DestinationWriter, InputUnit};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{HealthResponse, MessageResponse, ProcessRequest};

/// Upper bound on handling one request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the application router
pub fn build_router<W>(state: AppState<W>) -> Router
where
    W: DestinationWriter + Sync + 'static,
{
    Router::new()
        .route("/process", post(process_input::<W>))
        .route("/health", get(health::<W>))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Acknowledges as soon as the dispatch is spawned; delivery outcome is
/// never reflected in the response.
///
/// The body is decoded as JSON whatever the `Content-Type` header says.
async fn process_input<W>(
    State(state): State<AppState<W>>,
    body: Bytes,
) -> Result<Json<MessageResponse>>
where
    W: DestinationWriter + Sync + 'static,
{
    let request: ProcessRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Failed to decode request body");
        observability::record_request_malformed();
        ApiError::InvalidInput
    })?;

    let input = InputUnit::from(request);
    dispatcher::validate(&input, &state.routes).map_err(|err| {
        observability::record_request_rejected(&err);
        ApiError::from_validation(err, &state.routes)
    })?;

    let destinations = dispatcher::resolve(&state.routes, &input.tag).to_vec();
    debug!(tag = %input.tag, destinations = destinations.len(), "Input accepted");
    observability::record_request_accepted(&input.tag);

    state.pipeline.dispatch(input, destinations);

    Ok(Json(MessageResponse::ok()))
}

async fn health<W>(State(state): State<AppState<W>>) -> Json<HealthResponse>
where
    W: DestinationWriter + Sync + 'static,
{
    Json(HealthResponse {
        status: if state.pipeline.is_shutting_down() {
            "shutting_down"
        } else {
            "ok"
        },
        in_flight: state.pipeline.in_flight(),
        dispatch: state.pipeline.metrics(),
    })
}
