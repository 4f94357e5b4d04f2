//! Webhook endpoint: validate, compose, forward

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use chrono_tz::Tz;
use tower_http::trace::TraceLayer;

use crate::notifier::Notifier;
use crate::{compose, validator, RelayError};

pub const SUCCESS_REPLY: &str = "Webhook processed successfully";

/// Largest alert body accepted
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Read-only request context shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_token: Arc<str>,
    pub time_zone: Tz,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(auth_token: &str, time_zone: Tz, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            auth_token: Arc::from(auth_token),
            time_zone,
            notifier,
        }
    }
}

/// Build the webhook axum router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", any(webhook_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn webhook_handler(State(state): State<AppState>, request: Request) -> Response {
    match relay(&state, request).await {
        Ok(()) => (StatusCode::OK, SUCCESS_REPLY).into_response(),
        Err(e) => {
            if e.status_code().is_server_error() {
                tracing::error!("Webhook failed: {}", e);
            } else {
                tracing::warn!("Webhook rejected: {}", e);
            }
            e.into_response()
        }
    }
}

async fn relay(state: &AppState, request: Request) -> crate::Result<()> {
    validator::check_method(request.method())?;
    validator::authorize(request.headers(), &state.auth_token)?;

    let body = axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| RelayError::BodyRead(e.to_string()))?;

    let record = validator::parse_alert(&body)?;

    tracing::info!(
        "Timestamp: {} -> {} (Timezone: {})",
        record.timestamp,
        compose::format_timestamp(record.timestamp, &state.time_zone),
        state.time_zone.name()
    );

    let notification = compose::compose(&record, &state.time_zone);
    state.notifier.notify(&notification).await
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
