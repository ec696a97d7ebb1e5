use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
///
/// Reports the chat store under its backend name; 503 when it does not
/// answer a ping.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Chat store unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut services = HashMap::new();

    let store = state.chats.store();

    let (status, code) = match store.ping().await {
        Ok(()) => {
            services.insert(store.name().to_string(), "connected".to_string());
            ("healthy", StatusCode::OK)
        }
        Err(e) => {
            tracing::warn!("Health check ping failed: {}", e);
            services.insert(store.name().to_string(), "disconnected".to_string());
            ("degraded", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services,
        }),
    )
}
