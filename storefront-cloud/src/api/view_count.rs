//! Product view counter
//!
//! POST /functions/v1/increment-view-count (alias /api/increment-view-count)
//!
//! 1. Validate `productId` + `storeSlug`
//! 2. Record an `analytics_events` row (best effort, never affects the response)
//! 3. Call `increment_product_views` (must succeed)
//!
//! Error bodies are `{ "error": "..." }` with no internal detail.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http::{HeaderMap, StatusCode};
use serde_json::json;
use shared::view_count::{
    AnalyticsEvent, INCREMENT_VIEWS_RPC, ViewCountErrorBody, ViewCountRequest, ViewCountResponse,
};
use storefront_client::BestEffort;

use crate::state::AppState;

/// Table receiving one row per view
const ANALYTICS_TABLE: &str = "analytics_events";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/functions/v1/increment-view-count", post(increment_view_count))
        .route("/api/increment-view-count", post(increment_view_count))
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ViewCountErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// First `x-forwarded-for` hop, else `x-real-ip`, else `"unknown"`
fn client_ip(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };
    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .unwrap_or("unknown")
        .to_string()
}

/// POST increment-view-count
pub async fn increment_view_count(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request: ViewCountRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected view count body");
            return error(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };

    let Some((product_id, store_slug)) = request.required() else {
        return error(
            StatusCode::BAD_REQUEST,
            "Missing required fields: productId and storeSlug",
        );
    };

    let user_agent = request.user_agent.clone().or_else(|| {
        headers
            .get(http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    });
    let event = AnalyticsEvent::product_view(
        product_id,
        store_slug,
        request.session_id.clone(),
        user_agent,
        client_ip(&headers),
    );

    let row = match serde_json::to_value(&event) {
        Ok(row) => row,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode analytics event");
            return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let recorded = BestEffort::from_result(state.backend.insert(ANALYTICS_TABLE, row).await);
    if let BestEffort::Degraded(reason) = &recorded {
        tracing::warn!(
            product_id = %product_id,
            store_slug = %store_slug,
            reason = %reason,
            "Analytics event not recorded"
        );
    }

    if let Err(e) = state
        .backend
        .rpc(INCREMENT_VIEWS_RPC, json!({ "product_id": product_id }))
        .await
    {
        tracing::error!(product_id = %product_id, error = %e, "View count RPC failed");
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update view count");
    }

    tracing::debug!(
        product_id = %product_id,
        store_slug = %store_slug,
        analytics_degraded = recorded.is_degraded(),
        "View counted"
    );
    (StatusCode::OK, Json(ViewCountResponse::updated())).into_response()
}
