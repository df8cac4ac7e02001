//! Wire types for the product view counter

use serde::{Deserialize, Serialize};

/// Analytics event type recorded for every product view
pub const PRODUCT_VIEW_EVENT: &str = "product_view";

/// Remote procedure incrementing a product's view counter
pub const INCREMENT_VIEWS_RPC: &str = "increment_product_views";

/// Body of `POST increment-view-count`
///
/// Required fields are optional here so that missing ones surface as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCountRequest {
    pub product_id: Option<String>,
    pub store_slug: Option<String>,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
}

impl ViewCountRequest {
    /// Both required fields, when present and non-empty
    pub fn required(&self) -> Option<(&str, &str)> {
        let product_id = self.product_id.as_deref().filter(|s| !s.is_empty())?;
        let store_slug = self.store_slug.as_deref().filter(|s| !s.is_empty())?;
        Some((product_id, store_slug))
    }
}

/// Success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewCountResponse {
    pub success: bool,
    pub message: String,
}

impl ViewCountResponse {
    pub fn updated() -> Self {
        Self {
            success: true,
            message: "View count updated".to_string(),
        }
    }
}

/// Failure body, deliberately free of internal detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewCountErrorBody {
    pub error: String,
}

/// Row inserted into `analytics_events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event_type: String,
    pub product_id: String,
    pub store_slug: String,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AnalyticsEvent {
    /// Build a product view event stamped with the current time
    pub fn product_view(
        product_id: impl Into<String>,
        store_slug: impl Into<String>,
        session_id: Option<String>,
        user_agent: Option<String>,
        ip_address: impl Into<String>,
    ) -> Self {
        Self {
            event_type: PRODUCT_VIEW_EVENT.to_string(),
            product_id: product_id.into(),
            store_slug: store_slug.into(),
            session_id,
            user_agent,
            ip_address: ip_address.into(),
            created_at: chrono::Utc::now(),
        }
    }
}
