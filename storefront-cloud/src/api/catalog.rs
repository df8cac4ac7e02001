//! Public catalog API
//!
//! GET /api/stores/{slug}/products?page=&page_size=&category=
//!
//! Page 1 of an unknown store is a 404; later pages come back empty.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use serde::Deserialize;
use shared::error::ApiResponse;
use shared::models::CatalogPage;
use storefront_client::CatalogQuery;

use crate::error::ServiceResult;
use crate::state::AppState;

/// Upper bound on a requested page size
const MAX_PAGE_SIZE: u32 = 100;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/stores/{slug}/products", get(list_products))
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<String>,
}

impl CatalogParams {
    fn into_query(self, slug: String) -> CatalogQuery {
        let mut query = CatalogQuery::new(slug);
        if let Some(page) = self.page {
            query = query.page(page);
        }
        if let Some(size) = self.page_size {
            query = query.page_size(size.min(MAX_PAGE_SIZE));
        }
        if let Some(category) = self.category.filter(|c| !c.is_empty()) {
            query = query.category(category);
        }
        query
    }
}

/// GET /api/stores/{slug}/products
pub async fn list_products(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<CatalogParams>,
) -> ServiceResult<ApiResponse<CatalogPage>> {
    let query = params.into_query(slug);
    let page = state.catalog.fetch(&query).await?;
    Ok(ApiResponse::success(page))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use http::{Request, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::api::testing::{StubBackend, StubStorage, app, send};

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn store() -> serde_json::Value {
        json!({
            "store_name": "Corner Bakery",
            "whatsapp_number": "+1 555 0100",
            "products": [{
                "id": "p1", "name": "Sourdough", "description": null, "sku": "SD-1",
                "price": 7.25, "stock_quantity": 3, "is_available": true,
                "category": "bread", "position": 1,
                "created_at": "2024-05-01T00:00:00Z", "updated_at": "2024-05-01T00:00:00Z",
                "product_images": [], "product_variants": []
            }]
        })
    }

    #[test]
    fn test_params_clamp_page_size() {
        let query = CatalogParams {
            page: Some(2),
            page_size: Some(500),
            category: Some(String::new()),
        }
        .into_query("bakery".into());

        assert_eq!(query.page, 2);
        assert_eq!(query.page_size, MAX_PAGE_SIZE);
        assert!(query.category.is_none());
    }

    #[tokio::test]
    async fn test_list_products() {
        let backend = Arc::new(StubBackend {
            store: Some(store()),
            ..Default::default()
        });
        let (status, body) = send(
            app(backend.clone(), Arc::new(StubStorage::default())),
            get("/api/stores/corner-bakery/products?page=1&page_size=10&category=bread"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["store_owner"]["store_name"], "Corner Bakery");
        assert_eq!(body["data"]["products"][0]["name"], "Sourdough");
        assert_eq!(body["data"]["products"][0]["price"], 7.25);

        let queries = backend.queries.lock().unwrap();
        assert_eq!(queries[0].0.store_slug, "corner-bakery");
        assert_eq!(queries[0].0.category.as_deref(), Some("bread"));
        assert_eq!(queries[0].1.to, 10);
    }

    #[tokio::test]
    async fn test_unknown_store_first_page_is_404() {
        let (status, body) = send(
            app(
                Arc::new(StubBackend::default()),
                Arc::new(StubStorage::default()),
            ),
            get("/api/stores/ghost/products"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 3001);
        assert_eq!(body["details"]["store_slug"], "ghost");
    }

    #[tokio::test]
    async fn test_unknown_store_later_page_is_empty() {
        let (status, body) = send(
            app(
                Arc::new(StubBackend::default()),
                Arc::new(StubStorage::default()),
            ),
            get("/api/stores/ghost/products?page=2"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["products"], json!([]));
        assert_eq!(body["data"]["page"], 2);
    }

    #[tokio::test]
    async fn test_backend_failure_is_generic_500() {
        let backend = Arc::new(StubBackend {
            fail_catalog: true,
            ..Default::default()
        });
        let (status, body) = send(
            app(backend, Arc::new(StubStorage::default())),
            get("/api/stores/bakery/products"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 9001);
        assert!(!body["message"].as_str().unwrap().contains("connection"));
    }
}
