//! REST client for the hosted data store and storage bucket

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::{Value, json};

use crate::catalog::{CatalogQuery, PageRange, RawStoreRow};
use crate::{Backend, ClientConfig, ClientError, ClientResult, ObjectStorage};

/// Columns pulled by the catalog join
const CATALOG_SELECT: &str = "store_name,whatsapp_number,\
products(id,name,description,sku,price,stock_quantity,is_available,category,position,created_at,updated_at,\
product_images(id,product_id,url,position,created_at),\
product_variants(id,product_id,name,sku,price_modifier,stock_quantity,is_available,created_at,updated_at))";

/// HTTP client for the table, RPC and storage endpoints
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl RestClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
        })
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path)
    }

    /// Request with the key attached both ways the backend expects it
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Map non-success statuses to client errors
    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT => ClientError::Validation(text),
            _ => ClientError::Internal(format!("{status}: {text}")),
        })
    }

    /// Query parameters for the catalog join
    pub fn catalog_params(query: &CatalogQuery, range: PageRange) -> Vec<(String, String)> {
        let mut params = vec![
            ("select".to_string(), CATALOG_SELECT.to_string()),
            ("store_slug".to_string(), format!("eq.{}", query.store_slug)),
            ("products.is_available".to_string(), "eq.true".to_string()),
        ];
        if let Some(category) = &query.category {
            params.push(("products.category".to_string(), format!("eq.{category}")));
        }
        params.extend([
            (
                "products.order".to_string(),
                "position.asc.nullslast,created_at.desc".to_string(),
            ),
            ("products.offset".to_string(), range.from.to_string()),
            ("products.limit".to_string(), range.len().to_string()),
            ("limit".to_string(), "1".to_string()),
        ]);
        params
    }
}

#[async_trait]
impl Backend for RestClient {
    async fn store_catalog(
        &self,
        query: &CatalogQuery,
        range: PageRange,
    ) -> ClientResult<Option<RawStoreRow>> {
        let response = self
            .request(Method::GET, &self.rest_url("users"))
            .query(&Self::catalog_params(query, range))
            .send()
            .await?;
        let rows: Vec<RawStoreRow> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, table: &str, row: Value) -> ClientResult<()> {
        let response = self
            .request(Method::POST, &self.rest_url(table))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn rpc(&self, function: &str, args: Value) -> ClientResult<Value> {
        let response = self
            .request(Method::POST, &self.rest_url(&format!("rpc/{function}")))
            .json(&args)
            .send()
            .await?;
        let text = Self::check(response).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ObjectStorage for RestClient {
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> ClientResult<()> {
        let url = self.storage_url(&format!("object/{}/{}", self.bucket, path));
        let response = self
            .request(Method::POST, &url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await?;
        Self::check(response)
            .await
            .map_err(|e| ClientError::Storage(format!("upload {path}: {e}")))?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        self.storage_url(&format!("object/public/{}/{}", self.bucket, path))
    }

    async fn remove(&self, paths: &[String]) -> ClientResult<()> {
        let url = self.storage_url(&format!("object/{}", self.bucket));
        let response = self
            .request(Method::DELETE, &url)
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;
        Self::check(response)
            .await
            .map_err(|e| ClientError::Storage(format!("remove: {e}")))?;
        Ok(())
    }

    async fn download(&self, url: &str) -> ClientResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let bytes = Self::check(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
