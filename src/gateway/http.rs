//! HTTP relay to the external product API.
//!
//! Forwards query parameters verbatim on list and bodies verbatim on
//! create/update, exactly like the thin proxy it replaces. Transport-level
//! failures are logged here and collapsed into the generic
//! [`GatewayError::transport`] signal.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::{GatewayError, ListQuery, ProductGateway};
use crate::model::{Product, ProductFields, ProductPage};

/// Gateway implementation backed by the real product backend.
///
/// `base_url` points at the API root, e.g.
/// `http://localhost:8001/api/web/v1`. List requests go to `{base}/products`,
/// everything else to `{base}/product`.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = Client::builder().build().map_err(|e| {
            warn!(error = %e, "Failed to build HTTP client");
            GatewayError::transport()
        })?;
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self) -> String {
        format!("{}/product", self.base_url)
    }

    /// Maps a settled response to our coarse error taxonomy and decodes the
    /// body on success.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, GatewayError> {
        match response.status() {
            status if status.is_success() => response.json::<T>().await.map_err(|e| {
                warn!(error = %e, "Failed to decode backend response");
                GatewayError::transport()
            }),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound("unknown product".to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(GatewayError::Rejected("invalid product payload".to_string()))
            }
            status => {
                warn!(%status, "Backend returned failure status");
                Err(GatewayError::transport())
            }
        }
    }
}

#[async_trait]
impl ProductGateway for HttpGateway {
    async fn list(&self, query: ListQuery) -> Result<ProductPage, GatewayError> {
        debug!(page = query.page, limit = query.limit, search = %query.search, "GET products");
        let response = self
            .client
            .get(self.products_url())
            .query(&[
                ("page", query.page.to_string()),
                ("limit", query.limit.to_string()),
                ("search", query.search),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "List request failed");
                GatewayError::transport()
            })?;
        Self::decode(response).await
    }

    async fn get(&self, id: &str) -> Result<Product, GatewayError> {
        debug!(%id, "GET product");
        let response = self
            .client
            .get(self.product_url())
            .query(&[("product_id", id)])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Get request failed");
                GatewayError::transport()
            })?;
        Self::decode(response).await
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, GatewayError> {
        debug!(title = %fields.title, "POST product");
        let response = self
            .client
            .post(self.product_url())
            .json(&fields)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Create request failed");
                GatewayError::transport()
            })?;
        Self::decode(response).await
    }

    async fn update(&self, id: &str, fields: ProductFields) -> Result<Product, GatewayError> {
        debug!(%id, title = %fields.title, "PUT product");
        // The backend takes the id in the body alongside the fields.
        let mut body = serde_json::to_value(&fields).map_err(|e| {
            warn!(error = %e, "Failed to encode update body");
            GatewayError::transport()
        })?;
        if let Value::Object(map) = &mut body {
            map.insert("product_id".to_string(), Value::String(id.to_string()));
        }
        let response = self
            .client
            .put(self.product_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Update request failed");
                GatewayError::transport()
            })?;
        Self::decode(response).await
    }
}
