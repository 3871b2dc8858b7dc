//! HTTP client for the remote commerce API.
//!
//! Two read endpoints and one write endpoint, JSON bodies throughout.
//! Item image paths arrive relative and are rewritten against a
//! configured CDN base before anything else sees them. Calls carry no
//! timeout, no retry, and no cancellation; callers log failures and keep
//! their prior state.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use shared::{
    domain::{CatalogItem, ItemId},
    protocol::{OrderRequest, OrderResponse, ProductListResponse},
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// `GET {base}/product/` — the full catalog, images rewritten.
    async fn fetch_products(&self) -> Result<Vec<CatalogItem>, ApiError>;

    /// `GET {base}/product/{id}` — one item, image rewritten.
    async fn fetch_product(&self, id: &ItemId) -> Result<CatalogItem, ApiError>;

    /// `POST {base}/order` — submits the assembled order.
    async fn place_order(&self, order: &OrderRequest) -> Result<OrderResponse, ApiError>;
}

pub struct HttpCommerceApi {
    http: reqwest::Client,
    base_url: String,
    cdn_url: String,
}

impl HttpCommerceApi {
    /// Validates `base_url` up front so a bad configuration fails at
    /// startup rather than on the first request.
    pub fn new(base_url: &str, cdn_url: &str) -> Result<Self, ApiError> {
        Url::parse(base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn rewrite_image(&self, item: &mut CatalogItem) {
        item.image = join_cdn(&self.cdn_url, &item.image);
    }
}

#[async_trait]
impl CommerceApi for HttpCommerceApi {
    async fn fetch_products(&self) -> Result<Vec<CatalogItem>, ApiError> {
        let response: ProductListResponse = self
            .http
            .get(self.endpoint("product/"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let mut items = response.items;
        for item in &mut items {
            self.rewrite_image(item);
        }
        Ok(items)
    }

    async fn fetch_product(&self, id: &ItemId) -> Result<CatalogItem, ApiError> {
        let mut item: CatalogItem = self
            .http
            .get(self.endpoint(&format!("product/{}", id.as_str())))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        self.rewrite_image(&mut item);
        Ok(item)
    }

    async fn place_order(&self, order: &OrderRequest) -> Result<OrderResponse, ApiError> {
        let response: OrderResponse = self
            .http
            .post(self.endpoint("order"))
            .json(order)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

fn join_cdn(cdn_base: &str, image_path: &str) -> String {
    if image_path.starts_with('/') {
        format!("{cdn_base}{image_path}")
    } else {
        format!("{cdn_base}/{image_path}")
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
