//! HTTP catalog client.
//!
//! One unauthenticated GET to the product-listing endpoint. No retry,
//! no timeout.

use async_trait::async_trait;
use gloo_net::http::Request;
use sf_api_types::Product;
use sf_catalog::{CatalogLoadError, CatalogSource, parse_product_list};
use tracing::debug;

pub struct FetchCatalog {
    url: String,
}

impl FetchCatalog {
    pub fn new(url: &str) -> Self {
        Self { url: url.to_owned() }
    }
}

#[async_trait(?Send)]
impl CatalogSource for FetchCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogLoadError> {
        debug!(url = %self.url, "fetching catalog");
        let resp = Request::get(&self.url)
            .send()
            .await
            .map_err(|err| CatalogLoadError::Network(err.to_string()))?;

        if !resp.ok() {
            return Err(CatalogLoadError::Status {
                status: resp.status(),
                status_text: resp.status_text(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|err| CatalogLoadError::Network(err.to_string()))?;
        parse_product_list(&body)
    }
}
