use async_trait::async_trait;
use sf_api_types::{Product, ProductId, ProductListResponse, price_label};
use thiserror::Error;
use tracing::{debug, error, info};

pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products?limit=12";

/// Inline message shown in place of the product list when loading fails.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load products. Check your connection or the API URL.";

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("network error: {0}")]
    Network(String),
    #[error("catalog endpoint answered {status}: {status_text}")]
    Status { status: u16, status_text: String },
    #[error("malformed product list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses a `{ "products": [...] }` payload.
///
/// An object without a `products` field is an empty catalog, not an error.
pub fn parse_product_list(body: &str) -> Result<Vec<Product>, CatalogLoadError> {
    let response: ProductListResponse = serde_json::from_str(body)?;
    Ok(response.products)
}

/// Where the product list comes from.
///
/// `?Send` so that browser fetch futures can implement it.
#[async_trait(?Send)]
pub trait CatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogLoadError>;
}

/// Fixed in-process catalog, optionally failing with a network error.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
    failure: Option<String>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            failure: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            products: Vec::new(),
            failure: Some(reason.to_owned()),
        }
    }
}

#[async_trait(?Send)]
impl CatalogSource for StaticCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogLoadError> {
        match &self.failure {
            Some(reason) => Err(CatalogLoadError::Network(reason.clone())),
            None => Ok(self.products.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub thumbnail: String,
    pub price_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView {
    Loading,
    Failed { message: String },
    Ready { cards: Vec<ProductCard> },
}

/// Info-panel contents for the selected product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub id: ProductId,
    pub title: String,
    pub price_label: String,
    pub description: String,
    pub add_to_cart_enabled: bool,
    pub gallery: Vec<String>,
}

impl ProductDetail {
    fn of(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price_label: price_label(product.price),
            description: product.description.clone(),
            add_to_cart_enabled: true,
            gallery: product.gallery(),
        }
    }
}

/// The session's product list and current selection.
#[derive(Debug, Default)]
pub struct CatalogState {
    products: Vec<Product>,
    selected: Option<ProductId>,
    status: LoadStatus,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the catalog once and applies the outcome.
    pub async fn load<C>(&mut self, source: &C) -> Option<ProductDetail>
    where
        C: CatalogSource + ?Sized,
    {
        let result = source.fetch_products().await;
        self.apply_load(result)
    }

    /// Stores a fetch outcome. On success the first product, if any, becomes
    /// the selection and its detail is returned. On failure the catalog is
    /// left empty.
    pub fn apply_load(&mut self, result: Result<Vec<Product>, CatalogLoadError>) -> Option<ProductDetail> {
        match result {
            Ok(products) => {
                info!(count = products.len(), "catalog loaded");
                self.products = products;
                self.status = LoadStatus::Loaded;
                let first = self.products.first().map(|p| p.id)?;
                self.select(first)
            }
            Err(err) => {
                error!(error = %err, "catalog load failed");
                self.products.clear();
                self.selected = None;
                self.status = LoadStatus::Failed;
                None
            }
        }
    }

    /// Selects a product by id. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: ProductId) -> Option<ProductDetail> {
        let Some(product) = self.products.iter().find(|p| p.id == id) else {
            debug!(%id, "ignoring selection of unknown product");
            return None;
        };
        self.selected = Some(id);
        Some(ProductDetail::of(product))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn selected(&self) -> Option<&Product> {
        let id = self.selected?;
        self.products.iter().find(|p| p.id == id)
    }

    pub fn detail(&self) -> Option<ProductDetail> {
        self.selected().map(ProductDetail::of)
    }

    pub fn view(&self) -> CatalogView {
        match self.status {
            LoadStatus::Pending => CatalogView::Loading,
            LoadStatus::Failed => CatalogView::Failed {
                message: LOAD_FAILED_MESSAGE.to_owned(),
            },
            LoadStatus::Loaded => CatalogView::Ready {
                cards: self
                    .products
                    .iter()
                    .map(|p| ProductCard {
                        id: p.id,
                        title: p.title.clone(),
                        thumbnail: p.thumbnail.clone(),
                        price_label: price_label(p.price),
                    })
                    .collect(),
            },
        }
    }
}
