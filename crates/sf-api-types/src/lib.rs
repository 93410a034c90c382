use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry as served by the product-listing endpoint.
///
/// Unknown fields in the payload (rating, stock, brand, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Images to show in the carousel: the gallery, or the thumbnail alone
    /// when the product has no gallery.
    pub fn gallery(&self) -> Vec<String> {
        if self.images.is_empty() {
            vec![self.thumbnail.clone()]
        } else {
            self.images.clone()
        }
    }
}

/// Display form of a price, matching the storefront's `"{price} €"` labels.
///
/// Integral prices print without decimals (`10 €`), others as-is (`12.5 €`).
pub fn price_label(price: f64) -> String {
    format!("{price} €")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductListResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub products: Vec<Product>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One persisted cart record. `price` is frozen when the line is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
