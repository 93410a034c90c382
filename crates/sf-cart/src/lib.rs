//! Shopping cart persisted as a single JSON record.
//!
//! Every mutation is a full load → transform → persist cycle against the
//! `KeyValueStore`; nothing is cached between calls, so the store is always
//! the state left by the last completed mutation.

use sf_api_types::{CartLine, Product, ProductId, price_label};
use sf_storage::KeyValueStore;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CART_STORAGE_KEY: &str = "cart_v1";
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("your cart is empty")]
    EmptyCart,
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cart storage failed: {0}")]
    Storage(anyhow::Error),
    #[error("cart could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Rounds to two decimal places.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// In-memory cart contents. All operations are pure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bumps the existing line for this product, or appends one at quantity 1
    /// with the product's current price.
    pub fn add(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|line| line.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Drops the line for `id`. Returns whether one was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }

    pub fn badge_count(&self) -> u32 {
        self.lines
            .iter()
            .map(|line| line.quantity)
            .fold(0, u32::saturating_add)
    }

    /// Seeded with `0.0`: an empty `f64` sum is `-0.0`, which would label as "-0 €".
    pub fn total(&self) -> f64 {
        round_cents(
            self.lines
                .iter()
                .fold(0.0, |acc, line| acc + line.line_total()),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub id: ProductId,
    pub title: String,
    pub thumbnail: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartPanelView {
    Empty { message: String, total_label: String },
    Lines { lines: Vec<CartLineView>, total_label: String },
}

impl CartPanelView {
    pub fn of(cart: &Cart) -> Self {
        let total_label = price_label(cart.total());
        if cart.is_empty() {
            return CartPanelView::Empty {
                message: EMPTY_CART_MESSAGE.to_owned(),
                total_label,
            };
        }
        let lines = cart
            .lines()
            .iter()
            .map(|line| CartLineView {
                id: line.id,
                title: line.title.clone(),
                thumbnail: line.thumbnail.clone(),
                summary: format!("{} × {}", line.quantity, price_label(line.price)),
            })
            .collect();
        CartPanelView::Lines { lines, total_label }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub items: u32,
    pub total: f64,
}

pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_owned(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted cart. A corrupt record reads as an empty cart and
    /// zero-quantity lines are dropped.
    pub fn load(&self) -> Result<Cart, CartError> {
        let Some(raw) = self.storage.get_item(&self.key).map_err(CartError::Storage)? else {
            return Ok(Cart::default());
        };
        match serde_json::from_str::<Vec<CartLine>>(&raw) {
            Ok(mut lines) => {
                lines.retain(|line| line.quantity > 0);
                Ok(Cart::from_lines(lines))
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "discarding unreadable cart record");
                Ok(Cart::default())
            }
        }
    }

    fn persist(&self, cart: &Cart) -> Result<(), CartError> {
        let raw = serde_json::to_string(cart.lines())?;
        self.storage
            .set_item(&self.key, &raw)
            .map_err(CartError::Storage)
    }

    fn update<F>(&self, apply: F) -> Result<Cart, CartError>
    where
        F: FnOnce(&mut Cart),
    {
        let mut cart = self.load()?;
        apply(&mut cart);
        self.persist(&cart)?;
        Ok(cart)
    }

    /// Adds one unit of `product` and returns the new badge count.
    pub fn add(&self, product: &Product) -> Result<u32, CartError> {
        let cart = self.update(|cart| cart.add(product))?;
        debug!(id = %product.id, badge = cart.badge_count(), "added to cart");
        Ok(cart.badge_count())
    }

    pub fn remove(&self, id: ProductId) -> Result<Cart, CartError> {
        self.update(|cart| {
            if !cart.remove(id) {
                debug!(%id, "remove of product not in cart");
            }
        })
    }

    pub fn clear(&self) -> Result<(), CartError> {
        self.persist(&Cart::default())
    }

    pub fn badge_count(&self) -> Result<u32, CartError> {
        Ok(self.load()?.badge_count())
    }

    pub fn total(&self) -> Result<f64, CartError> {
        Ok(self.load()?.total())
    }

    pub fn panel(&self) -> Result<CartPanelView, CartError> {
        Ok(CartPanelView::of(&self.load()?))
    }

    /// Simulated payment: rejects an empty cart without touching storage,
    /// otherwise empties the cart.
    pub fn checkout(&self) -> Result<CheckoutReceipt, CartError> {
        let cart = self.load()?;
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }
        let receipt = CheckoutReceipt {
            items: cart.badge_count(),
            total: cart.total(),
        };
        self.clear()?;
        info!(items = receipt.items, total = receipt.total, "checkout simulated");
        Ok(receipt)
    }
}
