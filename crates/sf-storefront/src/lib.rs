//! Storefront state owner.
//!
//! `Storefront` owns the catalog, the carousel and the cart. The browser
//! shell turns DOM events into `Intent`s, hands them to `dispatch`, performs
//! the returned `Effect`s and re-renders from `view()`.

pub mod config;

pub use config::{RejectedOverride, StorefrontConfig};

use sf_api_types::{Product, ProductId};
use sf_carousel::{Carousel, CarouselView, Scheduler};
use sf_cart::{CartError, CartPanelView, CartStore};
use sf_catalog::{CatalogLoadError, CatalogSource, CatalogState, CatalogView, ProductDetail};
use sf_storage::KeyValueStore;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectProduct(ProductId),
    AddSelectedToCart,
    RemoveFromCart(ProductId),
    ClearCart,
    ToggleCartPanel,
    Checkout,
    CarouselNext,
    CarouselPrev,
    CarouselGoTo(usize),
    CarouselPointerEnter,
    CarouselPointerLeave,
    AutoplayTick,
}

/// Blocking notices surfaced to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmptyCart,
    CheckoutComplete,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::EmptyCart => sf_cart::EMPTY_CART_MESSAGE,
            Notice::CheckoutComplete => "Payment simulated. Thank you!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Notice(Notice),
    PulseCartButton,
}

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Cart(#[from] CartError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontView {
    pub catalog: CatalogView,
    pub detail: Option<ProductDetail>,
    pub carousel: CarouselView,
    pub badge: u32,
    pub cart_panel: Option<CartPanelView>,
}

pub struct Storefront<S: Scheduler, K> {
    config: StorefrontConfig,
    catalog: CatalogState,
    carousel: Carousel<S>,
    cart: CartStore<K>,
    cart_open: bool,
}

impl<S, K> Storefront<S, K>
where
    S: Scheduler,
    K: KeyValueStore,
{
    pub fn new(config: StorefrontConfig, scheduler: S, storage: K) -> Self {
        let carousel = Carousel::new(scheduler, config.autoplay_interval);
        let cart = CartStore::with_key(storage, &config.cart_storage_key);
        Self {
            config,
            catalog: CatalogState::new(),
            carousel,
            cart,
            cart_open: false,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn carousel(&self) -> &Carousel<S> {
        &self.carousel
    }

    pub fn cart(&self) -> &CartStore<K> {
        &self.cart
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub async fn load_catalog<C>(&mut self, source: &C)
    where
        C: CatalogSource + ?Sized,
    {
        let result = source.fetch_products().await;
        self.catalog_loaded(result);
    }

    /// Applies a finished fetch and feeds the initial selection to the carousel.
    pub fn catalog_loaded(&mut self, result: Result<Vec<Product>, CatalogLoadError>) {
        if let Some(detail) = self.catalog.apply_load(result) {
            self.carousel.build(detail.gallery);
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<Vec<Effect>, StorefrontError> {
        debug!(?intent, "dispatch");
        let effects = match intent {
            Intent::SelectProduct(id) => {
                if let Some(detail) = self.catalog.select(id) {
                    self.carousel.build(detail.gallery);
                }
                Vec::new()
            }
            Intent::AddSelectedToCart => match self.catalog.selected() {
                Some(product) => {
                    self.cart.add(product)?;
                    vec![Effect::PulseCartButton]
                }
                None => Vec::new(),
            },
            Intent::RemoveFromCart(id) => {
                self.cart.remove(id)?;
                Vec::new()
            }
            Intent::ClearCart => {
                self.cart.clear()?;
                Vec::new()
            }
            Intent::ToggleCartPanel => {
                self.cart_open = !self.cart_open;
                Vec::new()
            }
            Intent::Checkout => match self.cart.checkout() {
                Ok(_) => {
                    self.cart_open = false;
                    vec![Effect::Notice(Notice::CheckoutComplete)]
                }
                Err(CartError::Validation(_)) => vec![Effect::Notice(Notice::EmptyCart)],
                Err(err) => return Err(err.into()),
            },
            Intent::CarouselNext => {
                self.carousel.next();
                Vec::new()
            }
            Intent::CarouselPrev => {
                self.carousel.prev();
                Vec::new()
            }
            Intent::CarouselGoTo(index) => {
                self.carousel.go_to(index);
                Vec::new()
            }
            Intent::CarouselPointerEnter => {
                self.carousel.pointer_enter();
                Vec::new()
            }
            Intent::CarouselPointerLeave => {
                self.carousel.pointer_leave();
                Vec::new()
            }
            Intent::AutoplayTick => {
                self.carousel.tick();
                Vec::new()
            }
        };
        Ok(effects)
    }

    /// Slide offset for the current index against a freshly measured width.
    pub fn carousel_offset(&self, measured_width: Option<f64>) -> f64 {
        self.carousel.resize(measured_width)
    }

    pub fn view(&self) -> Result<StorefrontView, StorefrontError> {
        let cart_panel = if self.cart_open {
            Some(self.cart.panel()?)
        } else {
            None
        };
        Ok(StorefrontView {
            catalog: self.catalog.view(),
            detail: self.catalog.detail(),
            carousel: self.carousel.view(),
            badge: self.cart.badge_count()?,
            cart_panel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_carousel::ManualScheduler;
    use sf_catalog::StaticCatalog;
    use sf_storage::InMemoryStore;

    type TestStorefront = Storefront<ManualScheduler, InMemoryStore>;

    fn product(id: u64, title: &str, price: f64, images: &[&str]) -> Product {
        Product {
            id: ProductId(id),
            title: title.to_owned(),
            price,
            description: String::new(),
            thumbnail: format!("{title}.thumb"),
            images: images.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    fn storefront() -> TestStorefront {
        Storefront::new(
            StorefrontConfig::default(),
            ManualScheduler::default(),
            InMemoryStore::new(),
        )
    }

    async fn loaded() -> TestStorefront {
        let mut sf = storefront();
        let source = StaticCatalog::new(vec![
            product(1, "A", 10.0, &["a1", "a2", "a3"]),
            product(2, "B", 20.0, &[]),
        ]);
        sf.load_catalog(&source).await;
        sf
    }

    #[tokio::test]
    async fn two_product_scenario() -> Result<(), StorefrontError> {
        let mut sf = loaded().await;
        assert_eq!(sf.catalog().selected().map(|p| p.id), Some(ProductId(1)));

        sf.dispatch(Intent::AddSelectedToCart)?;
        sf.dispatch(Intent::AddSelectedToCart)?;
        sf.dispatch(Intent::SelectProduct(ProductId(2)))?;
        let effects = sf.dispatch(Intent::AddSelectedToCart)?;

        assert_eq!(effects, vec![Effect::PulseCartButton]);
        let lines: Vec<(u64, u32)> = sf
            .cart()
            .load()?
            .lines()
            .iter()
            .map(|l| (l.id.0, l.quantity))
            .collect();
        assert_eq!(lines, vec![(1, 2), (2, 1)]);
        let view = sf.view()?;
        assert_eq!(view.badge, 3);
        assert_eq!(sf.cart().total()?, 40.0);
        Ok(())
    }

    #[tokio::test]
    async fn selection_rebuilds_carousel_with_gallery_fallback() -> Result<(), StorefrontError> {
        let mut sf = loaded().await;
        assert_eq!(sf.view()?.carousel.slides, vec!["a1", "a2", "a3"]);

        sf.dispatch(Intent::CarouselNext)?;
        sf.dispatch(Intent::SelectProduct(ProductId(2)))?;

        let carousel = sf.view()?.carousel;
        assert_eq!(carousel.slides, vec!["B.thumb"]);
        assert_eq!(carousel.index, 0);
        Ok(())
    }

    #[tokio::test]
    async fn empty_checkout_surfaces_notice_and_keeps_storage() -> Result<(), StorefrontError> {
        let mut sf = loaded().await;

        let effects = sf.dispatch(Intent::Checkout)?;

        assert_eq!(effects, vec![Effect::Notice(Notice::EmptyCart)]);
        assert_eq!(
            sf.cart()
                .storage()
                .get_item(sf_cart::CART_STORAGE_KEY)
                .map_err(CartError::Storage)?,
            None
        );
        Ok(())
    }

    #[tokio::test]
    async fn checkout_clears_cart_and_closes_panel() -> Result<(), StorefrontError> {
        let mut sf = loaded().await;
        sf.dispatch(Intent::AddSelectedToCart)?;
        sf.dispatch(Intent::ToggleCartPanel)?;
        assert!(matches!(sf.view()?.cart_panel, Some(CartPanelView::Lines { .. })));

        let effects = sf.dispatch(Intent::Checkout)?;

        assert_eq!(effects, vec![Effect::Notice(Notice::CheckoutComplete)]);
        assert!(!sf.is_cart_open());
        assert_eq!(sf.view()?.badge, 0);
        assert!(sf.view()?.cart_panel.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn failed_load_disables_adding() -> Result<(), StorefrontError> {
        let mut sf = storefront();
        sf.load_catalog(&StaticCatalog::failing("dns")).await;

        let effects = sf.dispatch(Intent::AddSelectedToCart)?;

        assert!(effects.is_empty());
        let view = sf.view()?;
        assert!(view.detail.is_none());
        assert!(matches!(view.catalog, CatalogView::Failed { .. }));
        assert_eq!(view.badge, 0);
        Ok(())
    }

    #[tokio::test]
    async fn remove_and_clear_update_panel() -> Result<(), StorefrontError> {
        let mut sf = loaded().await;
        sf.dispatch(Intent::AddSelectedToCart)?;
        sf.dispatch(Intent::SelectProduct(ProductId(2)))?;
        sf.dispatch(Intent::AddSelectedToCart)?;
        sf.dispatch(Intent::ToggleCartPanel)?;

        sf.dispatch(Intent::RemoveFromCart(ProductId(1)))?;
        let Some(CartPanelView::Lines { lines, total_label }) = sf.view()?.cart_panel else {
            panic!("expected remaining lines");
        };
        assert_eq!(lines.len(), 1);
        assert_eq!(total_label, "20 €");

        sf.dispatch(Intent::RemoveFromCart(ProductId(2)))?;
        let Some(CartPanelView::Empty { total_label, .. }) = sf.view()?.cart_panel else {
            panic!("expected empty panel after removing the last line");
        };
        assert_eq!(total_label, "0 €");

        sf.dispatch(Intent::AddSelectedToCart)?;
        sf.dispatch(Intent::ClearCart)?;
        let Some(CartPanelView::Empty { total_label, .. }) = sf.view()?.cart_panel else {
            panic!("expected empty panel after clear");
        };
        assert_eq!(total_label, "0 €");
        Ok(())
    }

    #[tokio::test]
    async fn autoplay_tick_and_hover() -> Result<(), StorefrontError> {
        let mut sf = loaded().await;

        sf.dispatch(Intent::AutoplayTick)?;
        sf.dispatch(Intent::AutoplayTick)?;
        assert_eq!(sf.view()?.carousel.index, 2);
        sf.dispatch(Intent::AutoplayTick)?;
        assert_eq!(sf.view()?.carousel.index, 0);

        sf.dispatch(Intent::CarouselPointerEnter)?;
        assert!(!sf.carousel().autoplay().is_running());
        sf.dispatch(Intent::CarouselPointerLeave)?;
        assert_eq!(sf.carousel().autoplay().scheduler().live_tasks(), 1);

        sf.dispatch(Intent::CarouselGoTo(1))?;
        assert_eq!(sf.carousel_offset(Some(100.0)), 100.0);
        Ok(())
    }
}
