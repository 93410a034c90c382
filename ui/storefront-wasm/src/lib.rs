//! Storefront WASM frontend
//!
//! Product catalog, image carousel and a localStorage-backed cart.
//! Logic lives in the `sf-*` crates; this crate binds it to the DOM.

pub mod api;
pub mod dom;
pub mod events;
pub mod logging;
pub mod render;
pub mod state;
pub mod timers;

use sf_catalog::CatalogSource;
use sf_storefront::Storefront;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let (config, rejected) = dom::read_config();
    logging::init(&config.log_level);
    for item in &rejected {
        warn!(key = item.key, value = %item.value, "ignoring invalid config override");
    }
    info!(catalog_url = %config.catalog_url, "storefront starting");

    let els = dom::Elements::bind()?;
    let source = api::FetchCatalog::new(&config.catalog_url);
    let scheduler = timers::IntervalScheduler::new(els.clone());
    state::install(Storefront::new(config, scheduler, state::BrowserStore));

    events::bind_events(&els)?;

    // Badge from the persisted cart before the catalog arrives
    render::render(&els);

    let result = source.fetch_products().await;
    state::with_mut(|sf| sf.catalog_loaded(result));
    render::render(&els);

    Ok(())
}
