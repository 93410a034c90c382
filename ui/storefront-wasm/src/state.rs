//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Borrows are never held across an `.await`.

use crate::timers::IntervalScheduler;
use anyhow::{Result, anyhow};
use gloo_storage::{LocalStorage, Storage};
use sf_storage::KeyValueStore;
use sf_storefront::Storefront;
use std::cell::RefCell;

pub type BrowserStorefront = Storefront<IntervalScheduler, BrowserStore>;

/// `window.localStorage` as a `KeyValueStore`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| anyhow!("localStorage read of {key} failed: {err:?}"))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| anyhow!("localStorage write of {key} failed: {err:?}"))
    }
}

// ── Thread-local singleton ──

thread_local! {
    static STOREFRONT: RefCell<Option<BrowserStorefront>> = const { RefCell::new(None) };
}

pub fn install(storefront: BrowserStorefront) {
    STOREFRONT.with(|s| *s.borrow_mut() = Some(storefront));
}

/// Run a closure with shared read access to the storefront, if installed.
pub fn with<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&BrowserStorefront) -> R,
{
    STOREFRONT.with(|s| s.borrow().as_ref().map(f))
}

/// Run a closure with mutable access to the storefront, if installed.
pub fn with_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut BrowserStorefront) -> R,
{
    STOREFRONT.with(|s| s.borrow_mut().as_mut().map(f))
}
