use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;

/// A string-keyed durable record store (browser `localStorage` and friends).
///
/// Implementations are not required to be `Send`: the browser store wraps a
/// JS handle that never leaves the UI thread.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut guard) = store.items.write() {
            guard.insert(key.to_owned(), value.to_owned());
        }
        store
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .items
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .items
            .write()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() -> Result<()> {
        let store = InMemoryStore::new();
        assert_eq!(store.get_item("cart_v1")?, None);
        Ok(())
    }

    #[test]
    fn set_item_overwrites_whole_record() -> Result<()> {
        let store = InMemoryStore::with_item("cart_v1", "[1]");
        store.set_item("cart_v1", "[]")?;
        assert_eq!(store.get_item("cart_v1")?.as_deref(), Some("[]"));
        Ok(())
    }

    #[test]
    fn borrowed_store_shares_records() -> Result<()> {
        let store = InMemoryStore::new();
        let borrowed = &store;
        borrowed.set_item("k", "v")?;
        assert_eq!(store.get_item("k")?.as_deref(), Some("v"));
        Ok(())
    }
}
