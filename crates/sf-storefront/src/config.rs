use sf_carousel::DEFAULT_AUTOPLAY_INTERVAL;
use sf_cart::CART_STORAGE_KEY;
use sf_catalog::DEFAULT_CATALOG_URL;
use std::time::Duration;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub catalog_url: String,
    pub autoplay_interval: Duration,
    pub cart_storage_key: String,
    pub log_level: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_owned(),
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
            cart_storage_key: CART_STORAGE_KEY.to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

/// An override that was present but unusable; the default was kept instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub key: &'static str,
    pub value: String,
}

impl StorefrontConfig {
    /// Builds a config from optional string overrides (`catalog-url`,
    /// `autoplay-ms`, `cart-key`, `log-level`). Blank values keep the default
    /// silently; invalid ones keep it and are returned so the caller can log
    /// them once logging is up.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<RejectedOverride>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut rejected = Vec::new();
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = get("catalog-url") {
            config.catalog_url = url;
        }
        if let Some(raw) = get("autoplay-ms") {
            match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => config.autoplay_interval = Duration::from_millis(ms),
                _ => rejected.push(RejectedOverride {
                    key: "autoplay-ms",
                    value: raw,
                }),
            }
        }
        if let Some(key) = get("cart-key") {
            config.cart_storage_key = key;
        }
        if let Some(level) = get("log-level") {
            let level = level.to_ascii_lowercase();
            if LOG_LEVELS.contains(&level.as_str()) {
                config.log_level = level;
            } else {
                rejected.push(RejectedOverride {
                    key: "log-level",
                    value: level,
                });
            }
        }
        (config, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn no_overrides_yields_defaults() {
        let (config, rejected) = StorefrontConfig::from_lookup(|_| None);
        assert_eq!(config, StorefrontConfig::default());
        assert!(rejected.is_empty());
        assert_eq!(config.autoplay_interval, Duration::from_millis(3_500));
        assert_eq!(config.cart_storage_key, "cart_v1");
    }

    #[test]
    fn valid_overrides_apply() {
        let (config, rejected) = StorefrontConfig::from_lookup(lookup(&[
            ("catalog-url", " http://localhost:9000/products "),
            ("autoplay-ms", "5000"),
            ("log-level", "DEBUG"),
        ]));

        assert_eq!(config.catalog_url, "http://localhost:9000/products");
        assert_eq!(config.autoplay_interval, Duration::from_millis(5_000));
        assert_eq!(config.log_level, "debug");
        assert!(rejected.is_empty());
    }

    #[test]
    fn invalid_overrides_fall_back() {
        let (config, rejected) = StorefrontConfig::from_lookup(lookup(&[
            ("autoplay-ms", "soon"),
            ("log-level", "loud"),
            ("cart-key", "   "),
        ]));

        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(
            rejected,
            vec![
                RejectedOverride { key: "autoplay-ms", value: "soon".to_owned() },
                RejectedOverride { key: "log-level", value: "loud".to_owned() },
            ]
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        let (config, rejected) = StorefrontConfig::from_lookup(lookup(&[("autoplay-ms", "0")]));
        assert_eq!(config.autoplay_interval, DEFAULT_AUTOPLAY_INTERVAL);
        assert_eq!(rejected.len(), 1);
    }
}
