//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPCART_STORAGE_PATH` - Persistent store file (default: .shopcart/storage.json)
//! - `SHOPCART_STORAGE_QUOTA_BYTES` - Byte quota for the store (default: unlimited)
//! - `SHOPCART_BASE_URL` - Base URL pages resolve against (default: <http://localhost:8080/>)
//! - `SHOPCART_CHECKOUT_PAGE` - Checkout page name (default: checkout.html)
//! - `SHOPCART_CONFIRMATION_PAGE` - Confirmation page name (default: purchase-confirmation.html)
//! - `SHOPCART_DATA_LAYER_PATH` - JSON-lines file for analytics records (default: stdout)
//! - `SHOPCART_CURRENCY` - ISO 4217 display currency (default: USD)

use std::path::PathBuf;

use shopcart_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::pages::PageUrls;

const DEFAULT_STORAGE_PATH: &str = ".shopcart/storage.json";
const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Persistent store file
    pub storage_path: PathBuf,
    /// Optional byte quota for the store
    pub storage_quota: Option<usize>,
    /// Page URLs
    pub pages: PageUrls,
    /// Where purchase records go; `None` means stdout
    pub data_layer_path: Option<PathBuf>,
    /// Display currency
    pub currency: CurrencyCode,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage_path = PathBuf::from(get_or("SHOPCART_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let storage_quota = lookup("SHOPCART_STORAGE_QUOTA_BYTES")
            .map(|raw| {
                raw.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SHOPCART_STORAGE_QUOTA_BYTES".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        let base_url = parse_base_url(&get_or("SHOPCART_BASE_URL", DEFAULT_BASE_URL))?;
        let pages = PageUrls::new(base_url)
            .with_checkout(page_name(
                "SHOPCART_CHECKOUT_PAGE",
                get_or("SHOPCART_CHECKOUT_PAGE", PageUrls::DEFAULT_CHECKOUT),
            )?)
            .with_confirmation(page_name(
                "SHOPCART_CONFIRMATION_PAGE",
                get_or("SHOPCART_CONFIRMATION_PAGE", PageUrls::DEFAULT_CONFIRMATION),
            )?);

        let data_layer_path = lookup("SHOPCART_DATA_LAYER_PATH").map(PathBuf::from);
        let currency = get_or("SHOPCART_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPCART_CURRENCY".to_string(), e))?;

        Ok(Self {
            storage_path,
            storage_quota,
            pages,
            data_layer_path,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Page names are matched against URL paths, so an empty one would match every page.
fn page_name(key: &str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "page name cannot be empty".to_string(),
        ));
    }
    Ok(value)
}

/// Parse the base URL, making sure it ends in `/` so page names join under it.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("SHOPCART_BASE_URL".to_string(), e.to_string())
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "SHOPCART_BASE_URL".to_string(),
            "must be a hierarchical URL".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::pages::Page;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.storage_path, PathBuf::from(".shopcart/storage.json"));
        assert_eq!(config.storage_quota, None);
        assert_eq!(config.data_layer_path, None);
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(
            config.pages.url_for(Page::Confirmation).unwrap().as_str(),
            "http://localhost:8080/purchase-confirmation.html"
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SHOPCART_STORAGE_PATH", "/tmp/cart.json"),
            ("SHOPCART_STORAGE_QUOTA_BYTES", "5120"),
            ("SHOPCART_BASE_URL", "https://shop.example/store"),
            ("SHOPCART_CHECKOUT_PAGE", "pay.html"),
            ("SHOPCART_DATA_LAYER_PATH", "/tmp/events.jsonl"),
            ("SHOPCART_CURRENCY", "eur"),
        ])
        .unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/tmp/cart.json"));
        assert_eq!(config.storage_quota, Some(5120));
        assert_eq!(
            config.pages.url_for(Page::Checkout).unwrap().as_str(),
            "https://shop.example/store/pay.html"
        );
        assert_eq!(config.data_layer_path, Some(PathBuf::from("/tmp/events.jsonl")));
        assert_eq!(config.currency, CurrencyCode::EUR);
    }

    #[test]
    fn test_invalid_quota() {
        let err = config_from(&[("SHOPCART_STORAGE_QUOTA_BYTES", "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOPCART_STORAGE_QUOTA_BYTES"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(config_from(&[("SHOPCART_BASE_URL", "not a url")]).is_err());
        assert!(config_from(&[("SHOPCART_BASE_URL", "mailto:a@b.c")]).is_err());
    }

    #[test]
    fn test_empty_page_names_rejected() {
        let err = config_from(&[("SHOPCART_CONFIRMATION_PAGE", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOPCART_CONFIRMATION_PAGE"));

        let err = config_from(&[("SHOPCART_CHECKOUT_PAGE", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOPCART_CHECKOUT_PAGE"));
    }

    #[test]
    fn test_invalid_currency() {
        let err = config_from(&[("SHOPCART_CURRENCY", "DOGE")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }
}
