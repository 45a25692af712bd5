//! Integration tests for shopcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart mutations, totals and persistence across reloads
//! - `purchase_flow` - Checkout, purchase and confirmation page loads
//! - `file_store` - The same flows against the JSON file store
//!
//! This crate only holds shared fixtures.

use rust_decimal::Decimal;
use shopcart_core::SequentialEventIds;
use shopcart_storefront::Storefront;
use shopcart_storefront::pages::{Page, PageUrls};
use shopcart_storefront::storage::KeyValueStore;
use url::Url;

/// Base URL every fixture storefront is served from.
pub const BASE_URL: &str = "https://shop.example/";

/// Page URLs rooted at [`BASE_URL`].
#[must_use]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
pub fn pages() -> PageUrls {
    PageUrls::new(Url::parse(BASE_URL).unwrap())
}

/// Absolute URL of `page` under [`BASE_URL`].
#[must_use]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
pub fn url(page: Page) -> Url {
    pages().url_for(page).unwrap()
}

/// Open a storefront over `store` with predictable `evt_test_N` ids.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn open<S: KeyValueStore>(
    store: S,
) -> shopcart_storefront::Result<Storefront<S, SequentialEventIds>> {
    Storefront::with_id_generator(store, pages(), SequentialEventIds::new("test"))
}

/// Decimal from a price literal like `"9.99"`.
#[must_use]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
pub fn price(raw: &str) -> Decimal {
    raw.parse().unwrap()
}
