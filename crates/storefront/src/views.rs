//! Rendering layer: cart view models and HTML fragments.
//!
//! Views are built from a [`Cart`] snapshot and rendered with Askama; they
//! never touch storage. Each fragment targets one element on the page, see
//! [`element_ids`].

use askama::Template;
use rust_decimal::Decimal;
use shopcart_core::{Cart, CurrencyCode, Price};

/// Element ids of the page surface.
pub mod element_ids {
    /// Email input.
    pub const EMAIL: &str = "email";
    /// City input.
    pub const CITY: &str = "city";
    /// Zip input.
    pub const ZIP: &str = "zip";
    /// Body of the cart page table.
    pub const CART_BODY: &str = "cart-body";
    /// Body of the checkout summary table.
    pub const CART_SUMMARY_BODY: &str = "cart-summary-body";
    /// Item count badge.
    pub const CART_COUNT: &str = "cart-count";
    /// Cart total text.
    pub const CART_TOTAL: &str = "cart-total";
    /// Purchase button on the checkout page.
    pub const PURCHASE_BUTTON: &str = "purchase-btn";
}

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Total with two decimals and no currency symbol, e.g. "24.48".
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "0.00".to_string(),
            item_count: 0,
        }
    }

    /// Build the view for `cart`, formatting money in `currency`.
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        let money = |amount: Decimal| Price::new(amount, currency);

        Self {
            items: cart
                .iter()
                .map(|(name, line)| CartItemView {
                    name: name.to_owned(),
                    quantity: line.quantity,
                    price: money(line.unit_price).display(),
                    line_price: money(line.line_total()).display(),
                })
                .collect(),
            total: money(cart.total()).format_amount(),
            item_count: cart.item_count(),
        }
    }
}

/// Rows for the cart page table (`cart-body`).
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Rows for the checkout summary table (`cart-summary-body`).
#[derive(Template)]
#[template(path = "partials/cart_summary.html")]
pub struct CartSummaryTemplate<'a> {
    pub cart: &'a CartView,
}

/// Item count badge (`cart-count`).
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Cart total text (`cart-total`).
#[derive(Template)]
#[template(path = "partials/cart_total.html")]
pub struct CartTotalTemplate<'a> {
    pub total: &'a str,
}

/// Render the cart page table rows.
///
/// # Errors
///
/// Returns [`askama::Error`] if rendering fails.
pub fn render_cart_table(cart: &CartView) -> askama::Result<String> {
    CartItemsTemplate { cart }.render()
}

/// Render the checkout summary rows.
///
/// # Errors
///
/// Returns [`askama::Error`] if rendering fails.
pub fn render_cart_summary(cart: &CartView) -> askama::Result<String> {
    CartSummaryTemplate { cart }.render()
}

/// Render the item count badge.
///
/// # Errors
///
/// Returns [`askama::Error`] if rendering fails.
pub fn render_cart_count(cart: &CartView) -> askama::Result<String> {
    CartCountTemplate {
        count: cart.item_count,
    }
    .render()
}

/// Render the total text.
///
/// # Errors
///
/// Returns [`askama::Error`] if rendering fails.
pub fn render_cart_total(cart: &CartView) -> askama::Result<String> {
    CartTotalTemplate { total: &cart.total }.render()
}
