//! Page classification and navigation targets.
//!
//! The storefront never navigates by itself: checkout transitions return a
//! [`Navigation`] and the host (browser shell, CLI) decides what to do with it.

use url::Url;

/// The storefront pages the controller knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Any product listing page.
    Shop,
    /// Cart page with the full cart table.
    Cart,
    /// Checkout page with the summary table, contact inputs and purchase button.
    Checkout,
    /// Purchase confirmation page; emits the purchase record on load.
    Confirmation,
}

/// Where a transition wants the shopper to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub page: Page,
    pub url: Url,
}

/// Page file names, resolved against a base URL.
#[derive(Debug, Clone)]
pub struct PageUrls {
    base: Url,
    cart: String,
    checkout: String,
    confirmation: String,
}

impl PageUrls {
    /// Default cart page file name.
    pub const DEFAULT_CART: &'static str = "cart.html";
    /// Default checkout page file name.
    pub const DEFAULT_CHECKOUT: &'static str = "checkout.html";
    /// Default confirmation page file name.
    pub const DEFAULT_CONFIRMATION: &'static str = "purchase-confirmation.html";

    /// Use the default page names under `base`.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            base,
            cart: Self::DEFAULT_CART.to_owned(),
            checkout: Self::DEFAULT_CHECKOUT.to_owned(),
            confirmation: Self::DEFAULT_CONFIRMATION.to_owned(),
        }
    }

    /// Override the checkout page name.
    #[must_use]
    pub fn with_checkout(mut self, page: impl Into<String>) -> Self {
        self.checkout = page.into();
        self
    }

    /// Override the confirmation page name.
    #[must_use]
    pub fn with_confirmation(mut self, page: impl Into<String>) -> Self {
        self.confirmation = page.into();
        self
    }

    /// Base URL all pages resolve against.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Classify a URL. The confirmation page is matched by its name appearing
    /// anywhere in the path.
    #[must_use]
    pub fn classify(&self, url: &Url) -> Page {
        let path = url.path();
        if path.contains(&self.confirmation) {
            Page::Confirmation
        } else if path.ends_with(&self.checkout) {
            Page::Checkout
        } else if path.ends_with(&self.cart) {
            Page::Cart
        } else {
            Page::Shop
        }
    }

    /// Absolute URL of `page`.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the configured page name does not join
    /// onto the base URL.
    pub fn url_for(&self, page: Page) -> Result<Url, url::ParseError> {
        let name = match page {
            Page::Shop => "",
            Page::Cart => self.cart.as_str(),
            Page::Checkout => self.checkout.as_str(),
            Page::Confirmation => self.confirmation.as_str(),
        };
        self.base.join(name)
    }

    /// A [`Navigation`] to `page`.
    ///
    /// # Errors
    ///
    /// See [`PageUrls::url_for`].
    pub fn navigate(&self, page: Page) -> Result<Navigation, url::ParseError> {
        Ok(Navigation {
            page,
            url: self.url_for(page)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pages() -> PageUrls {
        PageUrls::new(Url::parse("https://shop.example/store/").unwrap())
    }

    #[test]
    fn test_classify_pages() {
        let pages = pages();
        let at = |s: &str| pages.classify(&Url::parse(s).unwrap());

        assert_eq!(at("https://shop.example/store/"), Page::Shop);
        assert_eq!(at("https://shop.example/store/index.html"), Page::Shop);
        assert_eq!(at("https://shop.example/store/cart.html"), Page::Cart);
        assert_eq!(at("https://shop.example/store/checkout.html"), Page::Checkout);
        assert_eq!(
            at("https://shop.example/store/purchase-confirmation.html?ref=x"),
            Page::Confirmation
        );
        assert_eq!(
            at("https://shop.example/purchase-confirmation.html/extra"),
            Page::Confirmation
        );
    }

    #[test]
    fn test_url_for_joins_base() {
        let pages = pages();
        assert_eq!(
            pages.url_for(Page::Checkout).unwrap().as_str(),
            "https://shop.example/store/checkout.html"
        );
        assert_eq!(
            pages.url_for(Page::Shop).unwrap().as_str(),
            "https://shop.example/store/"
        );
    }

    #[test]
    fn test_custom_page_names() {
        let pages = pages()
            .with_checkout("pay")
            .with_confirmation("thanks");
        let nav = pages.navigate(Page::Confirmation).unwrap();
        assert_eq!(nav.url.as_str(), "https://shop.example/store/thanks");
        assert_eq!(pages.classify(&nav.url), Page::Confirmation);
    }
}
