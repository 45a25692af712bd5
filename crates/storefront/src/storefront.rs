//! The storefront controller.
//!
//! [`Storefront`] owns the cart, the shopper's contact fields, the checkout
//! state and the persistent store. Every cart mutation is applied in memory
//! first and then mirrored to storage before the call returns.
//!
//! # Purchase flow
//!
//! 1. `complete_purchase` mints an event id, stores it, captures the contact
//!    inputs together with the cart total, then empties the cart.
//! 2. The confirmation page load reads that snapshot back, pushes one
//!    `purchase` record to the data layer and deletes the snapshot keys.
//!
//! Reloading the confirmation page pushes another record with every data
//! field empty. Downstream consumers are expected to dedupe on `eventID`.

use rust_decimal::Decimal;
use shopcart_core::{
    Cart, ContactInfo, CurrencyCode, EventId, EventIdGenerator, PurchaseRecord, RandomEventIds,
};
use tracing::instrument;
use url::Url;

use crate::analytics::DataLayer;
use crate::checkout::CheckoutState;
use crate::error::Result;
use crate::inputs::{InputSource, read_contact};
use crate::pages::{Navigation, Page, PageUrls};
use crate::storage::{KeyValueStore, PersistedState};
use crate::views::{
    CartView, render_cart_count, render_cart_summary, render_cart_table, render_cart_total,
};

/// Everything a page load produced, keyed to the page's elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub page: Page,
    pub cart: CartView,
    /// Contents for `cart-count`.
    pub cart_count: String,
    /// Rows for `cart-body`, on the cart page only.
    pub cart_table: Option<String>,
    /// Rows for `cart-summary-body`, on the checkout page only.
    pub cart_summary: Option<String>,
    /// Contents for `cart-total`, on the cart and checkout pages.
    pub cart_total: Option<String>,
    /// The record pushed to the data layer, on the confirmation page only.
    pub purchase: Option<PurchaseRecord>,
}

/// Cart controller bound to a store and an event id generator.
#[derive(Debug)]
pub struct Storefront<S, G = RandomEventIds> {
    state: PersistedState<S>,
    cart: Cart,
    contact: ContactInfo,
    checkout: CheckoutState,
    ids: G,
    pages: PageUrls,
    currency: CurrencyCode,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open a storefront with random event ids, restoring the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: S, pages: PageUrls) -> Result<Self> {
        Self::with_id_generator(store, pages, RandomEventIds)
    }
}

impl<S: KeyValueStore, G: EventIdGenerator> Storefront<S, G> {
    /// Open a storefront with a specific id generator, restoring the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn with_id_generator(store: S, pages: PageUrls, ids: G) -> Result<Self> {
        let state = PersistedState::new(store);
        let cart = state.load_cart()?;
        let contact = state.contact()?;

        tracing::debug!(
            lines = cart.len(),
            items = cart.item_count(),
            "Restored cart"
        );

        Ok(Self {
            state,
            cart,
            contact,
            checkout: CheckoutState::Shopping,
            ids,
            pages,
            currency: CurrencyCode::default(),
        })
    }

    /// Set the display currency.
    #[must_use]
    pub const fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `name` and persist the cart.
    ///
    /// Returns the notice shown to the shopper.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is negative, the quantity would
    /// overflow, or the cart cannot be persisted. A storage failure leaves
    /// the in-memory cart updated.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, name: &str, unit_price: Decimal) -> Result<String> {
        let quantity = self.cart.add_item(name, unit_price)?;
        self.persist()?;
        tracing::debug!(quantity, items = self.cart.item_count(), "Item added");
        Ok(format!("Added {name} to cart!"))
    }

    /// Remove the whole line for `name` and persist the cart.
    ///
    /// Returns whether a line was removed. Nothing is written when `name` is
    /// not in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, name: &str) -> Result<bool> {
        if self.cart.remove_item(name).is_none() {
            return Ok(false);
        }
        self.persist()?;
        tracing::debug!(items = self.cart.item_count(), "Item removed");
        Ok(true)
    }

    /// Sum of `unit_price * quantity` over the cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Sum of quantities over the cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Reload the cart from storage, discarding in-memory state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(&mut self) -> Result<&Cart> {
        self.cart = self.state.load_cart()?;
        Ok(&self.cart)
    }

    /// Write the full cart to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    pub fn persist(&mut self) -> Result<()> {
        self.state.save_cart(&self.cart)?;
        Ok(())
    }

    /// View model of the current cart.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::new(&self.cart, self.currency)
    }

    // =========================================================================
    // Contact
    // =========================================================================

    /// Read the contact inputs and persist them along with the cart total.
    ///
    /// Missing inputs are recorded as empty strings; nothing is validated.
    ///
    /// # Errors
    ///
    /// Returns an error on the first failed write.
    pub fn capture_from_inputs(&mut self, inputs: &impl InputSource) -> Result<&ContactInfo> {
        self.contact = read_contact(inputs);
        self.state.save_contact(&self.contact)?;
        self.state.save_cart_total(self.cart.total())?;
        Ok(&self.contact)
    }

    /// Last captured contact info.
    #[must_use]
    pub const fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Current checkout state.
    #[must_use]
    pub const fn checkout_state(&self) -> CheckoutState {
        self.checkout
    }

    /// Go to the checkout page. Changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout URL cannot be built.
    pub fn initiate_checkout(&self) -> Result<Navigation> {
        Ok(self.pages.navigate(Page::Checkout)?)
    }

    /// Complete the purchase and move to `Confirmed`.
    ///
    /// Steps run in order and are not rolled back: if a write fails, the
    /// writes before it stay in storage and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails or the confirmation URL cannot be built.
    #[instrument(skip(self, inputs))]
    pub fn complete_purchase(&mut self, inputs: &impl InputSource) -> Result<Navigation> {
        let event_id = self.ids.next_id();
        self.state.save_event_id(&event_id)?;

        self.capture_from_inputs(inputs)?;
        let total = self.cart.total();

        self.cart.clear();
        self.persist()?;
        self.checkout = CheckoutState::Confirmed;

        tracing::info!(event_id = %event_id, %total, "Purchase completed");
        Ok(self.pages.navigate(Page::Confirmation)?)
    }

    /// Push the stored purchase snapshot to `data_layer`, then delete it.
    ///
    /// Absent fields are sent as empty strings, so calling this twice sends
    /// a blank record the second time.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or written or the push
    /// fails. A failed push leaves the snapshot in place.
    #[instrument(skip(self, data_layer))]
    pub fn emit_purchase(&mut self, data_layer: &mut impl DataLayer) -> Result<PurchaseRecord> {
        let contact = self.state.contact()?;
        let cart_total = self.state.cart_total()?.unwrap_or_default();
        let event_id = self
            .state
            .event_id()?
            .map(EventId::into_inner)
            .unwrap_or_default();

        let record = PurchaseRecord::purchase(contact, cart_total, event_id);
        data_layer.push(&record)?;
        self.state.clear_purchase_snapshot()?;

        if record.is_blank() {
            tracing::warn!("Pushed purchase record with no stored purchase data");
        } else {
            tracing::info!(event_id = %record.event_id, "Pushed purchase record");
        }
        Ok(record)
    }

    // =========================================================================
    // Page load
    // =========================================================================

    /// Run the page-load sequence for `url`.
    ///
    /// On the confirmation page the purchase record is emitted and nothing
    /// else is written. On every other page the cart is restored and the
    /// contact inputs are captured. Fragments are rendered for the elements
    /// the page has.
    ///
    /// # Errors
    ///
    /// Returns an error if storage, the data layer or rendering fails.
    #[instrument(skip(self, url, inputs, data_layer), fields(url = %url))]
    pub fn load_page(
        &mut self,
        url: &Url,
        inputs: &impl InputSource,
        data_layer: &mut impl DataLayer,
    ) -> Result<PageView> {
        let page = self.pages.classify(url);

        let purchase = if page == Page::Confirmation {
            self.checkout = CheckoutState::Confirmed;
            Some(self.emit_purchase(data_layer)?)
        } else {
            self.checkout = CheckoutState::Shopping;
            None
        };

        self.restore()?;
        if page != Page::Confirmation {
            self.capture_from_inputs(inputs)?;
        }

        let cart = self.cart_view();
        let cart_count = render_cart_count(&cart)?;
        let cart_table = (page == Page::Cart)
            .then(|| render_cart_table(&cart))
            .transpose()?;
        let cart_summary = (page == Page::Checkout)
            .then(|| render_cart_summary(&cart))
            .transpose()?;
        let cart_total = matches!(page, Page::Cart | Page::Checkout)
            .then(|| render_cart_total(&cart))
            .transpose()?;

        Ok(PageView {
            page,
            cart,
            cart_count,
            cart_table,
            cart_summary,
            cart_total,
            purchase,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Page URLs used for navigation.
    #[must_use]
    pub const fn pages(&self) -> &PageUrls {
        &self.pages
    }

    /// Typed view of the backing store.
    #[must_use]
    pub const fn state(&self) -> &PersistedState<S> {
        &self.state
    }

    /// Give back the backing store.
    pub fn into_store(self) -> S {
        self.state.into_inner()
    }
}
