//! Checkout, purchase and confirmation page loads.

#![allow(clippy::unwrap_used)]

use shopcart_core::SequentialEventIds;
use shopcart_integration_tests::{open, price, url};
use shopcart_storefront::{Storefront, StorefrontError};
use shopcart_storefront::analytics::MemoryDataLayer;
use shopcart_storefront::checkout::CheckoutState;
use shopcart_storefront::inputs::{FormInputs, NoInputs};
use shopcart_storefront::pages::Page;
use shopcart_storefront::storage::{MemoryStore, StorageError, StorageKey};

fn contact_form() -> FormInputs {
    FormInputs::contact(Some("shopper@example.com"), Some("Austin"), Some("78701"))
}

fn stocked_shop() -> Storefront<MemoryStore, SequentialEventIds> {
    let mut shop = open(MemoryStore::new()).unwrap();
    shop.add_item("Widget", price("9.99")).unwrap();
    shop.add_item("Widget", price("9.99")).unwrap();
    shop.add_item("Gadget", price("4.50")).unwrap();
    shop
}

// =============================================================================
// Checkout
// =============================================================================

#[test]
fn test_initiate_checkout_navigates_without_writing() {
    let shop = stocked_shop();
    let nav = shop.initiate_checkout().unwrap();

    assert_eq!(nav.page, Page::Checkout);
    assert_eq!(nav.url, url(Page::Checkout));
    assert_eq!(shop.checkout_state(), CheckoutState::Shopping);
    assert!(!shop.into_store().contains_key(StorageKey::EventId.as_str()));
}

#[test]
fn test_checkout_page_renders_summary() {
    let mut shop = stocked_shop();
    let view = shop
        .load_page(&url(Page::Checkout), &contact_form(), &mut MemoryDataLayer::new())
        .unwrap();

    assert!(view.cart_table.is_none());
    let summary = view.cart_summary.unwrap();
    assert!(summary.contains("Widget"));
    assert_eq!(view.cart_total.as_deref(), Some("24.48"));

    let state = shop.state();
    assert_eq!(
        state.get(StorageKey::UserEmail).unwrap().as_deref(),
        Some("shopper@example.com")
    );
    assert_eq!(state.get(StorageKey::CartTotal).unwrap().as_deref(), Some("24.48"));
}

// =============================================================================
// Purchase
// =============================================================================

#[test]
fn test_complete_purchase_empties_cart_and_stores_event_id() {
    let mut shop = stocked_shop();
    let nav = shop.complete_purchase(&contact_form()).unwrap();

    assert_eq!(nav.page, Page::Confirmation);
    assert_eq!(nav.url, url(Page::Confirmation));
    assert!(shop.cart().is_empty());
    assert_eq!(shop.checkout_state(), CheckoutState::Confirmed);

    let state = shop.state();
    let event_id = state.event_id().unwrap().unwrap();
    assert!(!event_id.as_str().is_empty());
    assert_eq!(event_id.as_str(), "evt_test_1");
    // Total is captured before the cart is cleared.
    assert_eq!(state.cart_total().unwrap().as_deref(), Some("24.48"));
    assert_eq!(state.load_cart().unwrap().len(), 0);
}

#[test]
fn test_confirmation_pushes_purchase_record() {
    let mut shop = stocked_shop();
    let nav = shop.complete_purchase(&contact_form()).unwrap();

    let mut data_layer = MemoryDataLayer::new();
    let view = shop.load_page(&nav.url, &NoInputs, &mut data_layer).unwrap();

    assert_eq!(view.page, Page::Confirmation);
    assert_eq!(view.cart_count, "0");
    assert!(view.cart_total.is_none());

    let events = data_layer.events();
    assert_eq!(events.len(), 1);
    let record = &events[0];
    assert_eq!(record.event, "purchase");
    assert_eq!(record.user_email, "shopper@example.com");
    assert_eq!(record.user_city, "Austin");
    assert_eq!(record.user_zip, "78701");
    assert_eq!(record.cart_total, "24.48");
    assert_eq!(record.event_id, "evt_test_1");
    assert_eq!(view.purchase.as_ref(), Some(record));

    let store = shop.into_store();
    for key in StorageKey::PURCHASE_SNAPSHOT {
        assert!(!store.contains_key(key.as_str()), "{key} should be deleted");
    }
}

#[test]
fn test_confirmation_reload_pushes_blank_record() {
    let mut shop = stocked_shop();
    let nav = shop.complete_purchase(&contact_form()).unwrap();

    let mut data_layer = MemoryDataLayer::new();
    shop.load_page(&nav.url, &NoInputs, &mut data_layer).unwrap();
    shop.load_page(&nav.url, &NoInputs, &mut data_layer).unwrap();

    let events = data_layer.take();
    assert_eq!(events.len(), 2);
    assert!(!events[0].is_blank());
    let second = &events[1];
    assert_eq!(second.event, "purchase");
    assert!(second.user_email.is_empty());
    assert!(second.user_city.is_empty());
    assert!(second.user_zip.is_empty());
    assert!(second.cart_total.is_empty());
    assert!(second.event_id.is_empty());
}

#[test]
fn test_purchase_record_json_shape() {
    let mut shop = stocked_shop();
    let nav = shop.complete_purchase(&contact_form()).unwrap();

    let mut data_layer = MemoryDataLayer::new();
    shop.load_page(&nav.url, &NoInputs, &mut data_layer).unwrap();

    let json = serde_json::to_value(&data_layer.events()[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "event": "purchase",
            "userEmail": "shopper@example.com",
            "userCity": "Austin",
            "userZip": "78701",
            "cartTotal": "24.48",
            "eventID": "evt_test_1",
        })
    );
}

#[test]
fn test_second_purchase_gets_new_event_id() {
    let mut shop = stocked_shop();
    shop.complete_purchase(&contact_form()).unwrap();
    shop.add_item("Gadget", price("4.50")).unwrap();
    shop.complete_purchase(&contact_form()).unwrap();

    let event_id = shop.state().event_id().unwrap().unwrap();
    assert_eq!(event_id.as_str(), "evt_test_2");
    assert_eq!(shop.state().cart_total().unwrap().as_deref(), Some("4.5"));
}

// =============================================================================
// Storage Failures
// =============================================================================

#[test]
fn test_disabled_storage_fails_open() {
    let mut store = stocked_shop().into_store();
    store.set_disabled(true);

    let err = open(store).unwrap_err();
    assert!(matches!(err, StorefrontError::Storage(StorageError::Disabled)));
}

#[test]
fn test_failed_write_mid_purchase_is_not_rolled_back() {
    let mut shop = open(MemoryStore::with_quota(80)).unwrap();
    shop.add_item("Gadget", price("4.50")).unwrap();

    // Cart and eventID fit; the email write does not.
    let form = FormInputs::contact(Some("a-very-long-address@shop.example"), None, None);
    let err = shop.complete_purchase(&form).unwrap_err();

    assert!(matches!(
        err,
        StorefrontError::Storage(StorageError::QuotaExceeded { ref key, limit: 80 }) if key == "userEmail"
    ));
    assert_eq!(
        shop.state().event_id().unwrap().unwrap().as_str(),
        "evt_test_1"
    );
    assert_eq!(shop.cart().len(), 1);
    assert_eq!(shop.state().load_cart().unwrap().len(), 1);
    assert_eq!(shop.checkout_state(), CheckoutState::Shopping);
}

#[test]
fn test_quota_exceeded_propagates_from_add() {
    let mut shop = open(MemoryStore::with_quota(16)).unwrap();
    let err = shop.add_item("A very long product name", price("1.00")).unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Storage(StorageError::QuotaExceeded { .. })
    ));
}
