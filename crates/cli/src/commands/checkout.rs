//! Contact, checkout and confirmation commands.
//!
//! # Usage
//!
//! ```bash
//! shopcart contact -e me@example.com -c Austin -z 78701
//! shopcart checkout
//! shopcart purchase -e me@example.com
//! shopcart confirm
//! ```
//!
//! `confirm` writes the purchase record to `SHOPCART_DATA_LAYER_PATH`
//! (appending one JSON line) or to stdout when unset.

use std::fs::OpenOptions;
use std::io::Write;

use shopcart_storefront::{Storefront, StorefrontError};
use shopcart_storefront::analytics::JsonLinesDataLayer;
use shopcart_storefront::config::StorefrontConfig;
use shopcart_storefront::inputs::NoInputs;
use shopcart_storefront::pages::Page;
use shopcart_storefront::storage::KeyValueStore;

use super::{CliError, ContactArgs};

/// Capture contact details (and the current cart total).
///
/// # Errors
///
/// Returns an error if the fields cannot be persisted.
pub fn contact<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    args: &ContactArgs,
) -> Result<(), CliError> {
    let contact = shop.capture_from_inputs(&args.to_inputs())?;
    tracing::info!(
        email = %contact.email,
        city = %contact.city,
        zip = %contact.zip,
        "Contact details saved"
    );
    Ok(())
}

/// Print the checkout page URL.
///
/// # Errors
///
/// Returns an error if the URL cannot be built.
pub fn checkout<S: KeyValueStore>(shop: &Storefront<S>) -> Result<(), CliError> {
    let nav = shop.initiate_checkout()?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", nav.url);
    }
    Ok(())
}

/// Complete the purchase and print where to go next.
///
/// # Errors
///
/// Returns an error if any step of the purchase fails to persist.
pub fn purchase<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    args: &ContactArgs,
) -> Result<(), CliError> {
    let nav = shop.complete_purchase(&args.to_inputs())?;
    let event_id = shop
        .state()
        .event_id()?
        .map(|id| id.to_string())
        .unwrap_or_default();

    #[allow(clippy::print_stdout)]
    {
        println!("Purchase {event_id} complete");
        println!("{}", nav.url);
    }
    Ok(())
}

/// Load the confirmation page, pushing the purchase record to the data layer.
///
/// # Errors
///
/// Returns an error if the data layer file cannot be opened or the push fails.
pub fn confirm<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    config: &StorefrontConfig,
) -> Result<(), CliError> {
    let writer: Box<dyn Write> = match &config.data_layer_path {
        Some(path) => Box::new(OpenOptions::new().create(true).append(true).open(path)?),
        None => Box::new(std::io::stdout()),
    };
    let mut data_layer = JsonLinesDataLayer::new(writer);

    let url = shop
        .pages()
        .url_for(Page::Confirmation)
        .map_err(StorefrontError::from)?;
    let view = shop.load_page(&url, &NoInputs, &mut data_layer)?;

    if view.purchase.as_ref().is_some_and(|record| record.is_blank()) {
        tracing::warn!("No pending purchase; pushed an empty record");
    }
    Ok(())
}
