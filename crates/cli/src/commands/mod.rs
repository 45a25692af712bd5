//! CLI command implementations.

pub mod cart;
pub mod checkout;

use clap::Args;
use shopcart_storefront::{Storefront, StorefrontError};
use shopcart_storefront::config::StorefrontConfig;
use shopcart_storefront::inputs::FormInputs;
use shopcart_storefront::storage::{FileStore, StorageError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Storefront operation failed.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// The store file could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The price argument is not a decimal number.
    #[error("Invalid price {0:?}: {1}")]
    InvalidPrice(String, String),

    /// The data layer file could not be opened.
    #[error("Cannot open data layer file: {0}")]
    DataLayerFile(#[from] std::io::Error),
}

/// Contact inputs given on the command line. Omitted flags read as empty.
#[derive(Debug, Clone, Default, Args)]
pub struct ContactArgs {
    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,
    /// City
    #[arg(short, long)]
    pub city: Option<String>,
    /// Zip code
    #[arg(short, long)]
    pub zip: Option<String>,
}

impl ContactArgs {
    /// The flags as form inputs.
    #[must_use]
    pub fn to_inputs(&self) -> FormInputs {
        FormInputs::contact(
            self.email.as_deref(),
            self.city.as_deref(),
            self.zip.as_deref(),
        )
    }
}

/// Open the file-backed storefront described by `config`.
///
/// # Errors
///
/// Returns an error if the store file exists but cannot be read.
pub fn open_storefront(config: &StorefrontConfig) -> Result<Storefront<FileStore>, CliError> {
    let store = FileStore::open(&config.storage_path)?.with_quota(config.storage_quota);
    let shop = Storefront::open(store, config.pages.clone())?.with_currency(config.currency);
    Ok(shop)
}
