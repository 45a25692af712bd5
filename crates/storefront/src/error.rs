//! Unified error handling for the storefront.
//!
//! Provides a unified `StorefrontError` type. Storage failures are never
//! swallowed by the cart logic: they bubble up through this type to whoever
//! drives the storefront.

use thiserror::Error;

use crate::analytics::DataLayerError;
use crate::storage::StorageError;
use shopcart_core::CartError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Persistent storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A cart mutation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Pushing to the data layer failed.
    #[error("Data layer error: {0}")]
    DataLayer(#[from] DataLayerError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// A navigation target could not be built.
    #[error("Invalid page URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
