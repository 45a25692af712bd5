//! Typed access to the persisted cart and purchase fields.

use rust_decimal::Decimal;
use shopcart_core::{Cart, ContactInfo, EventId};

use super::{KeyValueStore, StorageError};

/// Every key the storefront persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Shopper email.
    UserEmail,
    /// Shopper city.
    UserCity,
    /// Shopper zip code.
    UserZip,
    /// Cart total as decimal text.
    CartTotal,
    /// Id of the last completed purchase.
    EventId,
    /// Serialized cart.
    Cart,
}

impl StorageKey {
    /// Keys that make up the purchase snapshot read by the confirmation view.
    pub const PURCHASE_SNAPSHOT: [Self; 5] = [
        Self::UserEmail,
        Self::UserCity,
        Self::UserZip,
        Self::CartTotal,
        Self::EventId,
    ];

    /// The literal key in the backing store.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserEmail => "userEmail",
            Self::UserCity => "userCity",
            Self::UserZip => "userZip",
            Self::CartTotal => "cartTotal",
            Self::EventId => "eventID",
            Self::Cart => "cart",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cart total in its persisted text form: no trailing zeros, "0" when empty.
#[must_use]
pub fn format_cart_total(total: Decimal) -> String {
    total.normalize().to_string()
}

/// Typed wrapper over a [`KeyValueStore`].
///
/// Reads of the cart fall back to an empty cart when the stored blob is
/// missing or fails to decode; everything else is passed through as-is.
#[derive(Debug, Clone, Default)]
pub struct PersistedState<S> {
    store: S,
}

impl<S: KeyValueStore> PersistedState<S> {
    /// Wrap a backend.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the backend.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap the backend.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Read a raw field.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    pub fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        self.store.get(key.as_str())
    }

    /// Write a raw field.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn set(&mut self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.store.set(key.as_str(), value)
    }

    /// Delete a field.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the delete fails.
    pub fn delete(&mut self, key: StorageKey) -> Result<(), StorageError> {
        self.store.remove(key.as_str())
    }

    /// Load the cart. Missing or undecodable data yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the backend itself cannot be read.
    pub fn load_cart(&self) -> Result<Cart, StorageError> {
        let Some(raw) = self.get(StorageKey::Cart)? else {
            return Ok(Cart::new());
        };

        match Cart::from_json(&raw) {
            Ok(cart) => Ok(cart),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable persisted cart");
                Ok(Cart::new())
            }
        }
    }

    /// Persist the whole cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if encoding or the write fails.
    pub fn save_cart(&mut self, cart: &Cart) -> Result<(), StorageError> {
        let raw = cart.to_json().map_err(|e| StorageError::Encode {
            key: StorageKey::Cart.to_string(),
            message: e.to_string(),
        })?;
        self.set(StorageKey::Cart, &raw)
    }

    /// Read the contact fields, absent ones as "".
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    pub fn contact(&self) -> Result<ContactInfo, StorageError> {
        Ok(ContactInfo::from_fields(
            self.get(StorageKey::UserEmail)?.as_deref(),
            self.get(StorageKey::UserCity)?.as_deref(),
            self.get(StorageKey::UserZip)?.as_deref(),
        ))
    }

    /// Write each contact field individually.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on the first failed write; earlier fields stay written.
    pub fn save_contact(&mut self, contact: &ContactInfo) -> Result<(), StorageError> {
        self.set(StorageKey::UserEmail, &contact.email)?;
        self.set(StorageKey::UserCity, &contact.city)?;
        self.set(StorageKey::UserZip, &contact.zip)
    }

    /// Read the stored cart total text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    pub fn cart_total(&self) -> Result<Option<String>, StorageError> {
        self.get(StorageKey::CartTotal)
    }

    /// Store the cart total.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn save_cart_total(&mut self, total: Decimal) -> Result<(), StorageError> {
        self.set(StorageKey::CartTotal, &format_cart_total(total))
    }

    /// Read the stored purchase event id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    pub fn event_id(&self) -> Result<Option<EventId>, StorageError> {
        Ok(self.get(StorageKey::EventId)?.map(EventId::new))
    }

    /// Store the purchase event id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn save_event_id(&mut self, id: &EventId) -> Result<(), StorageError> {
        self.set(StorageKey::EventId, id.as_str())
    }

    /// Delete every purchase snapshot key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on the first failed delete.
    pub fn clear_purchase_snapshot(&mut self) -> Result<(), StorageError> {
        for key in StorageKey::PURCHASE_SNAPSHOT {
            self.delete(key)?;
        }
        Ok(())
    }
}
