//! Core types for shopcart.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod contact;
pub mod event;
pub mod id;
pub mod price;

pub use cart::{Cart, CartError, CartLine};
pub use contact::ContactInfo;
pub use event::{PURCHASE_EVENT_NAME, PurchaseRecord};
pub use id::{EVENT_ID_PREFIX, EventId, EventIdGenerator, RandomEventIds, SequentialEventIds};
pub use price::{CurrencyCode, Price};
