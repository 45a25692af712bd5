//! shopcart storefront library.
//!
//! The storefront keeps a shopper's cart and contact details, mirrors them
//! into a persistent key-value store, renders the cart fragments and emits a
//! single `purchase` analytics record after checkout.
//!
//! # Architecture
//!
//! - [`storefront::Storefront`] - the controller; owns cart, contact, checkout state and store
//! - [`storage`] - `KeyValueStore` backends and the typed `PersistedState` wrapper
//! - [`views`] - Askama-rendered cart fragments
//! - [`analytics`] - data layer sinks for the purchase record
//! - [`pages`] - page classification and navigation targets
//! - [`config`] - environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod checkout;
pub mod config;
pub mod error;
pub mod inputs;
pub mod pages;
pub mod storage;
pub mod storefront;
pub mod views;

pub use error::{Result, StorefrontError};
pub use storefront::{PageView, Storefront};
