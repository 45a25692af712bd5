//! shopcart core - shared cart types.
//!
//! This crate provides the types used across all shopcart components:
//! - `storefront` - Cart controller, persistence and rendering
//! - `cli` - Command-line driver for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no rendering. Every cart mutation here is side-effect free; the
//! storefront crate decides when state is persisted.
//!
//! # Modules
//!
//! - [`types`] - Prices, cart lines, contact info, event ids and the purchase record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
