//! E-Shop Core - Shared domain types.
//!
//! This crate provides the types shared by the storefront and its tests:
//! - `storefront` - Public-facing e-commerce site
//! - `integration-tests` - Router-level tests against a mock catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no sessions, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product records, prices, ids, and the checkout draft

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
