//! Core types for the E-Shop storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod checkout;
pub mod id;
pub mod price;
pub mod product;

pub use checkout::{CheckoutDraft, CheckoutField, UnknownFieldError};
pub use id::*;
pub use price::Price;
pub use product::{CartItem, Product};
