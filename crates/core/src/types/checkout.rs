//! Checkout draft and its fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shipping details captured by the checkout form.
///
/// Serialized with camelCase keys (`fullName`, `postalCode`, ...), which is
/// also the format of the stored draft. Missing keys load as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutDraft {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl CheckoutDraft {
    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::FullName => &self.full_name,
            CheckoutField::Email => &self.email,
            CheckoutField::Address => &self.address,
            CheckoutField::City => &self.city,
            CheckoutField::PostalCode => &self.postal_code,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: CheckoutField, value: String) {
        let slot = match field {
            CheckoutField::FullName => &mut self.full_name,
            CheckoutField::Email => &mut self.email,
            CheckoutField::Address => &mut self.address,
            CheckoutField::City => &mut self.city,
            CheckoutField::PostalCode => &mut self.postal_code,
        };
        *slot = value;
    }

    /// Required fields that are empty or whitespace only, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<CheckoutField> {
        CheckoutField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// Whether every required field has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown checkout field: {0}")]
pub struct UnknownFieldError(pub String);

/// One input of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutField {
    FullName,
    Email,
    Address,
    City,
    PostalCode,
}

impl CheckoutField {
    /// All fields in form order.
    pub const ALL: [Self; 5] = [
        Self::FullName,
        Self::Email,
        Self::Address,
        Self::City,
        Self::PostalCode,
    ];

    /// Form and storage key (e.g., "postalCode").
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Address => "address",
            Self::City => "city",
            Self::PostalCode => "postalCode",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Address => "Address",
            Self::City => "City",
            Self::PostalCode => "Postal Code",
        }
    }

    /// HTML input type.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            _ => "text",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CheckoutField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
