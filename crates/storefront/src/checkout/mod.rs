//! Checkout form.
//!
//! Every field change is written through to the [`DraftStore`] so that an
//! interrupted checkout resumes with the same values. Placing the order
//! empties the cart, deletes the draft, and yields a [`PendingRedirect`] to
//! the home page.
//!
//! ```text
//! Editing --change--> Editing
//! Editing --submit (all fields filled)--> Submitted
//! ```
//!
//! There is no way back from `Submitted` within the same form.

mod draft;
mod redirect;

pub use draft::DraftStore;
pub use redirect::{HOME, PendingRedirect, RedirectGuard};

use std::time::Duration;

use eshop_core::{CheckoutDraft, CheckoutField};
use thiserror::Error;

use crate::cart::CartStore;

/// Errors from the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Could not encode checkout draft: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Please fill in: {}", field_list(.0))]
    MissingFields(Vec<CheckoutField>),

    #[error("Order already placed")]
    AlreadySubmitted,
}

fn field_list(fields: &[CheckoutField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Form phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Editing,
    Submitted,
}

/// The checkout form of one visitor.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    draft: CheckoutDraft,
    phase: CheckoutPhase,
}

impl CheckoutForm {
    /// Open the form, prefilled from a stored draft if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn mount(store: &DraftStore) -> Result<Self, CheckoutError> {
        let draft = store.load().await?.unwrap_or_default();
        Ok(Self {
            draft,
            phase: CheckoutPhase::Editing,
        })
    }

    #[must_use]
    pub const fn draft(&self) -> &CheckoutDraft {
        &self.draft
    }

    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == CheckoutPhase::Submitted
    }

    /// Update one field and persist the whole draft.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadySubmitted`] after the order was
    /// placed, or an error if the draft cannot be stored.
    pub async fn change(
        &mut self,
        store: &DraftStore,
        field: CheckoutField,
        value: String,
    ) -> Result<(), CheckoutError> {
        if self.is_submitted() {
            return Err(CheckoutError::AlreadySubmitted);
        }
        self.draft.set(field, value);
        store.save(&self.draft).await
    }

    /// Place the order.
    ///
    /// Nothing is sent anywhere: the cart is emptied, the draft deleted, and
    /// the visitor is sent home after `redirect_delay`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] if a field is blank, in which
    /// case the form stays editable and nothing is cleared.
    pub async fn submit(
        &mut self,
        store: &DraftStore,
        cart: &mut CartStore,
        redirect_delay: Duration,
    ) -> Result<PendingRedirect, CheckoutError> {
        if self.is_submitted() {
            return Err(CheckoutError::AlreadySubmitted);
        }
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        self.phase = CheckoutPhase::Submitted;
        cart.clear_cart();
        store.clear().await?;
        tracing::info!("Order placed");

        Ok(PendingRedirect::home(redirect_delay))
    }
}
