//! Checkout draft storage.
//!
//! The draft is kept in the session as JSON *text* under
//! [`keys::CHECKOUT_DRAFT`], the same way a browser keeps it in local storage. Text that does not decode
//! as a draft is discarded rather than shown to the visitor.

use eshop_core::CheckoutDraft;
use tower_sessions::Session;

use super::CheckoutError;
use crate::models::session::keys;

/// Session-backed draft slot.
#[derive(Clone, Debug)]
pub struct DraftStore {
    session: Session,
}

impl DraftStore {
    /// Draft slot of a session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// The stored text, exactly as written.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn raw(&self) -> Result<Option<String>, CheckoutError> {
        let value = self.session.get_value(keys::CHECKOUT_DRAFT).await?;
        Ok(value.and_then(|value| match value {
            serde_json::Value::String(text) => Some(text),
            _ => None,
        }))
    }

    /// Load the stored draft.
    ///
    /// Returns `None` when nothing is stored. A corrupt entry is removed and
    /// also reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(&self) -> Result<Option<CheckoutDraft>, CheckoutError> {
        let Some(value) = self.session.get_value(keys::CHECKOUT_DRAFT).await? else {
            return Ok(None);
        };

        let parsed = match &value {
            serde_json::Value::String(text) => serde_json::from_str::<CheckoutDraft>(text).ok(),
            _ => None,
        };

        if parsed.is_none() {
            tracing::warn!("Discarding unreadable checkout draft");
            self.clear().await?;
        }
        Ok(parsed)
    }

    /// Write the whole draft.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the session store fails.
    pub async fn save(&self, draft: &CheckoutDraft) -> Result<(), CheckoutError> {
        let text = serde_json::to_string(draft)?;
        self.session.insert(keys::CHECKOUT_DRAFT, text).await?;
        Ok(())
    }

    /// Delete the stored draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn clear(&self) -> Result<(), CheckoutError> {
        self.session.remove_value(keys::CHECKOUT_DRAFT).await?;
        Ok(())
    }

    /// Store arbitrary text in the draft slot.
    #[cfg(test)]
    pub(crate) async fn put_raw(&self, text: &str) {
        let _ = self.session.insert(keys::CHECKOUT_DRAFT, text).await;
    }
}
