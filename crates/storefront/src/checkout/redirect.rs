//! Delayed navigation after a placed order.
//!
//! A [`PendingRedirect`] is a value: the page renders it as a `Refresh`
//! header plus a meta refresh, so the browser performs the navigation.
//! The HTTP routes only use [`PendingRedirect::refresh_header`].
//!
//! [`PendingRedirect::schedule`] and [`RedirectGuard`] are a library API for
//! hosts that embed the checkout and drive navigation in-process. The guard
//! cancels the timer when cancelled or dropped.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Where the thank-you screen sends the visitor.
pub const HOME: &str = "/";

/// A navigation that fires after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRedirect {
    destination: String,
    delay: Duration,
}

impl PendingRedirect {
    #[must_use]
    pub fn new(destination: impl Into<String>, delay: Duration) -> Self {
        Self {
            destination: destination.into(),
            delay,
        }
    }

    /// Redirect to the home page.
    #[must_use]
    pub fn home(delay: Duration) -> Self {
        Self::new(HOME, delay)
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Value for a `Refresh` header or a meta refresh, e.g. `10; url=/`.
    #[must_use]
    pub fn refresh_header(&self) -> String {
        format!("{}; url={}", self.delay.as_secs(), self.destination)
    }

    /// Run `navigate` with the destination once the delay has elapsed.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn schedule<F>(self, navigate: F) -> RedirectGuard
    where
        F: FnOnce(String) + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let Self { destination, delay } = self;

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancelled.cancelled() => {
                    tracing::debug!(%destination, "Redirect cancelled");
                    false
                }
                () = tokio::time::sleep(delay) => {
                    tracing::debug!(%destination, "Redirecting");
                    navigate(destination);
                    true
                }
            }
        });

        RedirectGuard { token, handle }
    }
}

/// Handle to a scheduled redirect. Dropping it cancels the redirect.
#[derive(Debug)]
pub struct RedirectGuard {
    token: CancellationToken,
    handle: JoinHandle<bool>,
}

impl RedirectGuard {
    /// Cancel the redirect if it has not fired yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the timer to settle. Returns whether navigation happened.
    pub async fn finished(&mut self) -> bool {
        (&mut self.handle).await.unwrap_or(false)
    }
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
