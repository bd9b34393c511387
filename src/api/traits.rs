use async_trait::async_trait;

use super::types::{ApiRequest, RawReply, TransportFault};

/// What the gateway needs from the state store: read the current
/// credential, and wipe everything when a session expires. The store
/// itself lives elsewhere; the gateway never sees its shape.
pub trait StateAccess: Send + Sync {
    /// Current bearer credential. `None` when absent or empty.
    fn credential(&self) -> Option<String>;

    /// Reset every slice and remove persisted state.
    fn clear_all(&self);
}

/// User-facing notifications, the toast side-channel.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn show_error(&self, message: &str);
    fn show_no_internet(&self);
}

/// Client location control.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Replace the current location, discarding history.
    fn replace(&self, location: &str);
}

/// The wire call itself, behind a seam so the whole pipeline runs
/// without a network in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request. `Ok` for any response the server produced
    /// regardless of status; `Err` only when there was no response.
    async fn execute(&self, request: ApiRequest) -> Result<RawReply, TransportFault>;
}
