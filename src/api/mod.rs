// Gateway module for the API layer - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod interceptor;
mod traits;
mod transport;
mod types;

// Public re-exports - the ONLY way to access API functionality
pub use client::ApiClient;
pub use interceptor::{attach_auth, derive_message, derive_status};
pub use traits::{Navigator, Notifier, StateAccess, Transport};
pub use transport::HttpTransport;
pub use types::{ApiEnvelope, ApiError, ApiRequest, CallFailure, RawReply, TransportFault};
