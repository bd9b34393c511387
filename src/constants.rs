//! Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_BASE_URL: &str = "";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Default Header Contract
pub const HEADER_LANGUAGE: &str = "language";
pub const HEADER_PLATFORM: &str = "platform";
pub const HEADER_VERSION: &str = "version";
pub const HEADER_IP_ADDRESS: &str = "ipAddress";
pub const DEFAULT_LANGUAGE: &str = "EN";
pub const DEFAULT_PLATFORM: &str = "web";
pub const DEFAULT_CLIENT_VERSION: &str = "1.0.0";
pub const DEFAULT_IP_ADDRESS: &str = "";

// Status Classification
// Advisory labels; envelopes and errors always carry the actual integer
// that came over the wire.
pub const HTTP_SUCCESS: u16 = 200;
pub const HTTP_CREATED: u16 = 201;
pub const HTTP_NO_CONTENT: u16 = 204;
pub const HTTP_BAD_REQUEST: u16 = 400;
pub const HTTP_UNAUTHORIZED: u16 = 401;
pub const HTTP_REQUEST_TIMEOUT: u16 = 408;
pub const HTTP_USER_REMOVED: u16 = 410;
pub const HTTP_SERVER_ERROR: u16 = 500;

// Normalized Failure Copy
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";
pub const TIMEOUT_ERROR_MESSAGE: &str = "Request timeout. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your internet connection.";

// Navigation
pub const ROOT_LOCATION: &str = "/";

// Store Persistence
// Only whitelisted slices survive a reload; everything else is transient.
pub const PERSIST_WHITELIST: &[&str] = &["auth"];
