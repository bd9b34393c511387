use thiserror::Error;

/// Main error type for Gangway
///
/// Covers construction and persistence failures. Failures of individual
/// API calls are not represented here; those normalize into
/// [`crate::api::ApiError`] so callers see one shape regardless of cause.
#[derive(Error, Debug)]
pub enum GangwayError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("State encoding error: {0}")]
    EncodeError(#[from] toml::ser::Error),

    #[error("State decoding error: {0}")]
    DecodeError(#[from] toml::de::Error),
}
