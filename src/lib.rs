pub mod api;
pub mod app;
pub mod cli;
pub mod constants;
pub mod notify;
pub mod store;
pub mod utils;

pub use api::{ApiClient, ApiEnvelope, ApiError};
pub use app::{load_config, AppConfig, AppState};
pub use store::StateStore;
pub use utils::GangwayError;
