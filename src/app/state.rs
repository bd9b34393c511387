use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{ApiClient, Navigator, Notifier, StateAccess};
use crate::notify::{TermNavigator, TermNotifier};
use crate::store::{Persistor, StateStore};

use super::config::AppConfig;

/// Everything a command needs, wired once at startup
///
/// The client receives its capabilities here and nowhere else; there is
/// no global instance to reach for.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<StateStore>,
    pub client: ApiClient,
}

impl AppState {
    /// Wire the store, the capabilities, and the client for this
    /// process.
    pub fn init(config: AppConfig) -> Result<Self> {
        let persistor =
            Persistor::at_default_location().context("Failed to locate the state file")?;
        Self::init_with_persistor(config, persistor)
    }

    /// Same wiring with an explicit state-file location. Tests point
    /// this at a temp directory.
    pub fn init_with_persistor(config: AppConfig, persistor: Persistor) -> Result<Self> {
        let store = Arc::new(StateStore::open(persistor));
        let state: Arc<dyn StateAccess> = store.clone();
        let notifier: Arc<dyn Notifier> = Arc::new(TermNotifier);
        let navigator: Arc<dyn Navigator> = Arc::new(TermNavigator);

        let client = ApiClient::new(&config, state, notifier, navigator)
            .context("Failed to build the API client")?;

        Ok(Self {
            config,
            store,
            client,
        })
    }
}
