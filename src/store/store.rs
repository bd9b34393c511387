use std::path::Path;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::api::StateAccess;

use super::persist::Persistor;
use super::slices::StoreState;

/// The application state store: slice-based state behind a lock,
/// persisted through the whitelist after every action.
///
/// Mutators are infallible by design. A store action must never fail a
/// caller over a persistence hiccup, so disk trouble is logged and the
/// in-memory state stays authoritative.
pub struct StateStore {
    state: RwLock<StoreState>,
    persistor: Persistor,
}

impl StateStore {
    /// Open the store, restoring whitelisted slices from disk. A
    /// corrupt state file logs a warning and self-heals to defaults.
    pub fn open(persistor: Persistor) -> Self {
        let state = match persistor.restore() {
            Ok(state) => state,
            Err(error) => {
                warn!("could not restore persisted state: {}; starting fresh", error);
                StoreState::default()
            }
        };
        Self {
            state: RwLock::new(state),
            persistor,
        }
    }

    /// Record identity and credential in one action.
    pub fn login(&self, name: &str, token: &str) {
        {
            let mut state = self.state.write();
            state.auth.name = name.to_string();
            state.auth.access_token = token.to_string();
        }
        self.commit("auth/login");
    }

    pub fn set_identity(&self, name: &str) {
        self.state.write().auth.name = name.to_string();
        self.commit("auth/set_identity");
    }

    pub fn set_credential(&self, token: &str) {
        self.state.write().auth.access_token = token.to_string();
        self.commit("auth/set_credential");
    }

    /// Clear the auth slice only; everything else stays.
    pub fn logout(&self) {
        self.state.write().auth = Default::default();
        self.commit("auth/logout");
    }

    /// Bump the transient request bookkeeping.
    pub fn record_request(&self, endpoint: &str) {
        {
            let mut state = self.state.write();
            state.activity.request_count += 1;
            state.activity.last_endpoint = Some(endpoint.to_string());
            state.activity.last_request_at = Some(chrono::Local::now());
        }
        self.commit("activity/record_request");
    }

    pub fn identity(&self) -> String {
        self.state.read().auth.name.clone()
    }

    /// Point-in-time copy of the whole state.
    pub fn snapshot(&self) -> StoreState {
        self.state.read().clone()
    }

    /// Where the whitelisted slices live on disk.
    pub fn persist_path(&self) -> &Path {
        self.persistor.path()
    }

    /// Log the action, then persist the whitelisted slices. Holding the
    /// lock across file IO is not worth it; persist works on a copy.
    fn commit(&self, action: &str) {
        debug!("store action: {}", action);
        let state = self.state.read().clone();
        if let Err(error) = self.persistor.save(&state) {
            warn!("could not persist store state: {}", error);
        }
    }
}

impl StateAccess for StateStore {
    fn credential(&self) -> Option<String> {
        let token = self.state.read().auth.access_token.clone();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    /// The hard reset behind session expiry: every slice back to its
    /// default and the persisted file gone.
    fn clear_all(&self) {
        *self.state.write() = StoreState::default();
        debug!("store action: clear_all");
        if let Err(error) = self.persistor.purge() {
            warn!("could not purge persisted state: {}", error);
        }
    }
}
