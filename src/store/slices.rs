use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The identity slice: who is logged in and the credential proving it.
/// The only slice on the persistence whitelist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSlice {
    pub name: String,
    pub access_token: String,
}

impl AuthSlice {
    pub fn is_logged_in(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Request bookkeeping. Deliberately off the whitelist: every reload
/// starts with a clean slate here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitySlice {
    pub request_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_request_at: Option<DateTime<Local>>,
}

/// The full store state, one field per slice. Slice names here are the
/// names the persistence whitelist matches against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreState {
    pub auth: AuthSlice,
    pub activity: ActivitySlice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_logged_out_and_idle() {
        let state = StoreState::default();
        assert!(!state.auth.is_logged_in());
        assert_eq!(state.auth.name, "");
        assert_eq!(state.activity.request_count, 0);
        assert_eq!(state.activity.last_endpoint, None);
    }
}
