use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::constants::PERSIST_WHITELIST;
use crate::utils::GangwayError;

use super::slices::StoreState;

/// Whitelist-filtered persistence for the store.
///
/// Only top-level slices named in [`PERSIST_WHITELIST`] are written.
/// Restore merges whatever whitelisted slices the file holds over
/// defaults, so everything off the whitelist comes back fresh.
pub struct Persistor {
    path: PathBuf,
}

impl Persistor {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// State file in the user config directory.
    pub fn at_default_location() -> Result<Self, GangwayError> {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "gangway") {
            Ok(Self::new(proj_dirs.config_dir().join("state.toml")))
        } else {
            Err(GangwayError::StoreError(
                "could not determine a home directory for the state file".to_string(),
            ))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whitelisted slices, creating parent directories as
    /// needed.
    pub fn save(&self, state: &StoreState) -> Result<(), GangwayError> {
        let value = toml::Value::try_from(state)?;
        let mut filtered = toml::value::Table::new();
        if let toml::Value::Table(table) = value {
            for slice in PERSIST_WHITELIST {
                if let Some(entry) = table.get(*slice) {
                    filtered.insert((*slice).to_string(), entry.clone());
                }
            }
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(
            &self.path,
            toml::to_string_pretty(&toml::Value::Table(filtered))?,
        )?;
        debug!("persisted store state to {}", self.path.display());
        Ok(())
    }

    /// Load whitelisted slices from disk, merged over defaults. A
    /// missing file is simply a fresh state.
    pub fn restore(&self) -> Result<StoreState, GangwayError> {
        if !self.path.exists() {
            return Ok(StoreState::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let stored: toml::value::Table = toml::from_str(&content)?;

        let mut merged = match toml::Value::try_from(StoreState::default())? {
            toml::Value::Table(table) => table,
            _ => toml::value::Table::new(),
        };
        for slice in PERSIST_WHITELIST {
            if let Some(entry) = stored.get(*slice) {
                merged.insert((*slice).to_string(), entry.clone());
            }
        }

        Ok(toml::Value::Table(merged).try_into()?)
    }

    /// Remove the state file. Fine if it never existed.
    pub fn purge(&self) -> Result<(), GangwayError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
