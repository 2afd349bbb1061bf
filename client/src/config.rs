//! Configuration management for the client.

use crate::auth::Capability;
use shutter_core::EntityId;
use std::env;
use std::path::PathBuf;

/// Default location of the local state file (the browser-storage stand-in).
const DEFAULT_STATE_PATH: &str = "shutter-state.json";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST backend
    pub api_base_url: reqwest::Url,
    /// The one user allowed management (create/edit/delete) actions, if any
    pub manager_user_id: Option<EntityId>,
    /// Path of the local state file holding the tombstone sets
    pub state_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = env::var("API_BASE_URL").map_err(|_| ConfigError::MissingApiBaseUrl)?;
        let api_base_url = raw_url
            .parse()
            .map_err(|_| ConfigError::InvalidApiBaseUrl(raw_url))?;

        let manager_user_id = match env::var("MANAGER_USER_ID") {
            Ok(raw) => Some(raw.parse().map_err(|_| ConfigError::InvalidManagerUserId)?),
            Err(_) => None,
        };

        let state_path = env::var("SHUTTER_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_PATH));

        Ok(Self {
            api_base_url,
            manager_user_id,
            state_path,
        })
    }

    /// Derive the capability for a visiting user.
    ///
    /// This is the only place the designated-manager comparison happens;
    /// everything downstream sees an explicit capability, never the raw
    /// configuration value. Not a security boundary.
    pub fn capability_for(&self, user_id: EntityId) -> Capability {
        match self.manager_user_id {
            Some(manager) if manager == user_id => Capability::manager(),
            _ => Capability::read_only(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_BASE_URL environment variable is required")]
    MissingApiBaseUrl,

    #[error("API_BASE_URL is not a valid URL: {0}")]
    InvalidApiBaseUrl(String),

    #[error("Invalid MANAGER_USER_ID value")]
    InvalidManagerUserId,
}
