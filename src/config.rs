//! Environment-driven configuration

use crate::state_machine::UserId;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ZOOPLA_BASE_URL: &str = "https://api.alto.zoopladev.co.uk";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set unless USE_MOCK_LISTINGS=true")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Credentials and endpoint for the network-backed provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZooplaConfig {
    pub client_id: String,
    pub client_secret: String,
    pub agency_ref: String,
    pub base_url: String,
    /// Bounded per-request timeout
    pub timeout: Duration,
}

/// Which listing provider to wire in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingsConfig {
    Synthetic,
    Zoopla(ZooplaConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub listings: ListingsConfig,
    /// Identity used by the console transport
    pub console_user: UserId,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let db_path = get("RENT_SEEKER_DB_PATH").map_or_else(
            || {
                let home = get("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(format!("{home}/.rent-seeker/rent_seeker.db"))
            },
            PathBuf::from,
        );

        let listings = if get("USE_MOCK_LISTINGS").as_deref() == Some("true") {
            ListingsConfig::Synthetic
        } else {
            let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));
            let timeout_secs = match get("LISTINGS_TIMEOUT_SECS") {
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: "LISTINGS_TIMEOUT_SECS",
                    value: raw.clone(),
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            };
            ListingsConfig::Zoopla(ZooplaConfig {
                client_id: require("ZOOPLA_CLIENT_ID")?,
                client_secret: require("ZOOPLA_CLIENT_SECRET")?,
                agency_ref: require("ZOOPLA_AGENCY_REF")?,
                base_url: get("ZOOPLA_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_ZOOPLA_BASE_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            })
        };

        let console_user = match get("RENT_SEEKER_CONSOLE_USER") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| ConfigError::Invalid {
                name: "RENT_SEEKER_CONSOLE_USER",
                value: raw.clone(),
            })?,
            None => 1,
        };

        Ok(Self {
            db_path,
            listings,
            console_user: UserId(console_user),
        })
    }
}
