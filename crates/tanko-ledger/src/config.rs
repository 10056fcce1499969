//! Bootstrap configuration.
//!
//! The two privileged identities are deployment parameters, not code: they
//! are read from a TOML file at startup and handed to
//! [`ActivityLedger::new`](crate::ActivityLedger::new).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tanko_types::address::AddressParseError;
use tanko_types::Address;

/// Errors loading or resolving the bootstrap configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An address field does not parse as hex.
    #[error("bad address in `{field}`: {source}")]
    BadAddress {
        /// The offending config field.
        field: &'static str,
        /// The underlying parse failure.
        source: AddressParseError,
    },

    /// An address field resolves to the zero address.
    #[error("`{0}` must not be the zero address")]
    ZeroAddress(&'static str),
}

/// Ledger bootstrap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Administrative owner identity, hex with optional `0x` prefix.
    #[serde(default)]
    pub owner: String,
    /// Platform operator identity, hex with optional `0x` prefix.
    #[serde(default)]
    pub operator: String,
    /// Log level: "debug" | "info" | "warn" | "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            operator: String::new(),
            log_level: default_log_level(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from the default config file location.
    ///
    /// Falls back to defaults if the file does not exist; a missing file is
    /// not an error, but the address fields must then be filled in before
    /// [`owner_address`](Self::owner_address) /
    /// [`operator_address`](Self::operator_address) can succeed.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`] if an existing file cannot be read
    /// - [`ConfigError::Parse`] on invalid TOML
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: LedgerConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the owner identity.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::BadAddress`] if the field does not parse
    /// - [`ConfigError::ZeroAddress`] if it resolves to zero
    pub fn owner_address(&self) -> Result<Address, ConfigError> {
        resolve_address("owner", &self.owner)
    }

    /// Resolve the operator identity.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::BadAddress`] if the field does not parse
    /// - [`ConfigError::ZeroAddress`] if it resolves to zero
    pub fn operator_address(&self) -> Result<Address, ConfigError> {
        resolve_address("operator", &self.operator)
    }

    /// Config file path: `$TANKO_CONFIG` override, else `~/.tanko/config.toml`.
    fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("TANKO_CONFIG") {
            return PathBuf::from(path);
        }
        std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".tanko").join("config.toml"))
            .unwrap_or_else(|_| PathBuf::from("/tmp/tanko/config.toml"))
    }
}

fn resolve_address(field: &'static str, value: &str) -> Result<Address, ConfigError> {
    let addr =
        Address::from_hex(value).map_err(|source| ConfigError::BadAddress { field, source })?;
    if addr.is_zero() {
        return Err(ConfigError::ZeroAddress(field));
    }
    Ok(addr)
}
