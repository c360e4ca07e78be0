//! Facility configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use agora_types::{ExchangeParams, GovernanceParams, Principal};
use agora_utils::LogFormat;

use crate::FacilityError;

/// Configuration for an Agora facility.
///
/// Can be loaded from a TOML file via [`FacilityConfig::from_toml_file`] or
/// built programmatically with [`FacilityConfig::new`] (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FacilityConfig {
    /// Initial governance administrator. The only principal that may
    /// withdraw the treasury.
    pub admin: Principal,

    /// The exchange's own account on the token ledger.
    pub exchange_address: Principal,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Proposal lifecycle parameters.
    #[serde(default)]
    pub governance: GovernanceParams,

    /// Pool parameters.
    #[serde(default)]
    pub exchange: ExchangeParams,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl FacilityConfig {
    /// Defaults for everything except the two required addresses.
    pub fn new(admin: Principal, exchange_address: Principal) -> Self {
        Self {
            admin,
            exchange_address,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            governance: GovernanceParams::default(),
            exchange: ExchangeParams::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, FacilityError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, FacilityError> {
        let config: Self = toml::from_str(s).map_err(|e| FacilityError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, FacilityError> {
        toml::to_string_pretty(self).map_err(|e| FacilityError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), FacilityError> {
        if self.admin.is_zero() {
            return Err(FacilityError::Config("admin must not be the zero address".into()));
        }
        if self.exchange_address.is_zero() {
            return Err(FacilityError::Config(
                "exchange_address must not be the zero address".into(),
            ));
        }
        self.governance.validate()?;
        self.exchange.validate()?;
        Ok(())
    }
}
