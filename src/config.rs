//! Deployment configuration
//!
//! A JSON file describing what to deploy and how the runtime is set up.
//! Every field is optional; missing fields fall back to the defaults below,
//! and command-line flags override whatever the file says.

use crate::crypto::MAX_DEV_ACCOUNTS;
use crate::runtime::RuntimeConfig;
use crate::token::DeployParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_NAME: &str = "Lambo Moon Trillionaire";
pub const DEFAULT_SYMBOL: &str = "LMT";
pub const DEFAULT_INITIAL_SUPPLY: &str = "1000000000000";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Deployer #{0} is out of range: at most 1024 dev accounts")]
    DeployerOutOfRange(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub name: String,
    pub symbol: String,
    /// Initial supply in whole tokens
    pub initial_supply: String,
    /// Dev account index that deploys and receives the supply
    pub deployer: u32,
    pub runtime: RuntimeConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            initial_supply: DEFAULT_INITIAL_SUPPLY.to_string(),
            deployer: 0,
            runtime: RuntimeConfig::default(),
        }
    }
}

impl DeployConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Load `path` if given, else use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Dev account index of the deployer, checked against [`MAX_DEV_ACCOUNTS`]
    pub fn deployer_index(&self) -> Result<u32, ConfigError> {
        if self.deployer >= MAX_DEV_ACCOUNTS {
            return Err(ConfigError::DeployerOutOfRange(self.deployer));
        }
        Ok(self.deployer)
    }

    pub fn deploy_params(&self) -> DeployParams {
        DeployParams::new(&self.name, &self.symbol, &self.initial_supply)
    }
}
