//! Token factory and registry
//!
//! Validates deployment parameters, derives token addresses and owns every
//! deployed ledger.

use crate::core::units::{parse_units, Balance, UnitsError, TOKEN_DECIMALS};
use crate::core::Address;
use crate::crypto::sha256;
use crate::token::token::{Token, TokenMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Longest accepted token name, in characters
pub const MAX_NAME_LEN: usize = 50;
/// Longest accepted token symbol, in characters
pub const MAX_SYMBOL_LEN: usize = 10;

/// Deployment errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    #[error("Invalid name: must be 1-50 characters")]
    InvalidName,
    #[error("Invalid symbol: must be 1-10 characters")]
    InvalidSymbol,
    #[error("Invalid supply: must be greater than 0")]
    InvalidSupply,
    #[error("Invalid supply: {0}")]
    Supply(#[from] UnitsError),
    #[error("Invalid deployer: the null address cannot deploy")]
    InvalidDeployer,
}

/// Constructor arguments, as a deploy script would pass them
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployParams {
    pub name: String,
    pub symbol: String,
    /// Initial supply in whole tokens, as a decimal string
    pub initial_supply: String,
}

impl DeployParams {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        initial_supply: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            initial_supply: initial_supply.into(),
        }
    }

    /// Check name and symbol, and scale the supply to base units
    pub fn validate(&self) -> Result<Balance, DeployError> {
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_NAME_LEN {
            return Err(DeployError::InvalidName);
        }

        let symbol_len = self.symbol.chars().count();
        if symbol_len == 0 || symbol_len > MAX_SYMBOL_LEN {
            return Err(DeployError::InvalidSymbol);
        }

        let total_supply = parse_units(&self.initial_supply, TOKEN_DECIMALS)?;
        if total_supply == 0 {
            return Err(DeployError::InvalidSupply);
        }

        Ok(total_supply)
    }
}

/// Manages all deployed tokens
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenManager {
    /// All tokens by address
    tokens: HashMap<Address, Token>,
    /// Deployment counter for address generation
    nonce: u64,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a new token with the whole supply credited to `deployer`
    pub fn deploy(
        &mut self,
        deployer: Address,
        params: &DeployParams,
    ) -> Result<&Token, DeployError> {
        if deployer.is_null() {
            return Err(DeployError::InvalidDeployer);
        }
        let total_supply = params.validate()?;

        let address = self.generate_address(&deployer, &params.symbol);
        self.nonce += 1;

        let metadata = TokenMetadata::new(
            params.name.clone(),
            params.symbol.clone(),
            total_supply,
            deployer,
        );

        log::info!(
            "Token deployed: {} ({}) at {} by {}",
            metadata.name,
            metadata.symbol,
            address,
            deployer.short()
        );

        Ok(self
            .tokens
            .entry(address)
            .or_insert_with(|| Token::new(address, metadata)))
    }

    /// Token address: first 20 bytes of SHA-256 over deployer, symbol and nonce
    fn generate_address(&self, deployer: &Address, symbol: &str) -> Address {
        let input = format!("{}:{}:{}", deployer, symbol, self.nonce);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&sha256(input.as_bytes())[..20]);
        Address::from_bytes(bytes)
    }

    pub fn get(&self, address: &Address) -> Option<&Token> {
        self.tokens.get(address)
    }

    pub fn get_mut(&mut self, address: &Address) -> Option<&mut Token> {
        self.tokens.get_mut(address)
    }

    pub fn count(&self) -> usize {
        self.tokens.len()
    }
}
