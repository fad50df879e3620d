//! Scripted runs
//!
//! A script is a JSON array of steps, each naming the dev account that signs
//! it and the call to make. Accounts are written either as a full address or
//! as `#N` for dev account `N`; amounts are in whole tokens.
//!
//! ```json
//! [
//!   { "signer": 0, "call": { "method": "approve", "spender": "#2", "amount": "100" } },
//!   { "signer": 2, "call": { "method": "transferFrom", "from": "#0", "to": "#1", "amount": "100" } }
//! ]
//! ```

use crate::core::{parse_units, Address, AddressError, Call, UnitsError, TOKEN_DECIMALS};
use crate::crypto::{KeyPair, MAX_DEV_ACCOUNTS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Invalid account reference {0:?}")]
    InvalidAccount(String),
    #[error("Invalid address: {0}")]
    Address(#[from] AddressError),
    #[error("Invalid amount: {0}")]
    Amount(#[from] UnitsError),
    #[error("Step {step}: dev account #{index} is out of range (have {available})")]
    UnknownAccount {
        step: usize,
        index: u32,
        available: usize,
    },
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An account named in a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AccountRef {
    Dev(u32),
    Address(Address),
}

impl AccountRef {
    fn resolve(&self, step: usize, accounts: &[KeyPair]) -> Result<Address, ScriptError> {
        match self {
            AccountRef::Address(address) => Ok(*address),
            AccountRef::Dev(index) => accounts
                .get(*index as usize)
                .map(KeyPair::address)
                .ok_or(ScriptError::UnknownAccount {
                    step,
                    index: *index,
                    available: accounts.len(),
                }),
        }
    }
}

impl FromStr for AccountRef {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('#') {
            Some(index) => index
                .parse()
                .map(AccountRef::Dev)
                .map_err(|_| ScriptError::InvalidAccount(s.to_string())),
            None => Ok(AccountRef::Address(s.parse()?)),
        }
    }
}

impl TryFrom<String> for AccountRef {
    type Error = ScriptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountRef> for String {
    fn from(account: AccountRef) -> Self {
        account.to_string()
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRef::Dev(index) => write!(f, "#{}", index),
            AccountRef::Address(address) => write!(f, "{}", address),
        }
    }
}

/// A call as written in a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum ScriptCall {
    Transfer {
        to: AccountRef,
        amount: String,
    },
    Approve {
        spender: AccountRef,
        amount: String,
    },
    TransferFrom {
        from: AccountRef,
        to: AccountRef,
        amount: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Dev account index that signs the step
    pub signer: u32,
    pub call: ScriptCall,
}

impl ScriptStep {
    /// Turn the step into a ledger call against `accounts`
    pub fn resolve(&self, step: usize, accounts: &[KeyPair]) -> Result<Call, ScriptError> {
        let amount = |text: &str| parse_units(text, TOKEN_DECIMALS);

        Ok(match &self.call {
            ScriptCall::Transfer { to, amount: value } => Call::Transfer {
                to: to.resolve(step, accounts)?,
                amount: amount(value)?,
            },
            ScriptCall::Approve {
                spender,
                amount: value,
            } => Call::Approve {
                spender: spender.resolve(step, accounts)?,
                amount: amount(value)?,
            },
            ScriptCall::TransferFrom {
                from,
                to,
                amount: value,
            } => Call::TransferFrom {
                from: from.resolve(step, accounts)?,
                to: to.resolve(step, accounts)?,
                amount: amount(value)?,
            },
        })
    }

    /// Dev key pair that signs this step
    pub fn signer<'a>(&self, step: usize, accounts: &'a [KeyPair]) -> Result<&'a KeyPair, ScriptError> {
        accounts
            .get(self.signer as usize)
            .ok_or(ScriptError::UnknownAccount {
                step,
                index: self.signer,
                available: accounts.len(),
            })
    }
}

pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Number of dev accounts a script needs, one past the highest `#N` or signer
///
/// Fails on any index at or beyond [`MAX_DEV_ACCOUNTS`] before a key is derived.
pub fn required_accounts(steps: &[ScriptStep]) -> Result<u32, ScriptError> {
    let mut count = 0;
    for (step, script_step) in steps.iter().enumerate() {
        let mut indices = vec![script_step.signer];
        let mut dev = |account: &AccountRef| {
            if let AccountRef::Dev(index) = account {
                indices.push(*index);
            }
        };
        match &script_step.call {
            ScriptCall::Transfer { to, .. } => dev(to),
            ScriptCall::Approve { spender, .. } => dev(spender),
            ScriptCall::TransferFrom { from, to, .. } => {
                dev(from);
                dev(to);
            }
        }

        for index in indices {
            if index >= MAX_DEV_ACCOUNTS {
                return Err(ScriptError::UnknownAccount {
                    step,
                    index,
                    available: MAX_DEV_ACCOUNTS as usize,
                });
            }
            count = count.max(index + 1);
        }
    }
    Ok(count)
}
