//! ERC-20 style token ledger
//!
//! Holds balances and allowances for one token and enforces the transfer /
//! approval rules. Every mutating operation checks all of its preconditions
//! before touching state, so a rejected call leaves the ledger exactly as it
//! was.

use crate::core::units::{amount_string, Balance, TOKEN_DECIMALS};
use crate::core::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Reasons a ledger operation is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        #[serde(with = "amount_string")]
        have: Balance,
        #[serde(with = "amount_string")]
        need: Balance,
    },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance {
        #[serde(with = "amount_string")]
        have: Balance,
        #[serde(with = "amount_string")]
        need: Balance,
    },
    #[error("Invalid recipient: cannot transfer to the null address")]
    InvalidRecipient,
    #[error("Invalid spender: cannot approve the null address")]
    InvalidSpender,
}

/// Token metadata (immutable after creation)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenMetadata {
    /// Token name (e.g., "Lambo Moon Trillionaire")
    pub name: String,
    /// Token symbol (e.g., "LMT")
    pub symbol: String,
    /// Decimal places
    pub decimals: u8,
    /// Total supply in base units (fixed at creation)
    #[serde(with = "amount_string")]
    pub total_supply: Balance,
    /// Account credited with the whole supply
    pub deployer: Address,
    /// Timestamp when created
    pub created_at: DateTime<Utc>,
}

impl TokenMetadata {
    /// Metadata for a freshly deployed token. Inputs are expected to be
    /// validated by the deployer already.
    pub fn new(name: String, symbol: String, total_supply: Balance, deployer: Address) -> Self {
        Self {
            name,
            symbol,
            decimals: TOKEN_DECIMALS,
            total_supply,
            deployer,
            created_at: Utc::now(),
        }
    }
}

/// Transfer notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    #[serde(with = "amount_string")]
    pub value: Balance,
}

/// Approval notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub owner: Address,
    pub spender: Address,
    #[serde(with = "amount_string")]
    pub value: Balance,
}

/// Any notification a ledger mutation produces
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    Transfer(TransferEvent),
    Approval(ApprovalEvent),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Transfer(_) => "Transfer",
            Event::Approval(_) => "Approval",
        }
    }
}

impl From<TransferEvent> for Event {
    fn from(event: TransferEvent) -> Self {
        Event::Transfer(event)
    }
}

impl From<ApprovalEvent> for Event {
    fn from(event: ApprovalEvent) -> Self {
        Event::Approval(event)
    }
}

/// An ERC-20 style fungible token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Token address assigned at deployment
    pub address: Address,
    /// Token metadata
    pub metadata: TokenMetadata,
    /// Balances: account -> amount
    balances: HashMap<Address, Balance>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<Address, HashMap<Address, Balance>>,
}

impl Token {
    /// Create a new token with all supply allocated to the deployer
    pub fn new(address: Address, metadata: TokenMetadata) -> Self {
        let mut balances = HashMap::new();
        balances.insert(metadata.deployer, metadata.total_supply);

        Self {
            address,
            metadata,
            balances,
            allowances: HashMap::new(),
        }
    }

    // =========================================================================
    // ERC-20 View Functions
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn total_supply(&self) -> Balance {
        self.metadata.total_supply
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: &Address) -> Balance {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Get the amount `spender` may still move out of `owner`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Balance {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Accounts with a non-zero balance, largest first
    pub fn holders(&self) -> Vec<(Address, Balance)> {
        let mut holders: Vec<(Address, Balance)> = self
            .balances
            .iter()
            .filter(|(_, &b)| b > 0)
            .map(|(a, b)| (*a, *b))
            .collect();
        holders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        holders
    }

    /// Get holder count
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }

    /// Sum of every balance. Always equals `total_supply()`.
    pub fn circulating_supply(&self) -> Balance {
        self.balances.values().sum()
    }

    // =========================================================================
    // ERC-20 Mutating Functions
    // =========================================================================

    /// Move `amount` from `sender` to `recipient`
    pub fn transfer(
        &mut self,
        sender: &Address,
        recipient: &Address,
        amount: Balance,
    ) -> Result<TransferEvent, TokenError> {
        if recipient.is_null() {
            return Err(TokenError::InvalidRecipient);
        }

        let have = self.balance_of(sender);
        if have < amount {
            return Err(TokenError::InsufficientBalance { have, need: amount });
        }

        self.move_balance(sender, recipient, amount);

        Ok(TransferEvent {
            from: *sender,
            to: *recipient,
            value: amount,
        })
    }

    /// Set (not add to) the amount `spender` may move out of `owner`
    pub fn approve(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: Balance,
    ) -> Result<ApprovalEvent, TokenError> {
        if spender.is_null() {
            return Err(TokenError::InvalidSpender);
        }

        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, amount);

        Ok(ApprovalEvent {
            owner: *owner,
            spender: *spender,
            value: amount,
        })
    }

    /// Move `amount` from `owner` to `recipient` on `spender`'s allowance.
    ///
    /// The event is attributed to `owner -> recipient`, not to the spender.
    pub fn transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        recipient: &Address,
        amount: Balance,
    ) -> Result<TransferEvent, TokenError> {
        if recipient.is_null() {
            return Err(TokenError::InvalidRecipient);
        }

        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return Err(TokenError::InsufficientAllowance {
                have: allowed,
                need: amount,
            });
        }

        let have = self.balance_of(owner);
        if have < amount {
            return Err(TokenError::InsufficientBalance { have, need: amount });
        }

        self.move_balance(owner, recipient, amount);
        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, allowed - amount);

        Ok(TransferEvent {
            from: *owner,
            to: *recipient,
            value: amount,
        })
    }

    /// Caller has checked `balance_of(from) >= amount`. The credit cannot
    /// overflow: every balance is bounded by the total supply.
    fn move_balance(&mut self, from: &Address, to: &Address, amount: Balance) {
        *self.balances.entry(*from).or_insert(0) -= amount;
        *self.balances.entry(*to).or_insert(0) += amount;
    }
}
