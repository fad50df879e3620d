//! Settlement runtime
//!
//! Deploys token ledgers and applies signed transactions against them one
//! at a time, in a single total order. A transaction is authenticated and
//! checked against the sender's nonce before it is ordered; once ordered it
//! either applies completely or reverts with no ledger change. Reverted
//! transactions still consume the nonce.

use crate::core::{Address, Balance, Call, Transaction, TransactionError, DEFAULT_CHAIN_ID};
use crate::crypto::KeyPair;
use crate::runtime::receipt::{Receipt, ReceiptStatus};
use crate::token::{DeployError, DeployParams, Event, Token, TokenError, TokenManager, TokenMetadata};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

/// Default number of receipts kept in memory
pub const DEFAULT_MAX_RECEIPTS: usize = 1000;

/// Runtime errors. None of these leave a trace in the ledger or the
/// sender's nonce.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Deployment failed: {0}")]
    Deploy(#[from] DeployError),
    #[error("Transaction rejected: {0}")]
    Transaction(#[from] TransactionError),
    #[error("Wrong chain ID: expected {0}, got {1}")]
    WrongChainId(u32, u32),
    #[error("Nonce mismatch for {account}: expected {expected}, got {got}")]
    NonceMismatch {
        account: Address,
        expected: u64,
        got: u64,
    },
    #[error("Token not found: {0}")]
    TokenNotFound(Address),
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Chain ID every submitted transaction must carry
    pub chain_id: u32,
    /// Receipt history length; oldest receipts are dropped first
    pub max_receipts: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            max_receipts: DEFAULT_MAX_RECEIPTS,
        }
    }
}

/// Handle returned by a deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub address: Address,
    pub metadata: TokenMetadata,
}

/// The transaction-ordering layer in front of the token ledgers
#[derive(Debug, Default)]
pub struct Runtime {
    config: RuntimeConfig,
    tokens: TokenManager,
    /// Next expected nonce per sender
    nonces: HashMap<Address, u64>,
    receipts: VecDeque<Receipt>,
    /// Number of transactions ordered so far
    sequence: u64,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    // =========================================================================
    // Deployment
    // =========================================================================

    /// Deploy a token, crediting its whole supply to `deployer`
    pub fn deploy(
        &mut self,
        deployer: Address,
        params: &DeployParams,
    ) -> Result<Deployment, RuntimeError> {
        let token = self.tokens.deploy(deployer, params)?;
        Ok(Deployment {
            address: token.address,
            metadata: token.metadata.clone(),
        })
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Next nonce the runtime will accept from `account`
    pub fn next_nonce(&self, account: &Address) -> u64 {
        self.nonces.get(account).copied().unwrap_or(0)
    }

    /// Sign `call` with `signer`'s next nonce and submit it
    pub fn execute(
        &mut self,
        signer: &KeyPair,
        token: Address,
        call: Call,
    ) -> Result<Receipt, RuntimeError> {
        let nonce = self.next_nonce(&signer.address());
        let tx = Transaction::signed(signer, self.config.chain_id, token, nonce, call)?;
        self.submit(tx)
    }

    /// Authenticate, order and apply one transaction
    pub fn submit(&mut self, tx: Transaction) -> Result<Receipt, RuntimeError> {
        if tx.chain_id != self.config.chain_id {
            return Err(RuntimeError::WrongChainId(self.config.chain_id, tx.chain_id));
        }

        tx.verify()?;

        let expected = self.next_nonce(&tx.from);
        if tx.nonce != expected {
            return Err(RuntimeError::NonceMismatch {
                account: tx.from,
                expected,
                got: tx.nonce,
            });
        }

        let token = self
            .tokens
            .get_mut(&tx.token)
            .ok_or(RuntimeError::TokenNotFound(tx.token))?;

        let outcome = apply(token, &tx.from, &tx.call);

        self.nonces.insert(tx.from, expected + 1);
        self.sequence += 1;

        let (status, events) = match outcome {
            Ok(event) => {
                log::debug!(
                    "#{} {} by {} on {}: {:?}",
                    self.sequence,
                    tx.call.name(),
                    tx.from.short(),
                    tx.token.short(),
                    event
                );
                (ReceiptStatus::Success, vec![event])
            }
            Err(reason) => {
                log::warn!(
                    "#{} {} by {} on {} reverted: {}",
                    self.sequence,
                    tx.call.name(),
                    tx.from.short(),
                    tx.token.short(),
                    reason
                );
                (ReceiptStatus::Reverted(reason), Vec::new())
            }
        };

        let receipt = Receipt {
            tx_hash: tx.hash,
            sequence: self.sequence,
            token: tx.token,
            from: tx.from,
            nonce: tx.nonce,
            method: tx.call.name().to_string(),
            status,
            events,
            timestamp: Utc::now(),
        };

        self.receipts.push_back(receipt.clone());
        while self.receipts.len() > self.config.max_receipts {
            self.receipts.pop_front();
        }

        Ok(receipt)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn token(&self, address: &Address) -> Option<&Token> {
        self.tokens.get(address)
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn balance_of(&self, token: &Address, account: &Address) -> Result<Balance, RuntimeError> {
        self.token(token)
            .map(|t| t.balance_of(account))
            .ok_or(RuntimeError::TokenNotFound(*token))
    }

    pub fn allowance(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
    ) -> Result<Balance, RuntimeError> {
        self.token(token)
            .map(|t| t.allowance(owner, spender))
            .ok_or(RuntimeError::TokenNotFound(*token))
    }

    /// Retained receipts, oldest first
    pub fn receipts(&self) -> impl Iterator<Item = &Receipt> {
        self.receipts.iter()
    }

    /// Number of transactions ordered since start
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Dispatch a call to the ledger with `caller` as the message sender
fn apply(token: &mut Token, caller: &Address, call: &Call) -> Result<Event, TokenError> {
    match *call {
        Call::Transfer { to, amount } => token.transfer(caller, &to, amount).map(Event::from),
        Call::Approve { spender, amount } => {
            token.approve(caller, &spender, amount).map(Event::from)
        }
        Call::TransferFrom { from, to, amount } => token
            .transfer_from(caller, &from, &to, amount)
            .map(Event::from),
    }
}
