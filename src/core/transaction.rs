//! Signed token transactions
//!
//! A transaction names the calling account, the token it targets, a
//! per-sender nonce and one ledger [`Call`]. The sender signs the SHA-256
//! of the canonical JSON encoding of those fields; the settlement runtime
//! authenticates it before anything touches the ledger.

use crate::core::address::Address;
use crate::core::units::{amount_string, Balance};
use crate::crypto::{public_key_from_hex, public_key_to_address, sha256, verify_signature, KeyPair};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default chain ID (for replay protection across runtimes)
pub const DEFAULT_CHAIN_ID: u32 = 1;

/// Transaction-related errors
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Signer {signer} does not match sender {sender}")]
    SenderMismatch { signer: Address, sender: Address },
    #[error("Hash mismatch: transaction was modified after signing")]
    HashMismatch,
    #[error("Crypto error: {0}")]
    CryptoError(#[from] crate::crypto::KeyError),
    #[error("Encoding error: {0}")]
    EncodingError(#[from] serde_json::Error),
}

/// A ledger operation, invoked with the transaction sender as caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Call {
    /// Move `amount` from the sender to `to`
    Transfer {
        to: Address,
        #[serde(with = "amount_string")]
        amount: Balance,
    },
    /// Set the sender's allowance for `spender` to `amount`
    Approve {
        spender: Address,
        #[serde(with = "amount_string")]
        amount: Balance,
    },
    /// Move `amount` from `from` to `to` using the sender's allowance
    TransferFrom {
        from: Address,
        to: Address,
        #[serde(with = "amount_string")]
        amount: Balance,
    },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::Transfer { .. } => "transfer",
            Call::Approve { .. } => "approve",
            Call::TransferFrom { .. } => "transferFrom",
        }
    }
}

/// A signed call against one token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Hex SHA-256 of the signed fields
    pub hash: String,
    pub chain_id: u32,
    /// Caller (`msg.sender`)
    pub from: Address,
    /// Target token address
    pub token: Address,
    /// Sender's transaction counter; must equal the runtime's expected nonce
    pub nonce: u64,
    pub call: Call,
    /// Compressed secp256k1 public key, hex
    pub public_key: String,
    /// Compact ECDSA signature over `hash`, hex
    pub signature: String,
}

impl Transaction {
    /// Build and sign a transaction from `key_pair`'s address
    pub fn signed(
        key_pair: &KeyPair,
        chain_id: u32,
        token: Address,
        nonce: u64,
        call: Call,
    ) -> Result<Self, TransactionError> {
        let from = key_pair.address();
        let digest = signing_digest(chain_id, &from, &token, nonce, &call)?;
        let signature = key_pair.sign(&digest)?;

        Ok(Self {
            hash: hex::encode(&digest),
            chain_id,
            from,
            token,
            nonce,
            call,
            public_key: key_pair.public_key_hex(),
            signature: hex::encode(signature),
        })
    }

    /// Digest the signature commits to
    pub fn signing_data(&self) -> Result<Vec<u8>, TransactionError> {
        signing_digest(self.chain_id, &self.from, &self.token, self.nonce, &self.call)
    }

    /// Check the hash, that the public key owns `from`, and the signature
    pub fn verify(&self) -> Result<(), TransactionError> {
        let digest = self.signing_data()?;
        if hex::encode(&digest) != self.hash {
            return Err(TransactionError::HashMismatch);
        }

        let public_key = public_key_from_hex(&self.public_key)?;
        let signer = public_key_to_address(&public_key);
        if signer != self.from {
            return Err(TransactionError::SenderMismatch {
                signer,
                sender: self.from,
            });
        }

        let signature =
            hex::decode(&self.signature).map_err(|_| TransactionError::InvalidSignature)?;
        if !verify_signature(&public_key, &digest, &signature)? {
            return Err(TransactionError::InvalidSignature);
        }

        Ok(())
    }
}

fn signing_digest(
    chain_id: u32,
    from: &Address,
    token: &Address,
    nonce: u64,
    call: &Call,
) -> Result<Vec<u8>, TransactionError> {
    let encoded = serde_json::to_vec(&(chain_id, from, token, nonce, call))?;
    Ok(sha256(&encoded))
}
