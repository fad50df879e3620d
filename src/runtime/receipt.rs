//! Transaction receipts
//!
//! A receipt is what the runtime hands back for every ordered transaction,
//! reverted or not.

use crate::core::Address;
use crate::token::{Event, TokenError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of an ordered transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum ReceiptStatus {
    Success,
    /// The ledger rejected the call; no state changed
    Reverted(TokenError),
}

/// Record of one applied transaction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_hash: String,
    /// Position in the runtime's total order, starting at 1
    pub sequence: u64,
    pub token: Address,
    pub from: Address,
    pub nonce: u64,
    /// Ledger method name, e.g. `transferFrom`
    pub method: String,
    pub status: ReceiptStatus,
    /// Records emitted by the call, empty when reverted
    pub events: Vec<Event>,
    pub timestamp: DateTime<Utc>,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }

    /// The rejection, if the call reverted
    pub fn revert_reason(&self) -> Option<&TokenError> {
        match &self.status {
            ReceiptStatus::Success => None,
            ReceiptStatus::Reverted(reason) => Some(reason),
        }
    }
}
