//! Core ledger primitives
//!
//! This module contains the building blocks shared by the token ledger and
//! the settlement runtime:
//! - Addresses (fixed-width account identifiers with a null sentinel)
//! - Units (fixed-point amounts scaled by the decimal exponent)
//! - Transactions (signed, nonce-ordered ledger calls)

pub mod address;
pub mod transaction;
pub mod units;

pub use address::{Address, AddressError, ADDRESS_LEN};
pub use transaction::{Call, Transaction, TransactionError, DEFAULT_CHAIN_ID};
pub use units::{
    format_units, parse_units, scale, tokens, Balance, UnitsError, ONE_TOKEN, TOKEN_DECIMALS,
};
