//! Cryptographic utilities for the ledger
//!
//! This module provides:
//! - SHA-256 / RIPEMD-160 hashing
//! - ECDSA key management (secp256k1) and address derivation

pub mod hash;
pub mod keys;

pub use hash::{hash160, sha256, sha256_hex};
pub use keys::{
    dev_accounts, public_key_from_hex, public_key_to_address, sign_message, verify_signature,
    KeyError, KeyPair, MAX_DEV_ACCOUNTS,
};
