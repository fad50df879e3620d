//! Token Ledger: an ERC-20 style fungible token ledger in Rust
//!
//! This crate provides:
//! - A token ledger with balances, allowances, transfer / approve /
//!   transferFrom and Transfer / Approval records
//! - A settlement runtime that authenticates secp256k1-signed transactions,
//!   orders them by per-sender nonce and applies each atomically
//! - 20-byte addresses with an explicit null account
//! - Fixed-point amount parsing and formatting (18 decimals)
//! - A deploy / scripted-run CLI
//!
//! # Example
//!
//! ```rust
//! use token_ledger::core::{tokens, Call};
//! use token_ledger::crypto::dev_accounts;
//! use token_ledger::runtime::Runtime;
//! use token_ledger::token::DeployParams;
//!
//! let accounts = dev_accounts(2);
//! let (deployer, receiver) = (&accounts[0], accounts[1].address());
//!
//! let mut runtime = Runtime::default();
//! let token = runtime
//!     .deploy(deployer.address(), &DeployParams::new("Lambo Moon Trillionaire", "LMT", "1000000000000"))
//!     .unwrap()
//!     .address;
//!
//! let receipt = runtime
//!     .execute(deployer, token, Call::Transfer { to: receiver, amount: tokens(100) })
//!     .unwrap();
//! assert!(receipt.is_success());
//! assert_eq!(runtime.balance_of(&token, &receiver).unwrap(), tokens(100));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod crypto;
pub mod runtime;
pub mod token;

// Re-export commonly used types
pub use config::DeployConfig;
pub use core::{Address, Balance, Call, Transaction};
pub use crypto::KeyPair;
pub use runtime::{Receipt, Runtime, RuntimeConfig};
pub use token::{Token, TokenError, TokenManager, TokenMetadata};
