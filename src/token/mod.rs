//! ERC-20 style fungible token ledger
//!
//! Provides a standard interface for fungible tokens with:
//! - Balances per address
//! - Allowances for delegated transfers
//! - Transfer and approve operations producing Transfer / Approval records
//!
//! # Example
//!
//! ```
//! use token_ledger::core::{tokens, Address};
//! use token_ledger::token::{DeployParams, TokenManager};
//!
//! let deployer: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
//! let receiver: Address = "0x2222222222222222222222222222222222222222".parse().unwrap();
//!
//! let mut manager = TokenManager::new();
//! let address = manager
//!     .deploy(deployer, &DeployParams::new("Lambo Moon Trillionaire", "LMT", "1000000000000"))
//!     .unwrap()
//!     .address;
//!
//! let token = manager.get_mut(&address).unwrap();
//! token.transfer(&deployer, &receiver, tokens(100)).unwrap();
//! assert_eq!(token.balance_of(&receiver), tokens(100));
//! ```

pub mod manager;
pub mod token;

pub use manager::{DeployError, DeployParams, TokenManager, MAX_NAME_LEN, MAX_SYMBOL_LEN};
pub use token::{ApprovalEvent, Event, Token, TokenError, TokenMetadata, TransferEvent};
