//! Settlement runtime
//!
//! Orders signed transactions, applies them to the token ledgers and
//! returns receipts carrying the emitted Transfer / Approval records.

pub mod receipt;
pub mod runtime;

pub use receipt::{Receipt, ReceiptStatus};
pub use runtime::{Deployment, Runtime, RuntimeConfig, RuntimeError, DEFAULT_MAX_RECEIPTS};
